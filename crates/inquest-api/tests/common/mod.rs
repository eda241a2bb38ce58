//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use inquest_dialogue::TextGenerator;
use inquest_mystery::FileMysteryLoader;
use inquest_session::{EngineConfig, GameEngine};
use inquest_test_support::{FixedClock, MidpointRng, RecordingEventSink, ScriptedGenerator};
use tempfile::TempDir;
use tower::ServiceExt;

use inquest_api::app;
use inquest_api::state::AppState;

/// Two-character scenario used across the integration tests.
pub const BLACKWOOD_JSON: &str = r#"{
    "title": "The Blackwood Manor Murder",
    "killer": "Eleanor",
    "weapon": "candlestick",
    "location": "the library",
    "introduction": "A stormy night at Blackwood Manor ends in murder.",
    "characters": [
        {
            "name": "Eleanor",
            "personality": "nervous and evasive",
            "reliable": false,
            "knowledge": ["was in the library at midnight"]
        },
        {
            "name": "James",
            "personality": "calm and methodical",
            "reliable": true,
            "knowledge": ["heard a crash from the library"]
        }
    ]
}"#;

/// A fully wired app over deterministic doubles.
pub struct TestApp {
    /// The router under test.
    pub app: Router,
    /// The lifecycle events the engine emitted.
    pub sink: Arc<RecordingEventSink>,
    /// The scripted text generator, for prompt inspection.
    pub generator: Arc<ScriptedGenerator>,
    /// Keeps the mystery directory alive for the test's duration.
    _mysteries: TempDir,
}

/// Build the full app router with the Blackwood mystery on disk, a scripted
/// generator, and deterministic Clock/RNG. Uses the same route structure as
/// `main.rs`.
pub fn build_test_app(script: Vec<String>, config: EngineConfig) -> TestApp {
    let generator = Arc::new(ScriptedGenerator::new(script));
    let (app, sink, mysteries) = build_app_parts(generator.clone(), config);
    TestApp {
        app,
        sink,
        generator,
        _mysteries: mysteries,
    }
}

/// Build the app over an arbitrary generator, for failure-path tests.
pub fn build_app_parts(
    generator: Arc<dyn TextGenerator>,
    config: EngineConfig,
) -> (Router, Arc<RecordingEventSink>, TempDir) {
    let mysteries = TempDir::new().unwrap();
    std::fs::write(mysteries.path().join("blackwood.json"), BLACKWOOD_JSON).unwrap();

    let sink = Arc::new(RecordingEventSink::default());
    let clock = Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ));
    let loader = Arc::new(FileMysteryLoader::new(mysteries.path()));
    let engine = Arc::new(GameEngine::new(
        loader,
        generator,
        Box::new(MidpointRng),
        sink.clone(),
        clock,
        config,
    ));

    (app(AppState::new(engine)), sink, mysteries)
}

/// Start a session for the Blackwood mystery and return its id.
pub async fn start_blackwood(app: &Router) -> String {
    let (status, json) = post_json(
        app.clone(),
        "/api/v1/game/start",
        &serde_json::json!({"mystery_id": "blackwood"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_owned()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
