//! Integration tests for the game session endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use inquest_session::EngineConfig;
use inquest_test_support::{FailingGenerator, RecordedEvent};
use serde_json::json;

fn reply(response: &str, emotion: &str) -> String {
    json!({"response": response, "emotion": emotion}).to_string()
}

#[tokio::test]
async fn test_start_game_returns_session_and_solution() {
    let test = common::build_test_app(vec![], EngineConfig::default());

    let (status, body) = common::post_json(
        test.app.clone(),
        "/api/v1/game/start",
        &json!({"mystery_id": "blackwood", "player_id": "det-1"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["session_id"].as_str().unwrap().is_empty());
    assert_eq!(body["title"], "The Blackwood Manor Murder");
    assert_eq!(body["killer"], "Eleanor");
    assert_eq!(body["weapon"], "candlestick");
    assert_eq!(body["location"], "the library");
    assert_eq!(body["characters"].as_array().unwrap().len(), 2);
    assert_eq!(body["characters"][0]["name"], "Eleanor");

    let events = test.sink.events();
    assert!(matches!(
        &events[0],
        RecordedEvent::Started { mystery_id, player_id, .. }
            if mystery_id == "blackwood" && player_id == "det-1"
    ));
}

#[tokio::test]
async fn test_start_unknown_mystery_returns_500() {
    let test = common::build_test_app(vec![], EngineConfig::default());

    let (status, body) = common::post_json(
        test.app,
        "/api/v1/game/start",
        &json!({"mystery_id": "unknown"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "mystery_load_failure");
}

#[tokio::test]
async fn test_ask_returns_reply_and_deterministic_stress() {
    // "where were you" and "murder" are both high-stress keywords:
    // 5 + 15 + 15 = 35, then Eleanor's nervous personality scales by 1.3.
    let test = common::build_test_app(
        vec![reply("I was in my room all evening.", "nervous")],
        EngineConfig::default(),
    );
    let session_id = common::start_blackwood(&test.app).await;

    let (status, body) = common::post_json(
        test.app.clone(),
        &format!("/api/v1/game/{session_id}/ask"),
        &json!({
            "character_name": "Eleanor",
            "question": "Where were you when the murder happened?",
            "current_stress": 20.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["character"], "Eleanor");
    assert_eq!(body["response"], "I was in my room all evening.");
    assert_eq!(body["emotion"], "nervous");
    assert!((body["stress_level"].as_f64().unwrap() - 65.5).abs() < 1e-9);
    assert!((body["stress_change"].as_f64().unwrap() - 45.5).abs() < 1e-9);
    assert_eq!(body["stress_state"], "agitated");

    let events = test.sink.events();
    assert!(matches!(
        &events[1],
        RecordedEvent::QuestionAsked { character, total_questions: 1, .. }
            if character == "Eleanor"
    ));
}

#[tokio::test]
async fn test_ask_calm_personality_dampens_stress() {
    let test = common::build_test_app(
        vec![reply("I heard a crash around midnight.", "thoughtful")],
        EngineConfig::default(),
    );
    let session_id = common::start_blackwood(&test.app).await;

    let (status, body) = common::post_json(
        test.app,
        &format!("/api/v1/game/{session_id}/ask"),
        &json!({
            "character_name": "James",
            "question": "Where were you when the murder happened?",
            "current_stress": 20.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    // 35 scaled by the calm multiplier 0.7.
    assert!((body["stress_level"].as_f64().unwrap() - 44.5).abs() < 1e-9);
    assert_eq!(body["stress_state"], "nervous");
}

#[tokio::test]
async fn test_ask_unknown_character_returns_404() {
    let test = common::build_test_app(vec![], EngineConfig::default());
    let session_id = common::start_blackwood(&test.app).await;

    let (status, body) = common::post_json(
        test.app,
        &format!("/api/v1/game/{session_id}/ask"),
        &json!({"character_name": "Moriarty", "question": "Hello?", "current_stress": 0.0}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "character_not_found");
}

#[tokio::test]
async fn test_ask_unknown_session_returns_404() {
    let test = common::build_test_app(vec![], EngineConfig::default());

    let (status, body) = common::post_json(
        test.app,
        "/api/v1/game/no-such-session/ask",
        &json!({"character_name": "Eleanor", "question": "Hello?", "current_stress": 0.0}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");
}

#[tokio::test]
async fn test_ask_out_of_range_stress_returns_400() {
    let test = common::build_test_app(vec![], EngineConfig::default());
    let session_id = common::start_blackwood(&test.app).await;

    let (status, body) = common::post_json(
        test.app,
        &format!("/api/v1/game/{session_id}/ask"),
        &json!({"character_name": "Eleanor", "question": "Hello?", "current_stress": 250.0}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn test_malformed_reply_recovers_as_neutral() {
    let test = common::build_test_app(
        vec!["I refuse to answer that.".to_string()],
        EngineConfig::default(),
    );
    let session_id = common::start_blackwood(&test.app).await;

    let (status, body) = common::post_json(
        test.app,
        &format!("/api/v1/game/{session_id}/ask"),
        &json!({"character_name": "Eleanor", "question": "Hello?", "current_stress": 0.0}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "I refuse to answer that.");
    assert_eq!(body["emotion"], "neutral");
}

#[tokio::test]
async fn test_provider_failure_returns_502_and_session_stays_active() {
    let (app, sink, _mysteries) =
        common::build_app_parts(Arc::new(FailingGenerator), EngineConfig::default());
    let session_id = common::start_blackwood(&app).await;

    let (status, body) = common::post_json(
        app.clone(),
        &format!("/api/v1/game/{session_id}/ask"),
        &json!({"character_name": "Eleanor", "question": "Hello?", "current_stress": 0.0}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "collaborator_unavailable");

    // The session is still playable.
    let (status, timer) =
        common::get_json(app, &format!("/api/v1/game/{session_id}/timer")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(timer["game_over"], false);
    // No question event was recorded for the failed attempt.
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test]
async fn test_follow_up_resends_full_transcript() {
    let test = common::build_test_app(
        vec![
            reply("I was in my room.", "calm"),
            reply("I already told you.", "defensive"),
        ],
        EngineConfig::default(),
    );
    let session_id = common::start_blackwood(&test.app).await;
    let uri = format!("/api/v1/game/{session_id}/ask");

    common::post_json(
        test.app.clone(),
        &uri,
        &json!({"character_name": "Eleanor", "question": "Where were you last night?", "current_stress": 0.0}),
    )
    .await;
    common::post_json(
        test.app.clone(),
        &uri,
        &json!({"character_name": "Eleanor", "question": "Did anyone see you?", "current_stress": 10.0}),
    )
    .await;

    let prompts = test.generator.prompts();
    assert_eq!(prompts.len(), 2);
    // The second prompt carries the whole prior exchange.
    assert!(prompts[1].contains("Where were you last night?"));
    assert!(prompts[1].contains("I was in my room."));
    assert!(prompts[1].contains("Did anyone see you?"));
}

#[tokio::test]
async fn test_accuse_correct_resolves_session() {
    let test = common::build_test_app(
        vec![reply("I was in my room.", "calm")],
        EngineConfig::default(),
    );
    let session_id = common::start_blackwood(&test.app).await;

    common::post_json(
        test.app.clone(),
        &format!("/api/v1/game/{session_id}/ask"),
        &json!({"character_name": "Eleanor", "question": "Hello?", "current_stress": 0.0}),
    )
    .await;

    let (status, body) = common::post_json(
        test.app.clone(),
        &format!("/api/v1/game/{session_id}/accuse"),
        &json!({"suspect": "Eleanor"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], true);
    assert_eq!(body["killer"], "Eleanor");
    assert_eq!(body["weapon"], "candlestick");
    assert_eq!(body["location"], "the library");
    assert_eq!(body["questions"], 1);
    assert!(body["message"].as_str().unwrap().contains("Congratulations"));

    let events = test.sink.events();
    assert!(matches!(
        events.last().unwrap(),
        RecordedEvent::Completed { solved: true, questions: 1, .. }
    ));
}

#[tokio::test]
async fn test_accuse_wrong_suspect_still_reveals_solution() {
    let test = common::build_test_app(vec![], EngineConfig::default());
    let session_id = common::start_blackwood(&test.app).await;

    let (status, body) = common::post_json(
        test.app,
        &format!("/api/v1/game/{session_id}/accuse"),
        &json!({"suspect": "James"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], false);
    assert_eq!(body["killer"], "Eleanor");
    assert!(body["message"].as_str().unwrap().contains("incorrect"));
}

#[tokio::test]
async fn test_terminal_session_returns_409_for_mutations() {
    let test = common::build_test_app(vec![], EngineConfig::default());
    let session_id = common::start_blackwood(&test.app).await;

    common::post_json(
        test.app.clone(),
        &format!("/api/v1/game/{session_id}/accuse"),
        &json!({"suspect": "James"}),
    )
    .await;

    let (status, body) = common::post_json(
        test.app.clone(),
        &format!("/api/v1/game/{session_id}/accuse"),
        &json!({"suspect": "Eleanor"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "game_already_over");

    let (status, _) = common::post_json(
        test.app.clone(),
        &format!("/api/v1/game/{session_id}/ask"),
        &json!({"character_name": "Eleanor", "question": "Hello?", "current_stress": 0.0}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Reads still work on a terminal session.
    let (status, timer) =
        common::get_json(test.app, &format!("/api/v1/game/{session_id}/timer")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(timer["game_over"], true);
}

#[tokio::test]
async fn test_list_mysteries_returns_catalogue() {
    let test = common::build_test_app(vec![], EngineConfig::default());

    let (status, body) = common::get_json(test.app, "/api/v1/mysteries").await;

    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "blackwood");
    assert_eq!(list[0]["characters"], 2);
}
