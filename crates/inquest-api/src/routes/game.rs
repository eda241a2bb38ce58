//! Game session endpoints: start, ask, accuse, timer.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use inquest_mystery::Character;
use inquest_session::{AskOutcome, AskRequest, TimerStatus, Verdict};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Start-game request body.
#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    /// Which mystery to play.
    pub mystery_id: String,
    /// Owning player; defaults to an anonymous player.
    pub player_id: Option<String>,
}

/// Start-game response body. The solution fields feed the client's reveal
/// screen; the characters never see them in their prompts' dialogue turns.
#[derive(Debug, Serialize)]
pub struct StartGameResponse {
    /// The new session identifier.
    pub session_id: String,
    /// Mystery title.
    pub title: String,
    /// Introduction text shown to the player.
    pub intro: String,
    /// The cast of interrogable characters.
    pub characters: Vec<CharacterView>,
    /// The killer's name.
    pub killer: String,
    /// Where the victim was found.
    pub location: String,
    /// The murder weapon.
    pub weapon: String,
}

/// Player-facing view of one character.
#[derive(Debug, Serialize)]
pub struct CharacterView {
    /// Character name.
    pub name: String,
    /// Personality summary.
    pub personality: String,
}

impl From<&Character> for CharacterView {
    fn from(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            personality: character.personality.clone(),
        }
    }
}

/// Accusation request body.
#[derive(Debug, Deserialize)]
pub struct AccuseRequest {
    /// The accused character's name.
    pub suspect: String,
}

/// Toggle-timer response body.
#[derive(Debug, Serialize)]
pub struct ToggleTimerResponse {
    /// Whether the countdown is running after the toggle.
    pub timer_enabled: bool,
}

/// POST /api/v1/game/start
async fn start_game(
    State(state): State<AppState>,
    Json(body): Json<StartGameRequest>,
) -> Result<Json<StartGameResponse>, ApiError> {
    let player_id = body.player_id.as_deref().unwrap_or("anonymous");
    let started = state
        .engine
        .start_session(player_id, &body.mystery_id)
        .await?;

    let mystery = &started.mystery;
    Ok(Json(StartGameResponse {
        session_id: started.session_id,
        title: mystery.title.clone(),
        intro: mystery.intro.clone(),
        characters: mystery.characters.iter().map(CharacterView::from).collect(),
        killer: mystery.killer.clone(),
        location: mystery.location.clone(),
        weapon: mystery.weapon.clone(),
    }))
}

/// POST /api/v1/game/{session_id}/ask
async fn ask_character(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<AskRequest>,
) -> Result<Json<AskOutcome>, ApiError> {
    let outcome = state.engine.ask(&session_id, body).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/game/{session_id}/accuse
async fn accuse(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<AccuseRequest>,
) -> Result<Json<Verdict>, ApiError> {
    let verdict = state.engine.accuse(&session_id, &body.suspect).await?;
    Ok(Json(verdict))
}

/// GET /api/v1/game/{session_id}/timer
async fn read_timer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<TimerStatus>, ApiError> {
    let status = state.engine.timer_status(&session_id).await?;
    Ok(Json(status))
}

/// POST /api/v1/game/{session_id}/timer/toggle
async fn toggle_timer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ToggleTimerResponse>, ApiError> {
    let timer_enabled = state.engine.toggle_timer(&session_id).await?;
    Ok(Json(ToggleTimerResponse { timer_enabled }))
}

/// Returns the game session router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/start", post(start_game))
        .route("/{session_id}/ask", post(ask_character))
        .route("/{session_id}/accuse", post(accuse))
        .route("/{session_id}/timer", get(read_timer))
        .route("/{session_id}/timer/toggle", post(toggle_timer))
}
