//! The engine facade the HTTP layer talks to.
//!
//! Owns the registry and the collaborator seams, and implements the five
//! session operations: start, ask, accuse, read timer, toggle timer.

use std::sync::Arc;
use std::time::Duration;

use inquest_core::clock::Clock;
use inquest_core::error::GameError;
use inquest_core::rng::NoiseRng;
use inquest_dialogue::{Interrogator, TextGenerator};
use inquest_mystery::{Mystery, MysteryLoader, MysterySummary};
use inquest_stress::{StressState, compute_stress};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::events::GameEventSink;
use crate::registry::SessionRegistry;
use crate::session::{self, TimerStatus};

/// Engine tunables.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Game clock length in seconds.
    pub session_seconds: i64,
    /// How long a terminal session lingers before the sweep retires it.
    pub retire_grace_secs: i64,
    /// How often the eviction sweep runs.
    pub sweep_interval: Duration,
    /// Upper bound on one collaborator call.
    pub llm_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session_seconds: 3600,
            retire_grace_secs: 300,
            sweep_interval: Duration::from_secs(60),
            llm_timeout: Duration::from_secs(30),
        }
    }
}

/// Ask-character request body.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    /// Which character to question.
    pub character_name: String,
    /// The detective's question.
    pub question: String,
    /// Client-echoed stress for this character; the engine stores no stress
    /// of its own (see DESIGN.md), but validates the echoed value.
    pub current_stress: f64,
}

/// Ask-character response body.
#[derive(Debug, Clone, Serialize)]
pub struct AskOutcome {
    /// Character that answered.
    pub character: String,
    /// The question as asked.
    pub question: String,
    /// In-character response text.
    pub response: String,
    /// Emotion tag for the response.
    pub emotion: String,
    /// New stress level in [0, 100].
    pub stress_level: f64,
    /// `stress_level - current_stress`.
    pub stress_change: f64,
    /// Label derived from the new level.
    pub stress_state: StressState,
}

/// Accusation verdict. The full solution is revealed on any accusation,
/// right or wrong.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    /// Whether the suspect exactly matched the killer.
    pub correct: bool,
    /// The killer's name.
    pub killer: String,
    /// The murder weapon.
    pub weapon: String,
    /// Where the victim was found.
    pub location: String,
    /// Wall-clock seconds since session start.
    pub time_spent: i64,
    /// Questions asked this session.
    pub questions: u32,
    /// Human-readable verdict line.
    pub message: String,
}

/// A freshly created session.
#[derive(Debug, Clone)]
pub struct StartedSession {
    /// The new session's identifier.
    pub session_id: String,
    /// The scenario the session plays against.
    pub mystery: Arc<Mystery>,
}

/// The investigation session engine.
pub struct GameEngine {
    registry: SessionRegistry,
    loader: Arc<dyn MysteryLoader>,
    interrogator: Interrogator,
    rng: Mutex<Box<dyn NoiseRng>>,
    sink: Arc<dyn GameEventSink>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
}

impl GameEngine {
    /// Wires an engine from its collaborators.
    #[must_use]
    pub fn new(
        loader: Arc<dyn MysteryLoader>,
        generator: Arc<dyn TextGenerator>,
        rng: Box<dyn NoiseRng>,
        sink: Arc<dyn GameEventSink>,
        clock: Arc<dyn Clock>,
        config: EngineConfig,
    ) -> Self {
        let interrogator = Interrogator::new(generator, clock.clone(), config.llm_timeout);
        Self {
            registry: SessionRegistry::new(),
            loader,
            interrogator,
            rng: Mutex::new(rng),
            sink,
            clock,
            config,
        }
    }

    /// Lists the playable mysteries.
    ///
    /// # Errors
    ///
    /// Returns `GameError::MysteryLoadFailure` if the catalogue cannot be
    /// read.
    pub async fn list_mysteries(&self) -> Result<Vec<MysterySummary>, GameError> {
        self.loader.list().await
    }

    /// Starts a new session for a mystery and begins its countdown.
    ///
    /// # Errors
    ///
    /// Returns `GameError::MysteryLoadFailure` if the mystery cannot be
    /// loaded.
    pub async fn start_session(
        &self,
        player_id: &str,
        mystery_id: &str,
    ) -> Result<StartedSession, GameError> {
        let mystery = self.loader.load(mystery_id).await?;
        let session = self
            .registry
            .create(
                player_id.to_owned(),
                mystery,
                self.config.session_seconds,
                self.clock.now(),
            )
            .await;

        let handle = tokio::spawn(session::run_countdown(
            session.clone(),
            self.clock.clone(),
            self.sink.clone(),
        ));
        session.attach_countdown(handle.abort_handle()).await;

        if let Err(err) = self
            .sink
            .session_started(session.id(), player_id, mystery_id)
            .await
        {
            tracing::warn!(session_id = %session.id(), error = %err, "failed to record session start");
        }

        tracing::info!(session_id = %session.id(), mystery_id, "session started");
        Ok(StartedSession {
            session_id: session.id().to_owned(),
            mystery: session.mystery().clone(),
        })
    }

    /// Asks a character a question: derives the stress signal and runs one
    /// dialogue exchange.
    ///
    /// Nothing is applied unless the exchange succeeds: a collaborator
    /// failure leaves the transcript, the questions counter and (from the
    /// client's point of view) the stress value untouched.
    ///
    /// # Errors
    ///
    /// `SessionNotFound`, `CharacterNotFound`, `InvalidRequest`,
    /// `GameAlreadyOver`, or `CollaboratorUnavailable`.
    pub async fn ask(&self, session_id: &str, request: AskRequest) -> Result<AskOutcome, GameError> {
        if request.character_name.trim().is_empty() {
            return Err(GameError::InvalidRequest(
                "character_name must not be empty".to_owned(),
            ));
        }
        if request.question.trim().is_empty() {
            return Err(GameError::InvalidRequest(
                "question must not be empty".to_owned(),
            ));
        }
        if !request.current_stress.is_finite()
            || !(0.0..=100.0).contains(&request.current_stress)
        {
            return Err(GameError::InvalidRequest(
                "current_stress must be a number within [0, 100]".to_owned(),
            ));
        }

        let session = self.registry.get(session_id).await?;

        // Serializes asks on this session so transcript entries append in
        // question order even while the collaborator call is in flight.
        let _ask_order = session.interrogation().await;

        let character = session
            .mystery()
            .character(&request.character_name)
            .cloned()
            .ok_or_else(|| GameError::CharacterNotFound(request.character_name.clone()))?;

        let mut transcript = {
            let state = session.state().await;
            if state.game_over {
                return Err(GameError::GameAlreadyOver);
            }
            state
                .transcripts
                .get(&character.name)
                .cloned()
                .unwrap_or_default()
        };

        let stress = {
            let mut rng = self.rng.lock().await;
            compute_stress(
                &request.question,
                &character.personality,
                request.current_stress,
                rng.as_mut(),
            )
        };

        let reply = self
            .interrogator
            .exchange(&character, session.mystery(), &mut transcript, &request.question)
            .await?;

        let questions_asked = {
            let mut state = session.state().await;
            if state.game_over {
                // The clock ran out mid-exchange; terminal state stays frozen.
                return Err(GameError::GameAlreadyOver);
            }
            state.transcripts.insert(character.name.clone(), transcript);
            state.questions_asked += 1;
            state.questions_asked
        };

        tracing::info!(
            session_id,
            character = %character.name,
            from = request.current_stress,
            to = stress.level,
            change = stress.change,
            state = stress.state.as_str(),
            "stress transition"
        );

        if let Err(err) = self
            .sink
            .question_asked(session_id, &character.name, questions_asked)
            .await
        {
            tracing::warn!(session_id, error = %err, "failed to record question event");
        }

        Ok(AskOutcome {
            character: character.name,
            question: request.question,
            response: reply.response,
            emotion: reply.emotion,
            stress_level: stress.level,
            stress_change: stress.change,
            stress_state: stress.state,
        })
    }

    /// Resolves the session with an accusation. The suspect is compared to
    /// the killer with exact string equality, the session transitions to
    /// Resolved regardless of correctness, and the full solution is
    /// returned either way.
    ///
    /// # Errors
    ///
    /// `SessionNotFound` or `GameAlreadyOver`.
    pub async fn accuse(&self, session_id: &str, suspect: &str) -> Result<Verdict, GameError> {
        let session = self.registry.get(session_id).await?;

        let questions = {
            let mut state = session.state().await;
            if state.game_over {
                return Err(GameError::GameAlreadyOver);
            }
            state.game_over = true;
            state.timer_enabled = false;
            state.ended_at = Some(self.clock.now());
            state.questions_asked
        };

        let mystery = session.mystery();
        let correct = suspect == mystery.killer;
        let time_spent = (self.clock.now() - session.started_at()).num_seconds();

        tracing::info!(session_id, suspect, correct, time_spent, "accusation made");
        if let Err(err) = self
            .sink
            .session_completed(session_id, correct, time_spent, questions)
            .await
        {
            tracing::warn!(session_id, error = %err, "failed to record session completion");
        }

        let message = if correct {
            format!(
                "Congratulations! You correctly identified {} as the killer.",
                mystery.killer
            )
        } else {
            format!("Sorry, that's incorrect. The real killer was {}.", mystery.killer)
        };

        Ok(Verdict {
            correct,
            killer: mystery.killer.clone(),
            weapon: mystery.weapon.clone(),
            location: mystery.location.clone(),
            time_spent,
            questions,
            message,
        })
    }

    /// Reads the session's timer fields.
    ///
    /// # Errors
    ///
    /// `SessionNotFound`.
    pub async fn timer_status(&self, session_id: &str) -> Result<TimerStatus, GameError> {
        let session = self.registry.get(session_id).await?;
        Ok(session.timer_status().await)
    }

    /// Toggles the countdown on or off. Returns the new enabled flag.
    ///
    /// # Errors
    ///
    /// `SessionNotFound`, or `GameAlreadyOver` on a terminal session.
    pub async fn toggle_timer(&self, session_id: &str) -> Result<bool, GameError> {
        let session = self.registry.get(session_id).await?;
        let mut state = session.state().await;
        if state.game_over {
            return Err(GameError::GameAlreadyOver);
        }
        state.timer_enabled = !state.timer_enabled;
        Ok(state.timer_enabled)
    }

    /// Removes a session immediately and cancels its countdown.
    pub async fn retire_session(&self, session_id: &str) {
        self.registry.retire(session_id).await;
    }

    /// The live session table.
    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Spawns the periodic eviction sweep that retires terminal sessions
    /// after the grace window.
    pub fn spawn_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(engine.config.sweep_interval);
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = engine
                    .registry
                    .sweep(
                        engine.clock.now(),
                        chrono::Duration::seconds(engine.config.retire_grace_secs),
                    )
                    .await;
                if removed > 0 {
                    tracing::info!(removed, "retired expired sessions");
                }
            }
        })
    }
}
