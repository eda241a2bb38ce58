//! The dialogue orchestrator.

use std::sync::Arc;
use std::time::Duration;

use inquest_core::clock::Clock;
use inquest_core::error::GameError;
use inquest_mystery::{Character, Message, Mystery, Role};

use crate::prompt;
use crate::provider::TextGenerator;
use crate::reply::{CharacterReply, parse_reply};
use crate::transcript::Transcript;

/// Turns a detective's question plus a character's accumulated transcript
/// into a structured reply.
///
/// Transcript mutation is transactional: persona, question and reply entries
/// are appended only after the collaborator call succeeds, so a failed ask
/// leaves the transcript exactly as it was and the question can be retried.
pub struct Interrogator {
    generator: Arc<dyn TextGenerator>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl Interrogator {
    /// Creates an orchestrator bound to a generator and a call timeout.
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self {
            generator,
            clock,
            timeout,
        }
    }

    /// Runs one question/reply exchange against the transcript.
    ///
    /// On first contact the persona message is synthesized and prepended;
    /// every turn resends the entire serialized transcript, since the
    /// collaborator holds no state of its own.
    ///
    /// # Errors
    ///
    /// Returns `GameError::CollaboratorUnavailable` if the collaborator call
    /// fails or exceeds the timeout. Malformed-but-present output is never
    /// an error; it is recovered by the layered reply parser.
    pub async fn exchange(
        &self,
        character: &Character,
        mystery: &Mystery,
        transcript: &mut Transcript,
        question: &str,
    ) -> Result<CharacterReply, GameError> {
        let now = self.clock.now();

        let mut pending: Vec<Message> = Vec::new();
        if transcript.is_initial() {
            pending.push(Message {
                role: Role::System,
                content: prompt::persona_message(character, mystery, question),
                emotion: None,
                timestamp: now,
            });
            pending.push(Message {
                role: Role::User,
                content: prompt::initial_question(question),
                emotion: None,
                timestamp: now,
            });
        } else {
            pending.push(Message {
                role: Role::User,
                content: prompt::follow_up_question(question),
                emotion: None,
                timestamp: now,
            });
        }

        let serialized: Vec<&Message> = transcript.messages().iter().chain(pending.iter()).collect();
        let prompt = serde_json::to_string(&serialized)
            .map_err(|e| GameError::CollaboratorUnavailable(e.to_string()))?;

        let raw = tokio::time::timeout(self.timeout, self.generator.generate(&prompt))
            .await
            .map_err(|_| {
                GameError::CollaboratorUnavailable(format!(
                    "text generation timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| GameError::CollaboratorUnavailable(e.to_string()))?;

        let reply = parse_reply(&raw);

        pending.push(Message {
            role: Role::Assistant,
            content: reply.response.clone(),
            emotion: Some(reply.emotion.clone()),
            timestamp: self.clock.now(),
        });
        transcript.extend(pending);

        Ok(reply)
    }
}
