//! Scenario data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role tag on a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Synthesized persona/scenario instructions.
    System,
    /// The detective's question.
    User,
    /// The character's reply.
    Assistant,
}

/// One entry in a character's conversation transcript.
///
/// Transcripts are append-only; the first message for a character is always
/// the synthesized persona message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role tag.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Emotion tag, present on assistant replies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
}

/// A suspect in the mystery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Character name, unique within a mystery.
    pub name: String,
    /// Personality description; drives the stress multipliers and the
    /// persona prompt.
    pub personality: String,
    /// Whether the character's in-fiction answers are meant to be truthful.
    pub reliable: bool,
    /// What this character knows about the case.
    #[serde(default)]
    pub knowledge: Vec<String>,
}

/// The immutable scenario for one game.
///
/// Every character's persona prompt embeds the full ground truth (location,
/// weapon, killer), not just the killer's: any character may need to reason
/// about the case to stay in fiction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mystery {
    /// Scenario title.
    pub title: String,
    /// The killer's name; accusations compare against this with exact
    /// string equality.
    pub killer: String,
    /// The murder weapon.
    pub weapon: String,
    /// Where the victim was found.
    pub location: String,
    /// Introduction text shown at session start.
    #[serde(rename = "introduction")]
    pub intro: String,
    /// The cast, in scenario order.
    pub characters: Vec<Character>,
}

impl Mystery {
    /// Looks up a character by exact name.
    #[must_use]
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }
}
