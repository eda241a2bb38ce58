//! Structured reply parsing.
//!
//! The collaborator returns raw text with no format guarantee. Parsing is a
//! chain of three attempts: strict JSON, JSON extracted between the first
//! `{` and the last `}`, and finally the whole text as the response with a
//! neutral emotion. The chain never fails.

use serde::{Deserialize, Serialize};

/// A character's structured reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterReply {
    /// The in-character response text.
    pub response: String,
    /// The character's emotional state.
    #[serde(default)]
    pub emotion: String,
}

/// Parses a raw collaborator reply into a [`CharacterReply`], recovering
/// from malformed output instead of erroring.
#[must_use]
pub fn parse_reply(raw: &str) -> CharacterReply {
    if let Ok(reply) = serde_json::from_str::<CharacterReply>(raw) {
        return reply;
    }

    if let Some(reply) = extract_embedded_json(raw) {
        return reply;
    }

    tracing::warn!(raw_len = raw.len(), "collaborator reply was not JSON, using raw text");
    CharacterReply {
        response: raw.to_owned(),
        emotion: "neutral".to_owned(),
    }
}

/// Tries to parse the substring between the first `{` and the last `}`.
fn extract_embedded_json(raw: &str) -> Option<CharacterReply> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_json_parses_directly() {
        let reply = parse_reply(r#"{"response": "I was home.", "emotion": "nervous"}"#);

        assert_eq!(reply.response, "I was home.");
        assert_eq!(reply.emotion, "nervous");
    }

    #[test]
    fn test_json_embedded_in_prose_is_extracted() {
        let raw = r#"Sure! {"response":"I was home.","emotion":"nervous"} Thanks."#;

        let reply = parse_reply(raw);

        assert_eq!(reply.response, "I was home.");
        assert_eq!(reply.emotion, "nervous");
    }

    #[test]
    fn test_plain_prose_falls_back_to_neutral() {
        let raw = "I have nothing to say to you, detective.";

        let reply = parse_reply(raw);

        assert_eq!(reply.response, raw);
        assert_eq!(reply.emotion, "neutral");
    }

    #[test]
    fn test_braces_around_garbage_fall_back_to_neutral() {
        let raw = "{this is not json}";

        let reply = parse_reply(raw);

        assert_eq!(reply.response, raw);
        assert_eq!(reply.emotion, "neutral");
    }

    #[test]
    fn test_missing_emotion_defaults_to_empty() {
        let reply = parse_reply(r#"{"response": "Fine."}"#);

        assert_eq!(reply.response, "Fine.");
        assert_eq!(reply.emotion, "");
    }

    #[test]
    fn test_reversed_braces_fall_back() {
        let raw = "weird } text {";

        let reply = parse_reply(raw);

        assert_eq!(reply.response, raw);
        assert_eq!(reply.emotion, "neutral");
    }
}
