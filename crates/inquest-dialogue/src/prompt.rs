//! Persona and question prompt synthesis.
//!
//! The persona message embeds the full ground truth of the mystery in every
//! character's private context — location, weapon and killer, not just the
//! real killer's — because any character may need to reason about the case.
//! It also states the machine-readable output contract the reply parser
//! expects.

use inquest_mystery::{Character, Mystery};

/// The JSON output contract restated on every turn.
const JSON_CONTRACT: &str =
    r#"{"response": "your character response here", "emotion": "your emotional state"}"#;

/// Builds the persona/system message for a character's first contact.
#[must_use]
pub fn persona_message(character: &Character, mystery: &Mystery, question: &str) -> String {
    let reliability = if character.reliable {
        "You are generally truthful and helpful."
    } else {
        "You might hide some facts, be evasive, or provide misleading information. Stay in character."
    };

    format!(
        r#"You are roleplaying as {name} in a murder mystery game.

CHARACTER PROFILE:
- Name: {name}
- Personality: {personality}
- {reliability}

MURDER SCENARIO:
- Victim found in: {location}
- Murder weapon: {weapon}
- Actual killer: {killer}
- Your knowledge about the case: {knowledge:?}

CRITICAL INSTRUCTIONS:
- Stay completely in character
- Answer the detective's question based on your personality and knowledge
- Keep responses concise but engaging
- Don't break character or mention this is a game
- If you don't know something, say so in character
- You MUST respond in valid JSON format only
- Reply in this EXACT JSON structure: {contract}
- Do NOT include any text before or after the JSON
- Valid emotions: happy, sad, angry, nervous, confident, suspicious, worried, neutral, etc.

Detective's question: "{question}"

Your JSON response as {name}:"#,
        name = character.name,
        personality = character.personality,
        reliability = reliability,
        location = mystery.location,
        weapon = mystery.weapon,
        killer = mystery.killer,
        knowledge = character.knowledge,
        contract = JSON_CONTRACT,
        question = question,
    )
}

/// Formats the detective's first question as a transcript entry. The JSON
/// contract is already stated by the persona message that precedes it.
#[must_use]
pub fn initial_question(question: &str) -> String {
    format!("Detective's question: {question}")
}

/// Formats a follow-up question, restating the output contract.
#[must_use]
pub fn follow_up_question(question: &str) -> String {
    format!(
        "Detective's follow up question: {question}\n\nIMPORTANT: You MUST respond in this exact JSON format: {JSON_CONTRACT}"
    )
}
