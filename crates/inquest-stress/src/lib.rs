//! Inquest Stress — the per-character stress signal.
//!
//! Stress is a 0–100 scalar derived from question content, character
//! personality, and bounded uniform noise. The computation is pure: all
//! randomness comes in through the injected [`NoiseRng`], so a fixed draw
//! makes the output exactly reproducible.
//!
//! The caller supplies the current stress on every question and receives the
//! new value back; the engine stores nothing (see DESIGN.md on the
//! client-as-system-of-record trade-off).

use inquest_core::rng::NoiseRng;
use serde::{Deserialize, Serialize};

/// Accusatory topics. Each match adds 15 to the increase.
const HIGH_STRESS_KEYWORDS: &[&str] = &[
    "murder",
    "kill",
    "weapon",
    "blood",
    "death",
    "guilty",
    "lie",
    "alibi",
    "where were you",
    "motive",
    "why did you",
];

/// Probing topics. Each match adds 8.
const MEDIUM_STRESS_KEYWORDS: &[&str] = &[
    "suspicious",
    "secret",
    "hidden",
    "truth",
    "evidence",
    "witness",
    "saw",
    "heard",
    "relationship",
    "money",
];

/// Calming topics. Each match subtracts 5, floored so the running increase
/// never drops below 1.
const LOW_STRESS_KEYWORDS: &[&str] = &[
    "weather",
    "family",
    "work",
    "hobby",
    "general",
    "hello",
    "how are",
    "nice day",
    "background",
];

/// Base increase applied to every question before keyword scanning.
const BASE_INCREASE: f64 = 5.0;

/// Derived label for a stress value. Never stored; always recomputed from
/// the numeric level via fixed thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressState {
    Calm,
    Composed,
    Nervous,
    Agitated,
    Stressed,
    Panicking,
}

impl StressState {
    /// Maps a stress level to its state label.
    #[must_use]
    pub fn from_level(level: f64) -> Self {
        if level < 25.0 {
            Self::Calm
        } else if level < 40.0 {
            Self::Composed
        } else if level < 55.0 {
            Self::Nervous
        } else if level < 70.0 {
            Self::Agitated
        } else if level < 85.0 {
            Self::Stressed
        } else {
            Self::Panicking
        }
    }

    /// The wire label for this state.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Composed => "composed",
            Self::Nervous => "nervous",
            Self::Agitated => "agitated",
            Self::Stressed => "stressed",
            Self::Panicking => "panicking",
        }
    }
}

/// Result of one stress computation.
#[derive(Debug, Clone, Copy)]
pub struct StressOutcome {
    /// New stress level, clamped to [0, 100].
    pub level: f64,
    /// `level - current_stress`.
    pub change: f64,
    /// Label derived from `level`.
    pub state: StressState,
}

/// Computes the new stress level for a question.
///
/// Keyword matching is case-insensitive substring containment against the
/// question; personality multipliers stack independently (a personality can
/// be both "nervous" and "secretive"). Noise is uniform in [-5, +5].
pub fn compute_stress(
    question: &str,
    personality: &str,
    current_stress: f64,
    rng: &mut dyn NoiseRng,
) -> StressOutcome {
    let question = question.to_lowercase();
    let mut increase = BASE_INCREASE;

    for keyword in HIGH_STRESS_KEYWORDS {
        if question.contains(keyword) {
            increase += 15.0;
        }
    }
    for keyword in MEDIUM_STRESS_KEYWORDS {
        if question.contains(keyword) {
            increase += 8.0;
        }
    }
    for keyword in LOW_STRESS_KEYWORDS {
        if question.contains(keyword) {
            increase = (increase - 5.0).max(1.0);
        }
    }

    let personality = personality.to_lowercase();
    if personality.contains("nervous") {
        increase *= 1.3;
    }
    if personality.contains("calm") {
        increase *= 0.7;
    }
    if personality.contains("secretive") {
        increase *= 1.2;
    }
    if personality.contains("aggressive") {
        increase *= 1.1;
    }

    // Uniform noise in [-5, +5].
    increase += (rng.next_f64() - 0.5) * 10.0;

    let level = (current_stress + increase).clamp(0.0, 100.0);
    StressOutcome {
        level,
        change: level - current_stress,
        state: StressState::from_level(level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// RNG returning a fixed sequence of draws.
    struct SequenceRng(Vec<f64>, usize);

    impl SequenceRng {
        fn new(values: Vec<f64>) -> Self {
            Self(values, 0)
        }
    }

    impl NoiseRng for SequenceRng {
        fn next_f64(&mut self) -> f64 {
            let v = self.0[self.1];
            self.1 += 1;
            v
        }
    }

    /// 0.5 maps to zero noise.
    fn no_noise() -> SequenceRng {
        SequenceRng::new(vec![0.5])
    }

    #[test]
    fn test_neutral_question_increase_is_exactly_base() {
        let mut rng = no_noise();

        let outcome = compute_stress("What did you eat for breakfast?", "stoic", 20.0, &mut rng);

        assert!((outcome.level - 25.0).abs() < f64::EPSILON);
        assert!((outcome.change - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_high_keyword_with_nervous_personality() {
        // (5 + 15) * 1.3 = 26
        let mut rng = no_noise();

        let outcome = compute_stress("Tell me about the murder.", "nervous wreck", 20.0, &mut rng);

        assert!((outcome.level - 46.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_high_keywords_stack() {
        // "murder" + "where were you" -> 5 + 15 + 15 = 35
        let mut rng = no_noise();

        let outcome = compute_stress(
            "Where were you when the murder happened?",
            "stoic",
            20.0,
            &mut rng,
        );

        assert!((outcome.level - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_multipliers_stack_independently() {
        // (5 + 15) * 1.3 * 1.2 = 31.2
        let mut rng = no_noise();

        let outcome = compute_stress(
            "Did you see the weapon?",
            "nervous and secretive",
            0.0,
            &mut rng,
        );

        assert!((outcome.level - 31.2).abs() < 1e-9);
    }

    #[test]
    fn test_calming_keywords_floor_increase_at_one() {
        // Three calming matches against the base of 5 bottom out at 1.
        let mut rng = no_noise();

        let outcome = compute_stress(
            "Hello! How are you? Nice day for it.",
            "stoic",
            50.0,
            &mut rng,
        );

        assert!((outcome.level - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let mut rng = no_noise();

        let outcome = compute_stress("WHY DID YOU do it?", "stoic", 0.0, &mut rng);

        assert!((outcome.level - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_output_clamped_at_hundred() {
        // Max noise draw: next_f64 -> 1.0 gives +5.
        let mut rng = SequenceRng::new(vec![1.0]);

        let outcome = compute_stress("Did you murder him in cold blood?", "nervous", 95.0, &mut rng);

        assert!((outcome.level - 100.0).abs() < f64::EPSILON);
        assert_eq!(outcome.state, StressState::Panicking);
    }

    #[test]
    fn test_output_clamped_at_zero() {
        // Calming question floors the increase at 1; minimum noise (-5)
        // pushes the total negative, which clamps to 0.
        let mut rng = SequenceRng::new(vec![0.0]);

        let outcome = compute_stress("How is the weather?", "calm", 0.0, &mut rng);

        assert!((outcome.level - 0.0).abs() < f64::EPSILON);
        assert_eq!(outcome.state, StressState::Calm);
    }

    #[test]
    fn test_state_thresholds() {
        assert_eq!(StressState::from_level(0.0), StressState::Calm);
        assert_eq!(StressState::from_level(24.9), StressState::Calm);
        assert_eq!(StressState::from_level(25.0), StressState::Composed);
        assert_eq!(StressState::from_level(40.0), StressState::Nervous);
        assert_eq!(StressState::from_level(55.0), StressState::Agitated);
        assert_eq!(StressState::from_level(70.0), StressState::Stressed);
        assert_eq!(StressState::from_level(85.0), StressState::Panicking);
        assert_eq!(StressState::from_level(100.0), StressState::Panicking);
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_value(StressState::Panicking).unwrap();
        assert_eq!(json, "panicking");
    }
}
