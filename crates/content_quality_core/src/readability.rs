//! crates/content_quality_core/src/readability.rs
//!
//! A Flesch-Reading-Ease style readability index.
//!
//! The syllable input is a vowel count, so the result is a relative proxy for
//! comparing drafts against the tuned thresholds, not a calibrated linguistic
//! score. Keep the constants as they are: the default threshold bounds were
//! tuned against exactly this formula.

const BASE: f64 = 206.835;
const SENTENCE_LENGTH_FACTOR: f64 = 1.015;
const SYLLABLE_FACTOR: f64 = 84.6;

/// Returns the readability index clamped to [0, 100]. Zero words or zero
/// sentences yield 0.
pub fn readability_index(words: usize, sentences: usize, syllables: usize) -> f64 {
    if words == 0 || sentences == 0 {
        return 0.0;
    }
    let words = words as f64;
    let score = BASE
        - SENTENCE_LENGTH_FACTOR * (words / sentences as f64)
        - SYLLABLE_FACTOR * (syllables as f64 / words);
    score.clamp(0.0, 100.0)
}
