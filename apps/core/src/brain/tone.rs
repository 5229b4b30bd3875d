//! Tone scoring on the authentic ↔ commercial continuum.
//!
//! `score = c / (a + c + ε)` where `a` and `c` are the authentic and commercial
//! marker counts. With no markers at all the score is the neutral midpoint.

use serde::{Deserialize, Serialize};

use super::lexicon::{Category, Lexicon};

const EPSILON: f32 = 1e-6;

/// Score returned when neither marker set matches
pub const NEUTRAL_TONE: f32 = 0.5;

/// Result of tone analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneReport {
    /// 0.0 = authentic, 1.0 = commercial
    pub score: f32,
    pub authentic_markers: Vec<String>,
    pub commercial_markers: Vec<String>,
}

impl ToneReport {
    pub fn authentic_count(&self) -> usize {
        self.authentic_markers.len()
    }

    pub fn commercial_count(&self) -> usize {
        self.commercial_markers.len()
    }
}

/// Compute the tone score from raw marker counts.
pub fn tone_score(authentic: usize, commercial: usize) -> f32 {
    if authentic == 0 && commercial == 0 {
        return NEUTRAL_TONE;
    }
    let a = authentic as f32;
    let c = commercial as f32;
    (c / (a + c + EPSILON)).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ToneAnalyzer;

impl ToneAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// `text` must already be normalized.
    pub fn analyze(&self, lexicon: &Lexicon, text: &str) -> ToneReport {
        let authentic_markers = lexicon.get(Category::AuthenticTone).matches(text);
        let commercial_markers = lexicon.get(Category::CommercialTone).matches(text);

        ToneReport {
            score: tone_score(authentic_markers.len(), commercial_markers.len()),
            authentic_markers,
            commercial_markers,
        }
    }
}
