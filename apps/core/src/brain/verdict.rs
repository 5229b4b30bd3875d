//! Verdict - structured output of a classification.
//!
//! Carries the decision together with the signals and the ordered trace of
//! rules that produced it, so callers never need a second call for details.

use serde::{Deserialize, Serialize};

use super::context::ConversationContext;
use super::language::Language;
use super::tone::NEUTRAL_TONE;

/// What each analyzer matched, kept for explainability
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalEvidence {
    pub recruiting: Vec<String>,
    pub generic_openers: Vec<String>,
    pub commercial_markers: Vec<String>,
    pub authentic_markers: Vec<String>,
    pub commercial_pitches: Vec<String>,
    pub technical_terms: Vec<String>,
    pub cold_outreach_buzzwords: Vec<String>,
    pub reply_indicators: Vec<String>,
}

/// Intermediate signals consumed by the score aggregator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalScores {
    pub recruiting_hit: bool,
    pub generic_opener_hit: bool,
    /// 0.0 = authentic, 1.0 = commercial
    pub tone_score: f32,
    /// Weighted jargon hits per token, in [0, 1]
    pub buzzword_density: f32,
    /// Technical terms plus cold-outreach buzzwords, unweighted
    pub buzzword_count: usize,
    pub token_count: usize,
    pub cold_outreach_buzzword_count: usize,
    pub commercial_pitch_pattern_count: usize,
    pub evidence: SignalEvidence,
}

impl Default for SignalScores {
    fn default() -> Self {
        Self {
            recruiting_hit: false,
            generic_opener_hit: false,
            tone_score: NEUTRAL_TONE,
            buzzword_density: 0.0,
            buzzword_count: 0,
            token_count: 0,
            cold_outreach_buzzword_count: 0,
            commercial_pitch_pattern_count: 0,
            evidence: SignalEvidence::default(),
        }
    }
}

/// Final decision for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub is_spam: bool,
    /// Sum of fired rule contributions; may be negative
    pub score: f32,
    pub threshold_used: f32,
    pub context: ConversationContext,
    pub language: Language,
    /// Fired rules, in evaluation order
    pub contributing_reasons: Vec<String>,
    pub signals: SignalScores,
}

impl ClassificationResult {
    /// True when the recruiting rule fired
    pub fn is_recruiting(&self) -> bool {
        self.signals.recruiting_hit
    }

    /// Distance to the threshold (positive means spam side)
    pub fn margin(&self) -> f32 {
        self.score - self.threshold_used
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Spam: {}, Score: {:.2}/{:.2}, Context: {}, Language: {}, Rules: {}",
            if self.is_spam { "yes" } else { "no" },
            self.score,
            self.threshold_used,
            self.context,
            self.language,
            self.contributing_reasons.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: f32, threshold: f32) -> ClassificationResult {
        ClassificationResult {
            is_spam: score >= threshold,
            score,
            threshold_used: threshold,
            context: ConversationContext::Cold,
            language: Language::English,
            contributing_reasons: vec!["recruiting_keyword (+0.60): hiring".to_string()],
            signals: SignalScores::default(),
        }
    }

    #[test]
    fn test_default_signals_are_neutral() {
        let signals = SignalScores::default();
        assert_eq!(signals.tone_score, NEUTRAL_TONE);
        assert!(!signals.recruiting_hit);
        assert_eq!(signals.evidence, SignalEvidence::default());
    }

    #[test]
    fn test_summary() {
        let summary = result(0.6, 0.5).summary();
        assert!(summary.contains("Spam: yes"));
        assert!(summary.contains("Context: cold"));
        assert!(summary.contains("Language: en"));
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(result(0.2, 0.5)).expect("serializable");
        assert_eq!(json["is_spam"], false);
        assert_eq!(json["context"], "cold");
        assert_eq!(json["language"], "en");
        assert!(json["contributing_reasons"].is_array());
        assert!((result(0.2, 0.5).margin() + 0.3).abs() < 1e-6);
    }
}
