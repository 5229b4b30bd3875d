//! Score aggregation - the decision core.
//!
//! Fixed weighted rules are evaluated in a stable order. Each fired rule adds
//! its contribution and a human-readable reason. The sum is compared to the
//! threshold of the resolved conversation context.

use crate::config::{EngineConfig, EngineThresholds, RuleWeights};

use super::context::ConversationContext;
use super::language::Language;
use super::verdict::{ClassificationResult, SignalScores};

/// Running score and reasons while rules are evaluated
#[derive(Debug, Clone, Default, PartialEq)]
struct RuleOutcome {
    score: f32,
    reasons: Vec<String>,
}

impl RuleOutcome {
    fn push(&mut self, rule: &str, delta: f32, detail: String) {
        self.score += delta;
        self.reasons.push(format!("{} ({:+.2}): {}", rule, delta, detail));
    }
}

/// Round away float noise so that e.g. 0.6 + 0.4 - 0.2 compares equal to 0.8.
fn round_score(score: f32) -> f32 {
    (score * 10_000.0).round() / 10_000.0
}

/// Combines signal scores into a classification
#[derive(Debug, Clone)]
pub struct ScoreAggregator {
    weights: RuleWeights,
    thresholds: EngineThresholds,
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl ScoreAggregator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            weights: config.weights.clone(),
            thresholds: config.thresholds.clone(),
        }
    }

    pub fn threshold_for(&self, context: ConversationContext) -> f32 {
        match context {
            ConversationContext::Reply => self.thresholds.reply,
            ConversationContext::Cold => self.thresholds.cold,
        }
    }

    /// A lone technical term never counts as dense, however short the message.
    fn high_density(&self, signals: &SignalScores) -> bool {
        let t = &self.thresholds;
        let enough_hits = signals.buzzword_count >= t.density_min_buzzwords
            || signals.cold_outreach_buzzword_count > 0;

        (enough_hits && signals.buzzword_density > t.density)
            || (signals.buzzword_count >= t.short_message_buzzwords
                && signals.token_count <= t.short_message_tokens)
    }

    /// Evaluate every rule and build the result.
    pub fn aggregate(
        &self,
        signals: SignalScores,
        context: ConversationContext,
        language: Language,
    ) -> ClassificationResult {
        let w = &self.weights;
        let t = &self.thresholds;
        let evidence = &signals.evidence;
        let mut outcome = RuleOutcome::default();

        if signals.recruiting_hit {
            outcome.push("recruiting_keyword", w.recruiting, evidence.recruiting.join(", "));
        }

        if signals.generic_opener_hit {
            outcome.push("generic_opener", w.generic_opener, evidence.generic_openers.join(", "));
        }

        if signals.tone_score > t.commercial_tone_above {
            outcome.push(
                "commercial_tone",
                w.commercial_tone,
                format!("tone {:.2} [{}]", signals.tone_score, evidence.commercial_markers.join(", ")),
            );
        }

        if self.high_density(&signals) {
            outcome.push(
                "high_buzzword_density",
                w.buzzword_density,
                format!(
                    "density {:.2}, {} buzzwords in {} tokens",
                    signals.buzzword_density, signals.buzzword_count, signals.token_count
                ),
            );
        }

        if signals.cold_outreach_buzzword_count >= t.cold_outreach_min {
            outcome.push(
                "cold_outreach_buzzwords",
                w.cold_outreach,
                evidence.cold_outreach_buzzwords.join(", "),
            );
        }

        if signals.commercial_pitch_pattern_count >= t.commercial_pitch_min {
            outcome.push(
                "commercial_pitch",
                w.commercial_pitch,
                evidence.commercial_pitches.join(", "),
            );
        }

        if signals.tone_score < t.authentic_tone_below {
            outcome.push(
                "authentic_tone",
                w.authentic_tone,
                format!("tone {:.2} [{}]", signals.tone_score, evidence.authentic_markers.join(", ")),
            );
        }

        let score = round_score(outcome.score);
        let threshold_used = self.threshold_for(context);
        // A message without positive evidence is never spam, whatever the threshold.
        let is_spam = score > 0.0 && score >= threshold_used;

        ClassificationResult {
            is_spam,
            score,
            threshold_used,
            context,
            language,
            contributing_reasons: outcome.reasons,
            signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(signals: SignalScores, context: ConversationContext) -> ClassificationResult {
        ScoreAggregator::default().aggregate(signals, context, Language::English)
    }

    #[test]
    fn test_no_signals() {
        let result = aggregate(SignalScores::default(), ConversationContext::Cold);
        assert!(!result.is_spam);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.threshold_used, 0.5);
        assert!(result.contributing_reasons.is_empty());
    }

    #[test]
    fn test_rules_fire_in_table_order() {
        let signals = SignalScores {
            recruiting_hit: true,
            generic_opener_hit: true,
            tone_score: 0.9,
            buzzword_density: 0.2,
            buzzword_count: 4,
            token_count: 20,
            cold_outreach_buzzword_count: 2,
            commercial_pitch_pattern_count: 2,
            ..SignalScores::default()
        };
        let result = aggregate(signals, ConversationContext::Cold);

        let rules: Vec<&str> = result
            .contributing_reasons
            .iter()
            .map(|r| r.split(' ').next().unwrap_or_default())
            .collect();
        assert_eq!(
            rules,
            vec![
                "recruiting_keyword",
                "generic_opener",
                "commercial_tone",
                "high_buzzword_density",
                "cold_outreach_buzzwords",
                "commercial_pitch",
            ]
        );
        assert!((result.score - 2.3).abs() < 1e-4);
        assert!(result.is_spam);
    }

    #[test]
    fn test_authentic_tone_can_go_negative() {
        let signals = SignalScores {
            tone_score: 0.0,
            ..SignalScores::default()
        };
        let result = aggregate(signals, ConversationContext::Cold);
        assert_eq!(result.score, -0.2);
        assert!(!result.is_spam);
        assert_eq!(result.contributing_reasons.len(), 1);
        assert!(result.contributing_reasons[0].starts_with("authentic_tone (-0.20)"));
    }

    #[test]
    fn test_reply_threshold_is_stricter() {
        let signals = SignalScores {
            recruiting_hit: true,
            ..SignalScores::default()
        };
        let cold = aggregate(signals.clone(), ConversationContext::Cold);
        let reply = aggregate(signals, ConversationContext::Reply);

        assert_eq!(cold.score, reply.score);
        assert!(cold.is_spam);
        assert!(!reply.is_spam);
        assert_eq!(reply.threshold_used, 0.8);
    }

    #[test]
    fn test_exact_threshold_counts_as_spam() {
        // 0.6 + 0.4 - 0.2 lands exactly on the reply threshold
        let signals = SignalScores {
            recruiting_hit: true,
            generic_opener_hit: true,
            tone_score: 0.1,
            ..SignalScores::default()
        };
        let result = aggregate(signals, ConversationContext::Reply);
        assert_eq!(result.score, 0.8);
        assert!(result.is_spam);
    }

    #[test]
    fn test_short_message_buzzword_count() {
        let dense_but_long = SignalScores {
            buzzword_density: 0.05,
            buzzword_count: 3,
            token_count: 60,
            ..SignalScores::default()
        };
        assert!(aggregate(dense_but_long, ConversationContext::Cold)
            .contributing_reasons
            .is_empty());

        let short = SignalScores {
            buzzword_density: 0.05,
            buzzword_count: 3,
            token_count: 30,
            ..SignalScores::default()
        };
        let result = aggregate(short, ConversationContext::Cold);
        assert_eq!(result.score, 0.3);
        assert!(!result.is_spam);
    }

    #[test]
    fn test_density_needs_more_than_one_technical_term() {
        let lone_term = SignalScores {
            buzzword_density: 0.5,
            buzzword_count: 1,
            token_count: 1,
            ..SignalScores::default()
        };
        assert!(aggregate(lone_term, ConversationContext::Cold)
            .contributing_reasons
            .is_empty());

        let lone_buzzword = SignalScores {
            buzzword_density: 0.5,
            buzzword_count: 1,
            token_count: 2,
            cold_outreach_buzzword_count: 1,
            ..SignalScores::default()
        };
        let result = aggregate(lone_buzzword, ConversationContext::Cold);
        assert!(result.contributing_reasons[0].starts_with("high_buzzword_density"));

        let two_terms = SignalScores {
            buzzword_density: 0.25,
            buzzword_count: 2,
            token_count: 4,
            ..SignalScores::default()
        };
        assert_eq!(aggregate(two_terms, ConversationContext::Cold).score, 0.3);
    }
}
