//! Prospection classifier - main orchestrator of the brain module.
//!
//! Runs language detection, picks the matching lexicon, then feeds the
//! normalized text to the context, tone and buzzword analyzers before the
//! aggregator makes the decision.
//!
//! The classifier is a pure function of its inputs and the read-only lexicon:
//! it can be shared across threads and called concurrently without locking.

use std::sync::Arc;
use tracing::debug;

use crate::config::EngineConfig;
use crate::models::Message;

use super::aggregator::ScoreAggregator;
use super::buzzwords::BuzzwordAnalyzer;
use super::context::{ContextClassifier, ContextHint};
use super::language::{Language, LanguageDetector};
use super::lexicon::{normalize, Category, LexiconStore};
use super::tone::ToneAnalyzer;
use super::verdict::{ClassificationResult, SignalEvidence, SignalScores};

/// Multi-factor prospection/spam classifier
pub struct ProspectionClassifier {
    config: EngineConfig,
    lexicons: Arc<LexiconStore>,
    language_detector: LanguageDetector,
    context_classifier: ContextClassifier,
    tone_analyzer: ToneAnalyzer,
    buzzword_analyzer: BuzzwordAnalyzer,
    aggregator: ScoreAggregator,
}

impl Default for ProspectionClassifier {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl ProspectionClassifier {
    /// Create a classifier over the built-in lexicons
    pub fn new(config: EngineConfig) -> Self {
        Self::with_lexicons(config, LexiconStore::builtin())
    }

    pub fn with_lexicons(config: EngineConfig, lexicons: Arc<LexiconStore>) -> Self {
        Self {
            language_detector: LanguageDetector::new(config.fallback_language),
            context_classifier: ContextClassifier::new(),
            tone_analyzer: ToneAnalyzer::new(),
            buzzword_analyzer: BuzzwordAnalyzer::new(config.thresholds.technical_term_weight),
            aggregator: ScoreAggregator::new(&config),
            lexicons,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// An override wins when it names a supported language; an unsupported
    /// one degrades to the fallback language.
    fn resolve_language(&self, text: &str, language_override: Option<&str>) -> Language {
        match language_override {
            Some(code) => Language::from_code(code).unwrap_or_else(|| {
                debug!(code, fallback = %self.config.fallback_language, "Unsupported language override");
                self.config.fallback_language
            }),
            None => self.language_detector.detect(text),
        }
    }

    /// Classify one message. Never fails: degenerate input yields a
    /// non-spam result with no reasons.
    pub fn classify(
        &self,
        text: &str,
        context_hint: ContextHint,
        language_override: Option<&str>,
    ) -> ClassificationResult {
        let language = self.resolve_language(text, language_override);
        let lexicon = self.lexicons.for_language(language);
        let normalized = normalize(text);

        // 1. Context
        let resolution = self.context_classifier.resolve(lexicon, &normalized, context_hint);

        // 2. Tone
        let tone = self.tone_analyzer.analyze(lexicon, &normalized);

        // 3. Buzzwords
        let buzz = self.buzzword_analyzer.analyze(lexicon, &normalized);

        // 4. Direct keyword categories
        let recruiting = lexicon.get(Category::Recruiting).matches(&normalized);
        let generic_openers = lexicon.get(Category::GenericOpener).matches(&normalized);
        let commercial_pitches = lexicon.get(Category::CommercialPitch).matches(&normalized);

        let signals = SignalScores {
            recruiting_hit: !recruiting.is_empty(),
            generic_opener_hit: !generic_openers.is_empty(),
            tone_score: tone.score,
            buzzword_density: buzz.density,
            buzzword_count: buzz.raw_count(),
            token_count: buzz.token_count,
            cold_outreach_buzzword_count: buzz.cold_outreach_count(),
            commercial_pitch_pattern_count: commercial_pitches.len(),
            evidence: SignalEvidence {
                recruiting,
                generic_openers,
                commercial_markers: tone.commercial_markers,
                authentic_markers: tone.authentic_markers,
                commercial_pitches,
                technical_terms: buzz.technical_terms,
                cold_outreach_buzzwords: buzz.cold_outreach_buzzwords,
                reply_indicators: resolution.reply_indicators,
            },
        };

        // 5. Decision
        let result = self.aggregator.aggregate(signals, resolution.context, language);
        debug!("{}", result.summary());
        result
    }

    /// Classify a caller-supplied message; absent text counts as empty.
    pub fn classify_message(&self, message: &Message) -> ClassificationResult {
        self.classify(
            message.text.as_deref().unwrap_or_default(),
            message.context_hint,
            message.language_override.as_deref(),
        )
    }
}
