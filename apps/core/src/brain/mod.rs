//! # Brain Module
//!
//! Multi-factor prospection/spam classification for short direct messages
//! (French or English). Pure, synchronous, no I/O.
//!
//! ## Components
//! - `lexicon`: categorized phrase patterns per language
//! - `language`: French/English detection with a configured fallback
//! - `context`: reply-in-thread vs cold-outreach resolution
//! - `tone`: authentic ↔ commercial tone score
//! - `buzzwords`: technical/buzzword density
//! - `aggregator`: weighted rules and context-dependent threshold
//! - `verdict`: output data structures
//! - `analyzer`: main orchestrator

pub mod aggregator;
pub mod analyzer;
pub mod buzzwords;
pub mod context;
pub mod language;
pub mod lexicon;
pub mod tone;
pub mod verdict;

pub use aggregator::ScoreAggregator;
pub use analyzer::ProspectionClassifier;
pub use buzzwords::{BuzzwordAnalyzer, BuzzwordReport};
pub use context::{ContextClassifier, ContextHint, ContextResolution, ConversationContext};
pub use language::{Language, LanguageDetector};
pub use lexicon::{Category, Lexicon, LexiconStore};
pub use tone::{ToneAnalyzer, ToneReport};
pub use verdict::{ClassificationResult, SignalEvidence, SignalScores};
