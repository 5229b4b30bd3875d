//! Buzzword density analysis.
//!
//! Technical terms and cold-outreach buzzwords are counted separately. Only
//! their weighted sum feeds the density fraction, and technical terms carry a
//! reduced weight: a lone technical term never looks like jargon stuffing.

use serde::{Deserialize, Serialize};

use super::lexicon::{Category, Lexicon};

/// Result of buzzword analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuzzwordReport {
    /// Number of tokens in the message
    pub token_count: usize,
    pub technical_terms: Vec<String>,
    pub cold_outreach_buzzwords: Vec<String>,
    /// Weighted hits / tokens, in [0, 1]
    pub density: f32,
}

impl BuzzwordReport {
    /// Technical terms and cold-outreach buzzwords combined, unweighted
    pub fn raw_count(&self) -> usize {
        self.technical_terms.len() + self.cold_outreach_buzzwords.len()
    }

    pub fn cold_outreach_count(&self) -> usize {
        self.cold_outreach_buzzwords.len()
    }
}

/// Split text into tokens on whitespace and punctuation, keeping `-` and `_`.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '-' && c != '_')
        .filter(|s| !s.is_empty())
        .collect()
}

/// Buzzword density analyzer
#[derive(Debug, Clone)]
pub struct BuzzwordAnalyzer {
    technical_weight: f32,
}

impl Default for BuzzwordAnalyzer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl BuzzwordAnalyzer {
    /// `technical_weight` is how much one technical term counts towards
    /// density compared to one cold-outreach buzzword.
    pub fn new(technical_weight: f32) -> Self {
        Self { technical_weight }
    }

    /// `text` must already be normalized.
    pub fn analyze(&self, lexicon: &Lexicon, text: &str) -> BuzzwordReport {
        let token_count = tokenize(text).len();
        let technical_terms = lexicon.get(Category::TechnicalTerm).matches(text);
        let cold_outreach_buzzwords = lexicon.get(Category::ColdOutreachBuzzword).matches(text);

        let density = if token_count == 0 {
            0.0
        } else {
            let weighted = technical_terms.len() as f32 * self.technical_weight
                + cold_outreach_buzzwords.len() as f32;
            (weighted / token_count as f32).clamp(0.0, 1.0)
        };

        BuzzwordReport {
            token_count,
            technical_terms,
            cold_outreach_buzzwords,
            density,
        }
    }
}
