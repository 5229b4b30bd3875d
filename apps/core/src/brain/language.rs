//! Language detection for French and English messages.
//!
//! Counts language-characteristic stop-words (and French diacritics) and keeps
//! whichever side has more evidence. Ties and empty text use the fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported message language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Returns the language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::French => "fr",
            Language::English => "en",
        }
    }

    /// Parse a language tag such as `fr`, `EN` or `fr-FR`.
    pub fn from_code(code: &str) -> Option<Self> {
        let primary = code.trim().split(['-', '_']).next().unwrap_or_default();
        match primary.to_ascii_lowercase().as_str() {
            "fr" | "french" | "français" => Some(Language::French),
            "en" | "english" | "anglais" => Some(Language::English),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("unsupported language: {}", s))
    }
}

const FRENCH_WORDS: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "du", "de", "et", "ou", "mais", "je", "tu", "il",
    "elle", "nous", "vous", "ils", "elles", "est", "sont", "pour", "dans", "sur", "avec", "ton",
    "ta", "tes", "votre", "vos", "notre", "nos", "qui", "que", "ça", "si", "pas", "bonjour",
    "salut", "merci",
];

const ENGLISH_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does",
    "i", "you", "he", "she", "it", "we", "they", "and", "or", "but", "for", "with", "from", "to",
    "in", "on", "at", "of", "your", "our", "my", "this", "that", "hello", "hi", "thanks", "please",
];

fn is_french_diacritic(c: char) -> bool {
    matches!(
        c,
        'é' | 'è' | 'ê' | 'ë' | 'à' | 'â' | 'ù' | 'û' | 'ü' | 'ô' | 'î' | 'ï' | 'ç' | 'œ'
    )
}

/// Stop-word based French/English detector
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    fallback: Language,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(Language::English)
    }
}

impl LanguageDetector {
    pub fn new(fallback: Language) -> Self {
        Self { fallback }
    }

    pub fn fallback(&self) -> Language {
        self.fallback
    }

    /// Evidence counts as `(french, english)`
    pub fn scores(&self, text: &str) -> (usize, usize) {
        let lower = text.to_lowercase();
        let mut french = lower.chars().filter(|c| is_french_diacritic(*c)).count();
        let mut english = 0;

        for word in lower.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            if FRENCH_WORDS.contains(&word) {
                french += 1;
            }
            if ENGLISH_WORDS.contains(&word) {
                english += 1;
            }
        }

        (french, english)
    }

    /// Detect the language of a message. Never fails.
    pub fn detect(&self, text: &str) -> Language {
        let (french, english) = self.scores(text);

        if french > english {
            Language::French
        } else if english > french {
            Language::English
        } else {
            self.fallback
        }
    }
}
