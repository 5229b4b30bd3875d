//! Conversation context resolution: reply inside a thread, or cold outreach.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lexicon::{Category, Lexicon};

/// Context supplied by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextHint {
    #[default]
    Unknown,
    Reply,
    Cold,
}

impl ContextHint {
    /// Derive a hint from the number of our own messages that precede this
    /// one in the thread. No history, or none of ours, leaves the text to decide.
    pub fn from_thread_history(own_prior_messages: Option<usize>) -> Self {
        match own_prior_messages {
            Some(n) if n > 0 => ContextHint::Reply,
            _ => ContextHint::Unknown,
        }
    }
}

impl FromStr for ContextHint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unknown" | "" => Ok(ContextHint::Unknown),
            "reply" => Ok(ContextHint::Reply),
            "cold" => Ok(ContextHint::Cold),
            other => Err(format!("unknown context hint: {}", other)),
        }
    }
}

/// Resolved conversation context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationContext {
    Reply,
    Cold,
}

impl ConversationContext {
    pub fn label(&self) -> &'static str {
        match self {
            ConversationContext::Reply => "reply",
            ConversationContext::Cold => "cold",
        }
    }
}

impl fmt::Display for ConversationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Context decision plus the reply indicators that drove it
#[derive(Debug, Clone, PartialEq)]
pub struct ContextResolution {
    pub context: ConversationContext,
    pub reply_indicators: Vec<String>,
}

/// Decides between reply and cold context
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextClassifier;

impl ContextClassifier {
    pub fn new() -> Self {
        Self
    }

    /// An explicit hint wins; otherwise any reply indicator means `Reply`.
    /// `text` must already be normalized.
    pub fn resolve(&self, lexicon: &Lexicon, text: &str, hint: ContextHint) -> ContextResolution {
        match hint {
            ContextHint::Reply => ContextResolution {
                context: ConversationContext::Reply,
                reply_indicators: vec![],
            },
            ContextHint::Cold => ContextResolution {
                context: ConversationContext::Cold,
                reply_indicators: vec![],
            },
            ContextHint::Unknown => {
                let reply_indicators = lexicon.get(Category::ReplyIndicator).matches(text);
                let context = if reply_indicators.is_empty() {
                    ConversationContext::Cold
                } else {
                    ConversationContext::Reply
                };
                ContextResolution {
                    context,
                    reply_indicators,
                }
            }
        }
    }
}
