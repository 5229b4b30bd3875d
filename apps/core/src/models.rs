use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::brain::{ContextHint, Language};

/// Status of a detection waiting for the user's decision.
pub const STATUS_PENDING_CONFIRMATION: &str = "pending_confirmation";

/// A message handed to the classifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Raw message text. `None` is classified as an empty message.
    #[serde(default)]
    pub text: Option<String>,
    /// Context known by the caller (e.g. from thread history).
    #[serde(default)]
    pub context_hint: ContextHint,
    /// Language tag forced by the caller (`fr`, `en`).
    #[serde(default)]
    pub language_override: Option<String>,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_hint(mut self, hint: ContextHint) -> Self {
        self.context_hint = hint;
        self
    }

    pub fn with_language(mut self, code: impl Into<String>) -> Self {
        self.language_override = Some(code.into());
        self
    }
}

/// A chat room as listed by the message source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// A message inside a room, as returned by the message source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomMessage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub sender: String,
    /// True when the message was sent by the account owner.
    #[serde(default, alias = "isSender")]
    pub is_sender: bool,
}

/// A detected prospection message waiting for ignore/send/modify.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingResponse {
    pub room: String,
    #[serde(alias = "room_id")]
    pub chat_id: String,
    pub sender: String,
    pub message_id: String,
    pub text_preview: String,
    /// First contributing reasons of the classification.
    #[serde(default, alias = "matches")]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub score: f32,
    #[serde(default = "default_language")]
    pub language: Language,
    pub suggested_response: String,
    pub status: String,
    #[serde(default = "Utc::now")]
    pub detected_at: DateTime<Utc>,
}

fn default_language() -> Language {
    Language::English
}
