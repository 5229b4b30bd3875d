//! State file: which messages were already classified, and which detections
//! still wait for a decision.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::AppError;
use crate::models::PendingResponse;

/// Number of seen message IDs kept in the state file
pub const MAX_SEEN_MESSAGES: usize = 1000;

/// Persisted state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(default)]
    pub seen_messages: Vec<String>,
    #[serde(default)]
    pub pending_responses: Vec<PendingResponse>,
}

impl State {
    pub fn is_seen(&self, message_id: &str) -> bool {
        self.seen_messages.iter().any(|id| id == message_id)
    }

    /// Record a message ID, keeping only the most recent `MAX_SEEN_MESSAGES`.
    pub fn mark_seen(&mut self, message_id: &str) {
        if self.is_seen(message_id) {
            return;
        }
        self.seen_messages.push(message_id.to_string());
        if self.seen_messages.len() > MAX_SEEN_MESSAGES {
            let excess = self.seen_messages.len() - MAX_SEEN_MESSAGES;
            self.seen_messages.drain(..excess);
        }
    }

    pub fn find_pending(&self, chat_id: &str) -> Option<&PendingResponse> {
        self.pending_responses.iter().find(|p| p.chat_id == chat_id)
    }

    /// Remove every pending entry for a chat. Returns how many were removed.
    pub fn remove_pending(&mut self, chat_id: &str) -> usize {
        let before = self.pending_responses.len();
        self.pending_responses.retain(|p| p.chat_id != chat_id);
        before - self.pending_responses.len()
    }

    pub fn push_pending(&mut self, pending: PendingResponse) {
        self.pending_responses.push(pending);
    }
}

/// JSON file backing the state
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state; a missing file is an empty state.
    pub fn load(&self) -> Result<State, AppError> {
        if !self.path.exists() {
            debug!("No state file at {:?}, starting empty", self.path);
            return Ok(State::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(State::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the state as pretty JSON, creating parent directories.
    pub fn save(&self, state: &State) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        debug!("State saved to {:?}", self.path);
        Ok(())
    }
}
