//! User decisions on pending detections: ignore, send, modify, send a
//! custom reply.

use serde::Serialize;
use tracing::{info, warn};

use crate::beeper::ResponseSink;
use crate::brain::Language;
use crate::error::AppError;
use crate::models::PendingResponse;
use crate::state::StateStore;

/// What happened to a pending entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub action: &'static str,
    pub chat_id: String,
    /// Text that was sent, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<String>,
    /// False when the message went out but the chat could not be archived
    pub archived: bool,
    pub removed: usize,
    /// Nothing was sent, archived or removed
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dry_run: bool,
}

/// Everything needed to ask the user for a replacement reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModifyPrompt {
    pub chat_id: String,
    pub sender: String,
    pub current_response: String,
    pub prompt: String,
}

fn modify_prompt_text(language: Language, sender: &str) -> String {
    match language {
        Language::French => format!("Quelle réponse veux-tu envoyer à {} ?", sender),
        Language::English => format!("What reply do you want to send to {}?", sender),
    }
}

fn preview(action: &'static str, chat_id: &str, text: &str) -> ActionOutcome {
    info!("[dry run] Would send to {} and then archive the chat", chat_id);
    ActionOutcome {
        action,
        chat_id: chat_id.to_string(),
        sent: Some(text.to_string()),
        archived: false,
        removed: 0,
        dry_run: true,
    }
}

/// Decisions over the pending queue. Only sending needs a `ResponseSink`.
pub struct Actions<'a> {
    store: &'a StateStore,
}

impl<'a> Actions<'a> {
    pub fn new(store: &'a StateStore) -> Self {
        Self { store }
    }

    fn pending(&self, chat_id: &str) -> Result<PendingResponse, AppError> {
        let state = self.store.load()?;
        state
            .find_pending(chat_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No pending response for chat {}", chat_id)))
    }

    /// Drop the pending entry without replying. Absent entries are fine.
    pub fn ignore(&self, chat_id: &str) -> Result<ActionOutcome, AppError> {
        let mut state = self.store.load()?;
        let removed = state.remove_pending(chat_id);
        self.store.save(&state)?;
        info!("Ignored chat {} ({} pending removed)", chat_id, removed);

        Ok(ActionOutcome {
            action: "ignore",
            chat_id: chat_id.to_string(),
            sent: None,
            archived: false,
            removed,
            dry_run: false,
        })
    }

    fn suggestion(&self, chat_id: &str) -> Result<String, AppError> {
        let pending = self.pending(chat_id)?;
        if pending.suggested_response.trim().is_empty() {
            return Err(AppError::Validation(format!("No suggested response for chat {}", chat_id)));
        }
        Ok(pending.suggested_response)
    }

    /// Send the stored suggestion.
    pub async fn send(&self, sink: &dyn ResponseSink, chat_id: &str) -> Result<ActionOutcome, AppError> {
        let text = self.suggestion(chat_id)?;
        self.deliver(sink, "send", chat_id, &text).await
    }

    /// What `send` would do, without touching the backend or the queue.
    pub fn preview_send(&self, chat_id: &str) -> Result<ActionOutcome, AppError> {
        let text = self.suggestion(chat_id)?;
        Ok(preview("send", chat_id, &text))
    }

    /// Prompt for a replacement reply; the entry stays pending.
    pub fn modify(&self, chat_id: &str) -> Result<ModifyPrompt, AppError> {
        let pending = self.pending(chat_id)?;
        Ok(ModifyPrompt {
            chat_id: pending.chat_id.clone(),
            prompt: modify_prompt_text(pending.language, &pending.sender),
            sender: pending.sender,
            current_response: pending.suggested_response,
        })
    }

    /// Send a caller-provided reply.
    pub async fn send_custom(
        &self,
        sink: &dyn ResponseSink,
        chat_id: &str,
        message: &str,
    ) -> Result<ActionOutcome, AppError> {
        if message.trim().is_empty() {
            return Err(AppError::Validation("Custom message is empty".to_string()));
        }
        self.deliver(sink, "send_custom", chat_id, message).await
    }

    /// What `send_custom` would do, without touching the backend or the queue.
    pub fn preview_send_custom(&self, chat_id: &str, message: &str) -> Result<ActionOutcome, AppError> {
        if message.trim().is_empty() {
            return Err(AppError::Validation("Custom message is empty".to_string()));
        }
        Ok(preview("send_custom", chat_id, message))
    }

    /// Send, archive, then drop the pending entry.
    ///
    /// A failed send leaves the entry pending. A failed archive does not:
    /// the reply is already out and retrying would send it twice.
    async fn deliver(
        &self,
        sink: &dyn ResponseSink,
        action: &'static str,
        chat_id: &str,
        text: &str,
    ) -> Result<ActionOutcome, AppError> {
        sink.send_message(chat_id, text).await?;
        info!("Message sent to {}", chat_id);

        let archived = match sink.archive_chat(chat_id).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to archive chat {} (message was sent): {}", chat_id, e);
                false
            }
        };

        let mut state = self.store.load()?;
        let removed = state.remove_pending(chat_id);
        self.store.save(&state)?;

        Ok(ActionOutcome {
            action,
            chat_id: chat_id.to_string(),
            sent: Some(text.to_string()),
            archived,
            removed,
            dry_run: false,
        })
    }
}
