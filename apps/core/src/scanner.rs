//! Scan LinkedIn rooms for new prospection messages.

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::brain::{ContextHint, ProspectionClassifier};
use crate::error::AppError;
use crate::models::{PendingResponse, Room, RoomMessage, STATUS_PENDING_CONFIRMATION};
use crate::source::MessageSource;
use crate::state::{State, StateStore};
use crate::templates::ResponseTemplates;

/// Messages fetched per room
pub const MESSAGES_PER_ROOM: usize = 5;
/// Characters of message text kept in a pending entry
pub const PREVIEW_CHARS: usize = 200;
/// Reasons kept in a pending entry
pub const MAX_REASONS: usize = 5;

/// Outcome of one scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub status: &'static str,
    pub rooms_scanned: usize,
    pub messages_checked: usize,
    pub detected: usize,
    pub messages: Vec<PendingResponse>,
}

pub struct Scanner<'a> {
    source: &'a dyn MessageSource,
    classifier: &'a ProspectionClassifier,
    templates: &'a ResponseTemplates,
    room_pattern: String,
}

impl<'a> Scanner<'a> {
    pub fn new(
        source: &'a dyn MessageSource,
        classifier: &'a ProspectionClassifier,
        templates: &'a ResponseTemplates,
        room_pattern: &str,
    ) -> Self {
        Self {
            source,
            classifier,
            templates,
            room_pattern: room_pattern.to_lowercase(),
        }
    }

    fn matches_room(&self, room: &Room) -> bool {
        room.name.to_lowercase().contains(&self.room_pattern)
    }

    /// Scan every matching room and update `state`.
    ///
    /// Seen IDs and detections are always recorded in `state`; the caller
    /// decides whether to persist it (dry runs do not).
    pub async fn scan(&self, state: &mut State) -> Result<ScanReport, AppError> {
        let rooms = self.source.list_rooms().await?;
        let mut report = ScanReport {
            status: "ok",
            rooms_scanned: 0,
            messages_checked: 0,
            detected: 0,
            messages: vec![],
        };

        for room in rooms.iter().filter(|r| self.matches_room(r)) {
            let messages = match self.source.recent_messages(&room.id, MESSAGES_PER_ROOM).await {
                Ok(messages) => messages,
                Err(e) => {
                    warn!("Skipping room {} ({}): {}", room.name, room.id, e);
                    continue;
                }
            };
            report.rooms_scanned += 1;

            for (index, message) in messages.iter().enumerate() {
                if message.id.is_empty() {
                    // Without an id it cannot be deduplicated across scans
                    debug!("Skipping message without id in {} from {}", room.id, message.sender);
                    continue;
                }
                if state.is_seen(&message.id) {
                    continue;
                }
                if !message.is_sender {
                    report.messages_checked += 1;
                    let hint = thread_hint(&messages[..index]);
                    if let Some(pending) = self.inspect(room, message, hint) {
                        info!(
                            "Prospection detected from {}: {:?}",
                            pending.sender,
                            pending.reasons.iter().take(3).collect::<Vec<_>>()
                        );
                        report.messages.push(pending);
                    }
                }
                state.mark_seen(&message.id);
            }
        }

        report.detected = report.messages.len();
        for pending in &report.messages {
            state.push_pending(pending.clone());
        }
        Ok(report)
    }

    /// Load the state, scan, and save the result unless `dry_run`.
    pub async fn run(&self, store: &StateStore, dry_run: bool) -> Result<ScanReport, AppError> {
        let mut state = store.load()?;
        let report = self.scan(&mut state).await?;
        if dry_run {
            info!("Dry run: {} detection(s), state not saved", report.detected);
        } else {
            store.save(&state)?;
        }
        Ok(report)
    }

    fn inspect(&self, room: &Room, message: &RoomMessage, hint: ContextHint) -> Option<PendingResponse> {
        let result = self.classifier.classify(&message.body, hint, None);
        let suggested_response = self.templates.select(&result, &message.sender)?;

        Some(PendingResponse {
            room: room.name.clone(),
            chat_id: room.id.clone(),
            sender: message.sender.clone(),
            message_id: message.id.clone(),
            text_preview: message.body.chars().take(PREVIEW_CHARS).collect(),
            reasons: result.contributing_reasons.iter().take(MAX_REASONS).cloned().collect(),
            score: result.score,
            language: result.language,
            suggested_response,
            status: STATUS_PENDING_CONFIRMATION.to_string(),
            detected_at: Utc::now(),
        })
    }
}

/// Context hint from our own messages earlier in the window.
fn thread_hint(earlier: &[RoomMessage]) -> ContextHint {
    let own = earlier.iter().filter(|m| m.is_sender).count();
    ContextHint::from_thread_history(Some(own))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(id: &str, is_sender: bool) -> RoomMessage {
        RoomMessage {
            id: id.to_string(),
            body: String::new(),
            sender: String::new(),
            is_sender,
        }
    }

    #[test]
    fn test_thread_hint() {
        assert_eq!(thread_hint(&[]), ContextHint::Unknown);
        assert_eq!(thread_hint(&[msg("a", false)]), ContextHint::Unknown);
        assert_eq!(thread_hint(&[msg("a", false), msg("b", true)]), ContextHint::Reply);
    }
}
