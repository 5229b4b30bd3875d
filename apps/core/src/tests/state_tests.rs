//! State file tests: load/save round trip, legacy files, and error cases.

use crate::brain::Language;
use crate::error::AppError;
use crate::models::{PendingResponse, STATUS_PENDING_CONFIRMATION};
use crate::state::{State, StateStore};
use chrono::Utc;
use std::fs;
use tempfile::tempdir;

fn pending(chat_id: &str) -> PendingResponse {
    PendingResponse {
        room: "LinkedIn - Jane".to_string(),
        chat_id: chat_id.to_string(),
        sender: "Jane".to_string(),
        message_id: format!("{}-m1", chat_id),
        text_preview: "I came across your profile".to_string(),
        reasons: vec!["generic_opener (+0.40): i came across your profile".to_string()],
        score: 0.7,
        language: Language::English,
        suggested_response: "Thanks for the message, but I'm not interested. Best of luck!".to_string(),
        status: STATUS_PENDING_CONFIRMATION.to_string(),
        detected_at: Utc::now(),
    }
}

#[test]
fn test_missing_file_is_empty_state() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = StateStore::new(dir.path().join("state.json"));

    let state = store.load().expect("missing file loads");
    assert_eq!(state, State::default());
}

#[test]
fn test_save_creates_parent_dirs_and_round_trips() {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = StateStore::new(dir.path().join("nested").join("deeper").join("state.json"));

    let mut state = State::default();
    state.mark_seen("m1");
    state.mark_seen("m2");
    state.push_pending(pending("!room1"));
    store.save(&state).expect("save succeeds");

    assert!(store.path().exists());
    let loaded = store.load().expect("load succeeds");
    assert_eq!(loaded, state);

    let raw = fs::read_to_string(store.path()).expect("readable");
    assert!(raw.contains("\"seen_messages\""));
    assert!(raw.contains("\"pending_responses\""));
}

#[test]
fn test_remove_pending_by_chat() {
    let mut state = State::default();
    state.push_pending(pending("!a"));
    state.push_pending(pending("!b"));
    state.push_pending(pending("!a"));

    assert_eq!(state.remove_pending("!a"), 2);
    assert_eq!(state.remove_pending("!a"), 0);
    assert!(state.find_pending("!b").is_some());
    assert!(state.find_pending("!a").is_none());
}

#[test]
fn test_legacy_state_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("legacy.json");
    fs::write(
        &path,
        r#"{
            "seen_messages": ["m1"],
            "pending_responses": [{
                "room": "LinkedIn - Bob",
                "room_id": "!bob",
                "sender": "Bob",
                "message_id": "m1",
                "text_preview": "Nous proposons...",
                "matches": ["nous proposons"],
                "suggested_response": "Merci pour le message",
                "status": "pending_confirmation"
            }]
        }"#,
    )
    .expect("write legacy file");

    let state = StateStore::new(&path).load().expect("legacy file loads");
    assert!(state.is_seen("m1"));
    let entry = state.find_pending("!bob").expect("legacy entry keyed by room_id");
    assert_eq!(entry.reasons, vec!["nous proposons".to_string()]);
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("state.json");
    fs::write(&path, "{ not json").expect("write corrupt file");

    let result = StateStore::new(&path).load();
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn test_empty_file_is_empty_state() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("state.json");
    fs::write(&path, "  \n").expect("write empty file");

    let state = StateStore::new(&path).load().expect("empty file loads");
    assert!(state.seen_messages.is_empty());
    assert!(state.pending_responses.is_empty());
}
