//! Message source: rooms and recent messages from the chat backend.
//!
//! The default implementation shells out to the `mcporter` CLI, which talks to
//! the Beeper MCP server on our behalf.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::{Room, RoomMessage};

/// Timeout for a single mcporter invocation
pub const MCPORTER_TIMEOUT: Duration = Duration::from_secs(30);

/// Defines the public interface for anything that can list rooms and messages.
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Lists every room visible to the account.
    async fn list_rooms(&self) -> Result<Vec<Room>, AppError>;

    /// Returns the most recent messages of a room, oldest first when the
    /// backend provides an order.
    async fn recent_messages(&self, room_id: &str, limit: usize) -> Result<Vec<RoomMessage>, AppError>;
}

/// Parse mcporter's stdout; empty output is an empty list.
pub fn parse_json_list<T: DeserializeOwned>(output: &str) -> Result<Vec<T>, AppError> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(vec![]);
    }
    serde_json::from_str(trimmed).map_err(|e| {
        let preview: String = trimmed.chars().take(200).collect();
        AppError::Source(format!("Invalid JSON from mcporter ({}): {}", e, preview))
    })
}

/// `MessageSource` backed by the mcporter CLI
#[derive(Debug, Clone)]
pub struct McporterSource {
    program: PathBuf,
    server: String,
    timeout: Duration,
}

impl McporterSource {
    /// Resolve `command` in `PATH` and target the given MCP server.
    pub fn new(command: &str, server: &str) -> Result<Self, AppError> {
        let program = which::which(command)?;
        Ok(Self {
            program,
            server: server.to_string(),
            timeout: MCPORTER_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn call(&self, args: &[&str]) -> Result<String, AppError> {
        debug!("mcporter call {} {:?}", self.server, args);

        let output = tokio::time::timeout(
            self.timeout,
            Command::new(&self.program)
                .arg("call")
                .arg(&self.server)
                .args(args)
                .kill_on_drop(true)
                .output(),
        )
        .await??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("mcporter exited with {}: {}", output.status, stderr.trim());
            return Err(AppError::Source(format!(
                "mcporter failed ({}): {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl MessageSource for McporterSource {
    async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        let output = self.call(&["list_rooms"]).await?;
        parse_json_list(&output)
    }

    async fn recent_messages(&self, room_id: &str, limit: usize) -> Result<Vec<RoomMessage>, AppError> {
        let limit = limit.to_string();
        let output = self
            .call(&["get_messages", "--room", room_id, "--limit", &limit])
            .await?;
        parse_json_list(&output)
    }
}
