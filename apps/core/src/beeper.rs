//! Response sink: sends replies and archives chats through the Beeper MCP
//! HTTP endpoint (JSON-RPC 2.0 `tools/call`).

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::AppError;

/// Timeout for a single MCP call
pub const BEEPER_TIMEOUT: Duration = Duration::from_secs(30);

/// Defines the public interface for delivering a reply.
#[async_trait]
pub trait ResponseSink: Send + Sync {
    /// Sends a text message to a chat.
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), AppError>;

    /// Archives a chat.
    async fn archive_chat(&self, chat_id: &str) -> Result<(), AppError>;
}

/// Extract a JSON-RPC `error` member from a plain JSON or SSE body.
fn rpc_error(body: &str) -> Option<String> {
    let payloads = body
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .chain(std::iter::once(body.trim()));

    for payload in payloads {
        if let Ok(value) = serde_json::from_str::<Value>(payload) {
            if let Some(error) = value.get("error") {
                let message = error
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| error.to_string());
                return Some(message);
            }
            if value.pointer("/result/isError").and_then(Value::as_bool) == Some(true) {
                return Some(value["result"]["content"].to_string());
            }
        }
    }
    None
}

/// HTTP client for the Beeper MCP server
#[derive(Debug, Clone)]
pub struct BeeperClient {
    client: Client,
    endpoint: Url,
    token: String,
}

impl BeeperClient {
    pub fn new(endpoint: Url, token: Option<String>) -> Result<Self, AppError> {
        let token = token.ok_or_else(|| {
            AppError::Config("BEEPER_TOKEN is not set; it is required to send replies".to_string())
        })?;
        let client = Client::builder().timeout(BEEPER_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    fn headers(&self) -> Result<HeaderMap, AppError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", self.token))
            .map_err(|e| AppError::Config(format!("Invalid BEEPER_TOKEN: {}", e)))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/event-stream"));
        Ok(headers)
    }

    /// Call an MCP tool and return the raw response body.
    pub async fn call_tool(&self, tool: &str, arguments: Value) -> Result<String, AppError> {
        debug!("MCP tools/call {}", tool);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": {
                "name": tool,
                "arguments": arguments,
            }
        });

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(self.headers()?)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Transport(format!("{} returned {}: {}", tool, status, body.trim())));
        }
        if let Some(message) = rpc_error(&body) {
            return Err(AppError::Transport(format!("{} failed: {}", tool, message)));
        }

        Ok(body)
    }
}

#[async_trait]
impl ResponseSink for BeeperClient {
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), AppError> {
        self.call_tool("send_message", json!({ "chatID": chat_id, "text": text }))
            .await
            .map(|_| ())
    }

    async fn archive_chat(&self, chat_id: &str) -> Result<(), AppError> {
        self.call_tool("archive_chat", json!({ "chatID": chat_id }))
            .await
            .map(|_| ())
    }
}
