//! Beeper client tests against a mock MCP server.

use crate::beeper::{BeeperClient, ResponseSink};
use crate::error::AppError;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn client_for(server: &MockServer) -> BeeperClient {
    let url = Url::parse(&format!("{}/v0/mcp", server.uri())).expect("valid mock url");
    BeeperClient::new(url, Some(TOKEN.to_string())).expect("client builds")
}

#[tokio::test]
async fn test_send_message_posts_tools_call() {
    // 1. Arrange
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/mcp"))
        .and(header("authorization", "Bearer test-token"))
        .and(header_exists("accept"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "tools/call",
            "params": {
                "name": "send_message",
                "arguments": { "chatID": "!chat:beeper", "text": "Merci !" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "content": [{ "type": "text", "text": "sent" }] }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // 2. Act
    let result = client_for(&mock_server).send_message("!chat:beeper", "Merci !").await;

    // 3. Assert
    assert!(result.is_ok(), "{:?}", result);
}

#[tokio::test]
async fn test_archive_chat_with_sse_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/mcp"))
        .and(body_partial_json(json!({
            "params": { "name": "archive_chat", "arguments": { "chatID": "!chat:beeper" } }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string("event: message\ndata: {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{\"content\":[]}}\n\n"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).archive_chat("!chat:beeper").await;
    assert!(result.is_ok(), "{:?}", result);
}

#[tokio::test]
async fn test_jsonrpc_error_is_transport_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/mcp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Unknown chat" }
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).send_message("!missing", "hello").await;

    if let Err(AppError::Transport(msg)) = result {
        assert!(msg.contains("send_message"));
        assert!(msg.contains("Unknown chat"));
    } else {
        panic!("Expected AppError::Transport, got {:?}", result);
    }
}

#[tokio::test]
async fn test_http_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v0/mcp"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).archive_chat("!chat").await;

    if let Err(AppError::Transport(msg)) = result {
        assert!(msg.contains("401"));
        assert!(msg.contains("Unauthorized"));
    } else {
        panic!("Expected AppError::Transport, got {:?}", result);
    }
}
