//! Unit tests for [`ApiClient`]: envelope decoding and cursor rules.

use std::sync::Arc;

use qbot_core::{BotCommand, QbotError};
use serde_json::json;

use crate::api::{ApiClient, FetchOptions};
use crate::call::{AnswerCallbackQuery, ApiCall, ApiResult, MyCommandsQuery, SendMessage, SetMyCommands};
use crate::test::mock::MockTransport;

fn message_json(message_id: i64) -> serde_json::Value {
    json!({
        "message_id": message_id,
        "date": 1700000000,
        "chat": {"id": 1, "type": "private"},
        "text": "hi"
    })
}

fn update_json(update_id: i64) -> serde_json::Value {
    json!({"update_id": update_id, "message": message_json(update_id * 10)})
}

#[tokio::test]
async fn test_fetch_advances_cursor_past_max_id() {
    let mock = Arc::new(MockTransport::new());
    mock.push_ok(json!([update_json(5), update_json(6), update_json(9)]));

    let mut api = ApiClient::with_offset(mock.clone(), 3);
    let updates = api.get_updates(&FetchOptions::default()).await.unwrap();

    assert_eq!(updates.len(), 3);
    assert_eq!(api.offset(), 10);
    let (method, params) = mock.calls().remove(0);
    assert_eq!(method, "getUpdates");
    assert_eq!(params["offset"], 3);
    assert_eq!(params["limit"], 100);
    assert_eq!(params["timeout"], 0);
}

#[tokio::test]
async fn test_empty_fetch_leaves_cursor() {
    let mock = Arc::new(MockTransport::new());
    mock.push_ok(json!([]));

    let mut api = ApiClient::with_offset(mock, 10);
    let updates = api.get_updates(&FetchOptions::default()).await.unwrap();

    assert!(updates.is_empty());
    assert_eq!(api.offset(), 10);
}

#[tokio::test]
async fn test_malformed_body_fails_validation_and_keeps_cursor() {
    let mock = Arc::new(MockTransport::new());
    mock.push_body(200, "not json at all");

    let mut api = ApiClient::with_offset(mock, 7);
    let err = api.get_updates(&FetchOptions::default()).await.unwrap_err();

    assert!(matches!(err, QbotError::Validation(_)));
    assert_eq!(api.offset(), 7);
}

#[tokio::test]
async fn test_transport_failure_propagates_untouched() {
    let mock = Arc::new(MockTransport::new());
    mock.push_transport_error("connection reset");

    let mut api = ApiClient::new(mock);
    let err = api.get_updates(&FetchOptions::default()).await.unwrap_err();

    match err {
        QbotError::Transport(msg) => assert_eq!(msg, "connection reset"),
        other => panic!("expected transport error, got {:?}", other),
    }
    assert_eq!(api.offset(), 0);
}

#[tokio::test]
async fn test_error_envelope_becomes_api_error() {
    let mock = Arc::new(MockTransport::new());
    mock.push_api_error(400, 400, "Bad Request: chat not found");

    let api = ApiClient::new(mock);
    let err = api
        .send_message(SendMessage::new(1, "hi"))
        .await
        .unwrap_err();

    match err {
        QbotError::Api { code, description } => {
            assert_eq!(code, 400);
            assert_eq!(description, "Bad Request: chat not found");
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_message_decodes_sent_record() {
    let mock = Arc::new(MockTransport::new());
    mock.push_ok(message_json(44));

    let api = ApiClient::new(mock.clone());
    let sent = api.send_message(SendMessage::new(1, "hi")).await.unwrap();

    assert_eq!(sent.message_id, 44);
    let (method, params) = mock.calls().remove(0);
    assert_eq!(method, "sendMessage");
    assert_eq!(params["chat_id"], 1);
    assert_eq!(params["text"], "hi");
}

#[tokio::test]
async fn test_answer_callback_query_expects_true() {
    let mock = Arc::new(MockTransport::new());
    mock.push_ok(json!(true));
    mock.push_ok(json!("unexpected"));

    let api = ApiClient::new(mock);
    api.answer_callback_query(AnswerCallbackQuery::new("q1"))
        .await
        .unwrap();
    let err = api
        .answer_callback_query(AnswerCallbackQuery::new("q2"))
        .await
        .unwrap_err();
    assert!(matches!(err, QbotError::Validation(_)));
}

#[tokio::test]
async fn test_fetch_includes_allowed_updates_when_set() {
    let mock = Arc::new(MockTransport::new());
    mock.push_ok(json!([]));

    let mut api = ApiClient::new(mock.clone());
    let opts = FetchOptions {
        allowed_updates: vec!["message".to_string(), "poll".to_string()],
        ..Default::default()
    };
    api.get_updates(&opts).await.unwrap();

    let (_, params) = mock.calls().remove(0);
    assert_eq!(params["allowed_updates"], json!(["message", "poll"]));
}

#[tokio::test]
async fn test_ok_false_without_error_code_fails_validation() {
    let mock = Arc::new(MockTransport::new());
    mock.push_body(200, r#"{"ok": false}"#);

    let api = ApiClient::new(mock);
    let err = api
        .send_message(SendMessage::new(1, "hi"))
        .await
        .unwrap_err();

    match err {
        QbotError::Validation(msg) => {
            assert!(msg.contains("ok: false"), "message was: {}", msg);
            assert!(msg.contains("status 200"), "message was: {}", msg);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_set_my_commands_acknowledged() {
    let mock = Arc::new(MockTransport::new());
    mock.push_ok(json!(true));

    let api = ApiClient::new(mock.clone());
    api.set_my_commands(SetMyCommands::new(vec![BotCommand::new("help", "Show help")]))
        .await
        .unwrap();

    let (method, params) = mock.calls().remove(0);
    assert_eq!(method, "setMyCommands");
    assert_eq!(params["commands"][0]["command"], "help");
    assert!(params.get("language_code").is_none());
}

#[tokio::test]
async fn test_get_my_commands_decodes_list() {
    let mock = Arc::new(MockTransport::new());
    mock.push_ok(json!([
        {"command": "help", "description": "Show help"},
        {"command": "start", "description": "Start the bot"}
    ]));

    let api = ApiClient::new(mock.clone());
    let commands = api.get_my_commands(MyCommandsQuery::default()).await.unwrap();

    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0], BotCommand::new("help", "Show help"));
    let (method, _) = mock.calls().remove(0);
    assert_eq!(method, "getMyCommands");
}

#[tokio::test]
async fn test_delete_my_commands_targets_language() {
    let mock = Arc::new(MockTransport::new());
    mock.push_ok(json!(true));

    let api = ApiClient::new(mock.clone());
    api.delete_my_commands(MyCommandsQuery {
        language_code: Some("de".to_string()),
    })
    .await
    .unwrap();

    let (method, params) = mock.calls().remove(0);
    assert_eq!(method, "deleteMyCommands");
    assert_eq!(params["language_code"], "de");
}

#[tokio::test]
async fn test_raw_call_returns_undecoded_result() {
    let mock = Arc::new(MockTransport::new());
    mock.push_ok(json!({"id": 1, "is_bot": true, "first_name": "qbot"}));

    let api = ApiClient::new(mock);
    let result = api
        .execute(&ApiCall::Raw {
            method: "getMe".to_string(),
            params: json!({}),
        })
        .await
        .unwrap();

    match result {
        ApiResult::Raw(value) => assert_eq!(value["first_name"], "qbot"),
        other => panic!("expected raw result, got {:?}", other),
    }
}
