//! Validating API client: decodes raw transport responses into typed results
//! and owns the long-poll cursor.
//!
//! Every response goes through one envelope decoder: HTTP 200 with
//! `{"ok":true,"result":...}` is success; a parseable error body becomes
//! [`QbotError::Api`]; anything else malformed becomes
//! [`QbotError::Validation`]. Transport failures pass through untouched.

use std::sync::Arc;

use qbot_core::{BotCommand, Message, QbotError, Result, Update};
use qbot_transport::Transport;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::call::{
    AnswerCallbackQuery, ApiCall, ApiResult, EditMessageReplyMarkup, ForwardMessage,
    MyCommandsQuery, SendMessage, SendPoll, SetMyCommands,
};

/// Long-poll fetch parameters.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Maximum updates per fetch.
    pub limit: u32,
    /// Server-side long-poll wait, in seconds. 0 returns immediately.
    pub timeout_secs: u32,
    /// Update kinds to request; empty leaves the platform's default set.
    pub allowed_updates: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            limit: 100,
            timeout_secs: 0,
            allowed_updates: Vec::new(),
        }
    }
}

/// Platform response envelope; `result` is decoded per call.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    result: Option<serde_json::Value>,
    error_code: Option<i64>,
    description: Option<String>,
}

/// Typed client over a [`Transport`]. Owns the update cursor: the smallest
/// `update_id` not yet consumed. Single owner, single writer; concurrent
/// fetches against one client are unrepresentable (`get_updates` takes
/// `&mut self`).
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    offset: i64,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            offset: 0,
        }
    }

    /// Resumes from an externally persisted cursor.
    pub fn with_offset(transport: Arc<dyn Transport>, offset: i64) -> Self {
        Self { transport, offset }
    }

    /// The current cursor value.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Posts one call and decodes the envelope down to its `result` value.
    async fn call_raw(&self, method: &str, params: &serde_json::Value) -> Result<serde_json::Value> {
        let response = self.transport.post(method, params).await?;
        let envelope: ApiEnvelope = serde_json::from_slice(&response.body).map_err(|e| {
            QbotError::Validation(format!(
                "undecodable body for {} (status {}): {}",
                method, response.status, e
            ))
        })?;

        if response.status == 200 && envelope.ok {
            envelope
                .result
                .ok_or_else(|| QbotError::Validation(format!("missing result for {}", method)))
        } else {
            match (envelope.error_code, envelope.description) {
                (Some(code), description) => Err(QbotError::Api {
                    code,
                    description: description.unwrap_or_default(),
                }),
                _ => Err(QbotError::Validation(format!(
                    "unexpected response for {} (status {}, ok: {})",
                    method, response.status, envelope.ok
                ))),
            }
        }
    }

    /// Issues one long-poll fetch from the current cursor. On success the
    /// cursor advances to `max(update_id) + 1` for a non-empty batch and stays
    /// put for an empty one; on any failure it is untouched.
    pub async fn get_updates(&mut self, opts: &FetchOptions) -> Result<Vec<Update>> {
        let mut params = json!({
            "offset": self.offset,
            "limit": opts.limit,
            "timeout": opts.timeout_secs,
        });
        if !opts.allowed_updates.is_empty() {
            params["allowed_updates"] = json!(opts.allowed_updates);
        }

        let result = self.call_raw("getUpdates", &params).await?;
        let updates: Vec<Update> =
            serde_json::from_value(result).map_err(|e| QbotError::Validation(e.to_string()))?;

        if let Some(max_id) = updates.iter().map(|u| u.update_id).max() {
            self.offset = max_id + 1;
            debug!(offset = self.offset, count = updates.len(), "cursor advanced");
        }
        Ok(updates)
    }

    /// Performs one outbound call and decodes its typed result.
    pub async fn execute(&self, call: &ApiCall) -> Result<ApiResult> {
        let params = call.params()?;
        let result = self.call_raw(call.method(), &params).await?;
        decode_result(call, result)
    }

    pub async fn send_message(&self, req: SendMessage) -> Result<Message> {
        self.execute(&ApiCall::SendMessage(req))
            .await
            .and_then(expect_message)
    }

    pub async fn edit_message_reply_markup(&self, req: EditMessageReplyMarkup) -> Result<ApiResult> {
        self.execute(&ApiCall::EditMessageReplyMarkup(req)).await
    }

    pub async fn send_poll(&self, req: SendPoll) -> Result<Message> {
        self.execute(&ApiCall::SendPoll(req))
            .await
            .and_then(expect_message)
    }

    pub async fn answer_callback_query(&self, req: AnswerCallbackQuery) -> Result<()> {
        self.execute(&ApiCall::AnswerCallbackQuery(req)).await?;
        Ok(())
    }

    pub async fn forward_message(&self, req: ForwardMessage) -> Result<Message> {
        self.execute(&ApiCall::ForwardMessage(req))
            .await
            .and_then(expect_message)
    }

    pub async fn set_my_commands(&self, req: SetMyCommands) -> Result<()> {
        self.execute(&ApiCall::SetMyCommands(req)).await?;
        Ok(())
    }

    pub async fn delete_my_commands(&self, req: MyCommandsQuery) -> Result<()> {
        self.execute(&ApiCall::DeleteMyCommands(req)).await?;
        Ok(())
    }

    pub async fn get_my_commands(&self, req: MyCommandsQuery) -> Result<Vec<BotCommand>> {
        match self.execute(&ApiCall::GetMyCommands(req)).await? {
            ApiResult::Commands(commands) => Ok(commands),
            other => {
                warn!(result = ?other, "expected command list in result");
                Err(QbotError::Validation(
                    "expected command list in result".to_string(),
                ))
            }
        }
    }
}

fn expect_message(result: ApiResult) -> Result<Message> {
    match result {
        ApiResult::Message(msg) => Ok(msg),
        other => {
            warn!(result = ?other, "expected message record in result");
            Err(QbotError::Validation(
                "expected message record in result".to_string(),
            ))
        }
    }
}

/// Maps a call's raw `result` value to its typed form.
fn decode_result(call: &ApiCall, result: serde_json::Value) -> Result<ApiResult> {
    match call {
        ApiCall::SendMessage(_) | ApiCall::SendPoll(_) | ApiCall::ForwardMessage(_) => {
            let message: Message =
                serde_json::from_value(result).map_err(|e| QbotError::Validation(e.to_string()))?;
            Ok(ApiResult::Message(message))
        }
        // Editing returns the edited message for own messages, `true` for
        // inline-mode ones.
        ApiCall::EditMessageReplyMarkup(_) => {
            if result.as_bool() == Some(true) {
                Ok(ApiResult::Acknowledged)
            } else {
                let message: Message = serde_json::from_value(result)
                    .map_err(|e| QbotError::Validation(e.to_string()))?;
                Ok(ApiResult::Message(message))
            }
        }
        ApiCall::AnswerCallbackQuery(_)
        | ApiCall::SetMyCommands(_)
        | ApiCall::DeleteMyCommands(_) => match result.as_bool() {
            Some(true) => Ok(ApiResult::Acknowledged),
            _ => Err(QbotError::Validation(format!(
                "expected true acknowledgement, got {}",
                result
            ))),
        },
        ApiCall::GetMyCommands(_) => {
            let commands: Vec<BotCommand> =
                serde_json::from_value(result).map_err(|e| QbotError::Validation(e.to_string()))?;
            Ok(ApiResult::Commands(commands))
        }
        ApiCall::Raw { .. } => Ok(ApiResult::Raw(result)),
    }
}
