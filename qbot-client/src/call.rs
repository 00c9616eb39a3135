//! Outbound API calls with their arguments captured, and their typed results.
//!
//! [`ApiCall`] is the closed set of deferred calls the action queue can hold;
//! each variant serializes to the platform's parameter object for its method.

use qbot_core::{BotCommand, InlineKeyboardMarkup, Message, QbotError, Result};
use serde::Serialize;

/// Target chat: numeric id or public `@username`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl From<i64> for ChatTarget {
    fn from(id: i64) -> Self {
        ChatTarget::Id(id)
    }
}

impl From<&str> for ChatTarget {
    fn from(username: &str) -> Self {
        ChatTarget::Username(username.to_string())
    }
}

/// Parameters for `sendMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    pub chat_id: ChatTarget,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl SendMessage {
    pub fn new(chat_id: impl Into<ChatTarget>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            message_thread_id: None,
            parse_mode: None,
            disable_notification: None,
            reply_to_message_id: None,
            reply_markup: None,
        }
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn with_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

/// Parameters for `editMessageReplyMarkup`. A `None` markup clears the keyboard.
#[derive(Debug, Clone, Serialize)]
pub struct EditMessageReplyMarkup {
    pub chat_id: ChatTarget,
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// Parameters for `sendPoll`.
#[derive(Debug, Clone, Serialize)]
pub struct SendPoll {
    pub chat_id: ChatTarget,
    pub question: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allows_multiple_answers: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_option_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
}

impl SendPoll {
    pub fn new(
        chat_id: impl Into<ChatTarget>,
        question: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            question: question.into(),
            options,
            is_anonymous: None,
            kind: None,
            allows_multiple_answers: None,
            correct_option_id: None,
            is_closed: None,
            reply_to_message_id: None,
        }
    }
}

/// Parameters for `answerCallbackQuery`.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_alert: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<i64>,
}

impl AnswerCallbackQuery {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: None,
            show_alert: None,
            url: None,
            cache_time: None,
        }
    }
}

/// Parameters for `forwardMessage`.
#[derive(Debug, Clone, Serialize)]
pub struct ForwardMessage {
    pub chat_id: ChatTarget,
    pub from_chat_id: ChatTarget,
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_content: Option<bool>,
}

/// Parameters for `setMyCommands`: replaces the bot's command menu.
#[derive(Debug, Clone, Serialize)]
pub struct SetMyCommands {
    pub commands: Vec<BotCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl SetMyCommands {
    pub fn new(commands: Vec<BotCommand>) -> Self {
        Self {
            commands,
            language_code: None,
        }
    }
}

/// Parameters for `deleteMyCommands` and `getMyCommands`: selects which
/// command list (by language) the call targets.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MyCommandsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// One deferred outbound call. `Raw` is the escape hatch for methods this crate
/// has no typed wrapper for; its result comes back undecoded.
#[derive(Debug, Clone)]
pub enum ApiCall {
    SendMessage(SendMessage),
    EditMessageReplyMarkup(EditMessageReplyMarkup),
    SendPoll(SendPoll),
    AnswerCallbackQuery(AnswerCallbackQuery),
    ForwardMessage(ForwardMessage),
    SetMyCommands(SetMyCommands),
    DeleteMyCommands(MyCommandsQuery),
    GetMyCommands(MyCommandsQuery),
    Raw {
        method: String,
        params: serde_json::Value,
    },
}

impl ApiCall {
    /// The platform method name this call posts to.
    pub fn method(&self) -> &str {
        match self {
            ApiCall::SendMessage(_) => "sendMessage",
            ApiCall::EditMessageReplyMarkup(_) => "editMessageReplyMarkup",
            ApiCall::SendPoll(_) => "sendPoll",
            ApiCall::AnswerCallbackQuery(_) => "answerCallbackQuery",
            ApiCall::ForwardMessage(_) => "forwardMessage",
            ApiCall::SetMyCommands(_) => "setMyCommands",
            ApiCall::DeleteMyCommands(_) => "deleteMyCommands",
            ApiCall::GetMyCommands(_) => "getMyCommands",
            ApiCall::Raw { method, .. } => method,
        }
    }

    /// The call's parameters as a JSON object.
    pub fn params(&self) -> Result<serde_json::Value> {
        let value = match self {
            ApiCall::SendMessage(p) => serde_json::to_value(p),
            ApiCall::EditMessageReplyMarkup(p) => serde_json::to_value(p),
            ApiCall::SendPoll(p) => serde_json::to_value(p),
            ApiCall::AnswerCallbackQuery(p) => serde_json::to_value(p),
            ApiCall::ForwardMessage(p) => serde_json::to_value(p),
            ApiCall::SetMyCommands(p) => serde_json::to_value(p),
            ApiCall::DeleteMyCommands(p) | ApiCall::GetMyCommands(p) => serde_json::to_value(p),
            ApiCall::Raw { params, .. } => Ok(params.clone()),
        };
        value.map_err(|e| QbotError::Validation(e.to_string()))
    }
}

/// Decoded result of one executed [`ApiCall`].
#[derive(Debug, Clone)]
pub enum ApiResult {
    /// The platform returned the affected message record.
    Message(Message),
    /// The platform acknowledged with `true` and no record.
    Acknowledged,
    /// The bot's command menu, from `getMyCommands`.
    Commands(Vec<BotCommand>),
    /// Undecoded result of a `Raw` call.
    Raw(serde_json::Value),
}

impl ApiResult {
    /// The message record, if this result carries one.
    pub fn message(&self) -> Option<&Message> {
        match self {
            ApiResult::Message(msg) => Some(msg),
            _ => None,
        }
    }
}
