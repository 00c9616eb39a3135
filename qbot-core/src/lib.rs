//! # qbot-core
//!
//! Core types for the qbot Telegram client: the tagged [`Update`] sum type and its
//! payload records, the [`QbotError`] taxonomy, MarkdownV2 escaping, and tracing
//! initialization. Transport-agnostic; used by qbot-transport and qbot-client.

pub mod error;
pub mod logger;
pub mod types;
pub mod utils;

pub use error::{QbotError, Result};
pub use logger::init_tracing;
pub use types::{
    BotCommand, CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message,
    MessageEntity, Poll, PollAnswer, PollOption, Update, UpdatePayload, User,
};
pub use utils::escape_markdown;
