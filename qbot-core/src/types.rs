//! Domain types for incoming updates and outbound message payloads.
//!
//! [`Update`] carries exactly one payload variant out of a closed set; the
//! platform's "one optional field per kind" record becomes a tagged
//! [`UpdatePayload`] enum flattened next to the update id.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One notification from the bot platform, uniquely numbered. Batches returned
/// by a single fetch are sorted ascending by `update_id` and contain no
/// duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(flatten)]
    pub payload: UpdatePayload,
}

/// The closed set of update kinds. Externally tagged so the wire form keeps the
/// platform's field names (`"message"`, `"poll_answer"`, ...) while exactly one
/// populated variant is guaranteed by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePayload {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    Poll(Poll),
    PollAnswer(PollAnswer),
    CallbackQuery(CallbackQuery),
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    /// Unix timestamp of the message; see [`Message::date_time`].
    pub date: i64,
    #[serde(rename = "from", skip_serializing_if = "Option::is_none")]
    pub from_user: Option<User>,
    pub chat: Chat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
}

impl Message {
    /// The message timestamp as UTC datetime, if the platform value is in range.
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.date, 0).single()
    }
}

/// Chat (group, channel or private) identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// User identity (id, username, names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A formatting or link entity inside message text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: i64,
    pub length: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// A native poll attached to a message or delivered as a poll update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Vec<PollOption>,
    pub total_voter_count: i64,
    pub is_closed: bool,
    pub is_anonymous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    pub voter_count: i64,
}

/// A user's answer in a non-anonymous poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollAnswer {
    pub poll_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub option_ids: Vec<i64>,
}

/// An inline keyboard button click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// One entry of the bot's command menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// Inline keyboard layout for outbound messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_deserializes_message_variant() {
        let raw = r#"{
            "update_id": 42,
            "message": {
                "message_id": 7,
                "date": 1700000000,
                "from": {"id": 1, "first_name": "Ann"},
                "chat": {"id": 99, "type": "private"},
                "text": "hello"
            }
        }"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        assert_eq!(update.update_id, 42);
        match update.payload {
            UpdatePayload::Message(msg) => {
                assert_eq!(msg.message_id, 7);
                assert_eq!(msg.text.as_deref(), Some("hello"));
                assert_eq!(msg.chat.id, 99);
            }
            other => panic!("expected message payload, got {:?}", other),
        }
    }

    #[test]
    fn test_update_deserializes_poll_answer_variant() {
        let raw = r#"{
            "update_id": 5,
            "poll_answer": {
                "poll_id": "p1",
                "user": {"id": 3, "first_name": "Bo"},
                "option_ids": [0, 2]
            }
        }"#;
        let update: Update = serde_json::from_str(raw).unwrap();
        assert!(matches!(update.payload, UpdatePayload::PollAnswer(_)));
    }

    #[test]
    fn test_update_without_payload_fails() {
        let raw = r#"{"update_id": 1}"#;
        assert!(serde_json::from_str::<Update>(raw).is_err());
    }

    #[test]
    fn test_update_with_two_payloads_fails() {
        // The tagged payload enum only accepts exactly one populated field.
        let raw = r#"{
            "update_id": 1,
            "message": {
                "message_id": 7,
                "date": 1700000000,
                "chat": {"id": 99, "type": "private"},
                "text": "hello"
            },
            "poll": {
                "id": "p1",
                "question": "q",
                "options": [],
                "total_voter_count": 0,
                "is_closed": false,
                "is_anonymous": true
            }
        }"#;
        assert!(serde_json::from_str::<Update>(raw).is_err());
    }

    #[test]
    fn test_message_date_time() {
        let msg = Message {
            message_id: 1,
            date: 0,
            from_user: None,
            chat: Chat { id: 1, kind: None },
            text: None,
            entities: None,
        };
        assert_eq!(msg.date_time().unwrap().timestamp(), 0);
    }

    #[test]
    fn test_keyboard_serializes_without_empty_fields() {
        let markup = InlineKeyboardMarkup {
            inline_keyboard: vec![vec![InlineKeyboardButton {
                text: "ok".to_string(),
                url: None,
                callback_data: Some("ack".to_string()),
            }]],
        };
        let json = serde_json::to_string(&markup).unwrap();
        assert!(!json.contains("url"));
        assert!(json.contains("callback_data"));
    }
}
