//! WebSocket frame DTOs for the chat relay.

use serde::{Deserialize, Serialize};

use crate::{common::time::timestamp_to_rfc3339, domain::ChatMessage};

/// Inbound frame (client to server).
///
/// The `message` field is required; any other shape is a protocol error
/// fatal to the session.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub message: String,
}

/// Which side an outbound frame speaks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    User,
    Bot,
}

/// Outbound frame (server to client).
///
/// `id` and `timestamp` are the store-assigned values of the persisted
/// message, so the metadata the client sees is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub r#type: FrameKind,
    pub message: String,
    pub id: u64,
    /// ISO 8601 / RFC 3339
    pub timestamp: String,
}

impl OutboundMessage {
    /// Build the echo frame for a persisted user message
    pub fn user(message: &ChatMessage) -> Self {
        Self::from_message(FrameKind::User, message)
    }

    /// Build the reply frame for a persisted bot message
    pub fn bot(message: &ChatMessage) -> Self {
        Self::from_message(FrameKind::Bot, message)
    }

    fn from_message(kind: FrameKind, message: &ChatMessage) -> Self {
        Self {
            r#type: kind,
            message: message.content.as_str().to_string(),
            id: message.id,
            timestamp: timestamp_to_rfc3339(message.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MessageContent, Sender, Timestamp};

    #[test]
    fn test_inbound_message_parse_success() {
        // テスト項目: message フィールドを持つ JSON をパースできる
        // when (操作):
        let result = serde_json::from_str::<InboundMessage>(r#"{"message": "Hello, bot!"}"#);

        // then (期待する結果):
        assert_eq!(result.unwrap().message, "Hello, bot!");
    }

    #[test]
    fn test_inbound_message_missing_field_fails() {
        // テスト項目: message フィールドがない JSON はパースに失敗する
        // when (操作):
        let result = serde_json::from_str::<InboundMessage>(r#"{"text": "Hello"}"#);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_inbound_message_non_json_fails() {
        // テスト項目: JSON でないペイロードはパースに失敗する
        // when (操作):
        let result = serde_json::from_str::<InboundMessage>("not json");

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_outbound_user_frame_serialization() {
        // テスト項目: ユーザーエコーのフレームが期待する JSON になる
        // given (前提条件):
        let message = ChatMessage::new(
            7,
            1,
            1,
            Sender::User,
            MessageContent::new("Hello, bot!".to_string()).unwrap(),
            Timestamp::new(1672531200000),
        );

        // when (操作):
        let json = serde_json::to_value(OutboundMessage::user(&message)).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "user");
        assert_eq!(json["message"], "Hello, bot!");
        assert_eq!(json["id"], 7);
        assert_eq!(json["timestamp"], "2023-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_outbound_bot_frame_kind() {
        // テスト項目: ボット応答のフレームは type が "bot" になる
        // given (前提条件):
        let message = ChatMessage::new(
            8,
            1,
            1,
            Sender::Bot,
            MessageContent::new("Hi there!".to_string()).unwrap(),
            Timestamp::new(1672531201500),
        );

        // when (操作):
        let json = serde_json::to_value(OutboundMessage::bot(&message)).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "bot");
        assert_eq!(json["id"], 8);
    }
}
