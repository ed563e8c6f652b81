//! Core domain models for the chat relay.

use serde::{Deserialize, Serialize};

use super::value_object::{MessageContent, RoomName, Timestamp, UserName};

/// Number of characters shown in a message preview
pub const MESSAGE_CONTENT_PREVIEW_LENGTH: usize = 50;

/// Represents a chat room
///
/// Rooms are created lazily on first use (get-or-create by name) and are
/// read-only during chat. Deleting a room cascades to its messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Store-assigned room identifier
    pub id: u64,
    /// Unique room name
    pub name: RoomName,
    /// Human-readable description
    pub description: String,
}

impl Room {
    /// Create a new room
    pub fn new(id: u64, name: RoomName, description: String) -> Self {
        Self {
            id,
            name,
            description,
        }
    }
}

/// Represents a chat user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned user identifier
    pub id: u64,
    /// Unique identity token
    pub name: UserName,
}

impl User {
    /// Create a new user
    pub fn new(id: u64, name: UserName) -> Self {
        Self { id, name }
    }
}

/// Which side of the conversation a message belongs to.
///
/// The bot has no distinct user identity; bot replies are stored under the
/// same user and tagged for display purposes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Represents a stored chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Store-assigned sequential identifier
    pub id: u64,
    /// Owning room
    pub room_id: u64,
    /// Authoring user
    pub user_id: u64,
    /// Display side of the message
    pub sender: Sender,
    /// Message content
    pub content: MessageContent,
    /// Timestamp when the message was stored (set once, immutable)
    pub created_at: Timestamp,
    /// Timestamp when the message was read, if it has been
    pub read_at: Option<Timestamp>,
}

impl ChatMessage {
    /// Create a new unread chat message
    pub fn new(
        id: u64,
        room_id: u64,
        user_id: u64,
        sender: Sender,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            room_id,
            user_id,
            sender,
            content,
            created_at,
            read_at: None,
        }
    }

    /// Mark this message as read at the given time.
    ///
    /// Idempotent: the first set timestamp wins, later calls are no-ops.
    /// The read timestamp never precedes `created_at`; a clock that reads
    /// earlier is clamped to the creation time.
    pub fn mark_read(&mut self, at: Timestamp) {
        if self.read_at.is_none() {
            self.read_at = Some(at.max(self.created_at));
        }
    }

    /// Whether this message has been read
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Short preview of the message content for logs and listings
    pub fn preview(&self) -> &str {
        let content = self.content.as_str();
        match content.char_indices().nth(MESSAGE_CONTENT_PREVIEW_LENGTH) {
            Some((idx, _)) => &content[..idx],
            None => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_message(created_at: i64) -> ChatMessage {
        ChatMessage::new(
            1,
            1,
            1,
            Sender::User,
            MessageContent::new("Hello, bot!".to_string()).unwrap(),
            Timestamp::new(created_at),
        )
    }

    #[test]
    fn test_chat_message_new_is_unread() {
        // テスト項目: 新しいメッセージは未読状態で作成される
        // when (操作):
        let message = test_message(1000);

        // then (期待する結果):
        assert!(!message.is_read());
        assert_eq!(message.read_at, None);
        assert_eq!(message.created_at, Timestamp::new(1000));
    }

    #[test]
    fn test_mark_read_sets_timestamp_once() {
        // テスト項目: mark_read は最初の既読時刻のみ記録する（冪等性）
        // given (前提条件):
        let mut message = test_message(1000);

        // when (操作):
        message.mark_read(Timestamp::new(2000));
        message.mark_read(Timestamp::new(3000));

        // then (期待する結果): 2回目の呼び出しでは既読時刻が変わらない
        assert_eq!(message.read_at, Some(Timestamp::new(2000)));
    }

    #[test]
    fn test_mark_read_never_precedes_creation() {
        // テスト項目: 既読時刻は作成時刻より前にならない
        // given (前提条件):
        let mut message = test_message(5000);

        // when (操作): 作成時刻より古い時計で既読化する
        message.mark_read(Timestamp::new(4000));

        // then (期待する結果): 作成時刻にクランプされる
        assert_eq!(message.read_at, Some(Timestamp::new(5000)));
    }

    #[test]
    fn test_preview_short_content() {
        // テスト項目: 50 文字以下の内容はそのままプレビューになる
        // given (前提条件):
        let message = test_message(1000);

        // then (期待する結果):
        assert_eq!(message.preview(), "Hello, bot!");
    }

    #[test]
    fn test_preview_truncates_long_content() {
        // テスト項目: 50 文字を超える内容は切り詰められる
        // given (前提条件):
        let content = MessageContent::new("a".repeat(120)).unwrap();
        let message = ChatMessage::new(1, 1, 1, Sender::Bot, content, Timestamp::new(0));

        // then (期待する結果):
        assert_eq!(message.preview().len(), MESSAGE_CONTENT_PREVIEW_LENGTH);
    }

    #[test]
    fn test_room_new() {
        // テスト項目: Room を作成できる
        // given (前提条件):
        let name = RoomName::new("lobby".to_string()).unwrap();

        // when (操作):
        let room = Room::new(1, name.clone(), "Auto-created chat room".to_string());

        // then (期待する結果):
        assert_eq!(room.id, 1);
        assert_eq!(room.name, name);
        assert_eq!(room.description, "Auto-created chat room");
    }
}
