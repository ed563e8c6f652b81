//! InMemory MessageStore 実装
//!
//! ドメイン層が定義する MessageStore trait の具体的な実装。
//! Mutex で保護した Vec をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! 現在、ドメインモデル（`ChatMessage` など）を直接ストレージとして
//! 使用しています。これは InMemory 実装では許容される妥協ですが、将来
//! SQLite などの DBMS を実装する際は、以下の変換層が必要になります：
//!
//! ```text
//! DB Row → MessageRow (DTO) → ChatMessage (ドメインモデル)
//! ```

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    common::time::now_timestamp,
    config::DEFAULT_ROOM_DESCRIPTION,
    domain::{
        ChatMessage, MessageContent, MessageStore, RepositoryError, Room, RoomName, Sender,
        Timestamp, User, UserName,
    },
};

#[derive(Default)]
struct StoreInner {
    users: Vec<User>,
    rooms: Vec<Room>,
    messages: Vec<ChatMessage>,
    next_user_id: u64,
    next_room_id: u64,
    next_message_id: u64,
}

/// インメモリ MessageStore 実装
///
/// 単一の Mutex で内部状態全体を保護するため、並行セッションからの
/// 書き込みは直列化され、採番とカウントが壊れることはありません。
#[derive(Default)]
pub struct InMemoryMessageStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryMessageStore {
    /// 新しい空の InMemoryMessageStore を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn get_or_create_user(&self, name: &UserName) -> Result<User, RepositoryError> {
        let mut inner = self.inner.lock().await;
        if let Some(user) = inner.users.iter().find(|u| &u.name == name) {
            return Ok(user.clone());
        }
        inner.next_user_id += 1;
        let user = User::new(inner.next_user_id, name.clone());
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn get_or_create_room(&self, name: &RoomName) -> Result<Room, RepositoryError> {
        let mut inner = self.inner.lock().await;
        if let Some(room) = inner.rooms.iter().find(|r| &r.name == name) {
            return Ok(room.clone());
        }
        inner.next_room_id += 1;
        let room = Room::new(
            inner.next_room_id,
            name.clone(),
            DEFAULT_ROOM_DESCRIPTION.to_string(),
        );
        inner.rooms.push(room.clone());
        Ok(room)
    }

    async fn create_message(
        &self,
        room_id: u64,
        user_id: u64,
        sender: Sender,
        content: MessageContent,
    ) -> Result<ChatMessage, RepositoryError> {
        let mut inner = self.inner.lock().await;
        if !inner.rooms.iter().any(|r| r.id == room_id) {
            return Err(RepositoryError::RoomNotFound(room_id));
        }
        if !inner.users.iter().any(|u| u.id == user_id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "user {user_id} does not exist"
            )));
        }
        inner.next_message_id += 1;
        let message = ChatMessage::new(
            inner.next_message_id,
            room_id,
            user_id,
            sender,
            content,
            Timestamp::new(now_timestamp()),
        );
        inner.messages.push(message.clone());
        Ok(message)
    }

    async fn mark_read(&self, message_id: u64) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().await;
        let message = inner
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or(RepositoryError::MessageNotFound(message_id))?;
        message.mark_read(Timestamp::new(now_timestamp()));
        Ok(())
    }

    async fn count_messages(&self) -> usize {
        let inner = self.inner.lock().await;
        inner.messages.len()
    }

    async fn list_messages(&self) -> Vec<ChatMessage> {
        let inner = self.inner.lock().await;
        let mut messages = inner.messages.clone();
        messages.sort_by_key(|m| (m.created_at, m.id));
        messages
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let inner = self.inner.lock().await;
        let mut rooms = inner.rooms.clone();
        rooms.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        rooms
    }

    async fn delete_room(&self, room_id: u64) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().await;
        if !inner.rooms.iter().any(|r| r.id == room_id) {
            return Err(RepositoryError::RoomNotFound(room_id));
        }
        // Room owns its messages: delete cascades
        inner.rooms.retain(|r| r.id != room_id);
        inner.messages.retain(|m| m.room_id != room_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryMessageStore の基本的な CRUD 操作
    // - get-or-create の冪等性（ユーザー・ルームの重複作成がないこと）
    // - mark_read の冪等性と、既読時刻 >= 作成時刻の不変条件
    // - ルーム削除時のメッセージのカスケード削除
    //
    // 【なぜこのテストが必要か】
    // - Store は全セッションが共有する唯一の可変リソース
    // - 採番・カウント・順序の整合性を保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. get-or-create の成功と冪等性
    // 2. メッセージ作成と採番
    // 3. 存在しないルームへのメッセージ作成（エラーケース）
    // 4. mark_read の冪等性
    // 5. 一覧の昇順と件数
    // 6. ルーム削除のカスケード
    // ========================================

    fn user_name(s: &str) -> UserName {
        UserName::new(s.to_string()).unwrap()
    }

    fn room_name(s: &str) -> RoomName {
        RoomName::new(s.to_string()).unwrap()
    }

    fn content(s: &str) -> MessageContent {
        MessageContent::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_get_or_create_user_is_idempotent() {
        // テスト項目: 同じ識別子での get_or_create_user は同じユーザーを返す
        // given (前提条件):
        let store = InMemoryMessageStore::new();

        // when (操作):
        let first = store.get_or_create_user(&user_name("alice")).await.unwrap();
        let second = store.get_or_create_user(&user_name("alice")).await.unwrap();
        let other = store.get_or_create_user(&user_name("bob")).await.unwrap();

        // then (期待する結果):
        assert_eq!(first.id, second.id);
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn test_get_or_create_room_is_idempotent() {
        // テスト項目: 同じ名前での get_or_create_room は同じルームを返し、重複を作らない
        // given (前提条件):
        let store = InMemoryMessageStore::new();

        // when (操作):
        let first = store.get_or_create_room(&room_name("lobby")).await.unwrap();
        let second = store.get_or_create_room(&room_name("lobby")).await.unwrap();

        // then (期待する結果):
        assert_eq!(first.id, second.id);
        assert_eq!(first.description, DEFAULT_ROOM_DESCRIPTION);
        assert_eq!(store.list_rooms().await.len(), 1);
    }

    #[tokio::test]
    async fn test_create_message_assigns_id_and_timestamp() {
        // テスト項目: メッセージ作成時に id と作成時刻が採番される
        // given (前提条件):
        let store = InMemoryMessageStore::new();
        let user = store.get_or_create_user(&user_name("alice")).await.unwrap();
        let room = store.get_or_create_room(&room_name("lobby")).await.unwrap();

        // when (操作):
        let message = store
            .create_message(room.id, user.id, Sender::User, content("Hello"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(message.id, 1);
        assert!(message.created_at.value() > 0);
        assert!(message.read_at.is_none());
        assert_eq!(store.count_messages().await, 1);
    }

    #[tokio::test]
    async fn test_create_message_unknown_room_fails() {
        // テスト項目: 存在しないルームへのメッセージ作成は失敗する
        // given (前提条件):
        let store = InMemoryMessageStore::new();
        let user = store.get_or_create_user(&user_name("alice")).await.unwrap();

        // when (操作):
        let result = store
            .create_message(42, user.id, Sender::User, content("Hello"))
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RepositoryError::RoomNotFound(42));
        assert_eq!(store.count_messages().await, 0);
    }

    #[tokio::test]
    async fn test_mark_read_is_idempotent() {
        // テスト項目: mark_read を2回呼んでも最初の既読時刻が保持される
        // given (前提条件):
        let store = InMemoryMessageStore::new();
        let user = store.get_or_create_user(&user_name("alice")).await.unwrap();
        let room = store.get_or_create_room(&room_name("lobby")).await.unwrap();
        let message = store
            .create_message(room.id, user.id, Sender::User, content("Hello"))
            .await
            .unwrap();

        // when (操作):
        store.mark_read(message.id).await.unwrap();
        let first_read_at = store.list_messages().await[0].read_at;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.mark_read(message.id).await.unwrap();

        // then (期待する結果): 2回目の呼び出しでは変化しない
        let stored = &store.list_messages().await[0];
        assert!(first_read_at.is_some());
        assert_eq!(stored.read_at, first_read_at);
        assert!(stored.read_at.unwrap() >= stored.created_at);
    }

    #[tokio::test]
    async fn test_mark_read_unknown_message_fails() {
        // テスト項目: 存在しないメッセージの既読化はエラーになる
        // given (前提条件):
        let store = InMemoryMessageStore::new();

        // when (操作):
        let result = store.mark_read(99).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RepositoryError::MessageNotFound(99));
    }

    #[tokio::test]
    async fn test_list_messages_ascending() {
        // テスト項目: 一覧は作成時刻・id の昇順で返る
        // given (前提条件):
        let store = InMemoryMessageStore::new();
        let user = store.get_or_create_user(&user_name("alice")).await.unwrap();
        let room = store.get_or_create_room(&room_name("lobby")).await.unwrap();
        for text in ["one", "two", "three"] {
            store
                .create_message(room.id, user.id, Sender::User, content(text))
                .await
                .unwrap();
        }

        // when (操作):
        let messages = store.list_messages().await;

        // then (期待する結果):
        assert_eq!(messages.len(), 3);
        assert!(messages.windows(2).all(|w| {
            (w[0].created_at, w[0].id) < (w[1].created_at, w[1].id)
        }));
    }

    #[tokio::test]
    async fn test_delete_room_cascades_messages() {
        // テスト項目: ルーム削除でそのルームのメッセージも削除される
        // given (前提条件):
        let store = InMemoryMessageStore::new();
        let user = store.get_or_create_user(&user_name("alice")).await.unwrap();
        let lobby = store.get_or_create_room(&room_name("lobby")).await.unwrap();
        let other = store.get_or_create_room(&room_name("other")).await.unwrap();
        store
            .create_message(lobby.id, user.id, Sender::User, content("in lobby"))
            .await
            .unwrap();
        store
            .create_message(other.id, user.id, Sender::User, content("elsewhere"))
            .await
            .unwrap();

        // when (操作):
        store.delete_room(lobby.id).await.unwrap();

        // then (期待する結果): lobby のメッセージだけが消える
        assert_eq!(store.list_rooms().await.len(), 1);
        let messages = store.list_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content.as_str(), "elsewhere");
    }

    #[tokio::test]
    async fn test_delete_unknown_room_fails() {
        // テスト項目: 存在しないルームの削除はエラーになる
        // given (前提条件):
        let store = InMemoryMessageStore::new();

        // when (操作):
        let result = store.delete_room(7).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RepositoryError::RoomNotFound(7));
    }
}
