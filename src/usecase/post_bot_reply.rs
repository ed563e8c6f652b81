//! UseCase: ボット応答の選択と永続化
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostBotReplyUseCase::execute() メソッド
//! - 固定コーパスからの応答選択と、Bot タグ付きでの永続化
//!
//! ### なぜこのテストが必要か
//! - 応答が必ずコーパス内の文字列であること
//! - ボットメッセージが同じルーム・同じユーザーに Bot タグで保存されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：応答選択と保存
//! - 異常系：ストレージ障害

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageContent, MessageStore, ResponseSelector, Room, Sender, User};

use super::error::PostMessageError;

/// ボット応答を選択して永続化するユースケース
pub struct PostBotReplyUseCase {
    /// MessageStore（データアクセス層の抽象化）
    store: Arc<dyn MessageStore>,
    /// 応答コーパス
    responder: Arc<ResponseSelector>,
}

impl PostBotReplyUseCase {
    /// 新しい PostBotReplyUseCase を作成
    pub fn new(store: Arc<dyn MessageStore>, responder: Arc<ResponseSelector>) -> Self {
        Self { store, responder }
    }

    /// ボット応答の選択と永続化を実行
    ///
    /// ボットは独立したユーザーを持たないため、応答は受信メッセージと同じ
    /// ルーム・同じユーザーで保存され、表示用に `Sender::Bot` でタグ付けされる。
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ストア採番の id / created_at を持つボットメッセージ
    /// * `Err(PostMessageError)` - 永続化失敗
    pub async fn execute(&self, room: &Room, user: &User) -> Result<ChatMessage, PostMessageError> {
        let reply = self.responder.select().to_string();
        let content = MessageContent::new(reply)?;

        let message = self
            .store
            .create_message(room.id, user.id, Sender::Bot, content)
            .await?;

        tracing::debug!(
            message_id = message.id,
            room_id = room.id,
            preview = message.preview(),
            "bot reply persisted"
        );

        Ok(message)
    }
}
