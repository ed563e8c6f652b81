//! UseCase: ユーザーメッセージの永続化
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostUserMessageUseCase::execute() メソッド
//! - 受信メッセージの永続化と、ストア採番の id / タイムスタンプの払い出し
//!
//! ### なぜこのテストが必要か
//! - エコーフレームが返す id / timestamp はストアが採番した正規の値であること
//! - 永続化が失敗した場合に交換全体が中断されること（フレームを送らない）
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ保存と採番
//! - 異常系：ストレージ障害

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageContent, MessageStore, Room, Sender, User};

use super::error::PostMessageError;

/// 受信したユーザーメッセージを永続化するユースケース
pub struct PostUserMessageUseCase {
    /// MessageStore（データアクセス層の抽象化）
    store: Arc<dyn MessageStore>,
}

impl PostUserMessageUseCase {
    /// 新しい PostUserMessageUseCase を作成
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// ユーザーメッセージの永続化を実行
    ///
    /// # Arguments
    ///
    /// * `room` - メッセージが属するルーム
    /// * `user` - メッセージの送信者
    /// * `content` - メッセージ内容（トリム済み・非空、Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok(ChatMessage)` - ストア採番の id / created_at を持つ保存済みメッセージ
    /// * `Err(PostMessageError)` - 永続化失敗（交換全体を中断する）
    pub async fn execute(
        &self,
        room: &Room,
        user: &User,
        content: MessageContent,
    ) -> Result<ChatMessage, PostMessageError> {
        let message = self
            .store
            .create_message(room.id, user.id, Sender::User, content)
            .await?;

        tracing::debug!(
            message_id = message.id,
            room_id = room.id,
            preview = message.preview(),
            "user message persisted"
        );

        Ok(message)
    }
}
