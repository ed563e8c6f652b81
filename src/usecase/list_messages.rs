//! UseCase: メッセージ一覧の取得
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ListMessagesUseCase::execute() メソッド
//! - 表示用メッセージ一覧が作成時刻の昇順で返ること
//!
//! ### なぜこのテストが必要か
//! - HTTP の読み取りサーフェスは「古い順」の契約を持つ
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数メッセージの昇順取得
//! - エッジケース：空のストア

use std::sync::Arc;

use crate::domain::{ChatMessage, MessageStore};

/// 保存済みメッセージを表示順で取得するユースケース
pub struct ListMessagesUseCase {
    /// MessageStore（データアクセス層の抽象化）
    store: Arc<dyn MessageStore>,
}

impl ListMessagesUseCase {
    /// 新しい ListMessagesUseCase を作成
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// メッセージ一覧の取得を実行（作成時刻の昇順）
    pub async fn execute(&self) -> Vec<ChatMessage> {
        self.store.list_messages().await
    }
}
