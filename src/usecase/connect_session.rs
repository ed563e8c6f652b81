//! UseCase: セッションコンテキストの解決
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - ユーザーとルームの get-or-create によるセッションコンテキスト解決
//!
//! ### なぜこのテストが必要か
//! - 匿名・単一ルームのデモ利用を支える暗黙のコンテキスト解決の正しさを保証
//! - get-or-create の冪等性（重複作成がないこと）を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ユーザー・新規ルームの作成
//! - 冪等性：同じキーでの再接続が同じエンティティを返す
//! - 異常系：ストレージ障害

use std::sync::Arc;

use crate::domain::{MessageStore, Room, RoomName, User, UserName};

use super::error::ConnectError;

/// セッション開始時にユーザーとルームを解決するユースケース
pub struct ConnectSessionUseCase {
    /// MessageStore（データアクセス層の抽象化）
    store: Arc<dyn MessageStore>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// セッションコンテキストの解決を実行
    ///
    /// # Arguments
    ///
    /// * `user_name` - セッションに紐づくユーザー識別子（Domain Model）
    /// * `room_name` - セッションが参加するルーム名（Domain Model）
    ///
    /// # Returns
    ///
    /// * `Ok((User, Room))` - 解決されたユーザーとルーム
    /// * `Err(ConnectError)` - ストレージ障害
    pub async fn execute(
        &self,
        user_name: &UserName,
        room_name: &RoomName,
    ) -> Result<(User, Room), ConnectError> {
        let user = self.store.get_or_create_user(user_name).await?;
        let room = self.store.get_or_create_room(room_name).await?;
        Ok((user, room))
    }
}
