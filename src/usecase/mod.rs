//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_session;
pub mod error;
pub mod list_messages;
pub mod post_bot_reply;
pub mod post_user_message;

pub use connect_session::ConnectSessionUseCase;
pub use error::{ConnectError, PostMessageError};
pub use list_messages::ListMessagesUseCase;
pub use post_bot_reply::PostBotReplyUseCase;
pub use post_user_message::PostUserMessageUseCase;
