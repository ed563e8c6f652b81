//! MessageStore trait: the persistence boundary the core depends on.
//!
//! The domain layer defines the trait; infrastructure provides the concrete
//! implementation (dependency inversion). Sessions only ever talk to the
//! store through this interface.

use async_trait::async_trait;

use super::{
    entity::{ChatMessage, Room, Sender, User},
    error::RepositoryError,
    value_object::{MessageContent, RoomName, UserName},
};

/// Durable append-only store for rooms, users and messages.
///
/// Implementations must serialize concurrent writes safely: `create_message`
/// is atomic (either the message is stored with its assigned id and
/// timestamp, or the call fails with no partial state).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Idempotent lookup-or-insert of a user keyed by its unique identity.
    async fn get_or_create_user(&self, name: &UserName) -> Result<User, RepositoryError>;

    /// Idempotent lookup-or-insert of a room keyed by its unique name.
    /// A newly created room gets a default description.
    async fn get_or_create_room(&self, name: &RoomName) -> Result<Room, RepositoryError>;

    /// Store a new message, assigning its identifier and creation timestamp.
    async fn create_message(
        &self,
        room_id: u64,
        user_id: u64,
        sender: Sender,
        content: MessageContent,
    ) -> Result<ChatMessage, RepositoryError>;

    /// Set the read timestamp to now if unset. Idempotent: a second call
    /// does not change the first-set timestamp.
    async fn mark_read(&self, message_id: u64) -> Result<(), RepositoryError>;

    /// Total number of stored messages.
    async fn count_messages(&self) -> usize;

    /// All stored messages, ascending by creation time (then id) for display.
    async fn list_messages(&self) -> Vec<ChatMessage>;

    /// All rooms, ascending by name.
    async fn list_rooms(&self) -> Vec<Room>;

    /// Delete a room and cascade-delete its messages.
    async fn delete_room(&self, room_id: u64) -> Result<(), RepositoryError>;
}
