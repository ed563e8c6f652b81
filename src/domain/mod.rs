//! Domain layer for the chat relay.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod repository;
pub mod responder;
pub mod value_object;

pub use entity::{ChatMessage, Room, Sender, User};
pub use error::{RepositoryError, ResponderError, ValueObjectError};
pub use repository::MessageStore;
pub use responder::ResponseSelector;
pub use value_object::{MessageContent, RoomName, Timestamp, UserName};

#[cfg(test)]
pub use repository::MockMessageStore;
