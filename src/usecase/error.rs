//! UseCase layer error definitions.

use thiserror::Error;

use crate::domain::{RepositoryError, ValueObjectError};

/// Errors while resolving a session's user/room context
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// The store could not resolve or create the context
    #[error("failed to resolve session context: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors while persisting a message during an exchange
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PostMessageError {
    /// The store rejected or lost the message
    #[error("failed to persist message: {0}")]
    Storage(#[from] RepositoryError),

    /// The selected bot reply does not form valid message content
    #[error("bot reply is not valid message content: {0}")]
    InvalidReply(#[from] ValueObjectError),
}
