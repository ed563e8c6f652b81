//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// UserName validation error
    #[error("UserName cannot be empty")]
    UserNameEmpty,

    /// UserName too long error
    #[error("UserName cannot exceed {max} characters (got {actual})")]
    UserNameTooLong { max: usize, actual: usize },

    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// MessageContent validation error
    #[error("MessageContent cannot be empty")]
    MessageContentEmpty,

    /// MessageContent too long error
    #[error("MessageContent cannot exceed {max} characters (got {actual})")]
    MessageContentTooLong { max: usize, actual: usize },
}

/// Errors returned by MessageStore implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The underlying store is unreachable or rejected the operation
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A uniqueness or integrity constraint was violated
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The referenced message does not exist
    #[error("message {0} not found")]
    MessageNotFound(u64),

    /// The referenced room does not exist
    #[error("room {0} not found")]
    RoomNotFound(u64),
}

/// Errors related to the bot response corpus
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResponderError {
    /// The configured response corpus is empty
    #[error("response corpus cannot be empty")]
    EmptyCorpus,

    /// A corpus entry is empty and could never form a valid message
    #[error("response corpus entry {index} is empty")]
    EmptyResponse { index: usize },
}
