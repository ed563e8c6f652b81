//! Shared helpers used across layers.

pub mod logger;
pub mod time;
