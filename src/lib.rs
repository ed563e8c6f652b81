//! Real-time chat relay library.
//!
//! Clients connect over WebSocket, send short text messages and receive an
//! echo of their own message plus a canned bot reply after a simulated
//! typing delay. Rooms and messages are persisted through the MessageStore
//! boundary; the in-memory implementation backs the default deployment.

pub mod common;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
