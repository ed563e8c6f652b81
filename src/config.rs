//! Server configuration.
//!
//! Everything the relay treats as ambient in-process configuration (default
//! identity, default room, bot corpus, delays, session bounds) is collected
//! here and injected into the application state at startup, never read from
//! globals.

use std::net::SocketAddr;
use std::time::Duration;

/// Replies the bot chooses from when no custom corpus is configured
pub const DEFAULT_BOT_RESPONSES: [&str; 4] = [
    "Hi there! How can I help you today?",
    "I'm here to assist you. What do you need help with?",
    "That's intriguing! Could you elaborate more?",
    "Great point! Let me know if there's anything you'd like to discuss further.",
];

/// Default simulated bot typing delay
pub const DEFAULT_BOT_DELAY: Duration = Duration::from_millis(1500);

/// Default idle-session timeout
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Default bound on concurrently open sessions
pub const DEFAULT_MAX_SESSIONS: usize = 256;

/// Description assigned to rooms created lazily on first use
pub const DEFAULT_ROOM_DESCRIPTION: &str = "Auto-created chat room";

/// Runtime configuration for the relay server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind
    pub addr: SocketAddr,
    /// Room that anonymous sessions attach to
    pub room_name: String,
    /// Identity assigned to connections that do not name a user
    pub user_name: String,
    /// Bot response corpus
    pub bot_responses: Vec<String>,
    /// Simulated typing delay before the bot frame is sent
    pub bot_delay: Duration,
    /// A connected-but-silent session is closed after this long
    pub idle_timeout: Duration,
    /// Upgrades beyond this many open sessions are refused with 503
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            room_name: "lobby".to_string(),
            user_name: "anonymous".to_string(),
            bot_responses: DEFAULT_BOT_RESPONSES.map(str::to_string).to_vec(),
            bot_delay: DEFAULT_BOT_DELAY,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}
