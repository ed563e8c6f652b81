//! Chat relay server binary.
//!
//! Accepts WebSocket connections on `/ws/chat/`, echoes each message and
//! answers with a canned bot reply after a simulated typing delay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;

use chat_relay::{ServerConfig, common::logger::setup_logger};

#[derive(Parser, Debug)]
#[command(name = "chat-relay", about = "Minimal real-time chat relay with a canned bot")]
struct Args {
    /// Socket address to bind
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Room that anonymous sessions attach to
    #[arg(long, default_value = "lobby")]
    room: String,

    /// Identity for connections that do not name a user
    #[arg(long, default_value = "anonymous")]
    user: String,

    /// Simulated bot typing delay in milliseconds
    #[arg(long, default_value_t = 1500)]
    bot_delay_ms: u64,

    /// Close a silent session after this many seconds
    #[arg(long, default_value_t = 300)]
    idle_timeout_secs: u64,

    /// Refuse upgrades beyond this many open sessions
    #[arg(long, default_value_t = 256)]
    max_sessions: usize,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            addr: self.addr,
            room_name: self.room,
            user_name: self.user,
            bot_delay: Duration::from_millis(self.bot_delay_ms),
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            max_sessions: self.max_sessions,
            ..ServerConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    if let Err(e) = chat_relay::run_server(args.into_config()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
