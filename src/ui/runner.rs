//! Server assembly and runner.

use std::sync::Arc;

use axum::{Router, routing::get};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::{ResponderError, ResponseSelector, RoomName, UserName, ValueObjectError},
    infrastructure::repository::InMemoryMessageStore,
    ui::{
        handler::{get_rooms, health_check, list_messages, websocket_handler},
        signal::shutdown_signal,
        state::{AppState, SessionRegistry},
    },
};

/// Errors preventing server startup
#[derive(Debug, Error)]
pub enum ServeError {
    /// The configured room or user name failed validation
    #[error("invalid configuration: {0}")]
    Config(#[from] ValueObjectError),

    /// The configured bot response corpus failed validation
    #[error("invalid bot response corpus: {0}")]
    Responder(#[from] ResponderError),

    /// Binding or serving failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the shared application state from configuration.
///
/// Defaults for identity, room, corpus and delays are injected here once at
/// startup; nothing is looked up from ambient globals afterwards.
pub fn build_state(config: &ServerConfig) -> Result<Arc<AppState>, ServeError> {
    let responder = ResponseSelector::new(config.bot_responses.clone())?;
    Ok(Arc::new(AppState {
        store: Arc::new(InMemoryMessageStore::new()),
        responder: Arc::new(responder),
        registry: Arc::new(SessionRegistry::new(config.max_sessions)),
        room_name: RoomName::new(config.room_name.clone())?,
        default_user: UserName::new(config.user_name.clone())?,
        bot_delay: config.bot_delay,
        idle_timeout: config.idle_timeout,
    }))
}

/// Build the router over the given state
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws/chat/", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/messages", get(list_messages))
        .route("/api/rooms", get(get_rooms))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the relay server until shutdown
pub async fn run(config: ServerConfig) -> Result<(), ServeError> {
    let state = build_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
