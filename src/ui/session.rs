//! Per-connection session state machine.
//!
//! One `Session` exists per open WebSocket connection and holds everything
//! session-local: the connection's send half, the resolved user/room context
//! and the exchange configuration. Sessions never share state with each
//! other; the MessageStore is the only shared resource.
//!
//! Lifecycle: `Connecting -> Open -> Closed`. A dropped connection simply
//! terminates the session; the client reconnects and starts a fresh one.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{CloseFrame, Message, WebSocket};
use futures_util::{SinkExt, stream::SplitSink};
use thiserror::Error;

use crate::{
    domain::{MessageContent, MessageStore, ResponseSelector, Room, User},
    infrastructure::dto::websocket::{InboundMessage, OutboundMessage},
    usecase::{PostBotReplyUseCase, PostUserMessageUseCase},
};

/// WebSocket close code for protocol errors
const CLOSE_PROTOCOL_ERROR: u16 = 1002;

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Closed,
}

/// Errors fatal to a session
#[derive(Debug, Error)]
pub enum SessionError {
    /// Malformed inbound frame; the connection is closed with a
    /// protocol-error indication
    #[error("malformed inbound frame: {0}")]
    Protocol(#[from] serde_json::Error),

    /// The transport failed mid-exchange; already-sent frames stand
    #[error("transport error: {0}")]
    Transport(#[from] axum::Error),
}

/// State and behavior of one open client connection
pub struct Session {
    id: u64,
    state: SessionState,
    user: User,
    room: Room,
    sender: SplitSink<WebSocket, Message>,
    store: Arc<dyn MessageStore>,
    responder: Arc<ResponseSelector>,
    bot_delay: Duration,
}

impl Session {
    /// Create a session in the `Connecting` state
    pub fn new(
        id: u64,
        user: User,
        room: Room,
        sender: SplitSink<WebSocket, Message>,
        store: Arc<dyn MessageStore>,
        responder: Arc<ResponseSelector>,
        bot_delay: Duration,
    ) -> Self {
        Self {
            id,
            state: SessionState::Connecting,
            user,
            room,
            sender,
            store,
            responder,
            bot_delay,
        }
    }

    /// The transport handshake succeeded: `Connecting -> Open`
    pub fn on_connect(&mut self) {
        if self.state == SessionState::Connecting {
            self.state = SessionState::Open;
            tracing::info!(
                session_id = self.id,
                user = %self.user.name,
                room = %self.room.name,
                "session open"
            );
        }
    }

    /// Handle one inbound text frame.
    ///
    /// Runs a full exchange: parse, trim, persist, echo, select and persist
    /// the bot reply, suspend for the typing delay, send the reply. The
    /// user echo is always emitted strictly before the bot frame of the
    /// same exchange; exchanges within a session are sequential because the
    /// read loop awaits this method before reading the next frame.
    ///
    /// An `Err` is fatal to the session; storage failures are contained
    /// here (logged, exchange dropped) and do not tear the session down.
    pub async fn on_message(&mut self, raw: &str) -> Result<(), SessionError> {
        if self.state != SessionState::Open {
            return Ok(());
        }

        // 1. Parse: a missing `message` field or non-JSON payload is fatal
        let inbound = match serde_json::from_str::<InboundMessage>(raw) {
            Ok(inbound) => inbound,
            Err(e) => {
                tracing::warn!(session_id = self.id, error = %e, "malformed frame, closing");
                self.close_protocol_error().await;
                return Err(SessionError::Protocol(e));
            }
        };

        // 2. Trim; empty or whitespace-only input is a silent no-op
        let trimmed = inbound.message.trim();
        if trimmed.is_empty() {
            tracing::debug!(session_id = self.id, "empty message discarded");
            return Ok(());
        }
        let content = match MessageContent::new(trimmed.to_string()) {
            Ok(content) => content,
            Err(e) => {
                // Oversized content: discard the exchange, keep the session
                tracing::warn!(session_id = self.id, error = %e, "invalid message content");
                return Ok(());
            }
        };

        // 3. Persist the user message; on failure drop the whole exchange
        //    (no frames sent, client sees no response)
        let post_user = PostUserMessageUseCase::new(self.store.clone());
        let user_message = match post_user.execute(&self.room, &self.user, content).await {
            Ok(message) => message,
            Err(e) => {
                tracing::error!(session_id = self.id, error = %e, "dropping exchange");
                return Ok(());
            }
        };

        // 4. Echo with the store-assigned id and timestamp
        self.send_frame(&OutboundMessage::user(&user_message))
            .await?;

        // 5. Mark the echo read before the delay; best-effort
        self.mark_read_best_effort(user_message.id).await;

        // 6. Select and persist the bot reply
        let post_bot = PostBotReplyUseCase::new(self.store.clone(), self.responder.clone());
        let bot_message = match post_bot.execute(&self.room, &self.user).await {
            Ok(message) => message,
            Err(e) => {
                // The echo already stands; only the reply is lost
                tracing::error!(session_id = self.id, error = %e, "dropping bot reply");
                return Ok(());
            }
        };

        // 7. Simulated typing delay; suspends only this session's task
        tokio::time::sleep(self.bot_delay).await;

        // 8. Send the reply, then mark it read
        self.send_frame(&OutboundMessage::bot(&bot_message)).await?;
        self.mark_read_best_effort(bot_message.id).await;

        Ok(())
    }

    /// The connection is gone: release session-local resources.
    /// Idempotent; calling it twice is a no-op.
    pub async fn on_disconnect(&mut self) {
        if self.state != SessionState::Closed {
            self.state = SessionState::Closed;
            tracing::info!(session_id = self.id, "session closed");
        }
    }

    /// Close the connection with a protocol-error close frame
    pub async fn close_protocol_error(&mut self) {
        let close = Message::Close(Some(CloseFrame {
            code: CLOSE_PROTOCOL_ERROR,
            reason: "protocol error".into(),
        }));
        if let Err(e) = self.sender.send(close).await {
            tracing::debug!(session_id = self.id, error = %e, "close frame not delivered");
        }
    }

    async fn send_frame(&mut self, frame: &OutboundMessage) -> Result<(), SessionError> {
        let json = serde_json::to_string(frame).expect("outbound frame serializes");
        self.sender.send(Message::Text(json.into())).await?;
        Ok(())
    }

    async fn mark_read_best_effort(&self, message_id: u64) {
        if let Err(e) = self.store.mark_read(message_id).await {
            tracing::warn!(
                session_id = self.id,
                message_id,
                error = %e,
                "failed to mark message read"
            );
        }
    }
}
