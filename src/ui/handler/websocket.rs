//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::stream::StreamExt;

use crate::{
    domain::UserName,
    ui::{
        session::Session,
        state::{AppState, ConnectQuery, SessionSlot},
    },
    usecase::ConnectSessionUseCase,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Admission control: refuse the upgrade when at capacity. The slot is
    // an owning handle; it travels into the upgrade callback, so it is
    // released on every exit path, including an upgrade that never
    // completes (the dropped callback drops the slot).
    let Some(slot) = state.registry.try_register() else {
        tracing::warn!(
            active = state.registry.active_count(),
            "session capacity exceeded, rejecting connection"
        );
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    // Convert String -> UserName (Domain Model); absent means the default
    // identity configured at startup
    let user_name = match query.user {
        Some(raw) => match UserName::new(raw.clone()) {
            Ok(name) => name,
            Err(_) => {
                tracing::warn!("invalid user identity: '{}'", raw);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
        None => state.default_user.clone(),
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, slot, user_name)))
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    slot: SessionSlot,
    user_name: UserName,
) {
    let session_id = slot.id();

    // Resolve the acting user and target room via get-or-create
    let connect_usecase = ConnectSessionUseCase::new(state.store.clone());
    let (user, room) = match connect_usecase.execute(&user_name, &state.room_name).await {
        Ok(context) => context,
        Err(e) => {
            tracing::error!(session_id, error = %e, "failed to resolve session context");
            return;
        }
    };

    let (sender, mut receiver) = socket.split();
    let mut session = Session::new(
        session_id,
        user,
        room,
        sender,
        state.store.clone(),
        state.responder.clone(),
        state.bot_delay,
    );
    session.on_connect();

    // One exchange at a time: the next frame is read only after the
    // previous exchange, including the bot reply, has completed
    loop {
        let frame = match tokio::time::timeout(state.idle_timeout, receiver.next()).await {
            Err(_) => {
                tracing::info!(session_id, "idle timeout, closing session");
                break;
            }
            Ok(None) => break,
            Ok(Some(Err(e))) => {
                tracing::warn!(session_id, error = %e, "websocket error");
                break;
            }
            Ok(Some(Ok(frame))) => frame,
        };

        match frame {
            Message::Text(text) => {
                if let Err(e) = session.on_message(&text).await {
                    tracing::warn!(session_id, error = %e, "session terminated");
                    break;
                }
            }
            Message::Binary(_) => {
                // Only text frames carry the protocol
                tracing::warn!(session_id, "binary frame received, closing");
                session.close_protocol_error().await;
                break;
            }
            Message::Close(_) => {
                tracing::info!(session_id, "client requested close");
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }

    session.on_disconnect().await;
    // `slot` is dropped here, freeing the capacity slot
}
