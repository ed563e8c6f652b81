//! HTTP API endpoint handlers.
//!
//! Auxiliary read surface over the store; chat itself happens only on the
//! WebSocket endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{MessageDto, RoomSummaryDto},
    ui::state::AppState,
    usecase::ListMessagesUseCase,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Stored messages, oldest first
pub async fn list_messages(State(state): State<Arc<AppState>>) -> Json<Vec<MessageDto>> {
    let usecase = ListMessagesUseCase::new(state.store.clone());
    let messages = usecase.execute().await;
    Json(messages.iter().map(MessageDto::from_domain).collect())
}

/// Known rooms with their message counts
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.store.list_rooms().await;
    let messages = state.store.list_messages().await;

    let summaries = rooms
        .iter()
        .map(|room| {
            let count = messages.iter().filter(|m| m.room_id == room.id).count();
            RoomSummaryDto::from_domain(room, count)
        })
        .collect();

    Json(summaries)
}
