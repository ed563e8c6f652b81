//! HTTP API response DTOs for the chat relay.

use serde::{Deserialize, Serialize};

use crate::{
    common::time::timestamp_to_rfc3339,
    domain::{ChatMessage, Room, Sender},
};

/// Stored message for the listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: u64,
    pub sender: Sender,
    pub message: String,
    pub timestamp: String, // ISO 8601
    pub read_at: Option<String>, // ISO 8601
}

impl MessageDto {
    pub fn from_domain(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            message: message.content.as_str().to_string(),
            timestamp: timestamp_to_rfc3339(message.created_at.value()),
            read_at: message.read_at.map(|ts| timestamp_to_rfc3339(ts.value())),
        }
    }
}

/// Room summary for the list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub description: String,
    pub messages: usize,
}

impl RoomSummaryDto {
    pub fn from_domain(room: &Room, message_count: usize) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            description: room.description.clone(),
            messages: message_count,
        }
    }
}
