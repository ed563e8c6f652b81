//! Data transfer objects for the wire and HTTP surfaces.

pub mod http;
pub mod websocket;
