//! WebSocket chat relay server implementation.

mod handler;
mod runner;
mod signal;
pub mod session;
pub mod state;

pub use runner::{ServeError, build_router, build_state, run};
