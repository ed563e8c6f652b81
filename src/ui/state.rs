//! Server state and session registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{MessageStore, ResponseSelector, RoomName, UserName};

/// Query parameters for WebSocket connection.
///
/// `user` is optional; connections that do not name a user run under the
/// configured default identity (anonymous single-room demo use).
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub user: Option<String>,
}

/// Tracks live sessions and enforces the concurrent-session bound.
///
/// Sessions share no state with each other; the registry only hands out
/// session ids and counts open connections so upgrades beyond capacity can
/// be refused.
pub struct SessionRegistry {
    next_id: AtomicU64,
    active: AtomicUsize,
    capacity: usize,
}

impl SessionRegistry {
    /// Create a registry with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            next_id: AtomicU64::new(0),
            active: AtomicUsize::new(0),
            capacity,
        }
    }

    /// Claim a slot for a new session. Returns an owning handle, or None if
    /// the registry is at capacity.
    pub fn try_register(self: &Arc<Self>) -> Option<SessionSlot> {
        let mut current = self.active.load(Ordering::Acquire);
        loop {
            if current >= self.capacity {
                return None;
            }
            match self.active.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    return Some(SessionSlot {
                        id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                        registry: Arc::clone(self),
                    });
                }
                Err(observed) => current = observed,
            }
        }
    }

    fn release(&self) {
        self.active.fetch_sub(1, Ordering::AcqRel);
    }

    /// Number of currently open sessions
    pub fn active_count(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }
}

/// Owning handle on a registry slot.
///
/// The slot is returned when the handle is dropped. The upgrade handler
/// moves the handle into the socket callback, so a connection that is torn
/// down before the upgrade completes still frees its slot when the
/// never-invoked callback is dropped.
pub struct SessionSlot {
    id: u64,
    registry: Arc<SessionRegistry>,
}

impl SessionSlot {
    /// The session id assigned with this slot
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for SessionSlot {
    fn drop(&mut self) {
        self.registry.release();
    }
}

/// Shared application state
pub struct AppState {
    /// MessageStore（データアクセス層の抽象化）
    pub store: Arc<dyn MessageStore>,
    /// Bot response corpus, immutable after startup
    pub responder: Arc<ResponseSelector>,
    /// Live session accounting
    pub registry: Arc<SessionRegistry>,
    /// Room that sessions attach to
    pub room_name: RoomName,
    /// Identity for connections that do not name a user
    pub default_user: UserName,
    /// Simulated typing delay before the bot frame
    pub bot_delay: Duration,
    /// Connected-but-silent sessions are closed after this long
    pub idle_timeout: Duration,
}
