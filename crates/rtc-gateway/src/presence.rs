//! Presence registry
//!
//! Tracks which users currently hold at least one live WebSocket connection.
//! State is process-local and derived entirely from the connection lifecycle;
//! nothing here is persisted. A user with zero connections has no entry at
//! all.
//!
//! Each mutation reports whether it crossed the offline/online edge, and that
//! flag is computed inside the same critical section as the mutation itself.
//! Callers broadcast presence changes only when the flag is true, so any
//! interleaving of connects and disconnects yields exactly one announcement
//! per actual edge.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use rtc_core::value_objects::{ConnectionId, UserId};

/// In-memory user presence, keyed by live connections
pub struct PresenceRegistry {
    online: Mutex<HashMap<UserId, HashSet<ConnectionId>>>,
}

impl PresenceRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            online: Mutex::new(HashMap::new()),
        }
    }

    /// Create a new registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Record a connection for a user.
    ///
    /// Returns `true` only when this is the user's first live connection,
    /// the offline → online transition.
    pub fn mark_online(&self, user_id: UserId, connection_id: ConnectionId) -> bool {
        let mut online = self.online.lock();
        let connections = online.entry(user_id).or_default();
        let was_offline = connections.is_empty();
        connections.insert(connection_id);
        was_offline
    }

    /// Remove a connection for a user.
    ///
    /// Returns `true` only when this was the user's last live connection,
    /// the online → offline transition. Unknown pairs are a no-op.
    pub fn mark_offline(&self, user_id: UserId, connection_id: ConnectionId) -> bool {
        let mut online = self.online.lock();
        let Some(connections) = online.get_mut(&user_id) else {
            return false;
        };
        if !connections.remove(&connection_id) {
            return false;
        }
        if connections.is_empty() {
            online.remove(&user_id);
            true
        } else {
            false
        }
    }

    /// Whether the user has at least one live connection
    pub fn is_online(&self, user_id: UserId) -> bool {
        self.online.lock().contains_key(&user_id)
    }

    /// All currently online user ids
    pub fn snapshot(&self) -> Vec<UserId> {
        self.online.lock().keys().copied().collect()
    }

    /// Number of online users
    pub fn online_count(&self) -> usize {
        self.online.lock().len()
    }
}

impl Default for PresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PresenceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceRegistry")
            .field("online_users", &self.online.lock().len())
            .finish()
    }
}
