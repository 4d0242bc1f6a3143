//! Leaderboard change fan-out hub.
//!
//! Workflows trigger the hub through the [`LeaderboardNotifier`] port;
//! WebSocket sessions subscribe and receive one [`Signal`] per trigger.
//! Subscribers are held in a registry keyed by a monotonically increasing
//! id, and a subscriber whose channel has closed is dropped on the next
//! trigger rather than eagerly reaped.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::ports::LeaderboardNotifier;

/// Payload delivered to each subscriber per trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal;

/// Handle returned by [`UpdateHub::subscribe`]; used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// Registry of live subscribers to leaderboard change signals.
#[derive(Debug, Default)]
pub struct UpdateHub {
    subscribers: Mutex<HashMap<u64, mpsc::UnboundedSender<Signal>>>,
    next_id: AtomicU64,
}

impl UpdateHub {
    /// Hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and return its id plus the receiving end.
    pub fn subscribe(&self) -> (SubscriberId, mpsc::UnboundedReceiver<Signal>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(id, sender);
        debug!(subscriber = id, "subscriber registered");
        (SubscriberId(id), receiver)
    }

    /// Remove a subscriber. Removing an already dropped id is a no-op.
    pub fn unsubscribe(&self, id: SubscriberId) {
        if self.lock().remove(&id.0).is_some() {
            debug!(subscriber = id.0, "subscriber removed");
        }
    }

    /// Number of currently registered subscribers.
    #[must_use]
    pub(crate) fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, mpsc::UnboundedSender<Signal>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl LeaderboardNotifier for UpdateHub {
    fn leaderboard_changed(&self) {
        let mut subscribers = self.lock();
        subscribers.retain(|id, sender| {
            let delivered = sender.send(Signal).is_ok();
            if !delivered {
                debug!(subscriber = id, "dropping closed subscriber");
            }
            delivered
        });
    }
}
