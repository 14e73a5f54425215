//! Process-wide auth event bus.
//!
//! Every independently mounted consumer (header, profile view, router)
//! subscribes here instead of polling storage. Subscriptions are RAII: the
//! receiver is released when the [`Subscription`] is dropped.

use tokio::sync::broadcast;

use crate::scope::TaskGuard;
use crate::storage::StorageHandle;
use crate::store::SESSION_KEYS;

const BUS_CAPACITY: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    LoggedIn,
    LoggedOut,
    TokenRefreshed,
    /// Refresh failed and the session was torn down.
    SessionExpired { reason: String },
    /// A session key was written through another storage handle.
    StorageChanged { key: String },
}

impl AuthEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoggedIn => "logged_in",
            Self::LoggedOut => "logged_out",
            Self::TokenRefreshed => "token_refreshed",
            Self::SessionExpired { .. } => "session_expired",
            Self::StorageChanged { .. } => "storage_changed",
        }
    }
}

#[derive(Clone)]
pub struct AuthBus {
    tx: broadcast::Sender<AuthEvent>,
}

impl Default for AuthBus {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthBus {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BUS_CAPACITY);
        Self { tx }
    }

    /// Broadcast `event`. Returns how many subscribers received it.
    pub fn publish(&self, event: AuthEvent) -> usize {
        tracing::debug!(event = event.name(), "auth event");
        self.tx.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> Subscription {
        Subscription { rx: self.tx.subscribe() }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Forward foreign writes to session keys on `storage` as
    /// [`AuthEvent::StorageChanged`]. Stops when the guard is dropped.
    pub fn bridge_storage(&self, storage: &StorageHandle) -> TaskGuard {
        let mut changes = storage.foreign_changes();
        let bus = self.clone();
        TaskGuard::spawn(async move {
            while let Some(change) = changes.recv().await {
                if SESSION_KEYS.contains(&change.key.as_str()) {
                    bus.publish(AuthEvent::StorageChanged { key: change.key });
                }
            }
        })
    }
}

/// A live subscription to the [`AuthBus`].
#[must_use = "dropping a Subscription unsubscribes"]
pub struct Subscription {
    rx: broadcast::Receiver<AuthEvent>,
}

impl Subscription {
    /// Next event, or `None` once every bus handle is gone. Lagged events are
    /// skipped with a warning; consumers re-read state anyway.
    pub async fn recv(&mut self) -> Option<AuthEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "auth subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking poll.
    pub fn try_recv(&mut self) -> Option<AuthEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
#[path = "sync_test.rs"]
mod tests;
