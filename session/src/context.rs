//! Reactive, read-only view of the session for the rest of the app.
//!
//! The snapshot is always recomputed from the [`TokenStore`]; it never holds
//! state of its own. Consumers either read `snapshot()` or hold a
//! `watch::Receiver` from `watch()`.

use std::sync::Arc;

use tokio::sync::watch;
use wire::Role;

use crate::scope::TaskGuard;
use crate::store::{StoreError, StoredSession, TokenStore};
use crate::sync::{AuthBus, AuthEvent};

/// Closed view of who is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Guest,
    Customer,
    Admin,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub logged_in: bool,
    pub role: Option<Role>,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn viewer(&self) -> Viewer {
        match (self.logged_in, self.role) {
            (false, _) => Viewer::Guest,
            (true, Some(Role::Admin)) => Viewer::Admin,
            (true, _) => Viewer::Customer,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.viewer() == Viewer::Admin
    }
}

impl From<&StoredSession> for SessionSnapshot {
    fn from(stored: &StoredSession) -> Self {
        Self {
            logged_in: stored.is_authenticated(),
            role: stored.role,
            full_name: stored.full_name.clone(),
            email: stored.email.clone(),
        }
    }
}

struct ContextInner {
    store: TokenStore,
    bus: AuthBus,
    tx: watch::Sender<SessionSnapshot>,
}

#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<ContextInner>,
}

impl SessionContext {
    /// Build the context from whatever the store holds right now, so a
    /// restart while signed in comes back signed in.
    #[must_use]
    pub fn new(store: TokenStore, bus: AuthBus) -> Self {
        let initial = SessionSnapshot::from(&store.snapshot());
        let (tx, _) = watch::channel(initial);
        Self { inner: Arc::new(ContextInner { store, bus, tx }) }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.tx.borrow().clone()
    }

    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.tx.subscribe()
    }

    #[must_use]
    pub fn store(&self) -> &TokenStore {
        &self.inner.store
    }

    /// Pick up a session the auth call just saved and tell everyone.
    pub fn login(&self) {
        self.reload();
        tracing::info!(role = ?self.snapshot().role, "signed in");
        self.inner.bus.publish(AuthEvent::LoggedIn);
    }

    /// Clear the store and drop to the logged-out snapshot.
    ///
    /// The snapshot is reset even when clearing storage fails.
    ///
    /// # Errors
    ///
    /// Returns the storage error from clearing the store.
    pub fn logout(&self) -> Result<(), StoreError> {
        let cleared = self.inner.store.clear();
        self.inner.tx.send_replace(SessionSnapshot::default());
        tracing::info!("signed out");
        self.inner.bus.publish(AuthEvent::LoggedOut);
        cleared
    }

    /// Re-derive the snapshot from storage. Returns whether it changed.
    pub fn reload(&self) -> bool {
        let next = SessionSnapshot::from(&self.inner.store.snapshot());
        self.inner.tx.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        })
    }

    /// Keep the snapshot in step with bus events until the guard is dropped.
    pub fn listen(&self) -> TaskGuard {
        let mut events = self.inner.bus.subscribe();
        let ctx = self.clone();
        TaskGuard::spawn(async move {
            while let Some(event) = events.recv().await {
                if ctx.reload() {
                    tracing::debug!(event = event.name(), "session snapshot updated");
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
