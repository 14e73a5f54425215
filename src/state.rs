//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` wires one "tab" of the client: a storage handle on the
//! configured scope, the token store over it, the auth bus, the session
//! context, the navigator and router, and the API client. Every command
//! handler receives it by reference. Clone is cheap; all parts are
//! Arc-backed handles.

use std::sync::Arc;

use session::{
    ApiClient, AuthBus, Navigator, ReqwestTransport, Router, SessionContext, StorageHandle, StorageScope, TaskGuard,
    TaskScope, TokenStore, Transport,
};

use crate::config::{AppConfig, SessionStore};
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub storage: StorageHandle,
    pub store: TokenStore,
    pub bus: AuthBus,
    pub session: SessionContext,
    pub navigator: Navigator,
    pub router: Router,
    pub api: ApiClient,
    /// Background work owned by this tab (best-effort logout calls).
    pub tasks: Arc<TaskScope>,
}

impl AppState {
    /// Open the configured storage scope and build a live HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the session file is unreadable or the HTTP client
    /// cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let scope = match &config.session_store {
            SessionStore::Memory => StorageScope::memory(),
            SessionStore::File(path) => {
                tracing::debug!(path = %path.display(), "opening session file");
                StorageScope::file(path)?
            }
        };
        let transport = ReqwestTransport::new(
            &config.api_base_url,
            config.timeouts.request(),
            config.timeouts.connect(),
        )?;
        Self::from_parts(&scope, Arc::new(transport))
    }

    /// Build a tab on an existing scope with any transport.
    ///
    /// # Errors
    ///
    /// Returns an error if migrating a legacy token fails to persist.
    pub fn from_parts(scope: &StorageScope, transport: Arc<dyn Transport>) -> Result<Self, AppError> {
        let storage = scope.handle();
        let store = TokenStore::new(storage.clone());
        store.migrate_legacy()?;

        let bus = AuthBus::new();
        let session = SessionContext::new(store.clone(), bus.clone());
        let navigator = Navigator::default();
        let router = Router::new(session.clone(), navigator.clone());
        let api = ApiClient::new(transport, store.clone(), bus.clone(), navigator.clone());

        Ok(Self { storage, store, bus, session, navigator, router, api, tasks: Arc::new(TaskScope::new()) })
    }

    /// Keep the session snapshot in step with bus events and foreign storage
    /// writes. Both stop when the returned guards are dropped.
    #[must_use]
    pub fn start_sync(&self) -> [TaskGuard; 2] {
        [self.bus.bridge_storage(&self.storage), self.session.listen()]
    }
}
