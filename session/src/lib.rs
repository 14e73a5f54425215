//! Session core for the Rajawarama client.
//!
//! ARCHITECTURE
//! ============
//! Leaf first:
//!
//! - `storage`: key/value scopes (memory or file) with per-handle change
//!   notifications.
//! - `store`: the token store, sole owner of the five persisted session keys.
//! - `sync`: the auth event bus and the storage bridge.
//! - `context`: reactive session snapshot derived from the store.
//! - `nav`, `guard`, `router`: location, route guards and the route table.
//! - `transport`, `client`: request pipeline with single-flight refresh.
//! - `scope`: task ownership so teardown cancels in-flight work.

pub mod client;
pub mod context;
pub mod error;
pub mod guard;
pub mod nav;
pub mod router;
pub mod scope;
pub mod storage;
pub mod store;
pub mod sync;
pub mod transport;

pub use client::{ApiClient, LOGIN_PATH, LOGOUT_PATH, REFRESH_PATH, SIGNUP_PATH, is_credential_endpoint};
pub use context::{SessionContext, SessionSnapshot, Viewer};
pub use error::{ApiError, RefreshError, TransportError};
pub use guard::{AdminGuard, AuthenticatedGuard, Decision, RouteGuard};
pub use nav::{Location, Navigator, SIGN_IN_PATH};
pub use router::{Page, RouteAccess, Router};
pub use scope::{TaskGuard, TaskScope};
pub use storage::{StorageError, StorageHandle, StorageScope};
pub use store::{SessionGrant, StoreError, StoredSession, TokenStore};
pub use sync::{AuthBus, AuthEvent, Subscription};
pub use transport::{ApiRequest, ApiResponse, Body, FormPart, ReqwestTransport, Transport};
