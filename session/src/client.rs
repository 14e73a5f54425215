//! Authenticated API client with single-flight silent refresh.
//!
//! DESIGN
//! ======
//! Every call goes through `send`:
//!
//! 1. Attach `Authorization: Bearer <access>` unless the path is a
//!    credential endpoint (login/signup/refresh/logout).
//! 2. On 401/403 for a non-credential request that has not been retried,
//!    mark it retried and wait for a refresh.
//! 3. Exactly one refresh runs at a time. The first failing request starts
//!    it in a spawned task; later ones queue in arrival order and are woken
//!    with the outcome. A request whose token was already rotated by a
//!    finished refresh retries with the current token instead.
//! 4. Refresh success stores the new tokens and replays each request once.
//!    Refresh failure clears the store, publishes `SessionExpired`,
//!    redirects to sign-in and fails every waiter with its own error.
//! 5. A session that ended (or was replaced) while the exchange was in
//!    flight is never overwritten, and an already-ended session is not
//!    refreshed or expired a second time.
//!
//! TRADE-OFFS
//! ==========
//! The refresh bookkeeping sits behind a std `Mutex` that is never held
//! across an await. Store updates happen under the same lock, so a request
//! that finds no refresh in flight always sees the latest token.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::oneshot;
use wire::{AuthResponse, RefreshRequest};

use crate::error::{ApiError, RefreshError};
use crate::nav::Navigator;
use crate::store::TokenStore;
use crate::sync::{AuthBus, AuthEvent};
use crate::transport::{ApiRequest, ApiResponse, Transport};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const REFRESH_PATH: &str = "/api/auth/refresh";
pub const LOGOUT_PATH: &str = "/api/auth/logout";

const CREDENTIAL_PATHS: [&str; 4] = [LOGIN_PATH, SIGNUP_PATH, REFRESH_PATH, LOGOUT_PATH];

/// Credential endpoints never carry a bearer token and never refresh.
#[must_use]
pub fn is_credential_endpoint(path: &str) -> bool {
    let path = path.split('?').next().unwrap_or_default().trim_end_matches('/');
    CREDENTIAL_PATHS.contains(&path)
}

fn is_auth_failure(status: u16) -> bool {
    matches!(status, 401 | 403)
}

type Waiter = oneshot::Sender<Result<String, RefreshError>>;

#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: VecDeque<Waiter>,
}

struct ClientInner {
    transport: Arc<dyn Transport>,
    store: TokenStore,
    bus: AuthBus,
    navigator: Navigator,
    refresh: Mutex<RefreshState>,
}

#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, store: TokenStore, bus: AuthBus, navigator: Navigator) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                store,
                bus,
                navigator,
                refresh: Mutex::new(RefreshState::default()),
            }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &TokenStore {
        &self.inner.store
    }

    // =========================================================================
    // PIPELINE
    // =========================================================================

    /// Send `request` through the token/refresh pipeline. Any non-2xx final
    /// response becomes [`ApiError::Status`].
    ///
    /// # Errors
    ///
    /// Returns the final status error, a transport error, or the original
    /// 401/403 error when the refresh fails.
    pub async fn send(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let credential = is_credential_endpoint(&request.path);
        let token = if credential { None } else { self.inner.store.access_token() };
        request.set_bearer(token.as_deref())?;

        let response = self.inner.transport.send(&request).await?;
        if credential || request.retried || !is_auth_failure(response.status) {
            return response.into_success();
        }

        request.retried = true;
        let original = response.to_error();
        let fresh = match self.await_refresh(token.as_deref()).await {
            Ok(fresh) => fresh,
            Err(err) => {
                tracing::debug!(path = %request.path, error = %err, "request failed after refresh failure");
                return Err(original);
            }
        };

        request.set_bearer(Some(&fresh))?;
        self.inner.transport.send(&request).await?.into_success()
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`]; also [`ApiError::Decode`] for a bad body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(ApiRequest::get(path)).await?.json()
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`]; also encode/decode errors.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send(ApiRequest::post_json(path, body)?).await?.json()
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`]; also encode/decode errors.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send(ApiRequest::put_json(path, body)?).await?.json()
    }

    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.send(ApiRequest::delete(path)).await
    }

    // =========================================================================
    // SINGLE-FLIGHT REFRESH
    // =========================================================================

    /// Wait for a token newer than `used`, starting a refresh if none is
    /// running.
    async fn await_refresh(&self, used: Option<&str>) -> Result<String, RefreshError> {
        let rx = {
            let mut state = self.inner.refresh.lock().unwrap_or_else(PoisonError::into_inner);
            if !state.in_flight {
                match self.inner.store.access_token() {
                    None => {
                        tracing::debug!("session already ended; not refreshing");
                        return Err(RefreshError::SessionEnded);
                    }
                    Some(current) if used != Some(current.as_str()) => {
                        tracing::debug!("token already rotated; retrying without refresh");
                        return Ok(current);
                    }
                    Some(_) => {}
                }
            }

            let (tx, rx) = oneshot::channel();
            state.waiters.push_back(tx);
            if !state.in_flight {
                state.in_flight = true;
                let client = self.clone();
                // Detached so a cancelled caller cannot strand the queue.
                tokio::spawn(async move { client.run_refresh().await });
            }
            rx
        };

        rx.await
            .unwrap_or_else(|_| Err(RefreshError::Unreachable("refresh task ended without a result".to_owned())))
    }

    async fn run_refresh(&self) {
        let exchanged_token = self.inner.store.refresh_token();
        let exchanged = match &exchanged_token {
            Some(token) => self.exchange_refresh_token(token.clone()).await,
            None => Err(RefreshError::MissingRefreshToken),
        };

        let (outcome, replaced) = {
            let mut state = self.inner.refresh.lock().unwrap_or_else(PoisonError::into_inner);
            // Logout, account deletion or a new login may have replaced the
            // session while the exchange was on the wire.
            let replaced = self.inner.store.refresh_token() != exchanged_token;
            let outcome = if replaced {
                self.inner.store.access_token().ok_or(RefreshError::SessionEnded)
            } else {
                exchanged.and_then(|resp| {
                    self.inner
                        .store
                        .update_tokens(&resp.access_token, resp.refresh_token.as_deref())
                        .map_err(|e| RefreshError::Storage(e.to_string()))?;
                    Ok(resp.access_token)
                })
            };

            if matches!(outcome, Err(ref e) if *e != RefreshError::SessionEnded) {
                if let Err(e) = self.inner.store.clear() {
                    tracing::error!(error = %e, "failed to clear session after refresh failure");
                }
            }

            state.in_flight = false;
            let waiters = std::mem::take(&mut state.waiters);
            tracing::debug!(waiters = waiters.len(), ok = outcome.is_ok(), replaced, "resuming queued requests");
            for waiter in waiters {
                // A waiter whose caller was cancelled has dropped its receiver.
                let _ = waiter.send(outcome.clone());
            }
            (outcome, replaced)
        };

        match outcome {
            Ok(_) if replaced => tracing::debug!("session replaced during refresh; exchanged token discarded"),
            Ok(_) => {
                tracing::info!("access token refreshed");
                self.inner.bus.publish(AuthEvent::TokenRefreshed);
            }
            Err(RefreshError::SessionEnded) => tracing::debug!("session ended during refresh; nothing to expire"),
            Err(err) => {
                tracing::warn!(error = %err, "token refresh failed; session cleared");
                self.inner
                    .bus
                    .publish(AuthEvent::SessionExpired { reason: err.to_string() });
                let from = self.inner.navigator.current().path;
                self.inner.navigator.redirect_to_sign_in(Some(&from));
            }
        }
    }

    async fn exchange_refresh_token(&self, refresh_token: String) -> Result<AuthResponse, RefreshError> {
        let request = ApiRequest::post_json(REFRESH_PATH, &RefreshRequest { refresh_token })
            .map_err(|e| RefreshError::Malformed(e.to_string()))?;
        let response = self
            .inner
            .transport
            .send(&request)
            .await
            .map_err(|e| RefreshError::Unreachable(e.to_string()))?;

        if !response.is_success() {
            return Err(RefreshError::Rejected { status: response.status });
        }

        let body: AuthResponse = response
            .json()
            .map_err(|e| RefreshError::Malformed(e.to_string()))?;
        if body.access_token.is_empty() {
            return Err(RefreshError::Malformed("empty access token".to_owned()));
        }
        Ok(body)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
