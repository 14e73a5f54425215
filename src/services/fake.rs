//! In-process backend for service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::Method;
use session::{ApiRequest, ApiResponse, Body, SessionGrant, StorageScope, Transport, TransportError};

use crate::state::AppState;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Body,
}

impl Recorded {
    pub fn json(&self) -> serde_json::Value {
        match &self.body {
            Body::Json(value) => value.clone(),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }
}

/// Canned responses keyed by `(method, path)`; unknown routes answer 404.
#[derive(Default)]
pub struct FakeBackend {
    routes: Mutex<HashMap<(Method, String), ApiResponse>>,
    recorded: Mutex<Vec<Recorded>>,
}

impl FakeBackend {
    pub fn on(&self, method: Method, path: &str, status: u16, body: serde_json::Value) {
        let body = if body.is_null() { Vec::new() } else { serde_json::to_vec(&body).expect("json") };
        self.routes
            .lock()
            .expect("lock")
            .insert((method, path.to_owned()), ApiResponse { status, body });
    }

    pub fn recorded(&self) -> Vec<Recorded> {
        self.recorded.lock().expect("lock").clone()
    }

    pub fn last(&self) -> Recorded {
        self.recorded().pop().expect("at least one request")
    }
}

#[async_trait]
impl Transport for FakeBackend {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.recorded.lock().expect("lock").push(Recorded {
            method: request.method.clone(),
            path: request.path.clone(),
            bearer: request.bearer().map(str::to_owned),
            body: request.body.clone(),
        });
        let routes = self.routes.lock().expect("lock");
        Ok(routes
            .get(&(request.method.clone(), request.path.clone()))
            .cloned()
            .unwrap_or(ApiResponse { status: 404, body: br#"{"message":"Not found"}"#.to_vec() }))
    }
}

pub fn app() -> (AppState, Arc<FakeBackend>) {
    let backend = Arc::new(FakeBackend::default());
    let state = AppState::from_parts(&StorageScope::memory(), backend.clone()).expect("state");
    (state, backend)
}

pub fn signed_in(role: &str) -> (AppState, Arc<FakeBackend>) {
    let (state, backend) = app();
    state
        .store
        .save(&SessionGrant {
            access_token: "A1".to_owned(),
            refresh_token: "R1".to_owned(),
            role: role.to_owned(),
            email: "amali@example.lk".to_owned(),
            full_name: "Amali Fernando".to_owned(),
        })
        .expect("save");
    state.session.login();
    (state, backend)
}
