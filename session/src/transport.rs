//! Request/response types and the network seam.
//!
//! `ApiClient` never talks to reqwest directly; it drives a [`Transport`].
//! Production uses [`ReqwestTransport`]; tests script an in-process fake.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, TransportError};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// REQUEST
// =============================================================================

/// One part of a multipart form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FormPart {
    /// A JSON document sent as its own part (`application/json`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `value` cannot be serialized.
    pub fn json<T: Serialize>(name: &str, value: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(value).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(Self { name: name.to_owned(), file_name: None, content_type: "application/json".to_owned(), bytes })
    }

    #[must_use]
    pub fn file(name: &str, file_name: &str, content_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: name.to_owned(),
            file_name: Some(file_name.to_owned()),
            content_type: content_type.to_owned(),
            bytes,
        }
    }
}

/// Owned request body, cloneable so a request can be replayed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the API base URL, e.g. `/api/profile`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Body,
    /// Set once the request has been through a refresh; never refreshed again.
    pub retried: bool,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), headers: HeaderMap::new(), body: Body::Empty, retried: false }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn post_json<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Self::new(Method::POST, path).with_json(body)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn put_json<B: Serialize>(path: impl Into<String>, body: &B) -> Result<Self, ApiError> {
        Self::new(Method::PUT, path).with_json(body)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized.
    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        self.body = Body::Json(serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?);
        Ok(self)
    }

    #[must_use]
    pub fn with_multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Body::Multipart(parts);
        self
    }

    /// Set or clear the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] if the token has bytes a header
    /// cannot carry.
    pub fn set_bearer(&mut self, token: Option<&str>) -> Result<(), ApiError> {
        match token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
                value.set_sensitive(true);
                self.headers.insert(AUTHORIZATION, value);
            }
            None => {
                self.headers.remove(AUTHORIZATION);
            }
        }
        Ok(())
    }

    /// Token currently in the Authorization header, if any.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.headers.get(AUTHORIZATION)?.to_str().ok()?.strip_prefix("Bearer ")
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body is not a valid `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// The `message` (or `error`) field of a JSON error body.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        let body: ErrorBody = serde_json::from_slice(&self.body).ok()?;
        body.message.or(body.error).filter(|m| !m.trim().is_empty())
    }

    /// Map a non-success response to [`ApiError::Status`].
    #[must_use]
    pub fn to_error(&self) -> ApiError {
        ApiError::Status { status: self.status, message: self.error_message() }
    }

    /// # Errors
    ///
    /// Returns the status error for non-2xx responses.
    pub fn into_success(self) -> Result<Self, ApiError> {
        if self.is_success() { Ok(self) } else { Err(self.to_error()) }
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError>;
}

/// HTTP transport rooted at the API base URL.
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: String,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the TLS backend fails to
    /// initialise.
    pub fn new(base_url: &str, request_timeout: Duration, connect_timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn multipart(parts: &[FormPart]) -> Result<reqwest::multipart::Form, TransportError> {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            let mut p = reqwest::multipart::Part::bytes(part.bytes.clone())
                .mime_str(&part.content_type)
                .map_err(|e| TransportError::Build(e.to_string()))?;
            if let Some(file_name) = &part.file_name {
                p = p.file_name(file_name.clone());
            }
            form = form.part(part.name.clone(), p);
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());

        builder = match &request.body {
            Body::Empty => builder,
            Body::Json(value) => builder.json(value),
            Body::Multipart(parts) => builder.multipart(Self::multipart(parts)?),
        };

        tracing::debug!(method = %request.method, path = %request.path, retried = request.retried, "api request");
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?
            .to_vec();

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod tests;
