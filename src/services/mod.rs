//! Typed calls behind each screen.
//!
//! Every operation validates its form first (nothing is sent on a
//! validation error), goes through the shared `ApiClient` so token attach
//! and refresh apply uniformly, and reports success as a [`Notice`].

pub mod auth;
pub mod catalog;
pub mod packages;
pub mod profile;
pub mod users;

#[cfg(test)]
pub(crate) mod fake;

use serde::Serialize;
use session::{ApiClient, ApiRequest};

use crate::error::AppError;
use crate::notice::Notice;

/// Turn a failed call into the notice the screen would show.
#[must_use]
pub fn failure_notice(err: &AppError, fallback: &str, session_lost: bool) -> Notice {
    match err {
        AppError::Api(api) if api.is_auth_failure() && session_lost => Notice::session_expired(),
        AppError::Api(api) => Notice::from_api_error(api, fallback),
        AppError::Transport(_) => Notice::error(session::error::NETWORK_ERROR_MESSAGE),
        AppError::Validation(errs) => {
            Notice::error(errs.errors().first().map_or_else(|| fallback.to_owned(), |e| e.message.clone()))
        }
        AppError::Redirected { .. } => Notice::info(err.to_string()),
        _ => Notice::error(fallback),
    }
}

pub(crate) async fn post(api: &ApiClient, path: &str, body: &impl Serialize) -> Result<(), AppError> {
    api.send(ApiRequest::post_json(path, body)?).await?;
    Ok(())
}

pub(crate) async fn put(api: &ApiClient, path: &str, body: &impl Serialize) -> Result<(), AppError> {
    api.send(ApiRequest::put_json(path, body)?).await?;
    Ok(())
}

pub(crate) async fn delete(api: &ApiClient, path: &str) -> Result<(), AppError> {
    api.delete(path).await?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
