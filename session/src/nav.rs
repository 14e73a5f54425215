//! Current location plus the "return to" slot guards fill when they bounce a
//! visitor to sign-in.

use tokio::sync::watch;

pub const SIGN_IN_PATH: &str = "/signin";
pub const HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Destination a guard redirected away from, if any.
    pub return_to: Option<String>,
}

impl Location {
    #[must_use]
    pub fn at(path: impl Into<String>) -> Self {
        Self { path: path.into(), return_to: None }
    }
}

#[derive(Clone)]
pub struct Navigator {
    tx: watch::Sender<Location>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(HOME_PATH)
    }
}

impl Navigator {
    #[must_use]
    pub fn new(start: &str) -> Self {
        let (tx, _) = watch::channel(Location::at(normalize(start)));
        Self { tx }
    }

    #[must_use]
    pub fn current(&self) -> Location {
        self.tx.borrow().clone()
    }

    /// Move to `path`, keeping any pending `return_to`.
    pub fn navigate(&self, path: &str) {
        let path = normalize(path);
        self.tx.send_modify(|loc| loc.path = path);
    }

    /// Send the visitor to sign-in, remembering where they were headed.
    pub fn redirect_to_sign_in(&self, from: Option<&str>) {
        let return_to = from.map(normalize).filter(|p| p != SIGN_IN_PATH);
        tracing::info!(from = ?return_to, "redirecting to sign-in");
        self.tx.send_replace(Location { path: SIGN_IN_PATH.to_owned(), return_to });
    }

    /// Consume the remembered destination.
    pub fn take_return_to(&self) -> Option<String> {
        let mut taken = None;
        self.tx.send_if_modified(|loc| {
            taken = loc.return_to.take();
            taken.is_some()
        });
        taken
    }

    #[must_use]
    pub fn watch(&self) -> watch::Receiver<Location> {
        self.tx.subscribe()
    }
}

/// Drop query/fragment and trailing slashes; empty becomes `/`.
#[must_use]
pub fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        HOME_PATH.to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
#[path = "nav_test.rs"]
mod tests;
