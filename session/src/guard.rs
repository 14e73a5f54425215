//! Route guards: decide whether a page renders or the visitor is bounced to
//! sign-in. Guards are stateless and run on every navigation.

use crate::context::{SessionSnapshot, Viewer};
use crate::nav::SIGN_IN_PATH;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Render,
    Redirect {
        to: String,
        /// Attempted destination, preserved for after sign-in.
        from: String,
    },
}

impl Decision {
    fn to_sign_in(from: &str) -> Self {
        Self::Redirect { to: SIGN_IN_PATH.to_owned(), from: from.to_owned() }
    }
}

pub trait RouteGuard: Send + Sync {
    fn check(&self, session: &SessionSnapshot, path: &str) -> Decision;
}

/// Any signed-in viewer.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthenticatedGuard;

impl RouteGuard for AuthenticatedGuard {
    fn check(&self, session: &SessionSnapshot, path: &str) -> Decision {
        match session.viewer() {
            Viewer::Guest => Decision::to_sign_in(path),
            Viewer::Customer | Viewer::Admin => Decision::Render,
        }
    }
}

/// Signed-in admins only. Customers are sent to sign-in like guests; there is
/// no separate forbidden page.
#[derive(Debug, Default, Clone, Copy)]
pub struct AdminGuard;

impl RouteGuard for AdminGuard {
    fn check(&self, session: &SessionSnapshot, path: &str) -> Decision {
        match session.viewer() {
            Viewer::Admin => Decision::Render,
            Viewer::Guest | Viewer::Customer => Decision::to_sign_in(path),
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
