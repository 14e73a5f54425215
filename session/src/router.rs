//! Route table and guarded navigation.

use crate::context::SessionContext;
use crate::guard::{AdminGuard, AuthenticatedGuard, Decision, RouteGuard};
use crate::nav::{HOME_PATH, Navigator, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Services,
    Packages,
    Booking,
    Contact,
    SignIn,
    SignUp,
    Profile,
    AdminDashboard,
    AdminCategories,
    AdminDressItems,
    AdminDancingPackages,
    AdminSpecialPackages,
    AdminUsers,
    NotFound,
}

impl Page {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Services => "Services",
            Self::Packages => "Packages",
            Self::Booking => "Booking",
            Self::Contact => "Contact",
            Self::SignIn => "Sign in",
            Self::SignUp => "Sign up",
            Self::Profile => "Profile",
            Self::AdminDashboard => "Admin dashboard",
            Self::AdminCategories => "Category manager",
            Self::AdminDressItems => "Dress item manager",
            Self::AdminDancingPackages => "Dancing package manager",
            Self::AdminSpecialPackages => "Special package manager",
            Self::AdminUsers => "User manager",
            Self::NotFound => "Not found",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Authenticated,
    Admin,
}

impl RouteAccess {
    fn guard(self) -> Option<&'static dyn RouteGuard> {
        match self {
            Self::Public => None,
            Self::Authenticated => Some(&AuthenticatedGuard),
            Self::Admin => Some(&AdminGuard),
        }
    }
}

pub const ROUTES: &[(&str, Page, RouteAccess)] = &[
    ("/", Page::Home, RouteAccess::Public),
    ("/services", Page::Services, RouteAccess::Public),
    ("/packages", Page::Packages, RouteAccess::Public),
    ("/booking", Page::Booking, RouteAccess::Public),
    ("/contact", Page::Contact, RouteAccess::Public),
    ("/signin", Page::SignIn, RouteAccess::Public),
    ("/signup", Page::SignUp, RouteAccess::Public),
    ("/not-found", Page::NotFound, RouteAccess::Public),
    ("/profile", Page::Profile, RouteAccess::Authenticated),
    ("/admin", Page::AdminDashboard, RouteAccess::Admin),
    ("/admin/categories", Page::AdminCategories, RouteAccess::Admin),
    ("/admin/dress-items", Page::AdminDressItems, RouteAccess::Admin),
    ("/admin/dancing-packages", Page::AdminDancingPackages, RouteAccess::Admin),
    ("/admin/special-packages", Page::AdminSpecialPackages, RouteAccess::Admin),
    ("/admin/users", Page::AdminUsers, RouteAccess::Admin),
];

/// Look up `path`; unknown paths resolve to the public not-found page.
#[must_use]
pub fn resolve(path: &str) -> (Page, RouteAccess) {
    let path = normalize(path);
    ROUTES
        .iter()
        .find(|(p, _, _)| *p == path)
        .map_or((Page::NotFound, RouteAccess::Public), |&(_, page, access)| (page, access))
}

#[derive(Clone)]
pub struct Router {
    session: SessionContext,
    navigator: Navigator,
}

impl Router {
    #[must_use]
    pub fn new(session: SessionContext, navigator: Navigator) -> Self {
        Self { session, navigator }
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Navigate to `path`, running its guard against the current session.
    /// Returns the page that actually renders.
    pub fn navigate(&self, path: &str) -> Page {
        let path = normalize(path);
        let (page, access) = resolve(&path);
        let decision = access
            .guard()
            .map_or(Decision::Render, |guard| guard.check(&self.session.snapshot(), &path));

        match decision {
            Decision::Render => {
                self.navigator.navigate(&path);
                page
            }
            Decision::Redirect { to, from } => {
                tracing::debug!(%from, %to, "route guard redirect");
                self.navigator.redirect_to_sign_in(Some(&from));
                resolve(&to).0
            }
        }
    }

    /// Where to go after a successful sign-in: the remembered destination if
    /// the guard now admits it, otherwise home.
    pub fn after_sign_in(&self) -> Page {
        let target = self.navigator.take_return_to().unwrap_or_else(|| HOME_PATH.to_owned());
        let page = self.navigate(&target);
        if page == Page::SignIn {
            // Signed in but still not allowed (customer on an admin page).
            self.navigator.take_return_to();
            return self.navigate(HOME_PATH);
        }
        page
    }
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
