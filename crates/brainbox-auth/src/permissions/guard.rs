//! Role-based route guards.

use std::fmt;

use brainbox_core::error::{AppError, ErrorKind};
use brainbox_core::result::AppResult;
use brainbox_entity::user::Role;

use crate::session::{Identity, is_public_path};

/// Where a refused caller is sent instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// Back to the landing view.
    Home,
    /// The "not allowed" view.
    Unauthorized,
    /// The login view.
    Login,
}

impl fmt::Display for Redirect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Login => write!(f, "login"),
        }
    }
}

/// Outcome of trying to enter a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Entry permitted.
    Allow,
    /// Entry refused.
    Redirect(Redirect),
}

/// The set of roles allowed to enter a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: Vec<Role>,
}

impl RouteGuard {
    /// Guard admitting exactly `allowed`.
    pub fn new(allowed: &[Role]) -> Self {
        Self {
            allowed: allowed.to_vec(),
        }
    }

    /// Login and registration: anonymous callers only.
    pub fn guests_only() -> Self {
        Self::new(&[Role::Guest])
    }

    /// List and detail views.
    pub fn everyone() -> Self {
        Self::new(&Role::ALL)
    }

    /// Add, edit and delete views.
    pub fn members() -> Self {
        Self::new(&Role::ACCOUNT_ROLES)
    }

    /// The admin dashboard.
    pub fn admin_only() -> Self {
        Self::new(&[Role::Admin])
    }

    /// Roles this guard admits.
    pub fn allowed(&self) -> &[Role] {
        &self.allowed
    }

    /// Decide whether `identity` may enter the route at `path`.
    pub fn check(&self, identity: &Identity, path: &str) -> RouteDecision {
        if self.allowed.contains(&identity.user_role) {
            return RouteDecision::Allow;
        }

        if !identity.authenticated {
            RouteDecision::Redirect(Redirect::Login)
        } else if is_public_path(path) {
            RouteDecision::Redirect(Redirect::Home)
        } else {
            RouteDecision::Redirect(Redirect::Unauthorized)
        }
    }

    /// [`check`](Self::check) as a `Result`, for command gating.
    pub fn require(&self, identity: &Identity, path: &str) -> AppResult<()> {
        match self.check(identity, path) {
            RouteDecision::Allow => Ok(()),
            RouteDecision::Redirect(Redirect::Login) => Err(AppError::authentication(format!(
                "'{path}' requires a login; run `brainbox login` first"
            ))),
            RouteDecision::Redirect(Redirect::Home) => Err(AppError::new(
                ErrorKind::Conflict,
                "Already logged in; run `brainbox logout` first",
            )),
            RouteDecision::Redirect(Redirect::Unauthorized) => Err(AppError::authorization(
                format!("Role '{}' may not access '{path}'", identity.user_role),
            )),
        }
    }
}
