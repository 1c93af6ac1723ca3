//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles known to BrainBox.
///
/// Variants are declared in privilege order, so the derived ordering is
/// `Guest < User < Moderator < Admin`. The order only matters for moderation
/// overrides; it is not a general "at least" hierarchy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String")]
pub enum Role {
    /// Not logged in.
    #[default]
    Guest,
    /// Regular account.
    User,
    /// May modify content owned by regular users.
    Moderator,
    /// May modify everything and use the admin dashboard.
    Admin,
}

impl Role {
    /// Every role, lowest first.
    pub const ALL: [Role; 4] = [Role::Guest, Role::User, Role::Moderator, Role::Admin];

    /// Roles an account can hold (everything but `Guest`).
    pub const ACCOUNT_ROLES: [Role; 3] = [Role::User, Role::Moderator, Role::Admin];

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role belongs to a logged-in account.
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::Guest)
    }

    /// Return the role in its wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "Guest",
            Self::User => "User",
            Self::Moderator => "Moderator",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = brainbox_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            _ => Err(brainbox_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: Guest, User, Moderator, Admin"
            ))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = brainbox_core::AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
