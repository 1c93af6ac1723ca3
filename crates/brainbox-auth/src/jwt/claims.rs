//! Claims read from backend-issued tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brainbox_entity::user::Role;

/// Claims of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Id of the logged-in user.
    pub user_id: i64,
    /// Role of the logged-in user.
    #[serde(default)]
    pub user_role: Option<Role>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// The only claim read from a refresh token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryClaims {
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Tokens that carry an expiration claim.
pub trait Expiring {
    /// Expiration timestamp (seconds since epoch).
    fn exp(&self) -> i64;

    /// Whether the token is expired at `now` (expiry is inclusive).
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp() <= now.timestamp()
    }

    /// Whether the token is expired right now.
    fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl Expiring for AccessClaims {
    fn exp(&self) -> i64 {
        self.exp
    }
}

impl Expiring for ExpiryClaims {
    fn exp(&self) -> i64 {
        self.exp
    }
}
