//! The identity snapshot derived from the access token.

use serde::{Deserialize, Serialize};

use brainbox_entity::user::Role;

use crate::error::SessionError;
use crate::jwt::AccessClaims;

/// Coarse session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No usable login.
    Anonymous,
    /// Logged in with a non-guest role.
    Authenticated,
}

/// Who the console is acting as.
///
/// `user_role` is [`Role::Guest`] exactly when `authenticated` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Whether a login is in effect.
    pub authenticated: bool,
    /// Id of the logged-in user.
    pub user_id: Option<i64>,
    /// Role of the logged-in user, `Guest` when anonymous.
    pub user_role: Role,
}

impl Identity {
    /// The logged-out identity.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user_id: None,
            user_role: Role::Guest,
        }
    }

    /// Build an authenticated identity from access-token claims.
    ///
    /// A token without an account role cannot back an authenticated
    /// session and is rejected as malformed.
    pub fn from_claims(claims: &AccessClaims) -> Result<Self, SessionError> {
        match claims.user_role {
            Some(role) if !role.is_guest() => Ok(Self {
                authenticated: true,
                user_id: Some(claims.user_id),
                user_role: role,
            }),
            _ => Err(SessionError::MalformedToken(
                "access token carries no account role".to_string(),
            )),
        }
    }

    /// Current state of the session this identity belongs to.
    pub fn state(&self) -> SessionState {
        if self.authenticated {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_is_guest() {
        let identity = Identity::default();
        assert!(!identity.authenticated);
        assert_eq!(identity.user_id, None);
        assert_eq!(identity.user_role, Role::Guest);
        assert_eq!(identity.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_from_claims() {
        let claims = AccessClaims {
            user_id: 7,
            user_role: Some(Role::Admin),
            exp: 0,
        };
        let identity = Identity::from_claims(&claims).unwrap();
        assert_eq!(identity.user_id, Some(7));
        assert_eq!(identity.user_role, Role::Admin);
        assert_eq!(identity.state(), SessionState::Authenticated);
    }

    #[test]
    fn test_guest_or_missing_role_rejected() {
        for role in [None, Some(Role::Guest)] {
            let claims = AccessClaims {
                user_id: 7,
                user_role: role,
                exp: 0,
            };
            assert!(matches!(
                Identity::from_claims(&claims),
                Err(SessionError::MalformedToken(_))
            ));
        }
    }
}
