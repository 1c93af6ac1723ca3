//! Session failure taxonomy.

use thiserror::Error;

use brainbox_core::error::{AppError, ErrorKind};
use brainbox_core::traits::RefreshFailure;

/// Why a session could not be established, kept fresh, or used.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No refresh token is stored.
    #[error("Could not refresh login: refresh token does not exist")]
    MissingRefreshToken,
    /// The stored refresh token's `exp` has passed.
    #[error("Could not refresh login: refresh token has expired")]
    ExpiredRefreshToken,
    /// A token could not be decoded or lacks required claims.
    #[error("Malformed token: {0}")]
    MalformedToken(String),
    /// The backend refused to issue a new access token.
    #[error("Error occurred while requesting a new access token (HTTP {status}): {payload}")]
    RefreshRejected {
        /// HTTP status code.
        status: u16,
        /// Backend error payload.
        payload: serde_json::Value,
    },
    /// The refresh request did not complete.
    #[error("Token refresh request failed: {0}")]
    Transport(String),
    /// The session was invalid for an authenticated request and has been
    /// logged out.
    #[error("Login session expired")]
    SessionExpired,
    /// The token store failed.
    #[error("Token storage failed: {0}")]
    Storage(#[from] AppError),
}

impl From<RefreshFailure> for SessionError {
    fn from(failure: RefreshFailure) -> Self {
        match failure {
            RefreshFailure::Rejected { status, payload } => {
                Self::RefreshRejected { status, payload }
            }
            RefreshFailure::Transport(msg) => Self::Transport(msg),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Storage(inner) => inner,
            SessionError::RefreshRejected { ref payload, .. } => {
                let payload = payload.clone();
                AppError::new(ErrorKind::Session, err.to_string()).with_details(payload)
            }
            SessionError::MalformedToken(_) => {
                AppError::new(ErrorKind::Authentication, err.to_string())
            }
            SessionError::Transport(_) => {
                AppError::new(ErrorKind::ExternalService, err.to_string())
            }
            other => AppError::new(ErrorKind::Session, other.to_string()),
        }
    }
}
