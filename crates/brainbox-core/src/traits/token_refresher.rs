//! Exchange of a refresh token for a new access token.

use async_trait::async_trait;

/// Why the backend did not hand out a new access token.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshFailure {
    /// The backend answered with a non-2xx status.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error body as sent by the backend (`Null` when empty or not JSON).
        payload: serde_json::Value,
    },
    /// The request never produced a usable response.
    Transport(String),
}

/// Performs the network half of a token refresh.
///
/// Implemented over HTTP by the API client; tests substitute fakes.
#[async_trait]
pub trait TokenRefresher: Send + Sync + std::fmt::Debug + 'static {
    /// Exchange `refresh_token` for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, RefreshFailure>;
}
