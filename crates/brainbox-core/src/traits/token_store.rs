//! Durable storage for the access/refresh token pair.

use std::fmt;

use async_trait::async_trait;

use crate::result::AppResult;

/// The two persisted credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    /// Short-lived access token.
    Access,
    /// Longer-lived refresh token.
    Refresh,
}

impl TokenKey {
    /// Storage key under which the token is persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access_token",
            Self::Refresh => "refresh_token",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key/value persistence for session tokens.
///
/// Absence of either token is a valid state (an anonymous session), so
/// `get` returns `Ok(None)` rather than an error for missing keys, and
/// `remove` on a missing key is a no-op.
#[async_trait]
pub trait TokenStore: Send + Sync + fmt::Debug + 'static {
    /// Read a token.
    async fn get(&self, key: TokenKey) -> AppResult<Option<String>>;

    /// Write a token, replacing any previous value.
    async fn set(&self, key: TokenKey, value: &str) -> AppResult<()>;

    /// Delete a token.
    async fn remove(&self, key: TokenKey) -> AppResult<()>;
}
