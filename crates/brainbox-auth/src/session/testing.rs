//! Helpers shared by the session unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use tokio::sync::Notify;

use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;
use brainbox_core::traits::{RefreshFailure, TokenKey, TokenRefresher, TokenStore};

use crate::store::MemoryTokenStore;

/// Sign `claims` the way the backend would.
pub fn sign(claims: serde_json::Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

/// Access token for `user_id`/`role` expiring `ttl` seconds from now.
pub fn access_token(user_id: i64, role: &str, ttl: i64) -> String {
    sign(serde_json::json!({
        "token_type": "access",
        "user_id": user_id,
        "user_role": role,
        "exp": Utc::now().timestamp() + ttl,
    }))
}

/// Refresh token expiring `ttl` seconds from now.
pub fn refresh_token(ttl: i64) -> String {
    sign(serde_json::json!({
        "token_type": "refresh",
        "exp": Utc::now().timestamp() + ttl,
    }))
}

/// Refresher that answers from a script and counts its calls.
#[derive(Debug)]
pub struct FakeRefresher {
    pub calls: AtomicUsize,
    pub outcome: Result<String, RefreshFailure>,
    /// Signalled when a call starts.
    pub started: Arc<Notify>,
    /// When set, calls wait for this before answering.
    pub hold: Option<Arc<Notify>>,
}

impl FakeRefresher {
    pub fn issuing(access: String) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(access),
            started: Arc::new(Notify::new()),
            hold: None,
        }
    }

    pub fn failing(failure: RefreshFailure) -> Self {
        Self {
            outcome: Err(failure),
            ..Self::issuing(String::new())
        }
    }

    pub fn held(mut self, hold: Arc<Notify>) -> Self {
        self.hold = Some(hold);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenRefresher for FakeRefresher {
    async fn refresh(&self, _refresh_token: &str) -> Result<String, RefreshFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        if let Some(hold) = &self.hold {
            hold.notified().await;
        } else {
            tokio::task::yield_now().await;
        }
        self.outcome.clone()
    }
}

/// Memory store whose writes or removals of one key fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    pub inner: MemoryTokenStore,
    pub fail_set: Option<TokenKey>,
    pub fail_remove: Option<TokenKey>,
}

#[async_trait]
impl TokenStore for FlakyStore {
    async fn get(&self, key: TokenKey) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: TokenKey, value: &str) -> AppResult<()> {
        if self.fail_set == Some(key) {
            return Err(AppError::storage(format!("cannot write {key}")));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: TokenKey) -> AppResult<()> {
        if self.fail_remove == Some(key) {
            return Err(AppError::storage(format!("cannot remove {key}")));
        }
        self.inner.remove(key).await
    }
}
