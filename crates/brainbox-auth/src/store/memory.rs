//! In-memory token store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use brainbox_core::result::AppResult;
use brainbox_core::traits::{TokenKey, TokenStore};

/// Token store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    tokens: Mutex<HashMap<TokenKey, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: TokenKey) -> AppResult<Option<String>> {
        Ok(self.tokens.lock().await.get(&key).cloned())
    }

    async fn set(&self, key: TokenKey, value: &str) -> AppResult<()> {
        self.tokens.lock().await.insert(key, value.to_string());
        debug!(key = %key, "Token stored in memory");
        Ok(())
    }

    async fn remove(&self, key: TokenKey) -> AppResult<()> {
        self.tokens.lock().await.remove(&key);
        Ok(())
    }
}
