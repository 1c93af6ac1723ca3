//! Token persistence configuration.

use serde::{Deserialize, Serialize};

/// Where the access/refresh token pair is kept between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    /// JSON file on disk; survives restarts.
    File,
    /// Process memory only.
    Memory,
}

/// Session persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token store backend.
    #[serde(default = "default_token_store")]
    pub token_store: TokenStoreKind,
    /// Path of the token file when `token_store = "file"`.
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_store: default_token_store(),
            token_file: default_token_file(),
        }
    }
}

fn default_token_store() -> TokenStoreKind {
    TokenStoreKind::File
}

fn default_token_file() -> String {
    "data/tokens.json".to_string()
}
