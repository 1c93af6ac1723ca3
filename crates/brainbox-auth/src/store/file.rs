//! File-backed token store.
//!
//! Tokens are kept as a small JSON document:
//!
//! ```json
//! { "access_token": "eyJ...", "refresh_token": "eyJ..." }
//! ```
//!
//! On Unix the file is created with `0600` permissions. The file is removed
//! once both tokens are gone.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;
use brainbox_core::traits::{TokenKey, TokenStore};

/// On-disk document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredTokens {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}

impl StoredTokens {
    fn slot(&mut self, key: TokenKey) -> &mut Option<String> {
        match key {
            TokenKey::Access => &mut self.access_token,
            TokenKey::Refresh => &mut self.refresh_token,
        }
    }

    fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

/// Token store persisted to a JSON file.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Create a store backed by `path`. The file is created lazily.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the token file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> AppResult<StoredTokens> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoredTokens::default());
            }
            Err(e) => {
                return Err(AppError::with_source(
                    brainbox_core::error::ErrorKind::Storage,
                    format!("Failed to read token file '{}'", self.path.display()),
                    e,
                ));
            }
        };

        serde_json::from_str(&contents).map_err(|e| {
            AppError::storage(format!(
                "Token file '{}' is corrupt: {e}. Delete it and log in again",
                self.path.display()
            ))
        })
    }

    async fn write(&self, tokens: &StoredTokens) -> AppResult<()> {
        if tokens.is_empty() {
            return match tokio::fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            };
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let body = serde_json::to_string_pretty(tokens)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, body).await?;
        restrict_permissions(&tmp).await;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let perms = std::fs::Permissions::from_mode(0o600);
    if let Err(e) = tokio::fs::set_permissions(path, perms).await {
        warn!(path = %path.display(), error = %e, "Could not restrict token file permissions");
    }
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) {}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self, key: TokenKey) -> AppResult<Option<String>> {
        let _guard = self.lock.lock().await;
        let mut tokens = self.read().await?;
        Ok(tokens.slot(key).take())
    }

    async fn set(&self, key: TokenKey, value: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut tokens = self.read().await?;
        *tokens.slot(key) = Some(value.to_string());
        self.write(&tokens).await?;
        debug!(key = %key, path = %self.path.display(), "Token persisted");
        Ok(())
    }

    async fn remove(&self, key: TokenKey) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut tokens = self.read().await?;
        if tokens.slot(key).take().is_some() {
            self.write(&tokens).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tokens.json");

        let store = FileTokenStore::new(&path);
        assert_eq!(store.get(TokenKey::Refresh).await.unwrap(), None);

        store.set(TokenKey::Access, "a1").await.unwrap();
        store.set(TokenKey::Refresh, "r1").await.unwrap();

        // a second handle sees what the first persisted
        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.get(TokenKey::Access).await.unwrap().as_deref(), Some("a1"));
        assert_eq!(reopened.get(TokenKey::Refresh).await.unwrap().as_deref(), Some("r1"));
    }

    #[tokio::test]
    async fn test_file_removed_when_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::new(&path);

        store.set(TokenKey::Access, "a1").await.unwrap();
        assert!(path.exists());

        store.remove(TokenKey::Access).await.unwrap();
        store.remove(TokenKey::Refresh).await.unwrap();
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::new(&path);
        store.set(TokenKey::Refresh, "r1").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileTokenStore::new(&path);
        let err = store.get(TokenKey::Access).await.unwrap_err();
        assert_eq!(err.kind, brainbox_core::error::ErrorKind::Storage);
    }
}
