//! Session lifecycle manager: login, logout, validity checks, and refresh.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use brainbox_core::traits::{TokenKey, TokenRefresher, TokenStore};

use crate::error::SessionError;
use crate::jwt::{AccessClaims, Expiring, ExpiryClaims, decode_unverified};

use super::identity::Identity;
use super::tokens::TokenPair;

/// Owns the token pair and the identity derived from it.
///
/// Shared behind an `Arc`. Mutation of the stored pair only happens in
/// [`login`](Self::login), [`logout`](Self::logout) and the write-back step
/// of [`refresh_login`](Self::refresh_login), which exclude each other.
pub struct SessionManager {
    /// Persisted access/refresh tokens.
    store: Arc<dyn TokenStore>,
    /// Backend refresh call.
    refresher: Arc<dyn TokenRefresher>,
    /// Identity snapshot handed to readers.
    identity: RwLock<Identity>,
    /// Serializes login, logout and refresh write-back.
    state_lock: Mutex<()>,
    /// Single-flight gate for refresh round trips.
    refresh_gate: Mutex<()>,
    /// Bumped by login and logout; a refresh started under an older
    /// generation must not write back.
    generation: AtomicU64,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("store", &self.store)
            .field("refresher", &self.refresher)
            .field("identity", &self.identity())
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .finish()
    }
}

impl SessionManager {
    /// Create an anonymous session over `store`.
    pub fn new(store: Arc<dyn TokenStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self {
            store,
            refresher,
            identity: RwLock::new(Identity::anonymous()),
            state_lock: Mutex::new(()),
            refresh_gate: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Rebuild the session from whatever tokens are already stored.
    ///
    /// Runs the same validity check as [`check_auth`](Self::check_auth),
    /// refreshing when needed. Any failure leaves the session anonymous.
    pub async fn restore(store: Arc<dyn TokenStore>, refresher: Arc<dyn TokenRefresher>) -> Self {
        let manager = Self::new(store, refresher);

        if !manager.check_auth().await {
            debug!("No usable stored session");
            return manager;
        }

        let restored = match manager.store.get(TokenKey::Access).await {
            Ok(Some(access)) => decode_unverified::<AccessClaims>(&access)
                .and_then(|claims| Identity::from_claims(&claims)),
            Ok(None) => Err(SessionError::SessionExpired),
            Err(e) => Err(SessionError::Storage(e)),
        };

        match restored {
            Ok(identity) => {
                info!(
                    user_id = ?identity.user_id,
                    role = %identity.user_role,
                    "Restored stored session"
                );
                *manager.identity_mut() = identity;
            }
            Err(e) => warn!(error = %e, "Stored session could not be restored"),
        }

        manager
    }

    /// Snapshot of the current identity.
    pub fn identity(&self) -> Identity {
        self.identity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn identity_mut(&self) -> RwLockWriteGuard<'_, Identity> {
        self.identity.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Establish a session from a freshly issued token pair.
    ///
    /// The access token is decoded without verification; nothing is sent
    /// to the backend.
    pub async fn login(&self, tokens: &TokenPair) -> Result<Identity, SessionError> {
        let claims: AccessClaims = decode_unverified(&tokens.access)?;
        let identity = Identity::from_claims(&claims)?;

        let _state = self.state_lock.lock().await;
        let previous = self.store.get(TokenKey::Access).await?;
        self.store.set(TokenKey::Access, &tokens.access).await?;
        if let Err(e) = self.store.set(TokenKey::Refresh, &tokens.refresh).await {
            // never leave the new access token next to the old refresh token
            let rollback = match previous.as_deref() {
                Some(old) => self.store.set(TokenKey::Access, old).await,
                None => self.store.remove(TokenKey::Access).await,
            };
            if let Err(rollback_err) = rollback {
                warn!(error = %rollback_err, "Could not restore the previous access token");
            }
            return Err(e.into());
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.identity_mut() = identity.clone();

        info!(
            user_id = claims.user_id,
            role = %identity.user_role,
            "Logged in"
        );
        Ok(identity)
    }

    /// Drop both tokens and return to the anonymous identity. Idempotent.
    ///
    /// Both removals are attempted even when the first fails; the first
    /// failure is reported after the second has run.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let _state = self.state_lock.lock().await;
        self.generation.fetch_add(1, Ordering::SeqCst);

        let previous = std::mem::replace(&mut *self.identity_mut(), Identity::anonymous());
        let refresh = self.store.remove(TokenKey::Refresh).await;
        let access = self.store.remove(TokenKey::Access).await;

        if let Err(e) = refresh.as_ref().and(access.as_ref()) {
            warn!(error = %e, "Tokens could not be fully removed on logout");
        } else if previous.authenticated {
            info!(user_id = ?previous.user_id, "Logged out");
        }
        refresh.and(access)?;
        Ok(())
    }

    /// Whether a usable session exists, refreshing the access token first
    /// when it is missing or expired.
    pub async fn check_auth(&self) -> bool {
        match self.ensure_valid().await {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Session check failed");
                false
            }
        }
    }

    /// Same policy as [`check_auth`](Self::check_auth), surfacing the
    /// reason a session could not be made valid.
    ///
    /// Returns the access token that passed the check, so callers attach
    /// exactly the token that was validated.
    pub async fn ensure_valid(&self) -> Result<String, SessionError> {
        let access = self.store.get(TokenKey::Access).await?;
        if let Some(token) = access.as_deref().filter(|t| is_usable(Some(*t))) {
            return Ok(token.to_string());
        }

        debug!(
            present = access.is_some(),
            "Access token missing or expired, refreshing"
        );
        self.refresh_after(access).await
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Returns the access token now in effect.
    pub async fn refresh_login(&self) -> Result<String, SessionError> {
        let observed = self.store.get(TokenKey::Access).await?;
        self.refresh_after(observed).await
    }

    /// Refresh unless another caller already replaced `observed` with a
    /// usable token while this one waited at the gate.
    async fn refresh_after(&self, observed: Option<String>) -> Result<String, SessionError> {
        let _gate = self.refresh_gate.lock().await;

        let current = self.store.get(TokenKey::Access).await?;
        if current != observed {
            if let Some(token) = current.filter(|t| is_usable(Some(t.as_str()))) {
                debug!("Reusing access token refreshed by a concurrent caller");
                return Ok(token);
            }
        }

        let generation = self.generation.load(Ordering::SeqCst);

        let refresh = self
            .store
            .get(TokenKey::Refresh)
            .await?
            .ok_or(SessionError::MissingRefreshToken)?;
        let claims: ExpiryClaims = decode_unverified(&refresh)?;
        if claims.is_expired() {
            return Err(SessionError::ExpiredRefreshToken);
        }

        let access = self.refresher.refresh(&refresh).await.map_err(|failure| {
            let err = SessionError::from(failure);
            warn!(error = %err, "Token refresh failed");
            err
        })?;

        let _state = self.state_lock.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            info!("Session changed during refresh, discarding refreshed token");
            return match self.store.get(TokenKey::Access).await? {
                Some(token) if is_usable(Some(token.as_str())) => Ok(token),
                _ => Err(SessionError::SessionExpired),
            };
        }

        self.store.set(TokenKey::Access, &access).await?;

        if self.identity().authenticated {
            match decode_unverified::<AccessClaims>(&access)
                .and_then(|claims| Identity::from_claims(&claims))
            {
                Ok(identity) => *self.identity_mut() = identity,
                Err(e) => warn!(error = %e, "Refreshed access token has unreadable claims"),
            }
        }

        info!("Access token refreshed");
        Ok(access)
    }
}

/// A token is usable when its `exp` can be read and lies in the future.
fn is_usable(token: Option<&str>) -> bool {
    token
        .and_then(|t| decode_unverified::<ExpiryClaims>(t).ok())
        .is_some_and(|claims| !claims.is_expired())
}
