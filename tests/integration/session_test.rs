//! Integration tests for the session lifecycle against the HTTP refresher.

mod helpers;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use brainbox_auth::SessionError;
use brainbox_auth::session::SessionManager;
use brainbox_auth::store::FileTokenStore;
use brainbox_client::HttpTokenRefresher;
use brainbox_client::dto::LoginRequest;
use brainbox_core::traits::{TokenKey, TokenStore};
use brainbox_entity::user::Role;

fn credentials(email: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: helpers::PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed_by_backend() {
    let backend = helpers::TestBackend::start().await;
    backend.state.access_ttl.store(-10, Ordering::SeqCst);
    let (client, session, store) = backend.client();

    client.login(&credentials(helpers::USER_EMAIL)).await.unwrap();
    let stale = store.get(TokenKey::Access).await.unwrap();

    assert!(session.check_auth().await);
    assert_eq!(backend.state.refresh_calls(), 1);

    let fresh = store.get(TokenKey::Access).await.unwrap();
    assert!(fresh.is_some());
    assert_ne!(fresh, stale);
    assert_eq!(session.identity().user_id, Some(2));
}

#[tokio::test]
async fn test_concurrent_checks_share_one_refresh() {
    let backend = helpers::TestBackend::start().await;
    backend.state.access_ttl.store(-10, Ordering::SeqCst);
    let (client, session, _store) = backend.client();
    client.login(&credentials(helpers::USER_EMAIL)).await.unwrap();

    let (a, b, c, d) = tokio::join!(
        session.check_auth(),
        session.check_auth(),
        session.check_auth(),
        session.check_auth(),
    );

    assert!(a && b && c && d);
    assert_eq!(backend.state.refresh_calls(), 1);
}

#[tokio::test]
async fn test_rejected_refresh_carries_backend_payload() {
    let backend = helpers::TestBackend::start().await;
    backend.state.access_ttl.store(-10, Ordering::SeqCst);
    backend.state.reject_refresh.store(true, Ordering::SeqCst);
    let (client, session, _store) = backend.client();
    client.login(&credentials(helpers::USER_EMAIL)).await.unwrap();

    match session.refresh_login().await {
        Err(SessionError::RefreshRejected { status, payload }) => {
            assert_eq!(status, 401);
            assert_eq!(payload["code"], "token_not_valid");
        }
        other => panic!("expected a rejected refresh, got {other:?}"),
    }
    assert!(!session.check_auth().await);
}

#[tokio::test]
async fn test_expired_refresh_token_never_reaches_backend() {
    let backend = helpers::TestBackend::start().await;
    backend.state.access_ttl.store(-10, Ordering::SeqCst);
    backend.state.refresh_ttl.store(-10, Ordering::SeqCst);
    let (client, session, _store) = backend.client();
    client.login(&credentials(helpers::USER_EMAIL)).await.unwrap();

    let err = session.ensure_valid().await.unwrap_err();
    assert!(matches!(err, SessionError::ExpiredRefreshToken));
    assert_eq!(backend.state.refresh_calls(), 0);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_failure() {
    let refresher = Arc::new(
        HttpTokenRefresher::new(&brainbox_core::config::api::ApiConfig {
            base_url: "http://127.0.0.1:9/api".to_string(),
            request_timeout_seconds: 2,
            ..Default::default()
        })
        .unwrap(),
    );
    let store = Arc::new(brainbox_auth::store::MemoryTokenStore::new());
    store
        .set(TokenKey::Refresh, &helpers::refresh_token(3600))
        .await
        .unwrap();
    let session = SessionManager::new(store, refresher);

    let err = session.refresh_login().await.unwrap_err();
    assert!(matches!(err, SessionError::Transport(_)));
}

#[tokio::test]
async fn test_session_survives_restart_through_file_store() {
    let backend = helpers::TestBackend::start().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.json");
    let config = backend.api_config();

    {
        let store = Arc::new(FileTokenStore::new(&path));
        let refresher = Arc::new(HttpTokenRefresher::new(&config).unwrap());
        let session = Arc::new(SessionManager::new(store, refresher));
        let client = brainbox_client::ApiClient::new(&config, session).unwrap();
        client.login(&credentials(helpers::ADMIN_EMAIL)).await.unwrap();
    }
    assert!(path.exists());

    let store = Arc::new(FileTokenStore::new(&path));
    let refresher = Arc::new(HttpTokenRefresher::new(&config).unwrap());
    let session = SessionManager::restore(store, refresher).await;

    let identity = session.identity();
    assert!(identity.authenticated);
    assert_eq!(identity.user_id, Some(1));
    assert_eq!(identity.user_role, Role::Admin);

    session.logout().await.unwrap();
    assert!(!path.exists());
}
