//! Integration tests for the REST client, its interceptor and error mapping.

mod helpers;

use std::sync::atomic::Ordering;

use brainbox_auth::permissions::{can_modify, require_modify};
use brainbox_client::dto::{LoginRequest, RegisterRequest, UserQuery};
use brainbox_core::error::ErrorKind;
use brainbox_core::traits::{TokenKey, TokenStore};
use brainbox_core::types::PageRequest;
use brainbox_entity::user::Role;

fn credentials(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_login_then_list_sends_bearer_and_filters() {
    let backend = helpers::TestBackend::start().await;
    let (client, _session, _store) = backend.client();

    let identity = client
        .login(&credentials(helpers::USER_EMAIL, helpers::PASSWORD))
        .await
        .unwrap();
    assert_eq!(identity.user_role, Role::User);

    let query = UserQuery {
        page: PageRequest::sized(2, 2),
        username: Some("an".to_string()),
        year: Some(1850),
        agg: true,
    };
    let page = client.list_users(&query).await.unwrap();

    assert_eq!(page.results.len(), 2);
    assert_eq!(page.total_pages(), 6);
    assert_eq!(page.row_number(2, 0), 3);

    let auth = backend.state.last_authorization().unwrap();
    assert!(auth.starts_with("Bearer "));

    let sent = backend.state.last_query();
    assert_eq!(sent["page"], "2");
    assert_eq!(sent["page_size"], "2");
    assert_eq!(sent["username"], "an");
    assert_eq!(sent["year"], "1900");
    assert_eq!(sent["agg"], "true");
}

#[tokio::test]
async fn test_anonymous_requests_carry_no_credentials() {
    let backend = helpers::TestBackend::start().await;
    let (client, session, _store) = backend.client();

    client.list_users(&UserQuery::default()).await.unwrap();

    assert!(backend.state.last_authorization().is_none());
    assert!(!session.identity().authenticated);
    assert_eq!(backend.state.refresh_calls(), 0);
}

#[tokio::test]
async fn test_bad_credentials_map_to_authentication_error() {
    let backend = helpers::TestBackend::start().await;
    let (client, session, _store) = backend.client();

    let err = client
        .login(&credentials(helpers::USER_EMAIL, "Wrong#pass1"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(err.message.contains("No active account"));
    assert!(!session.identity().authenticated);
}

#[tokio::test]
async fn test_invalid_login_is_rejected_before_sending() {
    let backend = helpers::TestBackend::start().await;
    let (client, _session, _store) = backend.client();

    let err = client
        .login(&credentials("not-an-email", helpers::PASSWORD))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.field_errors().iter().any(|(field, _)| field == "email"));
}

#[tokio::test]
async fn test_backend_field_errors_survive() {
    let backend = helpers::TestBackend::start().await;
    let (client, _session, _store) = backend.client();

    let registration = RegisterRequest {
        username: "newbie".to_string(),
        email: helpers::TAKEN_EMAIL.to_string(),
        password: "Str0ng!pass".to_string(),
    };
    let err = client.register(&registration).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(
        err.field_errors(),
        vec![(
            "email".to_string(),
            "user with this email already exists.".to_string()
        )]
    );
}

#[tokio::test]
async fn test_register_returns_backend_body() {
    let backend = helpers::TestBackend::start().await;
    let (client, _session, _store) = backend.client();

    let registration = RegisterRequest {
        username: "newbie".to_string(),
        email: "newbie@example.com".to_string(),
        password: "Str0ng!pass".to_string(),
    };
    let body = client.register(&registration).await.unwrap();
    assert_eq!(body["username"], "newbie");
}

#[tokio::test]
async fn test_owner_deletes_folder_after_transparent_refresh() {
    let backend = helpers::TestBackend::start().await;
    backend.state.access_ttl.store(-10, Ordering::SeqCst);
    let (client, session, _store) = backend.client();
    let identity = client
        .login(&credentials(helpers::USER_EMAIL, helpers::PASSWORD))
        .await
        .unwrap();

    let own = client.get_folder(10).await.unwrap();
    require_modify(&identity, &own, "folder").unwrap();

    let foreign = client.get_folder(11).await.unwrap();
    assert!(!can_modify(&identity, &foreign));
    let denied = require_modify(&identity, &foreign, "folder").unwrap_err();
    assert_eq!(denied.kind, ErrorKind::Authorization);

    client.delete_folder(10).await.unwrap();
    assert_eq!(*backend.state.deleted_folders.lock().unwrap(), vec![10]);
    assert_eq!(backend.state.refresh_calls(), 1);
    assert!(session.identity().authenticated);
}

#[tokio::test]
async fn test_unrefreshable_session_is_logged_out_before_sending() {
    let backend = helpers::TestBackend::start().await;
    backend.state.access_ttl.store(-10, Ordering::SeqCst);
    backend.state.reject_refresh.store(true, Ordering::SeqCst);
    let (client, session, store) = backend.client();
    client
        .login(&credentials(helpers::USER_EMAIL, helpers::PASSWORD))
        .await
        .unwrap();

    let err = client.delete_folder(10).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Session);
    assert!(!session.identity().authenticated);
    assert_eq!(store.get(TokenKey::Access).await.unwrap(), None);
    assert_eq!(store.get(TokenKey::Refresh).await.unwrap(), None);
    assert!(backend.state.deleted_folders.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_purge_sends_credentials() {
    let backend = helpers::TestBackend::start().await;
    let (client, _session, _store) = backend.client();
    let identity = client
        .login(&credentials(helpers::ADMIN_EMAIL, helpers::PASSWORD))
        .await
        .unwrap();
    assert_eq!(identity.user_role, Role::Admin);

    client.purge(brainbox_client::BulkTarget::Folders).await.unwrap();
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let backend = helpers::TestBackend::start().await;
    let (client, _session, _store) = backend.client();

    let err = client.get_user(99).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "Not found.");
}

#[tokio::test]
async fn test_confirmation_code_cannot_leave_its_endpoint() {
    let backend = helpers::TestBackend::start().await;
    let (client, _session, _store) = backend.client();

    let err = client.confirm_registration("../../users").await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(backend.state.last_query().is_empty());
}
