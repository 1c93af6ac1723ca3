//! Shared test helpers for integration tests: an in-process stand-in for the
//! BrainBox backend.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Value, json};

use brainbox_auth::session::SessionManager;
use brainbox_auth::store::MemoryTokenStore;
use brainbox_client::{ApiClient, HttpTokenRefresher};
use brainbox_core::config::api::ApiConfig;

/// Signing secret of the stand-in backend. The console never verifies
/// signatures; this only makes the tokens look real.
const SECRET: &[u8] = b"stand-in-backend-secret";

/// Credentials the stand-in backend accepts, with the account they log into.
pub const USER_EMAIL: &str = "ana@example.com";
pub const ADMIN_EMAIL: &str = "root@example.com";
pub const PASSWORD: &str = "Secret#123";
pub const TAKEN_EMAIL: &str = "taken@example.com";

/// Mint an HS256 token with the given claims.
pub fn sign(claims: Value) -> String {
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET),
    )
    .expect("sign token")
}

fn exp_in(seconds: i64) -> i64 {
    chrono::Utc::now().timestamp() + seconds
}

/// An access token for `user_id` with `role`, expiring in `ttl` seconds.
pub fn access_token(user_id: i64, role: &str, ttl: i64) -> String {
    sign(json!({"token_type": "access", "user_id": user_id, "user_role": role, "exp": exp_in(ttl)}))
}

/// A refresh token expiring in `ttl` seconds.
pub fn refresh_token(ttl: i64) -> String {
    sign(json!({"token_type": "refresh", "user_id": 2, "exp": exp_in(ttl)}))
}

/// Mutable behavior and recorded traffic of the stand-in backend.
#[derive(Debug)]
pub struct BackendState {
    /// Lifetime of access tokens issued by `login/` (negative: already expired).
    pub access_ttl: AtomicI64,
    /// Lifetime of refresh tokens issued by `login/`.
    pub refresh_ttl: AtomicI64,
    /// Whether `login/refresh/` rejects every request.
    pub reject_refresh: AtomicBool,
    /// Number of `login/refresh/` calls.
    pub refresh_calls: AtomicUsize,
    /// `Authorization` header of the most recent user-list request.
    pub last_authorization: Mutex<Option<String>>,
    /// Query of the most recent user-list request.
    pub last_query: Mutex<HashMap<String, String>>,
    /// Ids of deleted folders.
    pub deleted_folders: Mutex<Vec<i64>>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            access_ttl: AtomicI64::new(300),
            refresh_ttl: AtomicI64::new(3600),
            reject_refresh: AtomicBool::new(false),
            refresh_calls: AtomicUsize::new(0),
            last_authorization: Mutex::new(None),
            last_query: Mutex::new(HashMap::new()),
            deleted_folders: Mutex::new(Vec::new()),
        }
    }
}

impl BackendState {
    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.last_authorization.lock().unwrap().clone()
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.last_query.lock().unwrap().clone()
    }
}

/// A running stand-in backend.
pub struct TestBackend {
    /// Base URL, ending in `/api`.
    pub base_url: String,
    /// Shared state.
    pub state: Arc<BackendState>,
}

impl TestBackend {
    /// Bind to an ephemeral port and serve in the background.
    pub async fn start() -> Self {
        let state = Arc::new(BackendState::default());
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stand-in backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stand-in backend");
        });

        Self {
            base_url: format!("http://{addr}/api"),
            state,
        }
    }

    /// Client configuration pointing at this backend.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            request_timeout_seconds: 5,
            ..ApiConfig::default()
        }
    }

    /// A fresh session (in-memory tokens) and client against this backend.
    pub fn client(&self) -> (ApiClient, Arc<SessionManager>, Arc<MemoryTokenStore>) {
        let config = self.api_config();
        let store = Arc::new(MemoryTokenStore::new());
        let refresher = Arc::new(HttpTokenRefresher::new(&config).expect("refresher"));
        let session = Arc::new(SessionManager::new(store.clone(), refresher));
        let client = ApiClient::new(&config, session.clone()).expect("client");
        (client, session, store)
    }
}

fn router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/api/login/", post(login))
        .route("/api/login/refresh/", post(refresh))
        .route("/api/register/", post(register))
        .route("/api/users", get(list_users))
        .route("/api/user/{id}/", get(get_user))
        .route("/api/folder/{id}/", get(get_folder).delete(delete_folder))
        .route("/api/folders/", delete(purge_folders))
        .with_state(state)
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn login(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let account = match (email, password) {
        (USER_EMAIL, PASSWORD) => Some((2, "User")),
        (ADMIN_EMAIL, PASSWORD) => Some((1, "Admin")),
        _ => None,
    };
    let Some((user_id, role)) = account else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response();
    };

    let access_ttl = state.access_ttl.load(Ordering::SeqCst);
    let refresh_ttl = state.refresh_ttl.load(Ordering::SeqCst);
    Json(json!({
        "access": access_token(user_id, role, access_ttl),
        "refresh": refresh_token(refresh_ttl),
    }))
    .into_response()
}

async fn refresh(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);
    // give concurrent callers a chance to pile up behind the first refresh
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    if state.reject_refresh.load(Ordering::SeqCst) || body["refresh"].as_str().is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Token is invalid or expired", "code": "token_not_valid"})),
        )
            .into_response();
    }
    Json(json!({"access": access_token(2, "User", 300)})).into_response()
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"] == TAKEN_EMAIL {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"email": ["user with this email already exists."]})),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(json!({"username": body["username"], "email": body["email"]})),
    )
        .into_response()
}

async fn list_users(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    *state.last_authorization.lock().unwrap() = bearer(&headers);
    *state.last_query.lock().unwrap() = query;
    Json(json!({
        "results": [
            {"id": 1, "username": "root", "email": ADMIN_EMAIL, "role": "Admin"},
            {"id": 2, "username": "ana", "email": USER_EMAIL, "role": "User"},
        ],
        "count": 12,
        "page_size": 2,
    }))
}

async fn get_user(Path(id): Path<i64>) -> Response {
    match id {
        1 => Json(json!({"id": 1, "username": "root", "email": ADMIN_EMAIL, "role": "Admin"}))
            .into_response(),
        2 => Json(json!({"id": 2, "username": "ana", "email": USER_EMAIL, "role": "User"}))
            .into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

async fn get_folder(Path(id): Path<i64>) -> Json<Value> {
    // folder 10 belongs to ana (User), folder 11 to root (Admin)
    let owner = if id == 10 {
        json!({"id": 2, "username": "ana", "role": "User"})
    } else {
        json!({"id": 1, "username": "root", "role": "Admin"})
    };
    Json(json!({"id": id, "name": format!("folder-{id}"), "user": owner}))
}

async fn delete_folder(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> StatusCode {
    if bearer(&headers).is_none() {
        return StatusCode::UNAUTHORIZED;
    }
    state.deleted_folders.lock().unwrap().push(id);
    StatusCode::NO_CONTENT
}

async fn purge_folders(headers: HeaderMap) -> StatusCode {
    if bearer(&headers).is_none() {
        return StatusCode::UNAUTHORIZED;
    }
    StatusCode::NO_CONTENT
}
