//! HTTP plumbing shared by every endpoint group.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use brainbox_auth::SessionManager;
use brainbox_core::config::api::ApiConfig;
use brainbox_core::error::{AppError, ErrorKind};
use brainbox_core::result::AppResult;

/// Build the underlying `reqwest` client from configuration.
pub fn build_http_client(config: &ApiConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))
}

/// Parse the configured base URL, making sure relative paths join below it.
pub fn parse_base_url(raw: &str) -> AppResult<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw)
        .map_err(|e| AppError::configuration(format!("Invalid api.base_url '{raw}': {e}")))
}

/// Typed client for the BrainBox REST backend.
///
/// Every request is passed through [`SessionManager::intercept`] before it
/// is sent, so credentials are attached and kept fresh transparently.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Arc<SessionManager>,
}

impl ApiClient {
    /// Create a client for the configured backend.
    pub fn new(config: &ApiConfig, session: Arc<SessionManager>) -> AppResult<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            base_url: parse_base_url(&config.base_url)?,
            session,
        })
    }

    /// The session this client authenticates with.
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Base URL endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::internal(format!("Invalid endpoint path '{path}': {e}")))
    }

    /// Start a request to `path` (relative to the base URL).
    pub(crate) fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        Ok(self.http.request(method, self.url(path)?))
    }

    /// Start a `GET` request to `path` with query parameters.
    pub(crate) fn get_with_query(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> AppResult<RequestBuilder> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(self.http.get(url))
    }

    /// Intercept, send, and check the status of a request.
    pub(crate) async fn execute(&self, builder: RequestBuilder) -> AppResult<Response> {
        let mut request = builder.build()?;
        self.session.intercept(&mut request).await?;

        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(method = %method, path = %path, "Sending request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            debug!(method = %method, path = %path, status = status.as_u16(), "Request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(method = %method, path = %path, status = status.as_u16(), "Backend rejected request");
        Err(error_from_response(status, &body))
    }

    /// Send a request and decode its JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = self.execute(builder).await?;
        Ok(response.json::<T>().await?)
    }

    /// Send a request and return its body as loose JSON (`Null` when empty).
    pub(crate) async fn fetch_value(&self, builder: RequestBuilder) -> AppResult<serde_json::Value> {
        let response = self.execute(builder).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Send a request whose response body is irrelevant.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> AppResult<()> {
        self.execute(builder).await.map(|_| ())
    }
}

/// Map a non-2xx response onto the workspace error taxonomy.
///
/// The body is kept in `details` when it is JSON so per-field messages
/// survive; a top-level `detail` string becomes the message.
pub fn error_from_response(status: StatusCode, body: &str) -> AppError {
    let payload: Option<serde_json::Value> = serde_json::from_str(body).ok();

    let detail = payload
        .as_ref()
        .and_then(|p| p.get("detail"))
        .and_then(|d| d.as_str())
        .map(str::to_string);

    let kind = match status {
        StatusCode::BAD_REQUEST => ErrorKind::Validation,
        StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
        StatusCode::FORBIDDEN => ErrorKind::Authorization,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        _ => ErrorKind::ExternalService,
    };

    let message = detail.unwrap_or_else(|| match kind {
        ErrorKind::Validation => "The backend rejected the submitted data".to_string(),
        ErrorKind::NotFound => "Not found".to_string(),
        _ => format!("Backend responded with {status}"),
    });

    let error = AppError::new(kind, message);
    match payload {
        Some(payload) if payload.is_object() => error.with_details(payload),
        _ => error,
    }
}
