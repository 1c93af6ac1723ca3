//! Token refresh over HTTP.

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use brainbox_core::config::api::ApiConfig;
use brainbox_core::result::AppResult;
use brainbox_core::traits::{RefreshFailure, TokenRefresher};

use crate::client::{build_http_client, parse_base_url};
use crate::dto::{RefreshRequest, RefreshResponse};

/// Endpoint exchanging a refresh token for an access token.
const REFRESH_PATH: &str = "login/refresh/";

/// [`TokenRefresher`] calling `POST login/refresh/`.
///
/// Sends requests directly rather than through the session interceptor,
/// which would otherwise recurse into itself.
#[derive(Debug, Clone)]
pub struct HttpTokenRefresher {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpTokenRefresher {
    /// Create a refresher for the configured backend.
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let base = parse_base_url(&config.base_url)?;
        let endpoint = base.join(REFRESH_PATH).map_err(|e| {
            brainbox_core::error::AppError::configuration(format!("Invalid refresh endpoint: {e}"))
        })?;
        Ok(Self {
            http: build_http_client(config)?,
            endpoint,
        })
    }
}

#[async_trait]
impl TokenRefresher for HttpTokenRefresher {
    async fn refresh(&self, refresh_token: &str) -> Result<String, RefreshFailure> {
        let body = RefreshRequest {
            refresh: refresh_token.to_string(),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| RefreshFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let payload = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
            return Err(RefreshFailure::Rejected {
                status: status.as_u16(),
                payload,
            });
        }

        let refreshed: RefreshResponse = response
            .json()
            .await
            .map_err(|e| RefreshFailure::Transport(format!("Unreadable refresh response: {e}")))?;
        debug!("Backend issued a new access token");
        Ok(refreshed.access)
    }
}
