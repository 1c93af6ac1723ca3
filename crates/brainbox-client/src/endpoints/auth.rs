//! Login, registration, and account confirmation.

use reqwest::Method;
use tracing::info;

use brainbox_auth::{Identity, TokenPair};
use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;

use crate::client::ApiClient;
use crate::dto::{LoginRequest, RegisterRequest, check};

impl ApiClient {
    /// Exchange credentials for a token pair and start a session.
    pub async fn login(&self, credentials: &LoginRequest) -> AppResult<Identity> {
        check(credentials)?;

        let tokens: TokenPair = self
            .fetch(self.request(Method::POST, "login/")?.json(credentials))
            .await?;
        let identity = self.session().login(&tokens).await?;

        info!(user_id = ?identity.user_id, role = %identity.user_role, "Login succeeded");
        Ok(identity)
    }

    /// End the current session. Nothing is sent to the backend.
    pub async fn logout(&self) -> AppResult<()> {
        Ok(self.session().logout().await?)
    }

    /// Submit a registration. The account stays inactive until confirmed.
    pub async fn register(&self, registration: &RegisterRequest) -> AppResult<serde_json::Value> {
        check(registration)?;

        let response = self
            .fetch_value(self.request(Method::POST, "register/")?.json(registration))
            .await?;
        info!(username = %registration.username, "Registration submitted");
        Ok(response)
    }

    /// Activate an account with the code issued at registration.
    pub async fn confirm_registration(&self, code: &str) -> AppResult<serde_json::Value> {
        let path = confirmation_path(code)?;
        let response = self.fetch_value(self.request(Method::GET, &path)?).await?;
        info!("Registration confirmed");
        Ok(response)
    }
}

/// Endpoint path for a confirmation code.
///
/// The code becomes a single path segment, so only ASCII letters, digits,
/// `-` and `_` are accepted.
fn confirmation_path(code: &str) -> AppResult<String> {
    let code = code.trim();
    let message = if code.is_empty() {
        "Code cannot be blank"
    } else if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        "Code may only contain letters, digits, '-' and '_'"
    } else {
        return Ok(format!("register/confirm/{code}/"));
    };

    Err(AppError::validation(message).with_details(serde_json::json!({"code": [message]})))
}
