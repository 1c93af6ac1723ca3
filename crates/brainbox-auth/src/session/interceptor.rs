//! Credential injection for outgoing backend requests.

use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::{debug, warn};

use crate::error::SessionError;

use super::manager::SessionManager;

/// Path fragments that are reachable without a session.
const PUBLIC_PATH_MARKERS: [&str; 2] = ["login", "register"];

/// Whether `path` targets a login or registration endpoint.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATH_MARKERS.iter().any(|marker| path.contains(marker))
}

impl SessionManager {
    /// Prepare an outgoing request.
    ///
    /// Login and registration requests pass through untouched. Everything
    /// else first has the session checked (refreshing if needed). A
    /// logged-in session that cannot be kept valid is logged out and the
    /// request is refused with [`SessionError::SessionExpired`]. Logged-in
    /// requests carry `Authorization: Bearer <access token>`.
    pub async fn intercept(&self, request: &mut Request) -> Result<(), SessionError> {
        if is_public_path(request.url().path()) {
            debug!(path = %request.url().path(), "Public endpoint, no credentials attached");
            return Ok(());
        }

        let checked = self.ensure_valid().await;
        if self.identity().user_role.is_guest() {
            return Ok(());
        }

        let token = match checked {
            Ok(token) => token,
            Err(e) => {
                warn!(path = %request.url().path(), error = %e, "Session could not be refreshed, logging out");
                self.logout().await?;
                return Err(SessionError::SessionExpired);
            }
        };

        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| SessionError::MalformedToken(format!("token is not a valid header: {e}")))?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}
