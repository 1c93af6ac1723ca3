//! File sharing endpoints.

use reqwest::Method;

use brainbox_core::result::AppResult;
use brainbox_entity::share::SharePermission;

use crate::client::ApiClient;
use crate::dto::{SharePermissionRequest, ShareRequest};

impl ApiClient {
    /// Share a file with a user.
    pub async fn share_file(
        &self,
        file_id: i64,
        user_id: i64,
        permission: SharePermission,
    ) -> AppResult<()> {
        let body = ShareRequest {
            user: user_id,
            permission,
        };
        let path = format!("file/{file_id}/shared-users/");
        self.send(self.request(Method::POST, &path)?.json(&body))
            .await
    }

    /// Change the permission of an existing share.
    pub async fn update_share(
        &self,
        file_id: i64,
        user_id: i64,
        permission: SharePermission,
    ) -> AppResult<()> {
        let body = SharePermissionRequest { permission };
        let path = format!("file/{file_id}/shared-user/{user_id}/");
        self.send(self.request(Method::PATCH, &path)?.json(&body))
            .await
    }

    /// Revoke a user's access to a file.
    pub async fn remove_share(&self, file_id: i64, user_id: i64) -> AppResult<()> {
        let path = format!("file/{file_id}/shared-user/{user_id}/");
        self.send(self.request(Method::DELETE, &path)?).await
    }
}
