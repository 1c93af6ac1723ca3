//! User endpoints.

use reqwest::Method;

use brainbox_core::result::AppResult;
use brainbox_core::types::Page;
use brainbox_entity::user::{Role, User};

use crate::client::ApiClient;
use crate::dto::{RegisterRequest, SetRoleRequest, UpdateUserRequest, UserQuery, check};

impl ApiClient {
    /// One page of users.
    pub async fn list_users(&self, query: &UserQuery) -> AppResult<Page<User>> {
        self.fetch(self.get_with_query("users", &query.to_query())?)
            .await
    }

    /// A single user with folders and shared files.
    pub async fn get_user(&self, id: i64) -> AppResult<User> {
        self.fetch(self.request(Method::GET, &format!("user/{id}/"))?)
            .await
    }

    /// Create an account directly.
    pub async fn create_user(&self, user: &RegisterRequest) -> AppResult<User> {
        check(user)?;
        self.fetch(self.request(Method::POST, "users/")?.json(user))
            .await
    }

    /// Change username and/or email.
    pub async fn update_user(&self, id: i64, changes: &UpdateUserRequest) -> AppResult<User> {
        check(changes)?;
        self.fetch(self.request(Method::PATCH, &format!("user/{id}/"))?.json(changes))
            .await
    }

    /// Delete a user.
    pub async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.send(self.request(Method::DELETE, &format!("user/{id}/"))?)
            .await
    }

    /// Change a user's role (admin).
    pub async fn set_user_role(&self, id: i64, role: Role) -> AppResult<()> {
        let body = SetRoleRequest { role };
        self.send(self.request(Method::PUT, &format!("user/{id}/role/"))?.json(&body))
            .await
    }
}
