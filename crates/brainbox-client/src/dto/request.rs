//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use brainbox_core::types::PageRequest;
use brainbox_entity::share::SharePermission;
use brainbox_entity::user::Role;

use super::validation::validate_password;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email.
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request body. Also used by admins creating accounts.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username.
    #[validate(length(min = 1, max = 100, message = "Username must be 1 to 100 characters"))]
    pub username: String,
    /// Account email.
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    /// Password.
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh: String,
}

/// Token refresh response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// New access token.
    pub access: String,
}

/// Partial user update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    /// New username.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Username must be 1 to 100 characters"))]
    pub username: Option<String>,
    /// New email.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
}

impl UpdateUserRequest {
    /// Whether nothing would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Role change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRoleRequest {
    /// New role.
    pub role: Role,
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    /// Owning user id.
    pub user: i64,
    /// Parent folder id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder: Option<i64>,
}

/// Partial folder update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFolderRequest {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    /// New parent folder id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_folder: Option<i64>,
}

impl UpdateFolderRequest {
    /// Whether nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.parent_folder.is_none()
    }
}

/// Create file request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFileRequest {
    /// File name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: String,
    /// Text content.
    #[serde(default)]
    pub content: String,
    /// Owning user id.
    pub user: i64,
    /// Containing folder id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<i64>,
}

/// Partial file update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateFileRequest {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub name: Option<String>,
    /// New content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// New folder id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<i64>,
}

impl UpdateFileRequest {
    /// Whether nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none() && self.folder.is_none()
    }
}

/// Share a file with a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareRequest {
    /// User receiving access.
    pub user: i64,
    /// Granted permission.
    pub permission: SharePermission,
}

/// Change the permission of an existing share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharePermissionRequest {
    /// New permission.
    pub permission: SharePermission,
}

/// Backend-wide page size change (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PageSizeRequest {
    /// New page size.
    #[validate(range(min = 1, message = "Page size must be strictly positive"))]
    pub page_size: u64,
}

/// Filters for the user list.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Page to fetch.
    pub page: PageRequest,
    /// Username search fragment.
    pub username: Option<String>,
    /// Only users created in this year.
    pub year: Option<i32>,
    /// Include aggregate columns (personal file count).
    pub agg: bool,
}

impl UserQuery {
    /// Query string parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.page.to_query();
        if let Some(username) = &self.username {
            query.push(("username".to_string(), username.clone()));
        }
        if let Some(year) = self.year {
            query.push(("year".to_string(), year.max(1900).to_string()));
        }
        if self.agg {
            query.push(("agg".to_string(), "true".to_string()));
        }
        query
    }
}

/// Filters for the folder list.
#[derive(Debug, Clone, Default)]
pub struct FolderQuery {
    /// Page to fetch.
    pub page: PageRequest,
    /// Folder name search fragment.
    pub name: Option<String>,
    /// Restrict to folders of this username.
    pub username: Option<String>,
}

impl FolderQuery {
    /// Query string parameters.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = self.page.to_query();
        if let Some(name) = &self.name {
            query.push(("name".to_string(), name.clone()));
        }
        if let Some(username) = &self.username {
            query.push(("username".to_string(), username.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::validation::check;
    use brainbox_core::error::ErrorKind;

    #[test]
    fn test_register_field_errors() {
        let request = RegisterRequest {
            username: String::new(),
            email: "not-an-email".to_string(),
            password: "weak".to_string(),
        };
        let err = check(&request).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut fields: Vec<String> = err.field_errors().into_iter().map(|(f, _)| f).collect();
        fields.sort();
        assert_eq!(fields, vec!["email", "password", "username"]);
    }

    #[test]
    fn test_register_valid() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Wonder1and!".to_string(),
        };
        assert!(check(&request).is_ok());
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let request = UpdateFolderRequest {
            name: Some("Projects".to_string()),
            parent_folder: None,
        };
        assert!(check(&request).is_ok());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"name": "Projects"})
        );

        let empty = UpdateFolderRequest {
            name: Some(String::new()),
            parent_folder: None,
        };
        assert!(check(&empty).is_err());
    }

    #[test]
    fn test_page_size_must_be_positive() {
        assert!(check(&PageSizeRequest { page_size: 0 }).is_err());
        assert!(check(&PageSizeRequest { page_size: 10 }).is_ok());
    }

    #[test]
    fn test_user_query() {
        let query = UserQuery {
            page: PageRequest::sized(2, 10),
            username: Some("al".to_string()),
            year: Some(1850),
            agg: true,
        };
        assert_eq!(
            query.to_query(),
            vec![
                ("page".to_string(), "2".to_string()),
                ("page_size".to_string(), "10".to_string()),
                ("username".to_string(), "al".to_string()),
                ("year".to_string(), "1900".to_string()),
                ("agg".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_share_request_wire_form() {
        let request = ShareRequest {
            user: 3,
            permission: SharePermission::ReadWrite,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"user": 3, "permission": "RW"})
        );
    }
}
