//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brainbox_core::types::{SortValue, Sortable};

use super::role::Role;
use crate::folder::Folder;
use crate::share::SharedFile;

/// A BrainBox account as returned by the user endpoints.
///
/// List endpoints return a flat subset of these fields (plus aggregates when
/// `agg=true`); the detail endpoint nests the user's folders and shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: i64,
    /// Unique login name.
    #[serde(default)]
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Assigned role.
    #[serde(default)]
    pub role: Role,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Folders owned by this user (detail view only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<Folder>,
    /// Files shared with this user (detail view only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_files: Vec<SharedFile>,
    /// Number of files the user owns (aggregated list only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_personal_files: Option<i64>,
    /// Characters written across the user's files (statistics only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub written_chars: Option<i64>,
}

impl Sortable for User {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "id" => self.id.into(),
            "username" => self.username.as_str().into(),
            "email" => self.email.as_str().into(),
            "role" => SortValue::Int(self.role as i64),
            "created_at" => self.created_at.map(|t| t.timestamp()).into(),
            "num_personal_files" => self.num_personal_files.into(),
            "written_chars" => self.written_chars.into(),
            _ => SortValue::Missing,
        }
    }
}

/// A user field that the backend sends either as a bare id or as a nested
/// object, depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    /// Only the id is known.
    Id(i64),
    /// The full user object.
    User(Box<User>),
}

impl UserRef {
    /// The referenced user's id.
    pub fn id(&self) -> i64 {
        match self {
            Self::Id(id) => *id,
            Self::User(user) => user.id,
        }
    }

    /// The nested user, when the backend expanded it.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Id(_) => None,
            Self::User(user) => Some(user),
        }
    }

    /// Display name: the username when known, otherwise `#id`.
    pub fn label(&self) -> String {
        match self {
            Self::User(user) if !user.username.is_empty() => user.username.clone(),
            _ => format!("#{}", self.id()),
        }
    }
}
