//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brainbox_core::types::{SortValue, Sortable};

use crate::file::File;
use crate::user::UserRef;

/// A folder owned by a user, optionally nested under a parent folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique identifier.
    pub id: i64,
    /// Folder name.
    #[serde(default)]
    pub name: String,
    /// Owning user.
    pub user: UserRef,
    /// Parent folder id, `None` for top-level folders.
    #[serde(default)]
    pub parent_folder: Option<i64>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Files in this folder (detail view only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
    /// Number of files (statistics only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_files: Option<i64>,
    /// Number of distinct users the folder's files are shared with
    /// (statistics only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_shared_users: Option<i64>,
}

impl Sortable for Folder {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "user" => self.user.label().as_str().into(),
            "parent_folder" => self.parent_folder.into(),
            "created_at" => self.created_at.map(|t| t.timestamp()).into(),
            "num_files" => self.num_files.into(),
            "num_shared_users" => self.num_shared_users.into(),
            _ => SortValue::Missing,
        }
    }
}

/// A folder field sent either as a bare id or as a nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FolderRef {
    /// Only the id is known.
    Id(i64),
    /// The full folder object.
    Folder(Box<Folder>),
}

impl FolderRef {
    /// The referenced folder's id.
    pub fn id(&self) -> i64 {
        match self {
            Self::Id(id) => *id,
            Self::Folder(folder) => folder.id,
        }
    }

    /// Display name: the folder name when known, otherwise `#id`.
    pub fn label(&self) -> String {
        match self {
            Self::Folder(folder) if !folder.name.is_empty() => folder.name.clone(),
            _ => format!("#{}", self.id()),
        }
    }
}
