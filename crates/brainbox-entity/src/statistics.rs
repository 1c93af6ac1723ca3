//! Aggregate rows returned by the statistics endpoints.

use serde::{Deserialize, Serialize};

use brainbox_core::types::{SortValue, Sortable};

/// Users ranked by the number of characters written across their files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserByWrittenChars {
    /// User id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
    /// Characters written; absent when the user has no files.
    #[serde(default)]
    pub written_chars: Option<i64>,
}

/// Folders ranked by how many files they contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderByNumFiles {
    /// Folder id.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Number of files.
    #[serde(default)]
    pub num_files: i64,
}

/// Folders ranked by how many distinct users their files are shared with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderBySharedUsers {
    /// Folder id.
    pub id: i64,
    /// Folder name.
    pub name: String,
    /// Number of distinct users.
    #[serde(default)]
    pub num_shared_users: i64,
}

impl Sortable for UserByWrittenChars {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "id" => self.id.into(),
            "username" => self.username.as_str().into(),
            "email" => self.email.as_str().into(),
            // missing counts read as zero in every view
            "written_chars" => SortValue::Int(self.written_chars.unwrap_or(0)),
            _ => SortValue::Missing,
        }
    }
}

impl Sortable for FolderByNumFiles {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "num_files" => self.num_files.into(),
            _ => SortValue::Missing,
        }
    }
}

impl Sortable for FolderBySharedUsers {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "num_shared_users" => self.num_shared_users.into(),
            _ => SortValue::Missing,
        }
    }
}
