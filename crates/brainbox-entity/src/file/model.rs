//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brainbox_core::types::{SortValue, Sortable};

use crate::folder::FolderRef;
use crate::share::SharedFile;
use crate::user::UserRef;

/// A text file owned by a user, optionally placed in a folder and shared
/// with other users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    /// Unique identifier.
    pub id: i64,
    /// File name.
    #[serde(default)]
    pub name: String,
    /// Text content.
    #[serde(default)]
    pub content: String,
    /// Owning user.
    pub user: UserRef,
    /// Containing folder.
    #[serde(default)]
    pub folder: Option<FolderRef>,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Share entries for this file (detail view only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shared_users: Vec<SharedFile>,
}

impl File {
    /// Number of characters in the content.
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }
}

impl Sortable for File {
    fn sort_value(&self, column: &str) -> SortValue {
        match column {
            "id" => self.id.into(),
            "name" => self.name.as_str().into(),
            "user" => self.user.label().as_str().into(),
            "folder" => self.folder.as_ref().map(|f| f.id()).into(),
            "created_at" => self.created_at.map(|t| t.timestamp()).into(),
            "chars" => SortValue::Int(self.char_count() as i64),
            _ => SortValue::Missing,
        }
    }
}

/// A file field sent either as a bare id or as a nested object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileRef {
    /// Only the id is known.
    Id(i64),
    /// The full file object.
    File(Box<File>),
}

impl FileRef {
    /// The referenced file's id.
    pub fn id(&self) -> i64 {
        match self {
            Self::Id(id) => *id,
            Self::File(file) => file.id,
        }
    }

    /// Display name: the file name when known, otherwise `#id`.
    pub fn label(&self) -> String {
        match self {
            Self::File(file) if !file.name.is_empty() => file.name.clone(),
            _ => format!("#{}", self.id()),
        }
    }
}
