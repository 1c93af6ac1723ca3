//! File share entity model.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::file::FileRef;
use crate::user::UserRef;

/// Access level granted to the user a file is shared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SharePermission {
    /// Read-only.
    #[default]
    #[serde(rename = "R")]
    Read,
    /// Read-write.
    #[serde(rename = "RW")]
    ReadWrite,
}

impl SharePermission {
    /// Wire code (`R` or `RW`).
    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Read => "R",
            Self::ReadWrite => "RW",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Read => "Read-Only",
            Self::ReadWrite => "Read-Write",
        }
    }
}

impl fmt::Display for SharePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SharePermission {
    type Err = brainbox_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r" | "read" | "read-only" => Ok(Self::Read),
            "rw" | "read-write" => Ok(Self::ReadWrite),
            _ => Err(brainbox_core::AppError::validation(format!(
                "Invalid share permission: '{s}'. Expected R or RW"
            ))),
        }
    }
}

/// A file shared with a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedFile {
    /// Share identifier (absent on create requests).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The shared file.
    pub file: FileRef,
    /// The user the file is shared with.
    pub user: UserRef,
    /// Granted access level.
    #[serde(default)]
    pub permission: SharePermission,
}
