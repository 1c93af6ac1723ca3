//! # brainbox-entity
//!
//! Domain models exchanged with the BrainBox backend, plus the ownership
//! facts the authorization layer evaluates.

pub mod file;
pub mod folder;
pub mod ownership;
pub mod share;
pub mod statistics;
pub mod user;

pub use file::{File, FileRef};
pub use folder::{Folder, FolderRef};
pub use ownership::{Owned, ResourceOwnership};
pub use share::{SharePermission, SharedFile};
pub use statistics::{FolderByNumFiles, FolderBySharedUsers, UserByWrittenChars};
pub use user::{Role, User, UserRef};
