//! File share entity.

pub mod model;

pub use model::{SharePermission, SharedFile};
