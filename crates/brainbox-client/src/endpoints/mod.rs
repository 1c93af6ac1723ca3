//! Endpoint groups, each extending [`ApiClient`](crate::ApiClient).

pub mod admin;
pub mod auth;
pub mod files;
pub mod folders;
pub mod shares;
pub mod statistics;
pub mod users;

pub use admin::BulkTarget;
