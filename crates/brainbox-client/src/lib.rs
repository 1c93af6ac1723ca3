//! # brainbox-client
//!
//! Typed REST client for the BrainBox backend.
//!
//! ## Modules
//!
//! - `client` — `ApiClient`, request execution and status mapping
//! - `refresher` — the HTTP implementation of `TokenRefresher`
//! - `endpoints` — auth, users, folders, files, shares, statistics, admin
//! - `dto` — request bodies, query filters and their validation

pub mod client;
pub mod dto;
pub mod endpoints;
pub mod refresher;

pub use client::ApiClient;
pub use endpoints::BulkTarget;
pub use refresher::HttpTokenRefresher;
