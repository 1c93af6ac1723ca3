//! # brainbox-core
//!
//! Core crate for the BrainBox console. Contains the unified error system,
//! layered configuration, the token persistence and refresh seams, and the
//! pagination/sorting protocol shared by every list view.
//!
//! This crate has **no** internal dependencies on other BrainBox crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
