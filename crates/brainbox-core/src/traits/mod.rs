//! Trait seams between the session layer and its collaborators.

pub mod token_refresher;
pub mod token_store;

pub use token_refresher::{RefreshFailure, TokenRefresher};
pub use token_store::{TokenKey, TokenStore};
