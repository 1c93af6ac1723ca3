//! Session lifecycle and request interception.

pub mod identity;
pub mod interceptor;
pub mod manager;
pub mod tokens;

#[cfg(test)]
pub(crate) mod testing;

pub use identity::{Identity, SessionState};
pub use interceptor::is_public_path;
pub use manager::SessionManager;
pub use tokens::TokenPair;
