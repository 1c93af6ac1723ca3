//! User entity and role.

pub mod model;
pub mod role;

pub use model::{User, UserRef};
pub use role::Role;
