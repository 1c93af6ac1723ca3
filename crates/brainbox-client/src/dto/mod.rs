//! Request bodies, query filters, and their validation rules.

pub mod request;
pub mod validation;

pub use request::*;
pub use validation::{check, validate_password};
