//! JWT claim structures and unverified decoding.

pub mod claims;
pub mod decoder;

pub use claims::{AccessClaims, Expiring, ExpiryClaims};
pub use decoder::decode_unverified;
