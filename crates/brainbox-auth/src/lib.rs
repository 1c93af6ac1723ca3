//! # brainbox-auth
//!
//! Client-side authentication and authorization for the BrainBox console.
//!
//! ## Modules
//!
//! - `jwt` — unverified token claim decoding
//! - `store` — in-memory and file-backed token stores
//! - `session` — session lifecycle (login, logout, refresh) and the
//!   outgoing-request interceptor
//! - `permissions` — ownership/role predicates and route guards
//!
//! Every decision made here is advisory. The backend re-checks every
//! request; nothing in this crate is a security boundary.

pub mod error;
pub mod jwt;
pub mod permissions;
pub mod session;
pub mod store;

pub use error::SessionError;
pub use jwt::{AccessClaims, ExpiryClaims};
pub use permissions::{Redirect, RouteDecision, RouteGuard};
pub use session::{Identity, SessionManager, SessionState, TokenPair};
pub use store::{FileTokenStore, MemoryTokenStore};
