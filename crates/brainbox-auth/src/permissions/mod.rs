//! Authorization decisions: ownership/role predicates and route guards.

pub mod evaluator;
pub mod guard;

pub use evaluator::{
    can_modify, has_higher_role, is_admin, is_authenticated, is_owner, require_admin,
    require_modify,
};
pub use guard::{Redirect, RouteDecision, RouteGuard};
