//! Ownership facts used by authorization decisions.

use serde::{Deserialize, Serialize};

use crate::file::File;
use crate::folder::Folder;
use crate::user::{Role, User, UserRef};

/// The minimal facts about a target entity needed to authorize an action
/// on it: who owns it and what role that owner holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceOwnership {
    /// Owning user id; `None` when the backend did not say.
    pub owner_user_id: Option<i64>,
    /// Role of the owning user.
    pub owner_role: Role,
}

impl ResourceOwnership {
    /// Ownership by a known user.
    pub fn new(owner_user_id: i64, owner_role: Role) -> Self {
        Self {
            owner_user_id: Some(owner_user_id),
            owner_role,
        }
    }

    /// Ownership derived from a user reference. A bare id carries no role,
    /// so the owner is treated as `Guest` and moderator overrides never
    /// apply to it.
    pub fn from_user_ref(user: &UserRef) -> Self {
        match user {
            UserRef::Id(id) => Self::new(*id, Role::Guest),
            UserRef::User(user) => Self::new(user.id, user.role),
        }
    }
}

/// Entities that can be authorized against.
pub trait Owned {
    /// Ownership facts for this entity.
    fn ownership(&self) -> ResourceOwnership;
}

impl Owned for User {
    fn ownership(&self) -> ResourceOwnership {
        ResourceOwnership::new(self.id, self.role)
    }
}

impl Owned for Folder {
    fn ownership(&self) -> ResourceOwnership {
        ResourceOwnership::from_user_ref(&self.user)
    }
}

impl Owned for File {
    fn ownership(&self) -> ResourceOwnership {
        ResourceOwnership::from_user_ref(&self.user)
    }
}

impl Owned for ResourceOwnership {
    fn ownership(&self) -> ResourceOwnership {
        *self
    }
}
