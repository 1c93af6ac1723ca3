//! Ownership and role predicates.
//!
//! Pure functions over an [`Identity`] snapshot and the ownership facts of
//! the target entity. They gate what the console offers to do; the backend
//! enforces the same rules independently.

use brainbox_core::error::AppError;
use brainbox_core::result::AppResult;
use brainbox_entity::ownership::Owned;
use brainbox_entity::user::Role;

use crate::session::Identity;

/// Whether a login is in effect.
pub fn is_authenticated(identity: &Identity) -> bool {
    identity.authenticated
}

/// Whether the identity owns `resource`. An identity without a user id
/// owns nothing, not even a resource whose owner is unknown.
pub fn is_owner(identity: &Identity, resource: &impl Owned) -> bool {
    match identity.user_id {
        Some(id) => resource.ownership().owner_user_id == Some(id),
        None => false,
    }
}

/// Whether the identity's role overrides the owner's.
///
/// Admins override everyone; moderators override plain users only.
pub fn has_higher_role(identity: &Identity, resource: &impl Owned) -> bool {
    match identity.user_role {
        Role::Admin => true,
        Role::Moderator => resource.ownership().owner_role == Role::User,
        Role::User | Role::Guest => false,
    }
}

/// Whether the identity may edit or delete `resource`.
pub fn can_modify(identity: &Identity, resource: &impl Owned) -> bool {
    is_authenticated(identity) && (is_owner(identity, resource) || has_higher_role(identity, resource))
}

/// Whether the identity is an administrator.
pub fn is_admin(identity: &Identity) -> bool {
    identity.user_role == Role::Admin
}

/// [`can_modify`] as a `Result`.
pub fn require_modify(identity: &Identity, resource: &impl Owned, what: &str) -> AppResult<()> {
    if can_modify(identity, resource) {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "Role '{}' may not modify this {what}",
            identity.user_role
        )))
    }
}

/// [`is_admin`] as a `Result`.
pub fn require_admin(identity: &Identity) -> AppResult<()> {
    if is_admin(identity) {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "Role '{}' is insufficient; administrator required",
            identity.user_role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainbox_core::error::ErrorKind;
    use brainbox_entity::ownership::ResourceOwnership;
    use brainbox_entity::user::UserRef;
    use brainbox_entity::Folder;

    fn identity(user_id: i64, role: Role) -> Identity {
        Identity {
            authenticated: true,
            user_id: Some(user_id),
            user_role: role,
        }
    }

    fn resources() -> Vec<ResourceOwnership> {
        let mut all = vec![ResourceOwnership {
            owner_user_id: None,
            owner_role: Role::Guest,
        }];
        for id in [1, 2] {
            for role in Role::ALL {
                all.push(ResourceOwnership::new(id, role));
            }
        }
        all
    }

    #[test]
    fn test_anonymous_can_do_nothing() {
        let anon = Identity::anonymous();
        for resource in resources() {
            assert!(!is_owner(&anon, &resource));
            assert!(!has_higher_role(&anon, &resource));
            assert!(!can_modify(&anon, &resource));
        }
        assert!(!is_authenticated(&anon));
        assert!(!is_admin(&anon));
    }

    #[test]
    fn test_admin_outranks_everyone() {
        let admin = identity(1, Role::Admin);
        for resource in resources() {
            assert!(has_higher_role(&admin, &resource));
            assert!(can_modify(&admin, &resource));
        }
        assert!(is_admin(&admin));
    }

    #[test]
    fn test_moderator_outranks_users_only() {
        let moderator = identity(1, Role::Moderator);
        for resource in resources() {
            assert_eq!(
                has_higher_role(&moderator, &resource),
                resource.owner_role == Role::User
            );
        }
    }

    #[test]
    fn test_user_never_outranks() {
        let user = identity(1, Role::User);
        for resource in resources() {
            assert!(!has_higher_role(&user, &resource));
        }
    }

    #[test]
    fn test_is_owner_compares_ids() {
        for role in Role::ACCOUNT_ROLES {
            let me = identity(1, role);
            for resource in resources() {
                assert_eq!(is_owner(&me, &resource), resource.owner_user_id == Some(1));
            }
        }

        let no_id = Identity {
            authenticated: true,
            user_id: None,
            user_role: Role::User,
        };
        let unowned = ResourceOwnership {
            owner_user_id: None,
            owner_role: Role::User,
        };
        assert!(!is_owner(&no_id, &unowned));
    }

    #[test]
    fn test_user_modifies_only_own() {
        let user = identity(1, Role::User);
        assert!(!can_modify(&user, &ResourceOwnership::new(2, Role::User)));
        assert!(can_modify(&user, &ResourceOwnership::new(1, Role::User)));
    }

    #[test]
    fn test_moderator_cannot_override_bare_owner_id() {
        let moderator = identity(1, Role::Moderator);
        let folder: Folder =
            serde_json::from_value(serde_json::json!({"id": 10, "name": "notes", "user": 2}))
                .unwrap();
        assert_eq!(folder.user, UserRef::Id(2));
        assert!(!can_modify(&moderator, &folder));
    }

    #[test]
    fn test_require_wrappers() {
        let user = identity(1, Role::User);
        let err = require_modify(&user, &ResourceOwnership::new(2, Role::User), "folder")
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
        assert!(require_modify(&user, &ResourceOwnership::new(1, Role::User), "folder").is_ok());

        assert_eq!(require_admin(&user).unwrap_err().kind, ErrorKind::Authorization);
        assert!(require_admin(&identity(1, Role::Admin)).is_ok());
    }
}
