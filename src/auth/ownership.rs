//! Owner checks for mutating a resource.

use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Resources that record exactly one owning user.
pub trait HasOwner {
    fn owner_id(&self) -> Uuid;

    fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id() == user_id
    }
}

/// Fails with 401 unless `user` owns `resource`.
///
/// Non-owners get the same status as an unauthenticated caller; clients
/// cannot tell "wrong token" from "not yours".
pub fn require_ownership<R: HasOwner>(user: &AuthUser, resource: &R) -> Result<(), ApiError> {
    if resource.is_owned_by(user.id) {
        return Ok(());
    }

    tracing::warn!(
        "Ownership check failed: user {} ({}) does not own resource owned by {}",
        user.username,
        user.id,
        resource.owner_id()
    );
    Err(ApiError::unauthorized("The requested resource is not owned by you"))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Owned(Uuid);

    impl HasOwner for Owned {
        fn owner_id(&self) -> Uuid {
            self.0
        }
    }

    fn user(id: Uuid) -> AuthUser {
        AuthUser {
            id,
            username: "carol".to_string(),
        }
    }

    #[test]
    fn owner_passes() {
        let id = Uuid::new_v4();
        assert!(require_ownership(&user(id), &Owned(id)).is_ok());
    }

    #[test]
    fn non_owner_gets_unauthorized() {
        let err = require_ownership(&user(Uuid::new_v4()), &Owned(Uuid::new_v4())).unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "UNAUTHORIZED");
    }
}
