//! Permission Predicates
//!
//! Request-level and object-level access checks shared by all resources.
//! Object permissions are evaluated after the record has been loaded, so a
//! missing record is always reported as 404 before any permission check.

use http::Method;

use crate::error::app_error::{AppError, AppResult};
use crate::principal::AuthenticatedUser;

pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action.";

/// Methods that never modify state
pub const SAFE_METHODS: [Method; 3] = [Method::GET, Method::HEAD, Method::OPTIONS];

#[inline]
pub fn is_safe_method(method: &Method) -> bool {
    SAFE_METHODS.contains(method)
}

/// Object-level permission over records of type `T`
pub trait ObjectPermission<T> {
    fn has_object_permission(
        &self,
        method: &Method,
        user: Option<&AuthenticatedUser>,
        obj: &T,
    ) -> bool;
}

/// Fail with 401 when the request is anonymous
pub fn require_authenticated(user: Option<&AuthenticatedUser>) -> AppResult<&AuthenticatedUser> {
    user.ok_or_else(|| AppError::unauthorized(NOT_AUTHENTICATED))
}

/// Evaluate an object permission
///
/// A denied anonymous request is answered with 401 so the client knows to
/// authenticate; a denied authenticated request gets 403.
pub fn check_object_permission<P, T>(
    permission: &P,
    method: &Method,
    user: Option<&AuthenticatedUser>,
    obj: &T,
) -> AppResult<()>
where
    P: ObjectPermission<T>,
{
    if permission.has_object_permission(method, user, obj) {
        return Ok(());
    }

    match user {
        None => Err(AppError::unauthorized(NOT_AUTHENTICATED)),
        Some(_) => Err(AppError::forbidden(PERMISSION_DENIED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::UserProfileId;

    struct OwnerOnly;

    struct Record {
        owner: UserProfileId,
    }

    impl ObjectPermission<Record> for OwnerOnly {
        fn has_object_permission(
            &self,
            method: &Method,
            user: Option<&AuthenticatedUser>,
            obj: &Record,
        ) -> bool {
            is_safe_method(method) || user.is_some_and(|u| u.owns(obj.owner))
        }
    }

    fn user(id: i64) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserProfileId::from_i64(id),
            email: format!("user{id}@example.com"),
            is_staff: false,
            is_superuser: false,
        }
    }

    #[test]
    fn test_safe_methods() {
        assert!(is_safe_method(&Method::GET));
        assert!(is_safe_method(&Method::HEAD));
        assert!(is_safe_method(&Method::OPTIONS));
        assert!(!is_safe_method(&Method::POST));
        assert!(!is_safe_method(&Method::PATCH));
        assert!(!is_safe_method(&Method::DELETE));
    }

    #[test]
    fn test_require_authenticated() {
        let u = user(1);
        assert!(require_authenticated(Some(&u)).is_ok());
        assert_eq!(require_authenticated(None).unwrap_err().status_code(), 401);
    }

    #[test]
    fn test_check_object_permission() {
        let record = Record {
            owner: UserProfileId::from_i64(1),
        };
        let owner = user(1);
        let stranger = user(2);

        assert!(check_object_permission(&OwnerOnly, &Method::GET, None, &record).is_ok());
        assert!(check_object_permission(&OwnerOnly, &Method::PUT, Some(&owner), &record).is_ok());

        let err =
            check_object_permission(&OwnerOnly, &Method::PUT, Some(&stranger), &record).unwrap_err();
        assert_eq!(err.status_code(), 403);

        let err = check_object_permission(&OwnerOnly, &Method::DELETE, None, &record).unwrap_err();
        assert_eq!(err.status_code(), 401);
    }
}
