//! Profile Permissions

use http::Method;
use kernel::permission::{ObjectPermission, is_safe_method};
use kernel::principal::AuthenticatedUser;

use crate::domain::entity::user_profile::UserProfile;

/// Anyone may read a profile; only its owner may change or delete it
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOwnProfile;

impl ObjectPermission<UserProfile> for UpdateOwnProfile {
    fn has_object_permission(
        &self,
        method: &Method,
        user: Option<&AuthenticatedUser>,
        obj: &UserProfile,
    ) -> bool {
        if is_safe_method(method) {
            return true;
        }
        user.is_some_and(|u| u.owns(obj.id))
    }
}
