//! Feed Permissions

use http::Method;
use kernel::permission::{ObjectPermission, is_safe_method};
use kernel::principal::AuthenticatedUser;

use crate::domain::entities::FeedItem;

/// Anyone authenticated may read; only the author may change or delete
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOwnStatus;

impl ObjectPermission<FeedItem> for UpdateOwnStatus {
    fn has_object_permission(
        &self,
        method: &Method,
        user: Option<&AuthenticatedUser>,
        obj: &FeedItem,
    ) -> bool {
        if is_safe_method(method) {
            return true;
        }
        user.is_some_and(|u| u.owns(obj.user_profile))
    }
}
