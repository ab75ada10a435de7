//! Manage Feed Use Case
//!
//! Listing, retrieval, update and deletion of feed items.

use std::sync::Arc;

use http::Method;
use kernel::error::field_errors::FieldErrors;
use kernel::id::FeedItemId;
use kernel::permission::check_object_permission;
use kernel::principal::AuthenticatedUser;

use crate::domain::entities::FeedItem;
use crate::domain::permission::UpdateOwnStatus;
use crate::domain::repository::FeedItemRepository;
use crate::domain::value_objects::StatusText;
use crate::error::{FeedError, FeedResult};

pub struct ManageFeedUseCase<R>
where
    R: FeedItemRepository,
{
    repo: Arc<R>,
}

impl<R> ManageFeedUseCase<R>
where
    R: FeedItemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> FeedResult<Vec<FeedItem>> {
        self.repo.list().await
    }

    pub async fn retrieve(&self, id: FeedItemId) -> FeedResult<FeedItem> {
        self.repo.find_by_id(id).await?.ok_or(FeedError::NotFound)
    }

    /// Load an item and check that `user` may apply `method` to it
    pub async fn authorize(
        &self,
        id: FeedItemId,
        method: &Method,
        user: &AuthenticatedUser,
    ) -> FeedResult<FeedItem> {
        let item = self.retrieve(id).await?;
        check_object_permission(&UpdateOwnStatus, method, Some(user), &item)?;
        Ok(item)
    }

    /// Change the status text
    ///
    /// A partial update without `status_text` leaves the item unchanged.
    pub async fn update(
        &self,
        id: FeedItemId,
        method: &Method,
        user: &AuthenticatedUser,
        status_text: Option<String>,
        partial: bool,
    ) -> FeedResult<FeedItem> {
        let mut item = self.authorize(id, method, user).await?;

        let mut errors = FieldErrors::new();
        let status_text = if partial {
            errors.optional("status_text", status_text, StatusText::new)
        } else {
            errors.required("status_text", status_text, StatusText::new)
        };

        if !errors.is_empty() {
            return Err(FeedError::Validation(errors));
        }

        if let Some(status_text) = status_text {
            item.status_text = status_text;
            self.repo.update(&item).await?;
            tracing::info!(feed_item_id = %item.id, "Status updated");
        }

        Ok(item)
    }

    pub async fn destroy(
        &self,
        id: FeedItemId,
        method: &Method,
        user: &AuthenticatedUser,
    ) -> FeedResult<()> {
        let item = self.authorize(id, method, user).await?;

        if !self.repo.delete(item.id).await? {
            return Err(FeedError::NotFound);
        }

        tracing::info!(feed_item_id = %item.id, "Status deleted");

        Ok(())
    }
}
