//! Post Status Use Case

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;
use kernel::principal::AuthenticatedUser;

use crate::domain::entities::{FeedItem, NewFeedItem};
use crate::domain::repository::FeedItemRepository;
use crate::domain::value_objects::StatusText;
use crate::error::{FeedError, FeedResult};

pub struct PostStatusUseCase<R>
where
    R: FeedItemRepository,
{
    repo: Arc<R>,
}

impl<R> PostStatusUseCase<R>
where
    R: FeedItemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Post a status owned by `user`
    pub async fn execute(
        &self,
        user: &AuthenticatedUser,
        status_text: Option<String>,
    ) -> FeedResult<FeedItem> {
        let mut errors = FieldErrors::new();
        let status_text = errors.required("status_text", status_text, StatusText::new);

        let Some(status_text) = status_text else {
            return Err(FeedError::Validation(errors));
        };

        let item = self
            .repo
            .create(&NewFeedItem::new(user.user_id, status_text))
            .await?;

        tracing::info!(
            feed_item_id = %item.id,
            user_id = %item.user_profile,
            "Status posted"
        );

        Ok(item)
    }
}
