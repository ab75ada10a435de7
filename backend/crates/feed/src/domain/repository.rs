//! Repository Traits - Interfaces for data persistence
//!
//! These traits define the contract for data access.
//! Implementations are in the infra layer.

use kernel::id::FeedItemId;

use crate::domain::entities::{FeedItem, NewFeedItem};
use crate::error::FeedResult;

/// Feed item repository trait
#[trait_variant::make(FeedItemRepository: Send)]
pub trait LocalFeedItemRepository {
    /// Store a new item and return it with its assigned id
    async fn create(&self, item: &NewFeedItem) -> FeedResult<FeedItem>;

    /// Find item by ID
    async fn find_by_id(&self, id: FeedItemId) -> FeedResult<Option<FeedItem>>;

    /// All items ordered by id
    async fn list(&self) -> FeedResult<Vec<FeedItem>>;

    /// Persist a changed status text
    async fn update(&self, item: &FeedItem) -> FeedResult<()>;

    /// Delete item; `false` when absent
    async fn delete(&self, id: FeedItemId) -> FeedResult<bool>;
}
