//! In-Memory Repository
//!
//! Process-local store used by the tests and by the server when no
//! database is configured.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::{FeedItemId, UserProfileId};
use tokio::sync::Mutex;

use crate::domain::entities::{FeedItem, NewFeedItem};
use crate::domain::repository::FeedItemRepository;
use crate::error::{FeedError, FeedResult};

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    items: BTreeMap<FeedItemId, FeedItem>,
}

#[derive(Clone, Default)]
pub struct InMemoryFeedRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryFeedRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every item of a profile, mirroring the database cascade
    pub async fn delete_by_owner(&self, owner: UserProfileId) -> u64 {
        let mut state = self.state.lock().await;
        let before = state.items.len();
        state.items.retain(|_, item| item.user_profile != owner);
        (before - state.items.len()) as u64
    }
}

impl FeedItemRepository for InMemoryFeedRepository {
    async fn create(&self, item: &NewFeedItem) -> FeedResult<FeedItem> {
        let mut state = self.state.lock().await;
        state.last_id += 1;
        let stored = item.clone().into_item(FeedItemId::from_i64(state.last_id));
        state.items.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: FeedItemId) -> FeedResult<Option<FeedItem>> {
        Ok(self.state.lock().await.items.get(&id).cloned())
    }

    async fn list(&self) -> FeedResult<Vec<FeedItem>> {
        Ok(self.state.lock().await.items.values().cloned().collect())
    }

    async fn update(&self, item: &FeedItem) -> FeedResult<()> {
        let mut state = self.state.lock().await;
        match state.items.get_mut(&item.id) {
            Some(stored) => {
                stored.status_text = item.status_text.clone();
                Ok(())
            }
            None => Err(FeedError::NotFound),
        }
    }

    async fn delete(&self, id: FeedItemId) -> FeedResult<bool> {
        Ok(self.state.lock().await.items.remove(&id).is_some())
    }
}
