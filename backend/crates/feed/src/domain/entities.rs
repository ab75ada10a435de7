//! Domain Entities
//!
//! Core business entities for the feed domain.

use chrono::{DateTime, SubsecRound, Utc};
use kernel::id::{FeedItemId, UserProfileId};
use std::fmt;

use crate::domain::value_objects::StatusText;

/// FeedItem entity - one status update posted by a profile
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub id: FeedItemId,
    pub user_profile: UserProfileId,
    pub status_text: StatusText,
    pub created_on: DateTime<Utc>,
}

impl fmt::Display for FeedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status_text)
    }
}

/// Feed item that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewFeedItem {
    pub user_profile: UserProfileId,
    pub status_text: StatusText,
    pub created_on: DateTime<Utc>,
}

impl NewFeedItem {
    /// Stamp a new item with the current time
    ///
    /// Timestamps are kept at microsecond precision, the resolution of the
    /// database column.
    pub fn new(user_profile: UserProfileId, status_text: StatusText) -> Self {
        Self {
            user_profile,
            status_text,
            created_on: Utc::now().trunc_subsecs(6),
        }
    }

    /// Attach the store-assigned id
    pub fn into_item(self, id: FeedItemId) -> FeedItem {
        FeedItem {
            id,
            user_profile: self.user_profile,
            status_text: self.status_text,
            created_on: self.created_on,
        }
    }
}
