//! API DTOs (Data Transfer Objects)

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::domain::entities::FeedItem;

/// Body of POST /api/feed/ and PUT/PATCH /api/feed/{id}/
///
/// `user_profile` is read-only and ignored when sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedItemRequest {
    #[serde(default)]
    pub status_text: Option<String>,
}

/// Feed item representation
#[derive(Debug, Clone, Serialize)]
pub struct FeedItemResponse {
    pub id: i64,
    pub user_profile: i64,
    pub status_text: String,
    /// RFC 3339, UTC, microsecond precision
    pub created_on: String,
}

impl From<&FeedItem> for FeedItemResponse {
    fn from(item: &FeedItem) -> Self {
        Self {
            id: item.id.as_i64(),
            user_profile: item.user_profile.as_i64(),
            status_text: item.status_text.as_str().to_string(),
            created_on: item.created_on.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}
