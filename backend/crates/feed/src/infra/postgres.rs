//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{FeedItemId, UserProfileId};
use sqlx::PgPool;

use crate::domain::entities::{FeedItem, NewFeedItem};
use crate::domain::repository::FeedItemRepository;
use crate::domain::value_objects::StatusText;
use crate::error::{FeedError, FeedResult};

/// PostgreSQL-backed feed repository
#[derive(Clone)]
pub struct PgFeedRepository {
    pool: PgPool,
}

impl PgFeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl FeedItemRepository for PgFeedRepository {
    async fn create(&self, item: &NewFeedItem) -> FeedResult<FeedItem> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO profile_feed_items (user_profile_id, status_text, created_on)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(item.user_profile.as_i64())
        .bind(item.status_text.as_str())
        .bind(item.created_on)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            // Owner deleted between authentication and insert
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => FeedError::NotFound,
            _ => FeedError::Database(e),
        })?;

        Ok(item.clone().into_item(FeedItemId::from_i64(id)))
    }

    async fn find_by_id(&self, id: FeedItemId) -> FeedResult<Option<FeedItem>> {
        let row = sqlx::query_as::<_, FeedItemRow>(
            r#"
            SELECT id, user_profile_id, status_text, created_on
            FROM profile_feed_items
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(FeedItemRow::into_item))
    }

    async fn list(&self) -> FeedResult<Vec<FeedItem>> {
        let rows = sqlx::query_as::<_, FeedItemRow>(
            r#"
            SELECT id, user_profile_id, status_text, created_on
            FROM profile_feed_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FeedItemRow::into_item).collect())
    }

    async fn update(&self, item: &FeedItem) -> FeedResult<()> {
        let updated = sqlx::query("UPDATE profile_feed_items SET status_text = $2 WHERE id = $1")
            .bind(item.id.as_i64())
            .bind(item.status_text.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(FeedError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: FeedItemId) -> FeedResult<bool> {
        let deleted = sqlx::query("DELETE FROM profile_feed_items WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

#[derive(sqlx::FromRow)]
struct FeedItemRow {
    id: i64,
    user_profile_id: i64,
    status_text: String,
    created_on: DateTime<Utc>,
}

impl FeedItemRow {
    fn into_item(self) -> FeedItem {
        FeedItem {
            id: FeedItemId::from_i64(self.id),
            user_profile: UserProfileId::from_i64(self.user_profile_id),
            status_text: StatusText::from_db(self.status_text),
            created_on: self.created_on,
        }
    }
}
