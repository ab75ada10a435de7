//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserProfileId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entity::{
    auth_token::AuthToken,
    user_profile::{NewUserProfile, UserProfile},
};
use crate::domain::repository::{AuthTokenRepository, UserProfileRepository};
use crate::domain::value_object::{
    email::Email, profile_name::ProfileName, user_password::UserPassword,
};
use crate::error::{ProfileError, ProfileResult};

const PROFILE_COLUMNS: &str = "id, email, name, password_hash, is_active, is_staff, is_superuser, created_at, updated_at";

/// PostgreSQL-backed profile and token repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` wildcards so search terms match literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn map_unique_violation(err: sqlx::Error) -> ProfileError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ProfileError::EmailTaken,
        _ => ProfileError::Database(err),
    }
}

// ============================================================================
// User Profile Repository Implementation
// ============================================================================

impl UserProfileRepository for PgProfileRepository {
    async fn create(&self, profile: &NewUserProfile) -> ProfileResult<UserProfile> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO user_profiles (
                email,
                name,
                password_hash,
                is_active,
                is_staff,
                is_superuser,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, TRUE, $4, $5, $6, $6)
            RETURNING id
            "#,
        )
        .bind(profile.email.as_str())
        .bind(profile.name.as_str())
        .bind(profile.password.as_phc_string())
        .bind(profile.is_staff)
        .bind(profile.is_superuser)
        .bind(profile.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(profile.clone().into_profile(UserProfileId::from_i64(id)))
    }

    async fn find_by_id(&self, id: UserProfileId) -> ProfileResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE id = $1"
        ))
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_profile()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> ProfileResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_profile()).transpose()
    }

    async fn exists_by_email(
        &self,
        email: &Email,
        exclude: Option<UserProfileId>,
    ) -> ProfileResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM user_profiles WHERE email = $1 AND id IS DISTINCT FROM $2)",
        )
        .bind(email.as_str())
        .bind(exclude.map(|id| id.as_i64()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list(&self, search_terms: &[String]) -> ProfileResult<Vec<UserProfile>> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE TRUE"
        ));

        for term in search_terms {
            let pattern = format!("%{}%", escape_like(term));
            query
                .push(" AND (name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR email ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        query.push(" ORDER BY id");

        let rows = query
            .build_query_as::<UserProfileRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(|r| r.into_profile()).collect()
    }

    async fn update(&self, profile: &UserProfile) -> ProfileResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE user_profiles SET
                email = $2,
                name = $3,
                password_hash = $4,
                is_active = $5,
                is_staff = $6,
                is_superuser = $7,
                updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(profile.id.as_i64())
        .bind(profile.email.as_str())
        .bind(profile.name.as_str())
        .bind(profile.password.as_phc_string())
        .bind(profile.is_active)
        .bind(profile.is_staff)
        .bind(profile.is_superuser)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(ProfileError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: UserProfileId) -> ProfileResult<bool> {
        // auth_tokens and profile_feed_items cascade
        let deleted = sqlx::query("DELETE FROM user_profiles WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Auth Token Repository Implementation
// ============================================================================

impl AuthTokenRepository for PgProfileRepository {
    async fn find_by_key(&self, key: &str) -> ProfileResult<Option<AuthToken>> {
        let row = sqlx::query_as::<_, AuthTokenRow>(
            "SELECT key, user_id, created_at FROM auth_tokens WHERE key = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthTokenRow::into_token))
    }

    async fn find_by_user_id(&self, user_id: UserProfileId) -> ProfileResult<Option<AuthToken>> {
        let row = sqlx::query_as::<_, AuthTokenRow>(
            "SELECT key, user_id, created_at FROM auth_tokens WHERE user_id = $1",
        )
        .bind(user_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuthTokenRow::into_token))
    }

    async fn insert_or_existing(&self, token: &AuthToken) -> ProfileResult<AuthToken> {
        sqlx::query(
            r#"
            INSERT INTO auth_tokens (key, user_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(&token.key)
        .bind(token.user_id.as_i64())
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        // A concurrent login may have won the insert
        self.find_by_user_id(token.user_id)
            .await?
            .ok_or(ProfileError::NotFound)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserProfileRow {
    id: i64,
    email: String,
    name: String,
    password_hash: String,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserProfileRow {
    fn into_profile(self) -> ProfileResult<UserProfile> {
        let password = UserPassword::from_phc_string(self.password_hash)?;

        Ok(UserProfile {
            id: UserProfileId::from_i64(self.id),
            email: Email::from_db(self.email),
            name: ProfileName::from_db(self.name),
            password,
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuthTokenRow {
    key: String,
    user_id: i64,
    created_at: DateTime<Utc>,
}

impl AuthTokenRow {
    fn into_token(self) -> AuthToken {
        AuthToken {
            key: self.key,
            user_id: UserProfileId::from_i64(self.user_id),
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("ada"), "ada");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }
}
