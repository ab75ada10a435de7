//! HTTP Handlers
//!
//! Every handler requires an authenticated principal; anonymous requests
//! are answered with 401 before the record is looked up.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::{Extension, Json};
use kernel::error::app_error::AppError;
use kernel::id::FeedItemId;
use kernel::permission::require_authenticated;
use kernel::principal::AuthenticatedUser;
use std::sync::Arc;

use crate::application::{ManageFeedUseCase, PostStatusUseCase};
use crate::domain::repository::FeedItemRepository;
use crate::error::FeedResult;
use crate::presentation::dto::{FeedItemRequest, FeedItemResponse};

/// Shared state for feed handlers
#[derive(Clone)]
pub struct FeedAppState<R>
where
    R: FeedItemRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

type User = Option<Extension<AuthenticatedUser>>;

// ============================================================================
// Collection
// ============================================================================

/// GET /api/feed/
pub async fn list_feed<R>(
    State(state): State<FeedAppState<R>>,
    user: User,
) -> FeedResult<Json<Vec<FeedItemResponse>>>
where
    R: FeedItemRepository + Clone + Send + Sync + 'static,
{
    authenticated(&user)?;

    let items = ManageFeedUseCase::new(state.repo.clone()).list().await?;

    Ok(Json(items.iter().map(FeedItemResponse::from).collect()))
}

/// POST /api/feed/
pub async fn post_status<R>(
    State(state): State<FeedAppState<R>>,
    user: User,
    payload: Result<Json<FeedItemRequest>, JsonRejection>,
) -> FeedResult<(StatusCode, Json<FeedItemResponse>)>
where
    R: FeedItemRepository + Clone + Send + Sync + 'static,
{
    let user = authenticated(&user)?;
    let Json(req) = payload.map_err(AppError::from)?;

    let item = PostStatusUseCase::new(state.repo.clone())
        .execute(user, req.status_text)
        .await?;

    Ok((StatusCode::CREATED, Json(FeedItemResponse::from(&item))))
}

// ============================================================================
// Single item
// ============================================================================

/// GET /api/feed/{id}/
pub async fn retrieve_status<R>(
    State(state): State<FeedAppState<R>>,
    user: User,
    path: Result<Path<i64>, PathRejection>,
) -> FeedResult<Json<FeedItemResponse>>
where
    R: FeedItemRepository + Clone + Send + Sync + 'static,
{
    authenticated(&user)?;
    let id = feed_item_id(path)?;

    let item = ManageFeedUseCase::new(state.repo.clone()).retrieve(id).await?;

    Ok(Json(FeedItemResponse::from(&item)))
}

/// PUT /api/feed/{id}/
pub async fn update_status<R>(
    state: State<FeedAppState<R>>,
    method: Method,
    user: User,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FeedItemRequest>, JsonRejection>,
) -> FeedResult<Json<FeedItemResponse>>
where
    R: FeedItemRepository + Clone + Send + Sync + 'static,
{
    save_status(state, method, user, path, payload, false).await
}

/// PATCH /api/feed/{id}/
pub async fn partial_update_status<R>(
    state: State<FeedAppState<R>>,
    method: Method,
    user: User,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FeedItemRequest>, JsonRejection>,
) -> FeedResult<Json<FeedItemResponse>>
where
    R: FeedItemRepository + Clone + Send + Sync + 'static,
{
    save_status(state, method, user, path, payload, true).await
}

/// DELETE /api/feed/{id}/
pub async fn destroy_status<R>(
    State(state): State<FeedAppState<R>>,
    method: Method,
    user: User,
    path: Result<Path<i64>, PathRejection>,
) -> FeedResult<StatusCode>
where
    R: FeedItemRepository + Clone + Send + Sync + 'static,
{
    let user = authenticated(&user)?;
    let id = feed_item_id(path)?;

    ManageFeedUseCase::new(state.repo.clone())
        .destroy(id, &method, user)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn authenticated(user: &User) -> FeedResult<&AuthenticatedUser> {
    Ok(require_authenticated(user.as_ref().map(|Extension(u)| u))?)
}

/// Non-integer ids are reported as a missing record
fn feed_item_id(path: Result<Path<i64>, PathRejection>) -> FeedResult<FeedItemId> {
    let Path(id) = path.map_err(AppError::from)?;
    Ok(FeedItemId::from_i64(id))
}

async fn save_status<R>(
    State(state): State<FeedAppState<R>>,
    method: Method,
    user: User,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<FeedItemRequest>, JsonRejection>,
    partial: bool,
) -> FeedResult<Json<FeedItemResponse>>
where
    R: FeedItemRepository + Clone + Send + Sync + 'static,
{
    let user = authenticated(&user)?;
    let id = feed_item_id(path)?;
    let use_case = ManageFeedUseCase::new(state.repo.clone());

    // 404 and permission failures take precedence over body errors
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            use_case.authorize(id, &method, user).await?;
            return Err(AppError::from(rejection).into());
        }
    };

    let item = use_case
        .update(id, &method, user, req.status_text, partial)
        .await?;

    Ok(Json(FeedItemResponse::from(&item)))
}
