//! HTTP Handlers

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode};
use axum::{Extension, Json};
use kernel::error::app_error::AppError;
use kernel::id::UserProfileId;
use kernel::principal::AuthenticatedUser;
use std::sync::Arc;

use crate::application::config::ProfileConfig;
use crate::application::{
    CreateUserInput, CreateUserUseCase, ManageProfileUseCase, ObtainTokenInput,
    ObtainTokenUseCase, UpdateProfileInput,
};
use crate::domain::repository::{AuthTokenRepository, UserProfileRepository};
use crate::error::ProfileResult;
use crate::presentation::dto::{
    LoginRequest, ProfileListQuery, ProfileRequest, ProfileResponse, TokenResponse,
};

/// Shared state for profile handlers
#[derive(Clone)]
pub struct ProfileAppState<R>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ProfileConfig>,
}

// ============================================================================
// Profile collection
// ============================================================================

/// GET /api/profile/?search=
pub async fn list_profiles<R>(
    State(state): State<ProfileAppState<R>>,
    Query(query): Query<ProfileListQuery>,
) -> ProfileResult<Json<Vec<ProfileResponse>>>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let use_case = ManageProfileUseCase::new(state.repo.clone(), state.config.clone());
    let profiles = use_case.list(query.search.as_deref()).await?;

    Ok(Json(profiles.iter().map(ProfileResponse::from).collect()))
}

/// POST /api/profile/
pub async fn create_profile<R>(
    State(state): State<ProfileAppState<R>>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> ProfileResult<(StatusCode, Json<ProfileResponse>)>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let use_case = CreateUserUseCase::new(state.repo.clone(), state.config.clone());
    let profile = use_case
        .execute(CreateUserInput {
            email: req.email,
            name: req.name,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ProfileResponse::from(&profile))))
}

// ============================================================================
// Single profile
// ============================================================================

/// GET /api/profile/{id}/
pub async fn retrieve_profile<R>(
    State(state): State<ProfileAppState<R>>,
    path: Result<Path<i64>, PathRejection>,
) -> ProfileResult<Json<ProfileResponse>>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let id = profile_id(path)?;

    let use_case = ManageProfileUseCase::new(state.repo.clone(), state.config.clone());
    let profile = use_case.retrieve(id).await?;

    Ok(Json(ProfileResponse::from(&profile)))
}

/// PUT /api/profile/{id}/
pub async fn update_profile<R>(
    state: State<ProfileAppState<R>>,
    method: Method,
    user: Option<Extension<AuthenticatedUser>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> ProfileResult<Json<ProfileResponse>>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    save_profile(state, method, user, path, payload, false).await
}

/// PATCH /api/profile/{id}/
pub async fn partial_update_profile<R>(
    state: State<ProfileAppState<R>>,
    method: Method,
    user: Option<Extension<AuthenticatedUser>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> ProfileResult<Json<ProfileResponse>>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    save_profile(state, method, user, path, payload, true).await
}

/// DELETE /api/profile/{id}/
pub async fn destroy_profile<R>(
    State(state): State<ProfileAppState<R>>,
    method: Method,
    user: Option<Extension<AuthenticatedUser>>,
    path: Result<Path<i64>, PathRejection>,
) -> ProfileResult<StatusCode>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let id = profile_id(path)?;
    let user = user.map(|Extension(u)| u);

    let use_case = ManageProfileUseCase::new(state.repo.clone(), state.config.clone());
    use_case.destroy(id, &method, user.as_ref()).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login/
pub async fn obtain_token<R>(
    State(state): State<ProfileAppState<R>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ProfileResult<Json<TokenResponse>>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let use_case = ObtainTokenUseCase::new(state.repo.clone(), state.config.clone());
    let token = use_case
        .execute(ObtainTokenInput {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse::from(token)))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Non-integer ids are reported as a missing record
fn profile_id(path: Result<Path<i64>, PathRejection>) -> ProfileResult<UserProfileId> {
    let Path(id) = path.map_err(AppError::from)?;
    Ok(UserProfileId::from_i64(id))
}

async fn save_profile<R>(
    State(state): State<ProfileAppState<R>>,
    method: Method,
    user: Option<Extension<AuthenticatedUser>>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
    partial: bool,
) -> ProfileResult<Json<ProfileResponse>>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let id = profile_id(path)?;
    let user = user.map(|Extension(u)| u);

    let use_case = ManageProfileUseCase::new(state.repo.clone(), state.config.clone());

    // 404 and permission failures take precedence over body errors
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            use_case.authorize(id, &method, user.as_ref()).await?;
            return Err(AppError::from(rejection).into());
        }
    };

    let profile = use_case
        .update(
            id,
            &method,
            user.as_ref(),
            UpdateProfileInput {
                email: req.email,
                name: req.name,
                password: req.password,
            },
            partial,
        )
        .await?;

    Ok(Json(ProfileResponse::from(&profile)))
}
