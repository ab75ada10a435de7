//! Token Authentication Middleware
//!
//! Resolves `Authorization: Token <key>` and stores the resulting
//! [`AuthenticatedUser`] in the request extensions. Requests without the
//! header pass through anonymously; bad credentials are rejected with 401
//! before any handler runs.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use kernel::principal::AuthenticatedUser;
use platform::authorization::parse_token_header;
use std::sync::Arc;

use crate::application::AuthenticateTokenUseCase;
use crate::application::config::ProfileConfig;
use crate::domain::repository::{AuthTokenRepository, UserProfileRepository};
use crate::error::ProfileError;

/// Middleware state
#[derive(Clone)]
pub struct TokenAuthState<R>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ProfileConfig>,
}

impl<R> TokenAuthState<R>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<ProfileConfig>) -> Self {
        Self { repo, config }
    }
}

/// Use with `axum::middleware::from_fn_with_state`
pub async fn authenticate_token<R>(
    State(state): State<TokenAuthState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ProfileError>
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let key = parse_token_header(req.headers(), &state.config.token_keyword)?;

    if let Some(key) = key {
        let use_case = AuthenticateTokenUseCase::new(state.repo.clone());
        let user: AuthenticatedUser = use_case.execute(&key).await?;

        tracing::debug!(user_id = %user.user_id, "Token authenticated");
        req.extensions_mut().insert(user);
    }

    Ok(next.run(req).await)
}
