//! Profile Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::ProfileConfig;
use crate::domain::repository::{AuthTokenRepository, UserProfileRepository};
use crate::presentation::handlers::{self, ProfileAppState};

/// Create a generic Profile router for any repository implementation
///
/// Routes are relative; the caller nests them under `/api` behind
/// [`authenticate_token`](crate::presentation::middleware::authenticate_token).
pub fn profile_router_generic<R>(repo: Arc<R>, config: Arc<ProfileConfig>) -> Router
where
    R: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
{
    let state = ProfileAppState { repo, config };

    Router::new()
        .route(
            "/profile/",
            get(handlers::list_profiles::<R>).post(handlers::create_profile::<R>),
        )
        .route(
            "/profile/{id}/",
            get(handlers::retrieve_profile::<R>)
                .put(handlers::update_profile::<R>)
                .patch(handlers::partial_update_profile::<R>)
                .delete(handlers::destroy_profile::<R>),
        )
        .route("/login/", post(handlers::obtain_token::<R>))
        .with_state(state)
}
