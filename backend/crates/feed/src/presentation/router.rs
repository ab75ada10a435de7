//! Feed Router

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::repository::FeedItemRepository;
use crate::presentation::handlers::{self, FeedAppState};

/// Create a generic Feed router for any repository implementation
///
/// Expects the token middleware to run in front of it.
pub fn feed_router_generic<R>(repo: Arc<R>) -> Router
where
    R: FeedItemRepository + Clone + Send + Sync + 'static,
{
    let state = FeedAppState { repo };

    Router::new()
        .route(
            "/feed/",
            get(handlers::list_feed::<R>).post(handlers::post_status::<R>),
        )
        .route(
            "/feed/{id}/",
            get(handlers::retrieve_status::<R>)
                .put(handlers::update_status::<R>)
                .patch(handlers::partial_update_status::<R>)
                .delete(handlers::destroy_status::<R>),
        )
        .with_state(state)
}
