//! Router assembly and server startup

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use feed::InMemoryFeedRepository;
use feed::PgFeedRepository;
use feed::domain::repository::FeedItemRepository;
use feed::feed_router_generic;
use profile::domain::repository::{AuthTokenRepository, UserProfileRepository};
use profile::{
    InMemoryProfileRepository, PgProfileRepository, ProfileConfig, TokenAuthState,
    authenticate_token, profile_router_generic,
};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::hello::hello_router;
use crate::memory::CascadingProfileRepository;

/// Every resource under `/api`, behind token authentication
pub fn build_app<P, F>(profiles: Arc<P>, feed: Arc<F>, config: Arc<ProfileConfig>) -> Router
where
    P: UserProfileRepository + AuthTokenRepository + Clone + Send + Sync + 'static,
    F: FeedItemRepository + Clone + Send + Sync + 'static,
{
    let auth_state = TokenAuthState::new(profiles.clone(), config.clone());

    let api = Router::new()
        .merge(profile_router_generic(profiles, config))
        .merge(feed_router_generic(feed))
        .merge(hello_router())
        .layer(from_fn_with_state(auth_state, authenticate_token::<P>));

    Router::new().nest("/api", api)
}

fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
}

/// Open the pool and apply pending migrations
pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    Ok(pool)
}

pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let profile_config = Arc::new(config.profile_config());

    let app = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = connect(database_url, config.max_connections).await?;
            build_app(
                Arc::new(PgProfileRepository::new(pool.clone())),
                Arc::new(PgFeedRepository::new(pool)),
                profile_config,
            )
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, data is kept in memory and lost on exit");
            let feed = InMemoryFeedRepository::new();
            let profiles = CascadingProfileRepository::new(
                InMemoryProfileRepository::new(),
                feed.clone(),
            );
            build_app(Arc::new(profiles), Arc::new(feed), profile_config)
        }
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.frontend_origins));

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn memory_app() -> Router {
        let feed = InMemoryFeedRepository::new();
        let profiles =
            CascadingProfileRepository::new(InMemoryProfileRepository::new(), feed.clone());
        build_app(
            Arc::new(profiles),
            Arc::new(feed),
            Arc::new(ProfileConfig::default()),
        )
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn register_and_login(app: &Router, email: &str) -> (i64, String) {
        let (status, body) = send(
            app,
            "POST",
            "/api/profile/",
            None,
            Some(json!({"email": email, "name": "Test", "password": "correct-horse-battery"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let id = body["id"].as_i64().unwrap();

        let (status, body) = send(
            app,
            "POST",
            "/api/login/",
            None,
            Some(json!({"username": email, "password": "correct-horse-battery"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        (id, body["token"].as_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn test_token_reaches_feed() {
        let app = memory_app();
        let (id, token) = register_and_login(&app, "alice@example.com").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/feed/",
            Some(&token),
            Some(json!({"status_text": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user_profile"], id);

        let (status, _) = send(&app, "GET", "/api/feed/", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_token_rejected_on_public_routes() {
        let app = memory_app();

        let (status, body) = send(&app, "GET", "/api/hello-view/", Some("nope"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid token.");

        let (status, _) = send(&app, "GET", "/api/hello-view/", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_profile_delete_removes_feed_items() {
        let app = memory_app();
        let (alice, alice_token) = register_and_login(&app, "alice@example.com").await;
        let (_, bob_token) = register_and_login(&app, "bob@example.com").await;

        for (token, text) in [(&alice_token, "a1"), (&bob_token, "b1"), (&alice_token, "a2")] {
            let (status, _) = send(
                &app,
                "POST",
                "/api/feed/",
                Some(token),
                Some(json!({"status_text": text})),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/profile/{alice}/"),
            Some(&alice_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", "/api/feed/", Some(&bob_token), None).await;
        assert_eq!(status, StatusCode::OK);
        let texts: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["status_text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["b1"]);
    }
}
