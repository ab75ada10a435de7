//! Unit and router tests for the feed crate

#[cfg(test)]
mod domain_tests {
    use crate::domain::entities::NewFeedItem;
    use crate::domain::permission::UpdateOwnStatus;
    use crate::domain::value_objects::*;
    use http::Method;
    use kernel::error::field_errors::messages;
    use kernel::id::{FeedItemId, UserProfileId};
    use kernel::permission::ObjectPermission;
    use kernel::principal::AuthenticatedUser;

    fn user(id: i64) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserProfileId::from_i64(id),
            email: format!("user{id}@example.com"),
            is_staff: false,
            is_superuser: false,
        }
    }

    #[test]
    fn test_status_text_trims() {
        let text = StatusText::new("  hello world \n").unwrap();
        assert_eq!(text.as_str(), "hello world");
    }

    #[test]
    fn test_status_text_blank() {
        assert_eq!(StatusText::new("").unwrap_err().message(), messages::BLANK);
        assert_eq!(StatusText::new(" \t").unwrap_err().message(), messages::BLANK);
    }

    #[test]
    fn test_status_text_length() {
        assert!(StatusText::new("a".repeat(STATUS_TEXT_MAX_LENGTH)).is_ok());
        let err = StatusText::new("a".repeat(STATUS_TEXT_MAX_LENGTH + 1)).unwrap_err();
        assert_eq!(
            err.message(),
            "Ensure this field has no more than 255 characters."
        );
    }

    #[test]
    fn test_new_item_has_microsecond_timestamp() {
        let item = NewFeedItem::new(UserProfileId::from_i64(1), StatusText::new("hi").unwrap());
        assert_eq!(item.created_on.timestamp_subsec_nanos() % 1_000, 0);

        let item = item.into_item(FeedItemId::from_i64(9));
        assert_eq!(item.id.as_i64(), 9);
        assert_eq!(item.to_string(), "hi");
    }

    #[test]
    fn test_update_own_status() {
        let item = NewFeedItem::new(UserProfileId::from_i64(1), StatusText::new("hi").unwrap())
            .into_item(FeedItemId::from_i64(1));
        let owner = user(1);
        let other = user(2);

        assert!(UpdateOwnStatus.has_object_permission(&Method::GET, Some(&other), &item));
        assert!(UpdateOwnStatus.has_object_permission(&Method::OPTIONS, None, &item));
        assert!(UpdateOwnStatus.has_object_permission(&Method::PUT, Some(&owner), &item));
        assert!(!UpdateOwnStatus.has_object_permission(&Method::PUT, Some(&other), &item));
        assert!(!UpdateOwnStatus.has_object_permission(&Method::DELETE, Some(&other), &item));
        assert!(!UpdateOwnStatus.has_object_permission(&Method::PATCH, None, &item));
    }
}

#[cfg(test)]
mod models_tests {
    use crate::domain::entities::FeedItem;
    use crate::domain::value_objects::StatusText;
    use crate::presentation::dto::*;
    use chrono::{TimeZone, Utc};
    use kernel::id::{FeedItemId, UserProfileId};

    #[test]
    fn test_response_format() {
        let item = FeedItem {
            id: FeedItemId::from_i64(3),
            user_profile: UserProfileId::from_i64(7),
            status_text: StatusText::new("hello").unwrap(),
            created_on: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(FeedItemResponse::from(&item)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "user_profile": 7,
                "status_text": "hello",
                "created_on": "2024-05-01T12:30:00.000000Z"
            })
        );
    }

    #[test]
    fn test_request_ignores_user_profile() {
        let req: FeedItemRequest =
            serde_json::from_str(r#"{"status_text": "hi", "user_profile": 99}"#).unwrap();
        assert_eq!(req.status_text.as_deref(), Some("hi"));

        let req: FeedItemRequest = serde_json::from_str("{}").unwrap();
        assert!(req.status_text.is_none());
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use kernel::error::field_errors::messages;
    use kernel::id::UserProfileId;
    use kernel::principal::AuthenticatedUser;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::infra::memory::InMemoryFeedRepository;
    use crate::presentation::router::feed_router_generic;

    struct TestApp {
        router: Router,
        repo: Arc<InMemoryFeedRepository>,
    }

    impl TestApp {
        fn new() -> Self {
            let repo = Arc::new(InMemoryFeedRepository::new());
            let router = Router::new().nest("/api", feed_router_generic(repo.clone()));
            Self { router, repo }
        }

        /// `as_user` stands in for the token middleware
        async fn send(
            &self,
            method: &str,
            uri: &str,
            as_user: Option<i64>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let mut request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            if let Some(id) = as_user {
                request.extensions_mut().insert(AuthenticatedUser {
                    user_id: UserProfileId::from_i64(id),
                    email: format!("user{id}@example.com"),
                    is_staff: false,
                    is_superuser: false,
                });
            }

            let response = self.router.clone().oneshot(request).await.unwrap();
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

        /// Send a body without a `Content-Type` header
        async fn send_untyped(
            &self,
            method: &str,
            uri: &str,
            as_user: i64,
            body: &str,
        ) -> (StatusCode, Value) {
            let mut request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap();
            request.extensions_mut().insert(AuthenticatedUser {
                user_id: UserProfileId::from_i64(as_user),
                email: format!("user{as_user}@example.com"),
                is_staff: false,
                is_superuser: false,
            });

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        async fn post(&self, as_user: i64, text: &str) -> i64 {
            let (status, body) = self
                .send("POST", "/api/feed/", Some(as_user), Some(json!({"status_text": text})))
                .await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            body["id"].as_i64().unwrap()
        }
    }

    #[tokio::test]
    async fn test_anonymous_requests_are_rejected() {
        let app = TestApp::new();

        for (method, uri) in [
            ("GET", "/api/feed/"),
            ("POST", "/api/feed/"),
            ("GET", "/api/feed/1/"),
            ("DELETE", "/api/feed/1/"),
        ] {
            let (status, body) = app.send(method, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
            assert_eq!(body["detail"], "Authentication credentials were not provided.");
        }
    }

    #[tokio::test]
    async fn test_post_sets_owner_from_requester() {
        let app = TestApp::new();

        let (status, body) = app
            .send(
                "POST",
                "/api/feed/",
                Some(1),
                Some(json!({"status_text": "  first!  ", "user_profile": 2})),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user_profile"], 1);
        assert_eq!(body["status_text"], "first!");
        assert!(body["created_on"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_post_validates_status_text() {
        let app = TestApp::new();

        let (status, body) = app.send("POST", "/api/feed/", Some(1), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["status_text"][0], messages::REQUIRED);

        let (status, body) = app
            .send("POST", "/api/feed/", Some(1), Some(json!({"status_text": "x".repeat(256)})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errors"]["status_text"][0],
            messages::max_length(255).as_str()
        );
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let app = TestApp::new();
        app.post(1, "one").await;
        app.post(2, "two").await;
        app.post(1, "three").await;

        let (status, body) = app.send("GET", "/api/feed/", Some(2), None).await;
        assert_eq!(status, StatusCode::OK);
        let texts: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["status_text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_retrieve() {
        let app = TestApp::new();
        let id = app.post(1, "hello").await;

        let (status, body) = app.send("GET", &format!("/api/feed/{id}/"), Some(2), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status_text"], "hello");

        let (status, body) = app.send("GET", "/api/feed/999/", Some(1), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Not found.");

        let (status, _) = app.send("GET", "/api/feed/latest/", Some(1), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_owner_updates() {
        let app = TestApp::new();
        let id = app.post(1, "draft").await;
        let uri = format!("/api/feed/{id}/");

        let (status, body) = app
            .send("PUT", &uri, Some(1), Some(json!({"status_text": "final"})))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status_text"], "final");

        // Partial update without fields is a no-op
        let (status, body) = app.send("PATCH", &uri, Some(1), Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status_text"], "final");

        let (status, body) = app.send("PUT", &uri, Some(1), Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["status_text"][0], messages::REQUIRED);
    }

    #[tokio::test]
    async fn test_others_cannot_modify() {
        let app = TestApp::new();
        let id = app.post(1, "mine").await;
        let uri = format!("/api/feed/{id}/");

        let (status, body) = app
            .send("PATCH", &uri, Some(2), Some(json!({"status_text": "hijacked"})))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "You do not have permission to perform this action.");

        let (status, _) = app.send("DELETE", &uri, Some(2), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (_, body) = app.send("GET", &uri, Some(2), None).await;
        assert_eq!(body["status_text"], "mine");
    }

    #[tokio::test]
    async fn test_owner_deletes() {
        let app = TestApp::new();
        let id = app.post(1, "bye").await;
        let uri = format!("/api/feed/{id}/");

        let (status, body) = app.send("DELETE", &uri, Some(1), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = app.send("GET", &uri, Some(1), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let app = TestApp::new();
        app.post(1, "a").await;
        app.post(2, "b").await;
        app.post(1, "c").await;

        assert_eq!(app.repo.delete_by_owner(UserProfileId::from_i64(1)).await, 2);

        let (_, body) = app.send("GET", "/api/feed/", Some(2), None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_body_without_content_type_is_415() {
        let app = TestApp::new();

        let (status, body) = app
            .send_untyped("POST", "/api/feed/", 1, r#"{"status_text": "hi"}"#)
            .await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["title"], "Unsupported Media Type");

        let (_, body) = app.send("GET", "/api/feed/", Some(1), None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_lookup_and_permission_precede_content_type() {
        let app = TestApp::new();
        let id = app.post(1, "mine").await;
        let uri = format!("/api/feed/{id}/");
        let body = r#"{"status_text": "changed"}"#;

        let (status, _) = app.send_untyped("PATCH", "/api/feed/999/", 2, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, json) = app.send_untyped("PATCH", &uri, 2, body).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["detail"], "You do not have permission to perform this action.");

        let (status, _) = app.send_untyped("PUT", &uri, 1, body).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let (_, json) = app.send("GET", &uri, Some(1), None).await;
        assert_eq!(json["status_text"], "mine");
    }
}
