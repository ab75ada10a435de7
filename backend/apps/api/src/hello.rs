//! Hello endpoints
//!
//! Two demo resources: `/hello-view/` maps each HTTP method to its own
//! handler, `/hello-viewset/` exposes list/create and per-item actions.

use axum::extract::rejection::JsonRejection;
use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use kernel::error::app_error::{AppError, AppResult};
use kernel::error::field_errors::{FieldErrors, messages};
use serde::Deserialize;
use serde_json::{Value, json};

pub const NAME_MAX_LENGTH: usize = 10;

#[derive(Debug, Deserialize)]
pub struct HelloRequest {
    #[serde(default)]
    pub name: Option<String>,
}

pub fn hello_router() -> Router {
    Router::new()
        .route(
            "/hello-view/",
            get(view_get)
                .post(view_post)
                .put(view_method)
                .patch(view_method)
                .delete(view_method),
        )
        .route("/hello-viewset/", get(viewset_list).post(viewset_create))
        .route(
            "/hello-viewset/{pk}/",
            get(viewset_item)
                .put(viewset_item)
                .patch(viewset_item)
                .delete(viewset_item),
        )
}

fn parse_name(raw: String) -> AppResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::bad_request(messages::BLANK));
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(AppError::bad_request(messages::max_length(NAME_MAX_LENGTH)));
    }
    Ok(name.to_string())
}

fn validated_name(payload: Result<Json<HelloRequest>, JsonRejection>) -> AppResult<String> {
    let Json(request) = payload?;
    let mut errors = FieldErrors::new();
    let name = errors.required("name", request.name, parse_name);
    errors.into_result()?;
    name.ok_or_else(|| AppError::internal("Internal server error."))
}

/// GET /api/hello-view/
async fn view_get() -> Json<Value> {
    Json(json!({
        "message": "Hello World!",
        "an_apiview": [
            "Uses HTTP Methods as functions (get, post, patch, put, delete)",
            "Similar to traditional Django View",
            "Is mapped manually to URLs",
        ],
    }))
}

/// POST /api/hello-view/
async fn view_post(payload: Result<Json<HelloRequest>, JsonRejection>) -> AppResult<Json<Value>> {
    let name = validated_name(payload)?;
    Ok(Json(json!({ "message": format!("Hello {name}") })))
}

/// PUT, PATCH and DELETE /api/hello-view/
async fn view_method(method: Method) -> Json<Value> {
    Json(json!({ "method": method.as_str() }))
}

/// GET /api/hello-viewset/
async fn viewset_list() -> Json<Value> {
    Json(json!({
        "message": "Hello!",
        "a_viewset": [
            "Uses actions (list, create, retrieve, update, partial_update, destroy)",
            "Automatically maps to URLs using routers",
            "Provides more functionality with less code",
        ],
    }))
}

/// POST /api/hello-viewset/
async fn viewset_create(
    payload: Result<Json<HelloRequest>, JsonRejection>,
) -> AppResult<Json<Value>> {
    let name = validated_name(payload)?;
    Ok(Json(json!({ "message": format!("Hello {name}!") })))
}

/// GET, PUT, PATCH and DELETE /api/hello-viewset/{pk}/
async fn viewset_item(method: Method) -> Json<Value> {
    Json(json!({ "http_method": method.as_str() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = hello_router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_view_get() {
        let (status, body) = send("GET", "/hello-view/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello World!");
        assert_eq!(
            body["an_apiview"],
            json!([
                "Uses HTTP Methods as functions (get, post, patch, put, delete)",
                "Similar to traditional Django View",
                "Is mapped manually to URLs",
            ])
        );
    }

    #[tokio::test]
    async fn test_view_post() {
        let (status, body) = send("POST", "/hello-view/", Some(json!({"name": "Ada"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello Ada");
    }

    #[tokio::test]
    async fn test_view_post_validation() {
        let (status, body) = send("POST", "/hello-view/", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["name"][0], messages::REQUIRED);

        let (status, body) =
            send("POST", "/hello-view/", Some(json!({"name": "abcdefghijk"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errors"]["name"][0],
            "Ensure this field has no more than 10 characters."
        );

        let (status, body) = send("POST", "/hello-view/", Some(json!({"name": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["name"][0], messages::BLANK);
    }

    #[tokio::test]
    async fn test_view_echoes_method() {
        for method in ["PUT", "PATCH", "DELETE"] {
            let (status, body) = send(method, "/hello-view/", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "method": method }));
        }
    }

    #[tokio::test]
    async fn test_viewset() {
        let (status, body) = send("GET", "/hello-viewset/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello!");
        assert_eq!(body["a_viewset"].as_array().unwrap().len(), 3);

        let (status, body) =
            send("POST", "/hello-viewset/", Some(json!({"name": "Grace"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello Grace!");

        for method in ["GET", "PUT", "PATCH", "DELETE"] {
            let (status, body) = send(method, "/hello-viewset/7/", None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "http_method": method }));
        }
    }
}
