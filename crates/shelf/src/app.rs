use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{
        items::{create_item, delete_item, get_item, list_items, update_item},
        root::{method_not_allowed, not_found, root},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/items", get(list_items).post(create_item))
        .route("/items/", get(list_items).post(create_item))
        .route(
            "/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::test_support::FailingRepository;

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn create(app: &Router, name: &str, description: &str) -> Value {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/items/",
                json!({ "name": name, "description": description }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_root_greets() {
        let app = create_app(AppState::default());

        let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "message": "Hello World" }));
    }

    #[tokio::test]
    async fn test_list_items_empty() {
        let app = create_app(AppState::default());

        let response = app.oneshot(empty_request("GET", "/items/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_and_get_item() {
        let app = create_app(AppState::default());

        let created = create(&app, "Test Item", "This is a test item.").await;
        assert_eq!(created["name"], "Test Item");
        assert_eq!(created["description"], "This is a test item.");
        let id = created["id"].as_i64().unwrap();

        let response = app
            .oneshot(empty_request("GET", &format!("/items/{id}")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);
    }

    #[tokio::test]
    async fn test_update_item() {
        let app = create_app(AppState::default());
        let created = create(&app, "Test Item", "This is a test item.").await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .oneshot(json_request(
                "PUT",
                &format!("/items/{id}"),
                json!({ "name": "X", "description": "Y" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "id": id, "name": "X", "description": "Y" })
        );
    }

    #[tokio::test]
    async fn test_delete_item() {
        let app = create_app(AppState::default());
        let created = create(&app, "Test Item", "This is a test item.").await;
        let uri = format!("/items/{}", created["id"]);

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "detail": "Item deleted" }));

        let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "detail": "Item not found" }));
    }

    #[tokio::test]
    async fn test_missing_item_is_not_found_for_every_method() {
        let app = create_app(AppState::default());

        let requests = [
            empty_request("GET", "/items/999999"),
            json_request(
                "PUT",
                "/items/999999",
                json!({ "name": "X", "description": "Y" }),
            ),
            empty_request("DELETE", "/items/999999"),
        ];

        for request in requests {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_create_rejects_incomplete_body() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(json_request("POST", "/items/", json!({ "name": "only" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_json(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_non_integer_id_is_unprocessable() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(empty_request("GET", "/items/abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_app(AppState::default());

        let response = app
            .oneshot(empty_request("GET", "/nowhere"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "detail": "Not Found" }));
    }

    #[tokio::test]
    async fn test_wrong_method_has_detail_body() {
        let app = create_app(AppState::default());

        let requests = [
            empty_request("POST", "/"),
            empty_request("PATCH", "/items/1"),
            empty_request("DELETE", "/items/"),
        ];

        for request in requests {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(
                body_json(response).await,
                json!({ "detail": "Method Not Allowed" })
            );
        }
    }

    #[tokio::test]
    async fn test_storage_failure_is_generic_500() {
        let app = create_app(AppState::with_repository(Arc::new(FailingRepository)));

        let requests = [
            empty_request("GET", "/items/"),
            json_request("POST", "/items/", json!({ "name": "a", "description": "b" })),
            empty_request("GET", "/items/1"),
            json_request("PUT", "/items/1", json!({ "name": "a", "description": "b" })),
            empty_request("DELETE", "/items/1"),
        ];

        for request in requests {
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(
                body_json(response).await,
                json!({ "detail": "Internal Server Error" })
            );
        }
    }

    #[tokio::test]
    async fn test_full_lifecycle_against_sqlite() {
        let dir = tempfile::tempdir().unwrap();
        let config = crate::config::Config {
            database_url: format!("sqlite:///{}", dir.path().join("app.db").display()),
            busy_timeout_ms: 1_000,
        };
        let app = create_app(AppState::new(&config).await.unwrap());

        let first = create(&app, "Test Item", "This is a test item.").await;
        let second = create(&app, "Other", "Another item.").await;

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/items/"))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await,
            json!([first.clone(), second.clone()])
        );

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/items/{}", first["id"]),
                json!({ "name": "X", "description": "Y" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(empty_request("DELETE", &format!("/items/{}", second["id"])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(empty_request("GET", "/items"))
            .await
            .unwrap();
        assert_eq!(
            body_json(response).await,
            json!([{ "id": first["id"], "name": "X", "description": "Y" }])
        );

        let response = app
            .oneshot(empty_request("GET", &format!("/items/{}", second["id"])))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
