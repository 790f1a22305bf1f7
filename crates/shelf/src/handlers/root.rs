use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// GET / - Greeting.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World" }))
}

/// Fallback for unknown routes, shaped like every other error body.
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}

/// Fallback for known routes called with an unsupported method.
pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "detail": "Method Not Allowed" })),
    )
}
