use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use shelf_core::storage::{repository_error_to_status_code, RepositoryError};

/// Error returned by every item handler.
///
/// Storage failures other than Not Found are logged here with full detail and
/// reach the caller only as a generic 500.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{operation} failed: {source}")]
    Repository {
        operation: &'static str,
        #[source]
        source: RepositoryError,
    },
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl AppError {
    /// Wraps repository errors raised while performing `operation`.
    pub fn during(operation: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |source| Self::Repository { operation, source }
    }

    pub fn item_not_found(operation: &'static str, id: i64) -> Self {
        Self::Repository {
            operation,
            source: RepositoryError::item_not_found(id),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Repository { source, .. } => {
                StatusCode::from_u16(repository_error_to_status_code(source))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let detail = match self {
            Self::Repository { operation, source } if source.is_not_found() => {
                tracing::warn!(operation, error = %source, "Item not found");
                "Item not found".to_string()
            }
            Self::Repository { operation, source } => {
                tracing::error!(operation, error = %source, "Storage operation failed");
                "Internal Server Error".to_string()
            }
            Self::Rejected { detail, .. } => {
                tracing::warn!(status = %status, detail = %detail, "Rejected request");
                detail
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: rejection.body_text(),
        }
    }
}
