use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::about::editor::EditorError;
use crate::chat::session::ChatError;
use crate::resume::document::ResumeError;
use crate::storage::StorageError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<ResumeError> for AppError {
    fn from(err: ResumeError) -> Self {
        match err {
            ResumeError::IndexOutOfRange { .. } | ResumeError::UnknownEntry { .. } => {
                AppError::NotFound(err.to_string())
            }
            ResumeError::UnknownField { .. } | ResumeError::InvalidProficiency(_) => {
                AppError::Validation(err.to_string())
            }
        }
    }
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Storage(e) => AppError::Storage(e),
            EditorError::NotEditing | EditorError::DraftMismatch { .. } => {
                AppError::Conflict(err.to_string())
            }
        }
    }
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::about::models::AboutSection;
    use crate::resume::document::ListName;

    #[test]
    fn test_resume_errors_map_to_status() {
        let missing: AppError = ResumeError::IndexOutOfRange {
            list: ListName::Skills,
            index: 3,
            len: 1,
        }
        .into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let invalid: AppError = ResumeError::InvalidProficiency("lots".to_string()).into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_editor_state_errors_are_conflicts() {
        let err: AppError = EditorError::DraftMismatch {
            expected: AboutSection::Skills,
            got: AboutSection::AboutMe,
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_storage_errors_hide_details() {
        let err: AppError = StorageError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk on fire",
        ))
        .into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
