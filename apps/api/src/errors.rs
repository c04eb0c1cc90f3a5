use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::enhancement::RewriteError;
use crate::ingest::IngestError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Rewrite error: {0}")]
    Rewrite(#[from] RewriteError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<IngestError> for AppError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::UnsupportedType(kind) => AppError::UnsupportedMediaType(kind),
            other @ IngestError::TooLarge => AppError::PayloadTooLarge(other.to_string()),
            IngestError::Multipart(msg) => AppError::Validation(msg),
            IngestError::MissingFile => {
                AppError::Validation("multipart field 'file' is required".to_string())
            }
            other @ (IngestError::Pdf(_) | IngestError::InvalidUtf8 | IngestError::EmptyDocument) => {
                AppError::UnprocessableEntity(other.to_string())
            }
            IngestError::Join(msg) => AppError::Internal(anyhow::anyhow!(msg)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                msg.clone(),
            ),
            AppError::Rewrite(RewriteError::NotConfigured) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "REWRITE_NOT_CONFIGURED",
                "Resume enhancement is not configured on this server".to_string(),
            ),
            AppError::Rewrite(e) => {
                tracing::error!("Rewrite error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REWRITE_UNAVAILABLE",
                    e.to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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

    #[test]
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rewrite_not_configured_maps_to_503() {
        let response = AppError::Rewrite(RewriteError::NotConfigured).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_rewrite_failure_maps_to_502() {
        let response = AppError::Rewrite(RewriteError::InvalidApiKey {
            model: "models/gemini-2.5-flash".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_payload_too_large_maps_to_413() {
        let response = AppError::PayloadTooLarge("limit".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_ingest_errors_map_by_kind() {
        assert!(matches!(
            AppError::from(IngestError::UnsupportedType("image/png".to_string())),
            AppError::UnsupportedMediaType(_)
        ));
        assert!(matches!(
            AppError::from(IngestError::EmptyDocument),
            AppError::UnprocessableEntity(_)
        ));
        assert!(matches!(
            AppError::from(IngestError::TooLarge),
            AppError::PayloadTooLarge(_)
        ));
        assert!(matches!(
            AppError::from(IngestError::MissingFile),
            AppError::Validation(_)
        ));
    }
}
