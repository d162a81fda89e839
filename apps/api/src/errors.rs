use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::pipeline::AnalysisError;
use crate::compose::RenderError;
use crate::ingest::IntakeError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Intake(e @ IntakeError::UnsupportedFormat(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                e.to_string(),
            ),
            AppError::Intake(e @ IntakeError::EmptyUpload(_)) => {
                (StatusCode::BAD_REQUEST, "EMPTY_UPLOAD", e.to_string())
            }
            AppError::Intake(e @ IntakeError::Extraction { .. }) => {
                tracing::warn!("Extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    e.to_string(),
                )
            }
            AppError::Analysis(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "NO_USABLE_INPUT",
                e.to_string(),
            ),
            AppError::Render(e @ RenderError::UnsupportedFormat(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_OUTPUT_FORMAT",
                e.to_string(),
            ),
            AppError::Render(e) => {
                tracing::error!("Render error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_FAILED",
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
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

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
    use crate::ingest::DocumentFormat;

    #[test]
    fn test_unsupported_format_maps_to_415() {
        let err = AppError::from(IntakeError::UnsupportedFormat("photo.png".into()));
        assert_eq!(err.parts().0, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.parts().1, "UNSUPPORTED_FORMAT");
    }

    #[test]
    fn test_extraction_failure_maps_to_422() {
        let err = AppError::from(IntakeError::Extraction {
            format: DocumentFormat::Pdf,
            message: "broken xref".into(),
        });
        let (status, code, message) = err.parts();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "EXTRACTION_FAILED");
        assert!(message.contains("broken xref"));
    }

    #[test]
    fn test_render_failure_is_distinct_from_analysis_failure() {
        let render = AppError::from(RenderError::Pdf("renderer crashed".into()));
        let analysis = AppError::from(AnalysisError::NoUsableInput);
        assert_eq!(render.parts().1, "RENDER_FAILED");
        assert_eq!(analysis.parts().1, "NO_USABLE_INPUT");
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err = AppError::from(anyhow::anyhow!("secret stack trace"));
        let (status, _, message) = err.parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!message.contains("secret"));
    }
}
