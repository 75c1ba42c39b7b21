use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use formex_extractor::ExtractorError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No file provided")]
    NoFile,

    #[error("invalid multipart request: {0}")]
    Multipart(#[from] MultipartError),

    #[error(transparent)]
    Extraction(#[from] ExtractorError),

    #[error("invalid publication date '{value}': {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    #[error("{field} exceeds {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("document not found: {0}")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NoFile | ApiError::Multipart(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Extraction(_) | ApiError::InvalidDate { .. } | ApiError::FieldTooLong { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Database(_) | ApiError::Migration(_) | ApiError::Config(_) => {
                tracing::error!(error = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = axum::Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
