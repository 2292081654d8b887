use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    InvalidPath,
    DirectoryExists,
    DirectoryMissing,
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidPath => (StatusCode::BAD_REQUEST, "not valid path".into()),
            AppError::DirectoryExists => (
                StatusCode::BAD_REQUEST,
                "try to POST on existing directory".into(),
            ),
            AppError::DirectoryMissing => (
                StatusCode::BAD_REQUEST,
                "try to PATCH on not existing directory".into(),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".into(),
                )
            }
        };

        let body = axum::Json(json!({ "error_message": message }));
        (status, body).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
