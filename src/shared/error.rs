use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

pub const IDENTITY_NOT_FOUND: &str = "IAM user ID not found on the Cloud.ru Advanced platform";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Upstream error with status {status}")]
    Upstream { status: StatusCode, body: Value },
    #[error("Token validation error: {0}")]
    TokenValidation(String),
    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

/// Error document returned for every failed request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorObject>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorObject {
    #[schema(example = 403)]
    pub status: u16,
    /// Human-readable message, or the upstream error body as received
    #[schema(value_type = Object)]
    pub detail: Value,
}

impl ErrorResponse {
    pub fn single(status: StatusCode, detail: Value) -> Self {
        Self {
            errors: vec![ErrorObject {
                status: status.as_u16(),
                detail,
            }],
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, Value::String(msg)),
            AppError::Upstream { status, body } => {
                tracing::warn!(%status, "Upstream rejected token request");
                (status, body)
            }
            AppError::TokenValidation(msg) => {
                tracing::error!("Token validation error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::String("Internal server error".to_string()),
                )
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Internal server error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Value::String("Internal server error".to_string()),
                )
            }
        };

        (status, Json(ErrorResponse::single(status, detail))).into_response()
    }
}
