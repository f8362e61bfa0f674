use crate::shared::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header carrying the caller's opaque IAM user identifier
pub const IAM_USER_ID_HEADER: &str = "IAM-User-ID";

/// Non-empty IAM user identifier taken from the `IAM-User-ID` header
#[derive(Debug, Clone)]
pub struct IamUserId(pub String);

impl<S> FromRequestParts<S> for IamUserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(IAM_USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::Forbidden("Not authenticated".to_string()))?;

        Ok(IamUserId(user_id.to_string()))
    }
}
