use crate::domain::archive::{JSON_CONTENT_TYPE, TokenArchive};
use crate::domain::audit::{NewTokenRelease, TokenReleaseRepository};
use crate::domain::identity::{IdentityError, IdentityResolver};
use crate::domain::tokens::{AccessToken, ProviderError, TokenProvider, obs_key_for};
use crate::shared::error::{AppError, IDENTITY_NOT_FOUND};
use axum::http::StatusCode;
use std::sync::Arc;
use uuid::Uuid;

/// Caller context of one token release
#[derive(Debug, Clone)]
pub struct ReleaseTokenRequest {
    pub user_id: String,
    pub host: String,
}

pub struct ReleaseTokenUseCase {
    identity: Arc<dyn IdentityResolver>,
    provider: Arc<dyn TokenProvider>,
    archive: Arc<dyn TokenArchive>,
    releases: Arc<dyn TokenReleaseRepository>,
    default_minutes_valid: i32,
}

impl ReleaseTokenUseCase {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        provider: Arc<dyn TokenProvider>,
        archive: Arc<dyn TokenArchive>,
        releases: Arc<dyn TokenReleaseRepository>,
        default_minutes_valid: i32,
    ) -> Self {
        Self {
            identity,
            provider,
            archive,
            releases,
            default_minutes_valid,
        }
    }

    /// Resolves the caller, mints an upstream token, archives it and records the release.
    ///
    /// Steps run strictly in order and stop at the first failure. Side effects of
    /// completed steps are not undone, so a failed audit insert leaves the archived
    /// blob in place.
    #[tracing::instrument(skip(self, req), fields(host = %req.host))]
    pub async fn execute(&self, req: ReleaseTokenRequest) -> Result<AccessToken, AppError> {
        let username = self
            .identity
            .resolve(&req.user_id)
            .await
            .map_err(|e| match e {
                IdentityError::NotFound => AppError::Forbidden(IDENTITY_NOT_FOUND.to_string()),
                other => AppError::InternalServerError(other.into()),
            })?;

        let rq_uid = Uuid::new_v4();
        let raw = self
            .provider
            .request_token(rq_uid)
            .await
            .map_err(|e| match e {
                ProviderError::Rejected { status, body } => match StatusCode::from_u16(status) {
                    Ok(status) => AppError::Upstream { status, body },
                    Err(e) => AppError::InternalServerError(e.into()),
                },
                other => AppError::InternalServerError(other.into()),
            })?;

        let token = raw
            .derive(self.default_minutes_valid, obs_key_for(rq_uid))
            .map_err(|e| AppError::TokenValidation(e.to_string()))?;

        let body = token
            .to_json_bytes()
            .map_err(|e| AppError::InternalServerError(e.into()))?;
        self.archive
            .put(token.obs_key(), body, JSON_CONTENT_TYPE)
            .await?;

        self.releases
            .insert(NewTokenRelease::for_token(&token, req.host, username.clone()))
            .await?;

        tracing::info!(
            username = %username,
            obs_key = %token.obs_key(),
            minutes_valid = token.minutes_valid(),
            "Access token released"
        );

        Ok(token)
    }
}
