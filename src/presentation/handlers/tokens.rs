use crate::application::tokens::release::{ReleaseTokenRequest, ReleaseTokenUseCase};
use crate::domain::tokens::AccessToken;
use crate::infrastructure::state::AppState;
use crate::presentation::extractors::IamUserId;
use crate::shared::error::{AppError, ErrorResponse};
use axum::{
    Json,
    extract::{ConnectInfo, State},
};
use std::net::SocketAddr;

/// Release a temporary access token to the GigaChat API.
#[utoipa::path(
    post,
    path = "/token",
    params(
        ("IAM-User-ID" = String, Header, description = "IAM user identifier on the Cloud.ru Advanced platform")
    ),
    responses(
        (status = 200, description = "Token released", body = AccessToken),
        (status = 403, description = "IAM user unknown or header missing", body = ErrorResponse),
        (status = 400, description = "Rejected by the GigaChat OAuth endpoint", body = ErrorResponse),
        (status = 401, description = "Rejected by the GigaChat OAuth endpoint", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "tokens"
)]
pub async fn release_token(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    IamUserId(user_id): IamUserId,
) -> Result<Json<AccessToken>, AppError> {
    let use_case = ReleaseTokenUseCase::new(
        state.identity,
        state.provider,
        state.archive,
        state.releases,
        state.default_minutes_valid,
    );

    let token = use_case
        .execute(ReleaseTokenRequest {
            user_id,
            host: addr.ip().to_string(),
        })
        .await?;

    Ok(Json(token))
}
