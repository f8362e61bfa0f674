use crate::infrastructure::state::AppState;
use crate::presentation::handlers::tokens;
use axum::{Router, routing::post};

/// Token routes - releases GigaChat access tokens
pub fn routes() -> Router<AppState> {
    Router::new().route("/token", post(tokens::release_token))
}
