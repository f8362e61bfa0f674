use crate::infrastructure::state::AppState;
use crate::presentation::handlers;
use crate::presentation::handlers::docs::DOCS_PATH;
use crate::presentation::openapi::ApiDoc;
use crate::presentation::routes;
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new(DOCS_PATH).url("/openapi.json", ApiDoc::openapi()))
        .route("/", get(handlers::docs::redirect_to_docs))
        .route("/health", get(handlers::health::health_check))
        .merge(routes::tokens::routes())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
