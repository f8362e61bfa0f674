use axum::response::Redirect;

pub const DOCS_PATH: &str = "/docs";

/// Sends visitors of `/` to the interactive API documentation.
pub async fn redirect_to_docs() -> Redirect {
    Redirect::temporary(DOCS_PATH)
}
