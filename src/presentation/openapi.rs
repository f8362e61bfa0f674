use crate::domain::tokens::AccessToken;
use crate::shared::error::{ErrorObject, ErrorResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GigaChat API Access Token Releaser",
        version = "0.1.0",
        description = "Exchanges a Cloud.ru Advanced IAM user ID for a temporary GigaChat API access token.\n\nEvery released token is archived in object storage and recorded in the audit table.",
        contact(
            name = "Evgeny Meredelin",
            email = "eimeredelin@sberbank.ru"
        )
    ),
    paths(
        crate::presentation::handlers::tokens::release_token,
    ),
    components(
        schemas(
            AccessToken,
            ErrorResponse,
            ErrorObject,
        )
    ),
    tags(
        (name = "tokens", description = "Access token release")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_token_route() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/token"));
        let schemas = doc.components.expect("components").schemas;
        assert!(schemas.contains_key("AccessToken"));
        assert!(schemas.contains_key("ErrorResponse"));
    }

    #[test]
    fn test_openapi_declares_contact() {
        let contact = ApiDoc::openapi().info.contact.expect("contact");

        assert_eq!(contact.name.as_deref(), Some("Evgeny Meredelin"));
        assert_eq!(contact.email.as_deref(), Some("eimeredelin@sberbank.ru"));
    }
}
