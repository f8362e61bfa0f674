use crate::domain::tokens::{ProviderError, RawAccessToken, TokenProvider};
use crate::infrastructure::config::GigaChatConfig;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

/// Correlation header the OAuth endpoint requires on every call.
pub const RQ_UID_HEADER: &str = "RqUID";

/// Domain of the GigaChat OAuth endpoint, served with a certificate from the Russian national CA.
const GIGACHAT_DOMAIN: &str = "sberbank.ru";

/// Client for the GigaChat OAuth endpoint.
#[derive(Clone)]
pub struct GigaChatClient {
    http: Client,
    oauth_url: String,
    scope: String,
    api_key: String,
}

impl GigaChatClient {
    pub fn new(config: &GigaChatConfig) -> Result<Self, reqwest::Error> {
        if verifies_national_ca_certificate(config) {
            tracing::warn!(
                url = %config.oauth_url,
                "Certificate checks are enabled for the GigaChat endpoint; the TLS handshake \
                 fails unless the Russian national CA is trusted. \
                 Set GIGACHAT_ACCEPT_INVALID_CERTS=true to skip them."
            );
        }

        let http = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: Client, config: &GigaChatConfig) -> Self {
        Self {
            http,
            oauth_url: config.oauth_url.clone(),
            scope: config.scope.clone(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl TokenProvider for GigaChatClient {
    #[tracing::instrument(skip(self), fields(url = %self.oauth_url))]
    async fn request_token(&self, rq_uid: Uuid) -> Result<RawAccessToken, ProviderError> {
        let response = self
            .http
            .post(&self.oauth_url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Basic {}", self.api_key))
            .header(RQ_UID_HEADER, rq_uid.to_string())
            .form(&[("scope", self.scope.as_str())])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.into()))?;

        let status = response.status();
        if status.is_client_error() {
            let body = response
                .bytes()
                .await
                .map_err(|e| ProviderError::Transport(e.into()))?;
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body: error_body(&body),
            });
        }

        if !status.is_success() {
            return Err(ProviderError::Unexpected {
                status: status.as_u16(),
            });
        }

        response
            .json::<RawAccessToken>()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

/// Whether `config` will verify a certificate issued by the Russian national CA.
pub fn verifies_national_ca_certificate(config: &GigaChatConfig) -> bool {
    if config.accept_invalid_certs {
        return false;
    }

    reqwest::Url::parse(&config.oauth_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| {
            host == GIGACHAT_DOMAIN || host.ends_with(&format!(".{GIGACHAT_DOMAIN}"))
        })
}

/// Upstream error bodies are JSON; anything else is kept as a JSON string.
fn error_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
