use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("IAM user not found")]
    NotFound,
    #[error("Identity lookup could not be started: {0}")]
    Unavailable(#[source] std::io::Error),
    #[error("Identity lookup exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}

/// Maps an opaque IAM user identifier to a display name.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, user_id: &str) -> Result<String, IdentityError>;
}
