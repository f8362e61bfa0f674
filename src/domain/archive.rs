use anyhow::Result;
use async_trait::async_trait;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Write-only archive of issued token blobs.
#[async_trait]
pub trait TokenArchive: Send + Sync {
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()>;
}
