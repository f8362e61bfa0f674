use crate::domain::archive::TokenArchive;
use crate::infrastructure::config::StorageConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use std::sync::Arc;

/// Archives token blobs in an S3-compatible bucket.
#[derive(Clone)]
pub struct ObjectStoreTokenArchive {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreTokenArchive {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        Ok(Self::new(build_s3_store(config)?))
    }
}

#[async_trait]
impl TokenArchive for ObjectStoreTokenArchive {
    #[tracing::instrument(skip(self, body), fields(bytes = body.len()))]
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<()> {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        self.store
            .put_opts(&Path::from(key), PutPayload::from(body), options)
            .await
            .with_context(|| format!("failed to put {key} to object store"))?;

        tracing::debug!(key = %key, "token archived to object store");
        Ok(())
    }
}

/// Builds the bucket client from `config` alone. Without a configured key pair the
/// client falls back to instance metadata credentials.
pub fn build_s3_store(config: &StorageConfig) -> Result<Arc<dyn ObjectStore>> {
    let store = s3_builder(config)
        .build()
        .context("failed to build S3 object store")?;

    tracing::info!(
        bucket = %config.bucket,
        region = %config.region,
        endpoint = ?config.endpoint,
        "Object storage configured"
    );

    Ok(Arc::new(store))
}

fn s3_builder(config: &StorageConfig) -> AmazonS3Builder {
    let mut builder = AmazonS3Builder::new()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region);

    if let Some(endpoint) = &config.endpoint {
        builder = builder
            .with_endpoint(endpoint)
            .with_allow_http(endpoint.starts_with("http://"));
    }

    if let (Some(key), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
        builder = builder
            .with_access_key_id(key)
            .with_secret_access_key(secret);
    }

    builder
}
