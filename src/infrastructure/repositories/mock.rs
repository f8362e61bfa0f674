use crate::domain::audit::{NewTokenRelease, TokenReleaseRecord, TokenReleaseRepository};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory audit store; assigns sequential ids like the `SERIAL` column does.
#[derive(Clone, Default)]
pub struct MockTokenReleaseRepository {
    records: Arc<Mutex<Vec<TokenReleaseRecord>>>,
    fail_with: Option<String>,
}

impl MockTokenReleaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every insert fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            records: Arc::default(),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn records(&self) -> Vec<TokenReleaseRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TokenReleaseRepository for MockTokenReleaseRepository {
    async fn insert(&self, record: NewTokenRelease) -> Result<(), anyhow::Error> {
        if let Some(message) = &self.fail_with {
            return Err(anyhow::anyhow!(message.clone()));
        }

        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow::anyhow!("mock repository poisoned"))?;
        let id = records.len() as i32 + 1;
        records.push(TokenReleaseRecord {
            id,
            date_released: record.date_released,
            date_expires: record.date_expires,
            minutes_valid: record.minutes_valid,
            host: record.host,
            username: record.username,
        });
        Ok(())
    }
}
