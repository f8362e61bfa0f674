use crate::domain::tokens::{AccessToken, format_iso8601};
use anyhow::Result;
use async_trait::async_trait;
use sqlx::FromRow;

/// Persisted row describing one token issuance.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct TokenReleaseRecord {
    pub id: i32,
    #[sqlx(rename = "dateReleased")]
    pub date_released: String,
    #[sqlx(rename = "dateExpires")]
    pub date_expires: String,
    #[sqlx(rename = "minutesValid")]
    pub minutes_valid: i32,
    pub host: String,
    pub username: String,
}

/// Audit row before insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTokenRelease {
    pub date_released: String,
    pub date_expires: String,
    pub minutes_valid: i32,
    pub host: String,
    pub username: String,
}

impl NewTokenRelease {
    pub fn for_token(token: &AccessToken, host: String, username: String) -> Self {
        Self {
            date_released: format_iso8601(token.released()),
            date_expires: format_iso8601(token.expires()),
            minutes_valid: token.minutes_valid(),
            host,
            username,
        }
    }
}

/// Append-only store of issuance records
#[async_trait]
pub trait TokenReleaseRepository: Send + Sync {
    /// Insert one record and make it durable before returning.
    async fn insert(&self, record: NewTokenRelease) -> Result<()>;
}
