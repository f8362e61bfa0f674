use crate::domain::audit::{NewTokenRelease, TokenReleaseRepository};
use crate::infrastructure::db::DbPool;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Clone)]
pub struct PostgresTokenReleaseRepository {
    pool: DbPool,
}

impl PostgresTokenReleaseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenReleaseRepository for PostgresTokenReleaseRepository {
    #[tracing::instrument(skip(self, record), fields(username = %record.username, host = %record.host))]
    async fn insert(&self, record: NewTokenRelease) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO gigachat.token_release ("dateReleased", "dateExpires", "minutesValid", host, username)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.date_released)
        .bind(record.date_expires)
        .bind(record.minutes_valid)
        .bind(record.host)
        .bind(record.username)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}
