//! PostgreSQL implementation of the summoner store.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use sqlx::PgPool;

use super::models::{SummonerColumns, SummonerRow};
use super::{SummonerStore, cutoff};
use crate::domain::{CachedSummoner, SummonerAggregate, SummonerIdentity};
use crate::error::GatewayError;

const SUMMONER_COLUMNS: &str = "name, region, profile, rank, matches, cached_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Every sweep operation is a single set-based statement, so it relies on
/// PostgreSQL's own atomicity and never holds row locks across calls.
#[derive(Debug, Clone)]
pub struct PostgresSummonerStore {
    pool: PgPool,
}

impl PostgresSummonerStore {
    /// Creates a store over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns a [`GatewayError::Persistence`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), GatewayError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl SummonerStore for PostgresSummonerStore {
    async fn get(
        &self,
        identity: &SummonerIdentity,
    ) -> Result<Option<CachedSummoner>, GatewayError> {
        let query = format!("SELECT {SUMMONER_COLUMNS} FROM summoners WHERE name = $1 AND region = $2");
        let row = sqlx::query_as::<_, SummonerRow>(&query)
            .bind(&identity.name)
            .bind(identity.platform.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(CachedSummoner::try_from).transpose()
    }

    async fn put(&self, summoner: &SummonerAggregate) -> Result<DateTime<Utc>, GatewayError> {
        let columns = SummonerColumns::try_from(summoner)?;
        let cached_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "INSERT INTO summoners (name, region, profile, rank, matches, cached_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) \
             ON CONFLICT (name, region) DO UPDATE SET \
                 profile = EXCLUDED.profile, \
                 rank = EXCLUDED.rank, \
                 matches = EXCLUDED.matches, \
                 cached_at = EXCLUDED.cached_at \
             RETURNING cached_at",
        )
        .bind(&summoner.identity.name)
        .bind(summoner.identity.platform.as_str())
        .bind(&columns.profile)
        .bind(&columns.rank)
        .bind(&columns.matches)
        .fetch_one(&self.pool)
        .await?;

        Ok(cached_at)
    }

    async fn clear_stale_matches(&self, retention: TimeDelta) -> Result<u64, GatewayError> {
        let result = sqlx::query(
            "UPDATE summoners SET matches = NULL WHERE cached_at < $1 AND matches IS NOT NULL",
        )
        .bind(cutoff(retention))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn purge_expired(&self, retention: TimeDelta) -> Result<u64, GatewayError> {
        let result = sqlx::query("DELETE FROM summoners WHERE cached_at < $1")
            .bind(cutoff(retention))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
