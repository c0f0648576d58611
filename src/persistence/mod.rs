//! Persistence layer: the aggregate cache store.
//!
//! [`SummonerStore`] is keyed by `(name, region)` and holds the last fetched
//! aggregate plus its `cached_at` timestamp. The store never judges
//! freshness on reads; age only matters to the two sweep operations.
//!
//! Two implementations are provided: [`PostgresSummonerStore`] over
//! `sqlx::PgPool`, and [`InMemorySummonerStore`] for tests and
//! persistence-disabled deployments.

pub mod memory;
pub mod models;
pub mod postgres;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};

use crate::domain::{CachedSummoner, SummonerAggregate, SummonerIdentity};
use crate::error::GatewayError;

pub use memory::InMemorySummonerStore;
pub use postgres::PostgresSummonerStore;

/// Keyed store of cached summoner aggregates.
#[async_trait]
pub trait SummonerStore: Send + Sync + fmt::Debug {
    /// Point lookup. No side effects and no freshness filtering.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn get(&self, identity: &SummonerIdentity)
    -> Result<Option<CachedSummoner>, GatewayError>;

    /// Upserts the aggregate, overwriting any previous record for its
    /// identity, and returns the new `cached_at`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn put(&self, summoner: &SummonerAggregate) -> Result<DateTime<Utc>, GatewayError>;

    /// Nulls the match history of every record older than `retention` that
    /// still holds one. Profile, rank and `cached_at` are left as they are,
    /// so the record still ages toward [`SummonerStore::purge_expired`].
    /// Returns the number of records touched.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn clear_stale_matches(&self, retention: TimeDelta) -> Result<u64, GatewayError>;

    /// Deletes every record older than `retention`. Returns the number of
    /// records deleted.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Persistence`] on storage failure.
    async fn purge_expired(&self, retention: TimeDelta) -> Result<u64, GatewayError>;

    /// Short backend label for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}

/// Timestamp before which records count as older than `retention`.
pub(crate) fn cutoff(retention: TimeDelta) -> DateTime<Utc> {
    Utc::now()
        .checked_sub_signed(retention)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
