//! Summoner service: cache-or-fetch orchestration.
//!
//! A lookup walks `CHECK_CACHE → FETCH_REMOTE → PERSIST → RETURN`; a refresh
//! skips the cache check. Stored records are served regardless of age;
//! staleness is handled only by the expiry sweeper.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::IdentityLocks;
use crate::domain::{CachedSummoner, SummonerAggregate, SummonerIdentity};
use crate::error::GatewayError;
use crate::persistence::SummonerStore;
use crate::upstream::SummonerSource;

/// Where a lookup result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOrigin {
    /// Served from the store.
    Cache,
    /// Fetched and written through to the store.
    Upstream,
    /// Fetched, but the write-through failed; the next lookup fetches again.
    UpstreamUnsaved,
}

/// Aggregate plus the freshness timestamp returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummonerLookup {
    /// The aggregate.
    pub summoner: SummonerAggregate,
    /// Stored `cached_at`, or the fetch time when the write-through failed.
    pub last_updated: DateTime<Utc>,
    /// Path the lookup took.
    pub origin: LookupOrigin,
}

impl From<CachedSummoner> for SummonerLookup {
    fn from(cached: CachedSummoner) -> Self {
        Self {
            summoner: cached.summoner,
            last_updated: cached.cached_at,
            origin: LookupOrigin::Cache,
        }
    }
}

/// Decides between the cache and the upstream API for every request.
///
/// Stateless apart from [`IdentityLocks`]: the store is the only shared
/// state between requests. Concurrent cold lookups of one identity are
/// coalesced; the second waits for the first and is then served from the
/// store.
#[derive(Debug, Clone)]
pub struct SummonerService {
    store: Arc<dyn SummonerStore>,
    source: Arc<dyn SummonerSource>,
    locks: Arc<IdentityLocks>,
}

impl SummonerService {
    /// Creates a new `SummonerService`.
    #[must_use]
    pub fn new(store: Arc<dyn SummonerStore>, source: Arc<dyn SummonerSource>) -> Self {
        Self {
            store,
            source,
            locks: Arc::new(IdentityLocks::new()),
        }
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SummonerStore> {
        &self.store
    }

    /// Serves the cached aggregate if one exists, otherwise fetches it,
    /// writes it through and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] if the fetch fails (nothing is
    /// written) and [`GatewayError::Persistence`] if the cache read fails.
    pub async fn lookup(&self, identity: &SummonerIdentity) -> Result<SummonerLookup, GatewayError> {
        if let Some(cached) = self.store.get(identity).await? {
            tracing::debug!(%identity, "cache hit");
            return Ok(cached.into());
        }

        let _guard = self.locks.acquire(identity).await;
        // a coalesced lookup may have filled the cache while we waited
        if let Some(cached) = self.store.get(identity).await? {
            tracing::debug!(%identity, "cache filled by concurrent lookup");
            return Ok(cached.into());
        }

        tracing::debug!(%identity, "cache miss");
        self.fetch_and_persist(identity).await
    }

    /// Always fetches from upstream and overwrites the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] if the fetch fails; the stored
    /// record is then left untouched.
    pub async fn refresh(&self, identity: &SummonerIdentity) -> Result<SummonerLookup, GatewayError> {
        let _guard = self.locks.acquire(identity).await;
        tracing::debug!(%identity, "explicit refresh");
        self.fetch_and_persist(identity).await
    }

    async fn fetch_and_persist(
        &self,
        identity: &SummonerIdentity,
    ) -> Result<SummonerLookup, GatewayError> {
        let summoner = self.source.fetch(identity).await?;

        match self.store.put(&summoner).await {
            Ok(cached_at) => {
                tracing::info!(%identity, %cached_at, "summoner cached");
                Ok(SummonerLookup {
                    summoner,
                    last_updated: cached_at,
                    origin: LookupOrigin::Upstream,
                })
            }
            Err(e) => {
                tracing::warn!(%identity, error = %e, "write-through failed; serving uncached result");
                Ok(SummonerLookup {
                    summoner,
                    last_updated: Utc::now(),
                    origin: LookupOrigin::UpstreamUnsaved,
                })
            }
        }
    }
}
