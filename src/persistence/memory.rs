//! In-process summoner store.
//!
//! [`InMemorySummonerStore`] keeps records in a `HashMap` behind a
//! [`tokio::sync::RwLock`]. Lookups share the read lock; upserts and sweeps
//! take the write lock, so each sweep applies as one atomic step just like
//! the single-statement PostgreSQL version.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use super::{SummonerStore, cutoff};
use crate::domain::{CachedSummoner, SummonerAggregate, SummonerIdentity};
use crate::error::GatewayError;

/// Volatile [`SummonerStore`]; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemorySummonerStore {
    records: RwLock<HashMap<SummonerIdentity, CachedSummoner>>,
}

impl InMemorySummonerStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record with an explicit `cached_at`.
    ///
    /// Used to warm the store and to set up aged records.
    pub async fn seed(&self, summoner: SummonerAggregate, cached_at: DateTime<Utc>) {
        let identity = summoner.identity.clone();
        self.records.write().await.insert(
            identity,
            CachedSummoner {
                summoner,
                cached_at,
            },
        );
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl SummonerStore for InMemorySummonerStore {
    async fn get(
        &self,
        identity: &SummonerIdentity,
    ) -> Result<Option<CachedSummoner>, GatewayError> {
        Ok(self.records.read().await.get(identity).cloned())
    }

    async fn put(&self, summoner: &SummonerAggregate) -> Result<DateTime<Utc>, GatewayError> {
        let cached_at = Utc::now();
        self.seed(summoner.clone(), cached_at).await;
        Ok(cached_at)
    }

    async fn clear_stale_matches(&self, retention: TimeDelta) -> Result<u64, GatewayError> {
        let before = cutoff(retention);
        let mut records = self.records.write().await;
        let mut cleared = 0u64;
        for record in records.values_mut() {
            if record.cached_at < before && record.summoner.matches.take().is_some() {
                cleared = cleared.saturating_add(1);
            }
        }
        Ok(cleared)
    }

    async fn purge_expired(&self, retention: TimeDelta) -> Result<u64, GatewayError> {
        let before = cutoff(retention);
        let mut records = self.records.write().await;
        let len_before = records.len();
        records.retain(|_, record| record.cached_at >= before);
        Ok(u64::try_from(len_before.saturating_sub(records.len())).unwrap_or(u64::MAX))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::{
        Division, MatchHistory, Platform, Profile, QueueType, RankEntry, Tier,
    };

    /// Aggregate with one ranked queue and an empty match history.
    pub(crate) fn sample_aggregate(name: &str, platform: Platform) -> SummonerAggregate {
        let mut rank = BTreeMap::new();
        rank.insert(
            QueueType::RankedSolo,
            RankEntry {
                tier: Tier::Platinum,
                division: Division::III,
                points: 55,
                wins: 20,
                losses: 18,
            },
        );
        SummonerAggregate {
            identity: SummonerIdentity::new(name, platform),
            profile: Profile {
                icon_id: 29,
                level: 145,
            },
            rank,
            matches: Some(MatchHistory::default()),
        }
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        Utc::now() - TimeDelta::days(days)
    }

    #[tokio::test]
    async fn get_on_empty_store_is_none() {
        let store = InMemorySummonerStore::new();
        let identity = SummonerIdentity::new("ghost", Platform::Na1);
        let Ok(found) = store.get(&identity).await else {
            panic!("get should not fail");
        };
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemorySummonerStore::new();
        let aggregate = sample_aggregate("Bjergsen", Platform::Na1);
        let before = Utc::now();

        let Ok(cached_at) = store.put(&aggregate).await else {
            panic!("put should not fail");
        };
        let Ok(Some(found)) = store.get(&aggregate.identity).await else {
            panic!("record expected");
        };

        assert_eq!(found.summoner, aggregate);
        assert_eq!(found.cached_at, cached_at);
        assert!(found.cached_at >= before);
    }

    #[tokio::test]
    async fn put_overwrites_instead_of_duplicating() {
        let store = InMemorySummonerStore::new();
        let mut aggregate = sample_aggregate("Bjergsen", Platform::Na1);
        let _ = store.put(&aggregate).await;

        aggregate.profile.level = 146;
        aggregate.matches = None;
        let _ = store.put(&aggregate).await;

        assert_eq!(store.len().await, 1);
        let Ok(Some(found)) = store.get(&aggregate.identity).await else {
            panic!("record expected");
        };
        assert_eq!(found.summoner.profile.level, 146);
        assert!(found.summoner.matches.is_none());
    }

    #[tokio::test]
    async fn same_name_on_other_platform_is_a_different_record() {
        let store = InMemorySummonerStore::new();
        let _ = store.put(&sample_aggregate("Twin", Platform::Na1)).await;
        let _ = store.put(&sample_aggregate("Twin", Platform::Euw1)).await;
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn clear_stale_matches_only_touches_old_records() {
        let store = InMemorySummonerStore::new();
        let old = sample_aggregate("old", Platform::Kr);
        let fresh = sample_aggregate("fresh", Platform::Kr);
        let old_stamp = days_ago(8);
        store.seed(old.clone(), old_stamp).await;
        store.seed(fresh.clone(), days_ago(1)).await;

        let Ok(cleared) = store.clear_stale_matches(TimeDelta::days(7)).await else {
            panic!("clear should not fail");
        };
        assert_eq!(cleared, 1);

        let Ok(Some(old_now)) = store.get(&old.identity).await else {
            panic!("old record kept");
        };
        assert!(old_now.summoner.matches.is_none());
        assert_eq!(old_now.summoner.profile, old.profile);
        assert_eq!(old_now.summoner.rank, old.rank);
        assert_eq!(old_now.cached_at, old_stamp);

        let Ok(Some(fresh_now)) = store.get(&fresh.identity).await else {
            panic!("fresh record kept");
        };
        assert_eq!(fresh_now.summoner, fresh);
    }

    #[tokio::test]
    async fn already_cleared_records_are_not_counted() {
        let store = InMemorySummonerStore::new();
        let mut aggregate = sample_aggregate("cleared", Platform::Jp1);
        aggregate.matches = None;
        let stamp = days_ago(10);
        store.seed(aggregate.clone(), stamp).await;

        let Ok(cleared) = store.clear_stale_matches(TimeDelta::days(7)).await else {
            panic!("clear should not fail");
        };
        assert_eq!(cleared, 0);
        let Ok(Some(found)) = store.get(&aggregate.identity).await else {
            panic!("record expected");
        };
        assert_eq!(found.cached_at, stamp);
    }

    #[tokio::test]
    async fn purge_expired_removes_old_records() {
        let store = InMemorySummonerStore::new();
        let old = sample_aggregate("old", Platform::Br1);
        store.seed(old.clone(), days_ago(15)).await;
        store
            .seed(sample_aggregate("recent", Platform::Br1), days_ago(13))
            .await;

        let Ok(purged) = store.purge_expired(TimeDelta::days(14)).await else {
            panic!("purge should not fail");
        };
        assert_eq!(purged, 1);
        assert_eq!(store.len().await, 1);
        assert!(matches!(store.get(&old.identity).await, Ok(None)));
    }

    #[tokio::test]
    async fn sweeps_on_empty_store_are_noops() {
        let store = InMemorySummonerStore::new();
        assert_eq!(store.clear_stale_matches(TimeDelta::days(7)).await, Ok(0));
        assert_eq!(store.purge_expired(TimeDelta::days(14)).await, Ok(0));
        assert!(store.is_empty().await);
    }
}
