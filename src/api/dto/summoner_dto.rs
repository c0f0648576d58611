//! Summoner response DTOs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{MatchHistory, Platform, Profile, QueueType, RankEntry};
use crate::service::{LookupOrigin, SummonerLookup};

/// Envelope for lookup and refresh responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummonerResponse {
    /// The cached or freshly fetched summoner.
    pub summoner: SummonerDto,
}

/// A summoner aggregate as returned to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummonerDto {
    /// Summoner name, as requested.
    pub name: String,
    /// Platform code (e.g. `"euw1"`).
    #[schema(value_type = String, example = "euw1")]
    pub region: Platform,
    /// Profile icon and level.
    #[schema(value_type = Object)]
    pub profile: Profile,
    /// Ranked standings keyed by `ranked_solo` / `ranked_flex`. Empty when unranked.
    #[schema(value_type = Object)]
    pub rank: BTreeMap<QueueType, RankEntry>,
    /// Recent ranked matches, `null` once expired.
    #[schema(value_type = Option<Object>)]
    pub matches: Option<MatchHistory>,
    /// Time of the last successful write-through.
    pub last_updated: DateTime<Utc>,
}

impl From<SummonerLookup> for SummonerResponse {
    fn from(lookup: SummonerLookup) -> Self {
        let summoner = lookup.summoner;
        Self {
            summoner: SummonerDto {
                name: summoner.identity.name,
                region: summoner.identity.platform,
                profile: summoner.profile,
                rank: summoner.rank,
                matches: summoner.matches,
                last_updated: lookup.last_updated,
            },
        }
    }
}

/// Value of the `x-cache` response header for a lookup origin.
#[must_use]
pub const fn cache_header_value(origin: LookupOrigin) -> &'static str {
    match origin {
        LookupOrigin::Cache => "hit",
        LookupOrigin::Upstream => "miss",
        LookupOrigin::UpstreamUnsaved => "miss-unsaved",
    }
}

/// One row of the platform table.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegionDto {
    /// Platform code accepted in summoner routes.
    pub platform: &'static str,
    /// Routing region used for match-history calls.
    pub routing_region: &'static str,
}
