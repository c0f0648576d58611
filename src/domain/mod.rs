//! Domain layer: identities, platforms and the cached summoner aggregate.
//!
//! These types are shared by the upstream fetcher, the cache store and the
//! orchestrating service. They carry no I/O.

pub mod identity;
pub mod platform;
pub mod summoner;

pub use identity::SummonerIdentity;
pub use platform::{Platform, RoutingRegion};
pub use summoner::{
    CachedSummoner, Division, MatchHistory, MatchSummary, ParticipantStats, Profile, QueueType,
    RankEntry, SummonerAggregate, Tier,
};
