//! Service layer: cache orchestration.
//!
//! [`SummonerService`] decides between the [`crate::persistence`] store and
//! the [`crate::upstream`] fetcher for every lookup.

pub mod identity_locks;
pub mod summoner_service;

pub use identity_locks::IdentityLocks;
pub use summoner_service::{LookupOrigin, SummonerLookup, SummonerService};
