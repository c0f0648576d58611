//! Remote data fetcher: assembles a summoner aggregate from the upstream API.
//!
//! [`SummonerSource`] is the seam the cache service depends on.
//! [`RiotClient`] is the production implementation; tests substitute
//! counting fakes.

pub mod error_extract;
pub mod payloads;
pub mod riot_client;

use std::fmt;

use async_trait::async_trait;

use crate::domain::{SummonerAggregate, SummonerIdentity};
use crate::error::GatewayError;

pub use error_extract::{ErrorExtractor, RiotErrorEnvelope};
pub use riot_client::RiotClient;

/// Source of freshly fetched summoner aggregates.
#[async_trait]
pub trait SummonerSource: Send + Sync + fmt::Debug {
    /// Fetches the full aggregate for `identity`.
    ///
    /// All-or-nothing: any failing remote call aborts the fetch and no
    /// partial aggregate is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] carrying the upstream status and
    /// message.
    async fn fetch(&self, identity: &SummonerIdentity) -> Result<SummonerAggregate, GatewayError>;
}

/// Pagination window applied to each match-id listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchWindow {
    /// Index of the first match to return.
    pub start: u32,
    /// Number of match ids to return per queue.
    pub count: u32,
}

impl Default for MatchWindow {
    fn default() -> Self {
        Self {
            start: 0,
            count: 10,
        }
    }
}
