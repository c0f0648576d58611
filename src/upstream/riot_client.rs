//! HTTP client for the Riot Games League of Legends API.
//!
//! Assembles one aggregate with a dependent chain of calls:
//!
//! ```text
//! summoner-by-name (platform host)
//!     ├── league entries (platform host)
//!     └── per queue: match ids ──► match details × N (routing-region host)
//! ```
//!
//! Everything after the profile runs as one join group; the first failure
//! cancels the remaining calls.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::try_join_all;
use futures_util::try_join;
use serde::de::DeserializeOwned;

use super::payloads::{LeagueEntryDto, MatchDto, SummonerDto, rank_from_entries};
use super::{ErrorExtractor, MatchWindow, RiotErrorEnvelope, SummonerSource};
use crate::domain::{
    MatchHistory, MatchSummary, Platform, Profile, QueueType, RoutingRegion, SummonerAggregate,
    SummonerIdentity,
};
use crate::error::GatewayError;

/// Header carrying the API credential on every request.
pub const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

/// Default base URL template; `{host}` becomes a platform or routing region.
pub const DEFAULT_BASE_URL: &str = "https://{host}.api.riotgames.com";

/// Production [`SummonerSource`] backed by `reqwest`.
#[derive(Clone)]
pub struct RiotClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    window: MatchWindow,
    extractor: Arc<dyn ErrorExtractor>,
}

impl fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotClient")
            .field("base_url", &self.base_url)
            .field("window", &self.window)
            .field("extractor", &self.extractor)
            .finish_non_exhaustive()
    }
}

impl RiotClient {
    /// Creates a client with a per-request `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the HTTP client cannot be built.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        window: MatchWindow,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("cannot build http client: {e}")))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
            window,
            extractor: Arc::new(RiotErrorEnvelope),
        })
    }

    /// Replaces the strategy used to read upstream error bodies.
    #[must_use]
    pub fn with_error_extractor(mut self, extractor: Arc<dyn ErrorExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Fetches the summoner profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] on any remote failure.
    pub async fn summoner_by_name(
        &self,
        platform: Platform,
        name: &str,
    ) -> Result<SummonerDto, GatewayError> {
        let url = self.endpoint(
            platform.as_str(),
            &["lol", "summoner", "v4", "summoners", "by-name", name],
        )?;
        self.get_json(url).await
    }

    /// Fetches ranked league entries for an encrypted summoner id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] on any remote failure.
    pub async fn league_entries(
        &self,
        platform: Platform,
        summoner_id: &str,
    ) -> Result<Vec<LeagueEntryDto>, GatewayError> {
        let url = self.endpoint(
            platform.as_str(),
            &["lol", "league", "v4", "entries", "by-summoner", summoner_id],
        )?;
        self.get_json(url).await
    }

    /// Lists match ids for one queue inside the configured window.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] on any remote failure.
    pub async fn match_ids(
        &self,
        region: RoutingRegion,
        puuid: &str,
        queue: QueueType,
    ) -> Result<Vec<String>, GatewayError> {
        let mut url = self.endpoint(
            region.as_str(),
            &["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"],
        )?;
        url.query_pairs_mut()
            .append_pair("queue", &queue.queue_id().to_string())
            .append_pair("start", &self.window.start.to_string())
            .append_pair("count", &self.window.count.to_string());
        self.get_json(url).await
    }

    /// Fetches one match by id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Upstream`] on any remote failure.
    pub async fn match_detail(
        &self,
        region: RoutingRegion,
        match_id: &str,
    ) -> Result<MatchDto, GatewayError> {
        let url = self.endpoint(region.as_str(), &["lol", "match", "v5", "matches", match_id])?;
        self.get_json(url).await
    }

    /// Match ids for one queue, then every match detail concurrently.
    async fn queue_matches(
        &self,
        region: RoutingRegion,
        puuid: &str,
        queue: QueueType,
    ) -> Result<Vec<MatchSummary>, GatewayError> {
        let ids = self.match_ids(region, puuid, queue).await?;
        let details = try_join_all(ids.iter().map(|id| self.match_detail(region, id))).await?;
        Ok(details.into_iter().map(MatchSummary::from).collect())
    }

    async fn match_history(
        &self,
        region: RoutingRegion,
        puuid: &str,
    ) -> Result<MatchHistory, GatewayError> {
        let (solo, flex) = try_join!(
            self.queue_matches(region, puuid, QueueType::RankedSolo),
            self.queue_matches(region, puuid, QueueType::RankedFlex),
        )?;
        Ok(MatchHistory { solo, flex })
    }

    /// Builds `base/segments...` with `{host}` substituted. Segments are
    /// percent-encoded.
    fn endpoint(&self, host: &str, segments: &[&str]) -> Result<reqwest::Url, GatewayError> {
        let base = self.base_url.replace("{host}", host);
        let mut url = reqwest::Url::parse(&base)
            .map_err(|e| GatewayError::Config(format!("invalid upstream url {base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| GatewayError::Config(format!("upstream url cannot be a base: {base}")))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: reqwest::Url) -> Result<T, GatewayError> {
        let path = url.path().to_string();
        let response = self
            .http
            .get(url)
            .header(RIOT_TOKEN_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = self.extractor.extract(status, &body);
            tracing::warn!(%status, path = %path, error = %err, "upstream call failed");
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(path = %path, error = %e, "undecodable upstream response");
            GatewayError::upstream(502, format!("malformed upstream response: {e}"))
        })
    }
}

/// Failures without an HTTP response: timeouts become 504, the rest 502.
fn transport_error(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::upstream(504, "upstream request timed out")
    } else {
        GatewayError::upstream(502, format!("upstream unreachable: {err}"))
    }
}

#[async_trait]
impl SummonerSource for RiotClient {
    async fn fetch(&self, identity: &SummonerIdentity) -> Result<SummonerAggregate, GatewayError> {
        let platform = identity.platform;
        let summoner = self.summoner_by_name(platform, &identity.name).await?;

        let (entries, matches) = try_join!(
            self.league_entries(platform, &summoner.id),
            self.match_history(platform.routing_region(), &summoner.puuid),
        )?;

        tracing::debug!(
            %identity,
            solo = matches.solo.len(),
            flex = matches.flex.len(),
            "fetched summoner from upstream"
        );

        Ok(SummonerAggregate {
            identity: identity.clone(),
            profile: Profile::from(&summoner),
            rank: rank_from_entries(entries),
            matches: Some(matches),
        })
    }
}
