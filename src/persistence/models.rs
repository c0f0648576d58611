//! Database row model for the `summoners` table.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{CachedSummoner, Platform, SummonerAggregate, SummonerIdentity};
use crate::error::GatewayError;

/// A stored row from the `summoners` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SummonerRow {
    /// Summoner name, part of the primary key.
    pub name: String,
    /// Platform code, part of the primary key.
    pub region: String,
    /// Profile as JSONB.
    pub profile: Value,
    /// Rank map as JSONB.
    pub rank: Value,
    /// Match history as JSONB, `NULL` once cleared by the sweeper.
    pub matches: Option<Value>,
    /// Last write timestamp.
    pub cached_at: DateTime<Utc>,
}

/// Serialized JSONB columns of an aggregate, ready to bind.
#[derive(Debug, Clone)]
pub struct SummonerColumns {
    /// Profile column.
    pub profile: Value,
    /// Rank column.
    pub rank: Value,
    /// Matches column.
    pub matches: Option<Value>,
}

impl TryFrom<&SummonerAggregate> for SummonerColumns {
    type Error = GatewayError;

    fn try_from(summoner: &SummonerAggregate) -> Result<Self, Self::Error> {
        let encode = |e: serde_json::Error| GatewayError::Persistence(format!("encode: {e}"));
        Ok(Self {
            profile: serde_json::to_value(&summoner.profile).map_err(encode)?,
            rank: serde_json::to_value(&summoner.rank).map_err(encode)?,
            matches: summoner
                .matches
                .as_ref()
                .map(serde_json::to_value)
                .transpose()
                .map_err(encode)?,
        })
    }
}

impl TryFrom<SummonerRow> for CachedSummoner {
    type Error = GatewayError;

    fn try_from(row: SummonerRow) -> Result<Self, Self::Error> {
        let decode = |column: &str, e: serde_json::Error| {
            GatewayError::Persistence(format!(
                "corrupt {column} for {}/{}: {e}",
                row.region, row.name
            ))
        };
        let platform: Platform = row.region.parse().map_err(|_| {
            GatewayError::Persistence(format!("unknown region in row: {}", row.region))
        })?;
        let profile = serde_json::from_value(row.profile).map_err(|e| decode("profile", e))?;
        let rank = serde_json::from_value(row.rank).map_err(|e| decode("rank", e))?;
        let matches = row
            .matches
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| decode("matches", e))?;

        Ok(Self {
            summoner: SummonerAggregate {
                identity: SummonerIdentity::new(row.name, platform),
                profile,
                rank,
                matches,
            },
            cached_at: row.cached_at,
        })
    }
}
