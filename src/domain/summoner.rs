//! Summoner aggregate: the unit the gateway caches.
//!
//! A [`SummonerAggregate`] bundles a profile, the ranked standings per
//! queue and the recent ranked match history. Match history is optional:
//! the expiry sweeper clears it on old records without deleting the rest,
//! which is a different state from a summoner that was never fetched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SummonerIdentity;

/// Ranked queue categories tracked by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueType {
    /// Ranked Solo/Duo.
    RankedSolo,
    /// Ranked Flex 5v5.
    RankedFlex,
}

impl QueueType {
    /// Both tracked queues, solo first.
    pub const ALL: [Self; 2] = [Self::RankedSolo, Self::RankedFlex];

    /// Numeric queue id used to filter match-id listings.
    #[must_use]
    pub const fn queue_id(self) -> u16 {
        match self {
            Self::RankedSolo => 420,
            Self::RankedFlex => 440,
        }
    }

    /// Maps the upstream league-entry label to a tracked queue.
    ///
    /// Returns `None` for queues the gateway does not track (TFT, etc.).
    #[must_use]
    pub fn from_upstream(label: &str) -> Option<Self> {
        match label {
            "RANKED_SOLO_5x5" => Some(Self::RankedSolo),
            "RANKED_FLEX_SR" => Some(Self::RankedFlex),
            _ => None,
        }
    }
}

/// Ranked tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

/// Division within a tier. Apex tiers always report `I`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Division {
    I,
    II,
    III,
    IV,
}

/// Summoner profile basics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile icon id.
    pub icon_id: i64,
    /// Summoner level.
    pub level: i64,
}

/// Standing in one ranked queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    /// Tier.
    pub tier: Tier,
    /// Division within the tier.
    pub division: Division,
    /// League points.
    pub points: i32,
    /// Ranked wins this season.
    pub wins: i32,
    /// Ranked losses this season.
    pub losses: i32,
}

/// Per-player statistics inside one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStats {
    /// Summoner name at the time of the match.
    pub summoner_name: String,
    /// Whether this participant's team won.
    pub win: bool,
    /// `100` (blue) or `200` (red).
    pub team_id: i32,
    /// Champion name.
    pub champion: String,
    /// Summoner spell ids `[D, F]`.
    pub spells: [i32; 2],
    /// Primary rune style id, `0` when absent.
    pub primary_rune: i32,
    /// Secondary rune style id, `0` when absent.
    pub secondary_rune: i32,
    /// Kills.
    pub kills: i32,
    /// Deaths.
    pub deaths: i32,
    /// Assists.
    pub assists: i32,
    /// Champion level at game end.
    pub champion_level: i32,
    /// Total minions killed.
    pub creep_score: i32,
    /// Lane as reported upstream (`TOP`, `JUNGLE`, ...).
    pub lane: String,
    /// Item slots 0..=6, `0` for an empty slot.
    pub items: [i32; 7],
}

/// One historical match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Opaque upstream match identifier.
    pub match_id: String,
    /// Game creation time, epoch milliseconds.
    pub game_creation: i64,
    /// Game duration in seconds.
    pub game_duration: i64,
    /// Participants in upstream order.
    pub participants: Vec<ParticipantStats>,
}

/// Recent ranked matches per queue, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHistory {
    /// Ranked Solo/Duo matches.
    pub solo: Vec<MatchSummary>,
    /// Ranked Flex matches.
    pub flex: Vec<MatchSummary>,
}

/// Everything the gateway knows about one summoner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonerAggregate {
    /// Cache key.
    pub identity: SummonerIdentity,
    /// Profile basics.
    pub profile: Profile,
    /// Ranked standings keyed by queue. Empty when unranked.
    pub rank: BTreeMap<QueueType, RankEntry>,
    /// Match history, `None` once cleared by the expiry sweeper.
    pub matches: Option<MatchHistory>,
}

/// A stored aggregate together with its freshness timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedSummoner {
    /// The stored aggregate.
    pub summoner: SummonerAggregate,
    /// Time of the last successful write.
    pub cached_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_queue_labels() {
        assert_eq!(
            QueueType::from_upstream("RANKED_SOLO_5x5"),
            Some(QueueType::RankedSolo)
        );
        assert_eq!(
            QueueType::from_upstream("RANKED_FLEX_SR"),
            Some(QueueType::RankedFlex)
        );
        assert_eq!(QueueType::from_upstream("RANKED_TFT_DOUBLE_UP"), None);
    }

    #[test]
    fn rank_map_serializes_with_queue_keys() {
        let mut rank = BTreeMap::new();
        rank.insert(
            QueueType::RankedSolo,
            RankEntry {
                tier: Tier::Gold,
                division: Division::II,
                points: 42,
                wins: 10,
                losses: 8,
            },
        );
        let json = serde_json::to_value(&rank).unwrap_or_default();
        assert_eq!(json["ranked_solo"]["tier"], "GOLD");
        assert_eq!(json["ranked_solo"]["division"], "II");
    }
}
