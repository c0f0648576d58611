//! Raw upstream payloads and their reshaping into domain types.
//!
//! Only the fields the gateway keeps are declared; serde ignores the rest
//! of the (much larger) upstream documents.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{
    Division, MatchSummary, ParticipantStats, Profile, QueueType, RankEntry, Tier,
};

/// `GET /lol/summoner/v4/summoners/by-name/{name}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Encrypted summoner id, used by the league endpoint.
    pub id: String,
    /// Cross-service player id, used by the match endpoints.
    pub puuid: String,
    /// Profile icon id.
    pub profile_icon_id: i64,
    /// Summoner level.
    pub summoner_level: i64,
}

impl From<&SummonerDto> for Profile {
    fn from(dto: &SummonerDto) -> Self {
        Self {
            icon_id: dto.profile_icon_id,
            level: dto.summoner_level,
        }
    }
}

/// One element of `GET /lol/league/v4/entries/by-summoner/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    /// Upstream queue label, e.g. `RANKED_SOLO_5x5`.
    pub queue_type: String,
    /// Tier.
    pub tier: Tier,
    /// Division, called `rank` upstream.
    pub rank: Division,
    /// League points.
    pub league_points: i32,
    /// Wins.
    pub wins: i32,
    /// Losses.
    pub losses: i32,
}

/// Keeps the entries for tracked queues, keyed by queue.
pub fn rank_from_entries(entries: Vec<LeagueEntryDto>) -> BTreeMap<QueueType, RankEntry> {
    entries
        .into_iter()
        .filter_map(|e| {
            let Some(queue) = QueueType::from_upstream(&e.queue_type) else {
                tracing::debug!(queue_type = %e.queue_type, "skipping untracked queue");
                return None;
            };
            Some((
                queue,
                RankEntry {
                    tier: e.tier,
                    division: e.rank,
                    points: e.league_points,
                    wins: e.wins,
                    losses: e.losses,
                },
            ))
        })
        .collect()
}

/// `GET /lol/match/v5/matches/{matchId}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchDto {
    /// Match metadata.
    pub metadata: MatchMetadataDto,
    /// Game information.
    pub info: MatchInfoDto,
}

/// Match metadata block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchMetadataDto {
    /// Opaque match id.
    pub match_id: String,
}

/// Match info block.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfoDto {
    /// Epoch milliseconds.
    pub game_creation: i64,
    /// Seconds.
    pub game_duration: i64,
    /// Ten participants in a normal game.
    pub participants: Vec<ParticipantDto>,
}

/// Per-participant block of a match.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ParticipantDto {
    #[serde(default)]
    pub summoner_name: String,
    pub win: bool,
    pub team_id: i32,
    pub champion_name: String,
    pub summoner1_id: i32,
    pub summoner2_id: i32,
    #[serde(default)]
    pub perks: PerksDto,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub champ_level: i32,
    pub total_minions_killed: i32,
    #[serde(default)]
    pub lane: String,
    #[serde(default)]
    pub item0: i32,
    #[serde(default)]
    pub item1: i32,
    #[serde(default)]
    pub item2: i32,
    #[serde(default)]
    pub item3: i32,
    #[serde(default)]
    pub item4: i32,
    #[serde(default)]
    pub item5: i32,
    #[serde(default)]
    pub item6: i32,
}

/// Rune pages of a participant.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerksDto {
    /// Primary style first, secondary second.
    #[serde(default)]
    pub styles: Vec<PerkStyleDto>,
}

/// One rune style.
#[derive(Debug, Clone, Deserialize)]
pub struct PerkStyleDto {
    /// Style id.
    pub style: i32,
}

impl From<ParticipantDto> for ParticipantStats {
    fn from(p: ParticipantDto) -> Self {
        let style = |i: usize| p.perks.styles.get(i).map_or(0, |s| s.style);
        Self {
            primary_rune: style(0),
            secondary_rune: style(1),
            summoner_name: p.summoner_name,
            win: p.win,
            team_id: p.team_id,
            champion: p.champion_name,
            spells: [p.summoner1_id, p.summoner2_id],
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
            champion_level: p.champ_level,
            creep_score: p.total_minions_killed,
            lane: p.lane,
            items: [p.item0, p.item1, p.item2, p.item3, p.item4, p.item5, p.item6],
        }
    }
}

impl From<MatchDto> for MatchSummary {
    fn from(dto: MatchDto) -> Self {
        Self {
            match_id: dto.metadata.match_id,
            game_creation: dto.info.game_creation,
            game_duration: dto.info.game_duration,
            participants: dto
                .info
                .participants
                .into_iter()
                .map(ParticipantStats::from)
                .collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn reshapes_match_payload() {
        let raw = serde_json::json!({
            "metadata": { "matchId": "NA1_42", "participants": ["p1"] },
            "info": {
                "gameCreation": 1_700_000_000_000_i64,
                "gameDuration": 1800,
                "gameMode": "CLASSIC",
                "participants": [{
                    "summonerName": "Doublelift",
                    "win": true,
                    "teamId": 100,
                    "championName": "Jinx",
                    "summoner1Id": 4,
                    "summoner2Id": 7,
                    "perks": { "styles": [{ "style": 8000 }, { "style": 8100 }] },
                    "kills": 10, "deaths": 2, "assists": 7,
                    "champLevel": 16,
                    "totalMinionsKilled": 250,
                    "lane": "BOTTOM",
                    "item0": 3031, "item1": 0, "item2": 3006,
                    "item3": 0, "item4": 0, "item5": 0, "item6": 3363,
                    "goldEarned": 15000
                }]
            }
        });
        let Ok(dto) = serde_json::from_value::<MatchDto>(raw) else {
            panic!("payload should decode");
        };
        let summary = MatchSummary::from(dto);
        assert_eq!(summary.match_id, "NA1_42");
        assert_eq!(summary.game_duration, 1800);
        let Some(p) = summary.participants.first() else {
            panic!("one participant");
        };
        assert_eq!(p.champion, "Jinx");
        assert_eq!(p.spells, [4, 7]);
        assert_eq!((p.primary_rune, p.secondary_rune), (8000, 8100));
        assert_eq!(p.items, [3031, 0, 3006, 0, 0, 0, 3363]);
        assert_eq!(p.creep_score, 250);
    }

    #[test]
    fn missing_rune_styles_default_to_zero() {
        let raw = serde_json::json!({
            "win": false, "teamId": 200, "championName": "Ahri",
            "summoner1Id": 4, "summoner2Id": 14,
            "kills": 1, "deaths": 5, "assists": 3,
            "champLevel": 11, "totalMinionsKilled": 120
        });
        let Ok(dto) = serde_json::from_value::<ParticipantDto>(raw) else {
            panic!("payload should decode");
        };
        let stats = ParticipantStats::from(dto);
        assert_eq!((stats.primary_rune, stats.secondary_rune), (0, 0));
        assert_eq!(stats.items, [0; 7]);
        assert!(stats.lane.is_empty());
    }

    #[test]
    fn rank_keeps_only_tracked_queues() {
        let raw = serde_json::json!([
            { "queueType": "RANKED_SOLO_5x5", "tier": "DIAMOND", "rank": "IV",
              "leaguePoints": 12, "wins": 40, "losses": 35 },
            { "queueType": "RANKED_TFT_DOUBLE_UP", "tier": "GOLD", "rank": "I",
              "leaguePoints": 0, "wins": 1, "losses": 1 },
            { "queueType": "RANKED_FLEX_SR", "tier": "EMERALD", "rank": "II",
              "leaguePoints": 77, "wins": 9, "losses": 4 }
        ]);
        let Ok(entries) = serde_json::from_value::<Vec<LeagueEntryDto>>(raw) else {
            panic!("payload should decode");
        };
        let rank = rank_from_entries(entries);
        assert_eq!(rank.len(), 2);
        let solo = rank.get(&QueueType::RankedSolo).map(|e| (e.tier, e.division));
        assert_eq!(solo, Some((Tier::Diamond, Division::IV)));
        let flex = rank.get(&QueueType::RankedFlex).map(|e| e.points);
        assert_eq!(flex, Some(77));
    }
}
