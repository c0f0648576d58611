//! Platform codes and the routing regions they belong to.
//!
//! The summoner and league endpoints are served per platform (`na1`,
//! `euw1`, ...), while the match endpoints are served per routing region
//! (`americas`, `asia`, `europe`). [`Platform::routing_region`] is the
//! static lookup between the two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Broad geographic grouping used by the match-history API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingRegion {
    /// North and South America, plus Oceania.
    Americas,
    /// Korea and Japan.
    Asia,
    /// Europe, Turkey and Russia.
    Europe,
}

impl RoutingRegion {
    /// Host label used in upstream URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
        }
    }
}

impl fmt::Display for RoutingRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Game server a summoner plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// North America.
    Na1,
    /// Brazil.
    Br1,
    /// Latin America North.
    La1,
    /// Latin America South.
    La2,
    /// Oceania.
    Oc1,
    /// Korea.
    Kr,
    /// Japan.
    Jp1,
    /// Europe Nordic & East.
    Eun1,
    /// Europe West.
    Euw1,
    /// Turkey.
    Tr1,
    /// Russia.
    Ru,
}

impl Platform {
    /// Every supported platform, in display order.
    pub const ALL: [Self; 11] = [
        Self::Na1,
        Self::Br1,
        Self::La1,
        Self::La2,
        Self::Oc1,
        Self::Kr,
        Self::Jp1,
        Self::Eun1,
        Self::Euw1,
        Self::Tr1,
        Self::Ru,
    ];

    /// Platform code as used in upstream hosts and stored rows.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Na1 => "na1",
            Self::Br1 => "br1",
            Self::La1 => "la1",
            Self::La2 => "la2",
            Self::Oc1 => "oc1",
            Self::Kr => "kr",
            Self::Jp1 => "jp1",
            Self::Eun1 => "eun1",
            Self::Euw1 => "euw1",
            Self::Tr1 => "tr1",
            Self::Ru => "ru",
        }
    }

    /// Routing region serving this platform's match history.
    #[must_use]
    pub const fn routing_region(self) -> RoutingRegion {
        match self {
            Self::Na1 | Self::Br1 | Self::La1 | Self::La2 | Self::Oc1 => RoutingRegion::Americas,
            Self::Kr | Self::Jp1 => RoutingRegion::Asia,
            Self::Eun1 | Self::Euw1 | Self::Tr1 | Self::Ru => RoutingRegion::Europe,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = GatewayError;

    /// Parses a platform code, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GatewayError::InvalidRegion(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        let Ok(p) = "EUW1".parse::<Platform>() else {
            panic!("valid platform");
        };
        assert_eq!(p, Platform::Euw1);
        assert_eq!("kr".parse::<Platform>().ok(), Some(Platform::Kr));
    }

    #[test]
    fn unknown_code_is_invalid_region() {
        let err = "mars1".parse::<Platform>();
        assert_eq!(err, Err(GatewayError::InvalidRegion("mars1".to_string())));
    }

    #[test]
    fn routing_table() {
        assert_eq!(Platform::Na1.routing_region(), RoutingRegion::Americas);
        assert_eq!(Platform::Oc1.routing_region(), RoutingRegion::Americas);
        assert_eq!(Platform::Jp1.routing_region(), RoutingRegion::Asia);
        assert_eq!(Platform::Ru.routing_region(), RoutingRegion::Europe);
        assert_eq!(Platform::Tr1.routing_region().as_str(), "europe");
    }

    #[test]
    fn codes_round_trip_through_display() {
        for p in Platform::ALL {
            assert_eq!(p.to_string().parse::<Platform>().ok(), Some(p));
        }
    }
}
