//! Natural cache key for a summoner aggregate.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Platform;

/// `(name, platform)` pair addressing exactly one cached aggregate.
///
/// The name is kept exactly as supplied; case folding is left to the
/// upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SummonerIdentity {
    /// In-game summoner name.
    pub name: String,
    /// Platform the summoner plays on.
    pub platform: Platform,
}

impl SummonerIdentity {
    /// Creates an identity from a name and platform.
    #[must_use]
    pub fn new(name: impl Into<String>, platform: Platform) -> Self {
        Self {
            name: name.into(),
            platform,
        }
    }
}

impl fmt::Display for SummonerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.name)
    }
}
