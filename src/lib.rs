//! # summoner-gateway
//!
//! Caching REST gateway in front of the League of Legends statistics API.
//!
//! A lookup for `(name, region)` is served from the store whenever a record
//! exists, whatever its age. Otherwise the gateway fetches the profile, the
//! ranked standings and the recent ranked matches upstream, writes them
//! through to the store and returns them. A refresh always re-fetches. A
//! daily sweeper keeps the store bounded: match history is dropped after
//! seven days and whole records after fourteen.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── SummonerService (service/) ── IdentityLocks
//!     │        │                │
//!     │        │                └── RiotClient (upstream/) ── Riot API
//!     │        │
//!     │        └── SummonerStore (persistence/)
//!     │                 ├── PostgreSQL
//!     │                 └── in-memory
//!     │
//!     └── ExpirySweeper (background/) ── SummonerStore
//! ```

pub mod api;
pub mod app_state;
pub mod background;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod upstream;
