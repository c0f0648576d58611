//! Data Transfer Objects for REST response serialization.

pub mod summoner_dto;

pub use summoner_dto::*;
