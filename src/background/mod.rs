//! Background jobs running outside the request path.

pub mod expiry_sweeper;

pub use expiry_sweeper::{ExpirySweeper, SweepPolicy, SweepReport};
