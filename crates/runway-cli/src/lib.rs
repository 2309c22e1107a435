//! Runway CLI - snapshot runner around `runway-core`.
//!
//! - opensky: fetch and decode OpenSky state vectors
//! - snapshot: keep airborne, descending traffic near the airport
//! - report: console and JSON output

pub mod config;
pub mod opensky;
pub mod report;
pub mod snapshot;

pub use config::Config;
pub use opensky::{parse_states, OpenSkyClient, Snapshot};
pub use snapshot::{Arrival, SnapshotFilter};
