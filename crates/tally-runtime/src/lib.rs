//! Runtime orchestration layer for Cloud Wars.
//!
//! Coordinates the feed and UI layers: owns the configured feed source in a
//! background task, converts each scores event into a display snapshot, and
//! tracks feed health across the run.

pub mod orchestrator;
pub mod tracker;

pub use tally_core as core;
pub use tally_feed as feed;
