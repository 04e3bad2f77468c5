//! Inbound score feed for Cloud Wars.
//!
//! Responsible for the wire format of the push stream (envelope + scores
//! payload with defensive coercion) and for the two sources that produce it:
//! a live TCP client with reconnect, and a file replay source for demos and
//! tests.

pub mod client;
pub mod payload;
pub mod replay;

use tally_core::models::VoteCounts;

pub use tally_core as core;

/// One event emitted by a feed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// Handshake from the server; the stream is live.
    Ready,
    /// A fresh tally snapshot, already coerced to non-negative counts.
    Scores(VoteCounts),
}
