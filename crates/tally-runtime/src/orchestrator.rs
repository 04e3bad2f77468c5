//! Async tally orchestrator.
//!
//! Owns the configured feed source in a tokio task, runs every scores event
//! through [`PercentageAllocator`], and sends [`TallyUpdate`] snapshots
//! through an `mpsc` channel so the TUI event loop can consume them without
//! any shared mutable state.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use tally_core::allocator::PercentageAllocator;
use tally_core::models::{PercentageAllocation, VoteCounts};
use tally_feed::client::FeedClient;
use tally_feed::replay::ReplaySource;
use tally_feed::FeedEvent;

use crate::tracker::FeedTracker;

// ── Public types ──────────────────────────────────────────────────────────────

/// A single tally snapshot forwarded to the TUI layer.
///
/// This is the primary data contract between the background runtime and the
/// presentation layer.
#[derive(Debug, Clone)]
pub struct TallyUpdate {
    /// Raw counts from the most recent scores event.
    pub counts: VoteCounts,
    /// Display percentages derived from `counts`.
    pub allocation: PercentageAllocation,
    /// Sum of the raw counts.
    pub total: u64,
    /// Whether the feed handshake has been seen.
    pub connected: bool,
    /// Number of scores events observed since startup.
    pub updates_seen: u64,
    /// When this snapshot was produced.
    pub received_at: DateTime<Utc>,
}

/// Where the orchestrator gets its scores from.
#[derive(Debug, Clone)]
pub enum FeedSource {
    /// Live TCP feed with reconnect.
    Live {
        host: String,
        port: u16,
        reconnect_secs: u64,
    },
    /// Recorded scores file replayed on an interval.
    Replay { path: PathBuf, interval_ms: u64 },
}

// ── TallyOrchestrator ─────────────────────────────────────────────────────────

/// Background tally coordinator.
///
/// Call [`TallyOrchestrator::start`] to spin up the feed loop in a dedicated
/// tokio task and receive a channel endpoint for [`TallyUpdate`] snapshots.
pub struct TallyOrchestrator {
    source: FeedSource,
}

impl TallyOrchestrator {
    /// Create an orchestrator for the given feed source.
    pub fn new(source: FeedSource) -> Self {
        Self { source }
    }

    /// Start the feed loop.
    ///
    /// Spawns a tokio task that owns the feed source. Returns:
    /// - An `mpsc::Receiver<TallyUpdate>` for the caller to poll.
    /// - A [`TallyHandle`] that can be used to abort the loop.
    pub fn start(self) -> (mpsc::Receiver<TallyUpdate>, TallyHandle) {
        // Buffer a modest number of snapshots so a slow consumer doesn't
        // stall the feed.
        let (tx, rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            self.run(tx).await;
        });

        (rx, TallyHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// The main event loop: pump feed events into display snapshots.
    async fn run(self, tx: mpsc::Sender<TallyUpdate>) {
        let (feed_tx, mut feed_rx) = mpsc::channel(16);

        let feed_task = match self.source {
            FeedSource::Live {
                host,
                port,
                reconnect_secs,
            } => {
                let client = FeedClient::new(&host, port, reconnect_secs);
                tokio::spawn(client.run(feed_tx))
            }
            FeedSource::Replay { path, interval_ms } => {
                let source = ReplaySource::new(path, interval_ms);
                tokio::spawn(async move {
                    if let Err(e) = source.run(feed_tx).await {
                        tracing::error!(error = %e, "replay source failed");
                    }
                })
            }
        };

        let mut tracker = FeedTracker::new();
        let mut last_counts = VoteCounts::default();

        while let Some(event) = feed_rx.recv().await {
            match event {
                FeedEvent::Ready => {
                    tracing::info!("score feed ready");
                    tracker.mark_ready();
                }
                FeedEvent::Scores(counts) => {
                    tracker.record(&counts);
                    last_counts = counts;
                }
            }

            let snapshot = build_update(&tracker, last_counts);
            if tx.send(snapshot).await.is_err() {
                tracing::debug!("tally channel closed; exiting feed loop");
                break;
            }
        }

        feed_task.abort();
    }
}

// ── TallyHandle ───────────────────────────────────────────────────────────────

/// A handle to the background feed task.
///
/// Drop or call [`TallyHandle::abort`] to stop the loop.
pub struct TallyHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl TallyHandle {
    /// Immediately abort the feed loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Derive one display snapshot from the tracker state and the latest counts.
fn build_update(tracker: &FeedTracker, counts: VoteCounts) -> TallyUpdate {
    TallyUpdate {
        counts,
        allocation: PercentageAllocator::allocate(&counts),
        total: counts.total(),
        connected: tracker.is_connected(),
        updates_seen: tracker.updates_seen(),
        received_at: Utc::now(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
