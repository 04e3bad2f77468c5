use tally_core::models::VoteCounts;

// ── FeedTracker ───────────────────────────────────────────────────────────────

/// Tracks feed health and tally extremes across a run.
///
/// Fed by the orchestrator on every feed event; read when building display
/// snapshots. Purely bookkeeping, no I/O.
#[derive(Debug, Default)]
pub struct FeedTracker {
    /// Number of scores events observed since startup.
    updates_seen: u64,
    /// Largest total vote count observed so far.
    peak_total: u64,
    /// Whether the ready handshake has arrived.
    connected: bool,
}

impl FeedTracker {
    /// Create a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the ready handshake.
    pub fn mark_ready(&mut self) {
        self.connected = true;
    }

    /// Record one scores event.
    pub fn record(&mut self, counts: &VoteCounts) {
        self.updates_seen = self.updates_seen.saturating_add(1);
        self.peak_total = self.peak_total.max(counts.total());
    }

    /// Number of scores events observed since startup.
    pub fn updates_seen(&self) -> u64 {
        self.updates_seen
    }

    /// Largest total vote count observed so far.
    pub fn peak_total(&self) -> u64 {
        self.peak_total
    }

    /// `true` once the ready handshake has been seen.
    pub fn is_connected(&self) -> bool {
        self.connected
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
