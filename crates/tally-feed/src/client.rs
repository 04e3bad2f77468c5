//! Live TCP score feed client.
//!
//! Connects to the score server, reads newline-delimited envelope JSON, and
//! forwards [`FeedEvent`]s to the runtime over an `mpsc` channel. Lost
//! connections are retried forever on a fixed delay; a malformed line is
//! logged and skipped, never fatal. The loop ends only when the receiving
//! side of the channel goes away.

use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use tally_core::error::Result;

use crate::payload::{FeedEnvelope, ScoresPayload};
use crate::FeedEvent;

// ── FeedClient ────────────────────────────────────────────────────────────────

/// Reconnecting line-oriented client for the live score feed.
pub struct FeedClient {
    /// Server address in `host:port` form.
    addr: String,
    /// Delay between reconnect attempts.
    reconnect_delay: Duration,
}

impl FeedClient {
    /// Create a client for `host:port`, retrying lost connections every
    /// `reconnect_secs` seconds.
    pub fn new(host: &str, port: u16, reconnect_secs: u64) -> Self {
        Self {
            addr: format!("{host}:{port}"),
            reconnect_delay: Duration::from_secs(reconnect_secs),
        }
    }

    /// Run the connect/read loop until the receiver side of `tx` is dropped.
    pub async fn run(self, tx: mpsc::Sender<FeedEvent>) {
        loop {
            if tx.is_closed() {
                tracing::debug!("feed channel closed; exiting client loop");
                return;
            }

            match TcpStream::connect(&self.addr).await {
                Ok(stream) => {
                    tracing::info!(addr = %self.addr, "connected to score feed");
                    match self.read_stream(stream, &tx).await {
                        Ok(true) => return, // receiver dropped
                        Ok(false) => {
                            tracing::warn!(addr = %self.addr, "score feed closed; reconnecting")
                        }
                        Err(e) => {
                            tracing::warn!(addr = %self.addr, error = %e, "score feed read failed; reconnecting")
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(addr = %self.addr, error = %e, "waiting for score feed");
                }
            }

            tokio::time::sleep(self.reconnect_delay).await;
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────

    /// Read envelope lines from an established connection.
    ///
    /// Returns `Ok(true)` when the event receiver has been dropped (the
    /// caller should stop entirely) and `Ok(false)` on a clean end-of-stream
    /// (the caller should reconnect).
    async fn read_stream(&self, stream: TcpStream, tx: &mpsc::Sender<FeedEvent>) -> Result<bool> {
        let mut lines = BufReader::new(stream).lines();

        while let Some(line) = lines.next_line().await? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let Some(event) = decode_line(trimmed) else {
                continue;
            };

            if tx.send(event).await.is_err() {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// Decode one feed line into an event, or `None` for lines the stream should
/// simply skip.
fn decode_line(line: &str) -> Option<FeedEvent> {
    match FeedEnvelope::parse(line) {
        Ok(FeedEnvelope::Message) => Some(FeedEvent::Ready),
        Ok(FeedEnvelope::Scores { data }) => match ScoresPayload::parse(&data) {
            Ok(payload) => Some(FeedEvent::Scores(payload.to_counts())),
            Err(e) => {
                tracing::warn!(error = %e, "dropping malformed scores payload");
                None
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "dropping malformed feed line");
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
