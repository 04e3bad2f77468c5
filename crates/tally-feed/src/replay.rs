//! File replay source for the score feed.
//!
//! Reads raw scores objects (one JSON object per line, no envelope) from a
//! file and emits them on a fixed interval. Useful for demos and for
//! exercising the full pipeline without a live server.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use tally_core::error::{Result, TallyError};

use crate::payload::ScoresPayload;
use crate::FeedEvent;

// ── ReplaySource ─────────────────────────────────────────────────────────────

/// Replays a recorded scores file as a feed.
pub struct ReplaySource {
    path: PathBuf,
    interval: Duration,
}

impl ReplaySource {
    /// Create a replay source emitting one snapshot every `interval_ms`
    /// milliseconds.
    pub fn new(path: PathBuf, interval_ms: u64) -> Self {
        Self {
            path,
            interval: Duration::from_millis(interval_ms),
        }
    }

    /// Emit a [`FeedEvent::Ready`] followed by one [`FeedEvent::Scores`] per
    /// file line, then return. Blank and malformed lines are skipped with a
    /// warning. Stops early when the receiver side of `tx` is dropped.
    pub async fn run(self, tx: mpsc::Sender<FeedEvent>) -> Result<()> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            TallyError::FileRead {
                path: self.path.clone(),
                source,
            }
        })?;

        if tx.send(FeedEvent::Ready).await.is_err() {
            return Ok(());
        }

        let mut interval = time::interval(self.interval);
        for (lineno, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let counts = match ScoresPayload::parse(trimmed) {
                Ok(payload) => payload.to_counts(),
                Err(e) => {
                    tracing::warn!(line = lineno + 1, error = %e, "skipping malformed replay line");
                    continue;
                }
            };

            interval.tick().await;
            if tx.send(FeedEvent::Scores(counts)).await.is_err() {
                return Ok(());
            }
        }

        tracing::info!(path = %self.path.display(), "replay finished");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tally_core::models::VoteCounts;

    fn write_replay_file(dir: &tempfile::TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("scores.jsonl");
        let mut file = std::fs::File::create(&path).expect("create replay file");
        file.write_all(content.as_bytes()).expect("write replay file");
        path
    }

    #[tokio::test]
    async fn test_replay_emits_ready_then_scores_in_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_replay_file(
            &dir,
            "{\"aws\": 1, \"azure\": 0, \"gc\": 0}\n{\"aws\": 1, \"azure\": 2, \"gc\": 0}\n",
        );

        let (tx, mut rx) = mpsc::channel(16);
        let source = ReplaySource::new(path, 10);
        let task = tokio::spawn(source.run(tx));

        assert_eq!(rx.recv().await, Some(FeedEvent::Ready));
        assert_eq!(
            rx.recv().await,
            Some(FeedEvent::Scores(VoteCounts::new(1, 0, 0)))
        );
        assert_eq!(
            rx.recv().await,
            Some(FeedEvent::Scores(VoteCounts::new(1, 2, 0)))
        );
        // Stream ends after the file is exhausted.
        assert_eq!(rx.recv().await, None);

        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_replay_skips_blank_and_malformed_lines() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = write_replay_file(&dir, "\n{broken\n{\"aws\": 3}\n");

        let (tx, mut rx) = mpsc::channel(16);
        let task = tokio::spawn(ReplaySource::new(path, 10).run(tx));

        assert_eq!(rx.recv().await, Some(FeedEvent::Ready));
        assert_eq!(
            rx.recv().await,
            Some(FeedEvent::Scores(VoteCounts::new(3, 0, 0)))
        );
        assert_eq!(rx.recv().await, None);

        task.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_replay_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.jsonl");

        let (tx, _rx) = mpsc::channel(16);
        let err = ReplaySource::new(path.clone(), 10).run(tx).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"), "got: {msg}");
        assert!(msg.contains("does-not-exist.jsonl"), "got: {msg}");
    }

    #[tokio::test]
    async fn test_replay_stops_when_receiver_dropped() {
        let dir = tempfile::TempDir::new().unwrap();
        let many_lines = "{\"aws\": 1}\n".repeat(1000);
        let path = write_replay_file(&dir, &many_lines);

        let (tx, mut rx) = mpsc::channel(1);
        let task = tokio::spawn(ReplaySource::new(path, 10).run(tx));

        assert_eq!(rx.recv().await, Some(FeedEvent::Ready));
        drop(rx);

        // The source must bail out instead of replaying all 1000 lines.
        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("replay should stop after receiver drop")
            .unwrap()
            .unwrap();
    }
}
