//! Wire format of the score feed.
//!
//! Each line of the stream is a JSON envelope: a bare `message` event marks
//! the connection as live, and `scores` events carry the tally as a
//! JSON-encoded string (the payload travels double-encoded, exactly as the
//! upstream server emits it). Scores fields are optional and may arrive as
//! numbers or strings; anything missing or unparsable coerces to zero votes
//! before the allocator ever sees it.

use serde::Deserialize;
use serde_json::Value;

use tally_core::error::Result;
use tally_core::models::VoteCounts;

// ── FeedEnvelope ──────────────────────────────────────────────────────────────

/// One line of the feed stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum FeedEnvelope {
    /// Connection handshake, sent once after the client attaches.
    Message,
    /// A scores push; `data` holds the JSON-encoded scores object.
    Scores { data: String },
}

impl FeedEnvelope {
    /// Parse a single feed line.
    pub fn parse(line: &str) -> Result<Self> {
        Ok(serde_json::from_str(line)?)
    }
}

// ── ScoresPayload ─────────────────────────────────────────────────────────────

/// Raw scores object as pushed by the server.
///
/// Every field is optional and untyped on the wire; [`ScoresPayload::to_counts`]
/// applies the caller-side coercion the allocator contract requires.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoresPayload {
    #[serde(default)]
    pub aws: Option<Value>,
    #[serde(default)]
    pub azure: Option<Value>,
    #[serde(default)]
    pub gc: Option<Value>,
}

impl ScoresPayload {
    /// Parse the JSON-encoded scores string carried in a `scores` envelope.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Coerce the raw fields to vote counts.
    ///
    /// Missing fields, non-numeric values, and negative numbers become 0;
    /// string values are read as a leading base-10 integer; fractional
    /// numbers truncate.
    pub fn to_counts(&self) -> VoteCounts {
        VoteCounts::new(
            coerce_count(self.aws.as_ref()),
            coerce_count(self.azure.as_ref()),
            coerce_count(self.gc.as_ref()),
        )
    }
}

/// Defensive number-or-string coercion for a single vote field.
fn coerce_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                u
            } else {
                // Negative or fractional: clamp at zero, truncate the rest.
                n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64).unwrap_or(0)
            }
        }
        Some(Value::String(s)) => parse_leading_int(s),
        _ => 0,
    }
}

/// Read the leading base-10 digits of a string, `0` when there are none.
/// Mirrors how the original display parsed its string fields, so `"12"`,
/// `"12.7"`, and `"12 votes"` all read as 12.
fn parse_leading_int(s: &str) -> u64 {
    let digits: String = s
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── FeedEnvelope ─────────────────────────────────────────────────────────

    #[test]
    fn test_envelope_message() {
        let env = FeedEnvelope::parse(r#"{"event": "message"}"#).unwrap();
        assert!(matches!(env, FeedEnvelope::Message));
    }

    #[test]
    fn test_envelope_message_ignores_extra_fields() {
        let env = FeedEnvelope::parse(r#"{"event": "message", "data": "hello"}"#).unwrap();
        assert!(matches!(env, FeedEnvelope::Message));
    }

    #[test]
    fn test_envelope_scores_carries_data_string() {
        let env =
            FeedEnvelope::parse(r#"{"event": "scores", "data": "{\"aws\": 3}"}"#).unwrap();
        match env {
            FeedEnvelope::Scores { data } => assert_eq!(data, r#"{"aws": 3}"#),
            other => panic!("expected scores, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_unknown_event_is_an_error() {
        assert!(FeedEnvelope::parse(r#"{"event": "votes"}"#).is_err());
        assert!(FeedEnvelope::parse("not json").is_err());
    }

    // ── ScoresPayload coercion ───────────────────────────────────────────────

    #[test]
    fn test_payload_numeric_fields() {
        let payload = ScoresPayload::parse(r#"{"aws": 10, "azure": 20, "gc": 30}"#).unwrap();
        assert_eq!(payload.to_counts(), VoteCounts::new(10, 20, 30));
    }

    #[test]
    fn test_payload_string_fields() {
        let payload =
            ScoresPayload::parse(r#"{"aws": "10", "azure": "20", "gc": "30"}"#).unwrap();
        assert_eq!(payload.to_counts(), VoteCounts::new(10, 20, 30));
    }

    #[test]
    fn test_payload_missing_fields_are_zero() {
        let payload = ScoresPayload::parse(r#"{"azure": 5}"#).unwrap();
        assert_eq!(payload.to_counts(), VoteCounts::new(0, 5, 0));

        let empty = ScoresPayload::parse("{}").unwrap();
        assert_eq!(empty.to_counts(), VoteCounts::default());
    }

    #[test]
    fn test_payload_garbage_fields_are_zero() {
        let payload =
            ScoresPayload::parse(r#"{"aws": "lots", "azure": null, "gc": [1, 2]}"#).unwrap();
        assert_eq!(payload.to_counts(), VoteCounts::default());
    }

    #[test]
    fn test_payload_negative_values_clamp_to_zero() {
        let payload = ScoresPayload::parse(r#"{"aws": -5, "azure": -0.5, "gc": 2}"#).unwrap();
        assert_eq!(payload.to_counts(), VoteCounts::new(0, 0, 2));
    }

    #[test]
    fn test_payload_fractional_values_truncate() {
        let payload = ScoresPayload::parse(r#"{"aws": 12.7, "azure": 0.9, "gc": 3}"#).unwrap();
        assert_eq!(payload.to_counts(), VoteCounts::new(12, 0, 3));
    }

    #[test]
    fn test_payload_string_leading_digits() {
        let payload =
            ScoresPayload::parse(r#"{"aws": "12.7", "azure": " 8", "gc": "3 votes"}"#).unwrap();
        assert_eq!(payload.to_counts(), VoteCounts::new(12, 8, 3));
    }

    #[test]
    fn test_payload_negative_string_is_zero() {
        let payload = ScoresPayload::parse(r#"{"aws": "-12"}"#).unwrap();
        assert_eq!(payload.to_counts().aws, 0);
    }

    #[test]
    fn test_payload_huge_number_survives() {
        let payload = ScoresPayload::parse(r#"{"aws": 18446744073709551615}"#).unwrap();
        assert_eq!(payload.to_counts().aws, u64::MAX);
    }
}
