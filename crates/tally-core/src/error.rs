use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the Cloud Wars tally.
#[derive(Error, Debug)]
pub enum TallyError {
    /// A replay file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A feed envelope or scores payload could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the tally crates.
pub type Result<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = TallyError::FileRead {
            path: PathBuf::from("/some/feed.jsonl"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/feed.jsonl"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_config() {
        let err = TallyError::Config("replay mode requires --replay-file".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: replay mode requires --replay-file"
        );
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: TallyError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err: TallyError = io_err.into();
        assert!(err.to_string().contains("reset by peer"));
    }

    #[test]
    fn test_error_from_anyhow() {
        let err: TallyError = anyhow::anyhow!("feed misbehaved").into();
        assert_eq!(err.to_string(), "feed misbehaved");
    }
}
