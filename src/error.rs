use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("no markets info is returned from Binance DEX: {count}")]
    InsufficientMarkets { count: usize },

    #[error("no tokens info is returned from Binance DEX: {count}")]
    InsufficientTokens { count: usize },

    #[error("fetch from {source_name} failed: {message}")]
    Fetch {
        source_name: &'static str,
        message: String,
    },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error at {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl UpdateError {
    pub fn fetch(source_name: &'static str, message: impl Into<String>) -> Self {
        UpdateError::Fetch {
            source_name,
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        UpdateError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        UpdateError::Json {
            path: path.into(),
            source,
        }
    }

    /// Precondition failures abort the run before anything is aggregated
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            UpdateError::InsufficientMarkets { .. } | UpdateError::InsufficientTokens { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, UpdateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_messages_carry_count() {
        let err = UpdateError::InsufficientMarkets { count: 3 };
        assert_eq!(err.to_string(), "no markets info is returned from Binance DEX: 3");
        assert!(err.is_precondition());

        let err = UpdateError::InsufficientTokens { count: 0 };
        assert_eq!(err.to_string(), "no tokens info is returned from Binance DEX: 0");
    }

    #[test]
    fn fetch_error_names_source() {
        let err = UpdateError::fetch("dex markets", "status 503");
        assert_eq!(err.to_string(), "fetch from dex markets failed: status 503");
        assert!(!err.is_precondition());
    }
}
