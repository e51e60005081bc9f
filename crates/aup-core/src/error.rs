//! Error types for aup-core.

use std::path::PathBuf;

/// Startup configuration failures. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("no endpoint configured: set API_URL_SPPI_IVP_RF or DATA_URL")]
    MissingUrl,
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

/// A single range expression could not be turned into windows.
///
/// Always recoverable: the offending range is skipped and logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("unrecognized time range {text:?}")]
    Unrecognized { text: String },
    #[error("invalid instant {value:?}")]
    InvalidInstant { value: String },
    #[error("range ends before it starts: {from:?} .. {to:?}")]
    Reversed { from: String, to: String },
}

/// Failures while rendering or persisting the output document.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to serialize notice document")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
