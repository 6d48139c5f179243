use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the caller of a comparison run
///
/// Extraction and scoring never produce these; only input validation,
/// fetching, persistence and export do.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Both the pre-go-live and the current source are required")]
    MissingSource,

    #[error("Threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(i64),

    #[error("Invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status}: {reason} ({url})")]
    Http {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Internal failure while building a snapshot; triggers degraded extraction
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),

    #[error("selector failed to parse: {0}")]
    Selector(String),
}
