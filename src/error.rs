//! Error types for lyrics and discography extraction

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Terminal failure of a single extraction call.
///
/// Missing metadata (genre, album, writers) is never an error; those fields
/// come back as `None` on the record instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Name normalized to an empty path segment
    #[error("Invalid name: {0:?} has no usable characters")]
    InvalidName(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: status {code}")]
    HttpStatus { code: u16 },

    /// Any other transport fault
    #[error("Request error: {0}")]
    Request(String),

    /// Lyrics container or block missing from the page
    #[error("Lyrics not found: {0}")]
    LyricsNotFound(String),

    #[error("Extraction cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    /// Stable name of the failure kind, used in log events and API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::InvalidName(_) => "invalid_name",
            ExtractError::Connection(_) => "connection",
            ExtractError::Timeout(_) => "timeout",
            ExtractError::HttpStatus { .. } => "http_status",
            ExtractError::Request(_) => "request",
            ExtractError::LyricsNotFound(_) => "lyrics_not_found",
            ExtractError::Cancelled => "cancelled",
            ExtractError::Config(_) => "config",
        }
    }

    /// Transport-level failures that happened before any page was parsed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ExtractError::Connection(_)
                | ExtractError::Timeout(_)
                | ExtractError::HttpStatus { .. }
                | ExtractError::Request(_)
        )
    }
}

impl From<reqwest::Error> for ExtractError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ExtractError::Timeout(e.to_string())
        } else if e.is_connect() {
            ExtractError::Connection(e.to_string())
        } else if let Some(status) = e.status() {
            ExtractError::HttpStatus { code: status.as_u16() }
        } else {
            ExtractError::Request(e.to_string())
        }
    }
}
