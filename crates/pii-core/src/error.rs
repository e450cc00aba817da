use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid redaction level: {0} (expected 1, 2 or 3)")]
    InvalidLevel(i64),

    #[error("Entity source failed: {0}")]
    MissingEntitySource(String),

    #[error("Entity source returned malformed span {start}..{end} for text of {len} bytes")]
    MalformedEntitySpan { start: usize, end: usize, len: usize },

    #[error("Malformed placeholder override for '{category}': {reason}")]
    MalformedOverride { category: String, reason: String },

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Whether the caller is at fault (bad request) rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidLevel(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
