use thiserror::Error;

use crate::digest::Digest;

/// Errors produced while reading a legacy image
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest is not well-formed JSON or does not have the expected shape
    #[error("Failed to parse manifest: {0}")]
    Parse(#[source] serde_json::Error),

    /// A digest string is not of the form `<algorithm>:<hex>`
    #[error("Invalid digest {digest:?}: {reason}")]
    InvalidDigest { digest: String, reason: String },

    /// The blob source has no blob for this digest
    #[error("Blob not found: {0}")]
    NotFound(Digest),

    /// I/O failure while talking to the blob source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema 1 manifests carry no layer sizes
    #[error("schema 1 layer {0} can't know size")]
    UnknownSize(Digest),

    /// The operation cannot be expressed for this image format
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl Error {
    pub(crate) fn invalid_digest(digest: &str, reason: impl Into<String>) -> Self {
        Error::InvalidDigest {
            digest: digest.to_string(),
            reason: reason.into(),
        }
    }

    /// True for malformed manifests and malformed digests
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_) | Error::InvalidDigest { .. })
    }

    /// True only for failures that might succeed if retried
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
