//! Git wire error types.

use thiserror::Error;

/// Errors that can occur while handling git wire data.
#[derive(Debug, Error)]
pub enum GitError {
    /// The service name is not one of the smart HTTP services.
    #[error("unsupported service: {0:?}")]
    UnsupportedService(String),

    /// Invalid pkt-line format.
    #[error("invalid pkt-line: {0}")]
    InvalidPktLine(String),

    /// The ref advertisement could not be parsed.
    #[error("invalid ref advertisement: {0}")]
    InvalidAdvertisement(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
