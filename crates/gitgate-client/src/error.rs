//! Client error types.

use thiserror::Error;

/// Errors returned while opening an info-refs stream.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The requested service is not `git-upload-pack` or `git-receive-pack`.
    /// No RPC was made.
    #[error("info refs: unsupported RPC: {0:?}")]
    UnsupportedOperation(String),

    /// The backend rejected the call or the transport failed while
    /// establishing the stream.
    #[error("info refs: {rpc} call failed: {source}")]
    RemoteCallFailed {
        /// RPC method that was attempted.
        rpc: &'static str,
        /// Status reported by the RPC layer.
        #[source]
        source: tonic::Status,
    },

    /// Could not connect to the backend.
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The client configuration is invalid or could not be loaded.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Returns the gRPC status behind a failed call, if any.
    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            Self::RemoteCallFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that end an [`InfoRefsWriter`](crate::InfoRefsWriter) transfer.
///
/// Both variants carry the number of bytes handed to the sink before the
/// failure.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The response stream yielded an error.
    #[error("info refs stream failed after {written} bytes: {source}")]
    Remote {
        /// Bytes written before the failure.
        written: u64,
        /// Status reported by the stream.
        #[source]
        source: tonic::Status,
    },

    /// The destination sink failed.
    #[error("writing info refs failed after {written} bytes: {source}")]
    Sink {
        /// Bytes written before the failure.
        written: u64,
        /// Error reported by the sink.
        #[source]
        source: std::io::Error,
    },
}

impl StreamError {
    /// Returns the number of bytes written before the failure.
    pub fn written(&self) -> u64 {
        match self {
            Self::Remote { written, .. } | Self::Sink { written, .. } => *written,
        }
    }
}
