//! Git smart HTTP wire helpers for gitgate.
//!
//! This crate knows the two smart HTTP services, the pkt-line framing git
//! uses on the wire, and how to read the ref advertisement a backend sends
//! back for an info-refs request.

mod advertisement;
mod error;
mod pktline;
mod service;

pub use advertisement::{Advertisement, AdvertisedRef, ZERO_ID};
pub use error::GitError;
pub use pktline::{PktLine, PktLineReader, PktLineWriter, MAX_PKT_DATA_LEN};
pub use service::GitService;

/// Result type for git wire operations.
pub type Result<T> = std::result::Result<T, GitError>;
