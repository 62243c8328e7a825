//! Smart HTTP info-refs client for gitgate.
//!
//! [`SmartHttpClient::info_refs_response_writer`] takes a repository and a
//! git service name, opens the matching info-refs RPC on the backend and
//! hands back an [`InfoRefsWriter`] that copies the advertisement into any
//! async sink.
//!
//! ```rust,no_run
//! use gitgate_client::{ClientConfig, SmartHttpClient};
//! use gitgate_proto::Repository;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SmartHttpClient::connect(&ClientConfig::default()).await?;
//! let repo = Repository::new("default", "group/project.git");
//!
//! let writer = client.info_refs_response_writer(&repo, "git-upload-pack").await?;
//! let mut stdout = tokio::io::stdout();
//! let bytes = writer.write_to(&mut stdout).await?;
//! # let _ = bytes;
//! # Ok(())
//! # }
//! ```

mod auth;
mod config;
mod error;
mod info_refs;
mod rpc;
mod writer;

pub use auth::BearerAuth;
pub use config::ClientConfig;
pub use error::{ClientError, StreamError};
pub use info_refs::SmartHttpClient;
pub use rpc::{rpc_name, GrpcSmartHttp, InfoRefsStream, SmartHttpRpc};
pub use writer::InfoRefsWriter;

pub use gitgate_git::GitService;
pub use gitgate_proto::{InfoRefsRequest, InfoRefsResponse, Repository};

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
