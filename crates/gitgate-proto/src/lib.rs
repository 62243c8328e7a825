//! Wire types for the smart HTTP service.
//!
//! The messages and the client and server stubs mirror `proto/smarthttp.proto`. They are
//! checked in rather than generated at build time so the workspace builds
//! without `protoc`.

mod gitaly;

pub use gitaly::smart_http_service_client::SmartHttpServiceClient;
pub use gitaly::smart_http_service_server::{SmartHttpService, SmartHttpServiceServer};
pub use gitaly::{InfoRefsRequest, InfoRefsResponse, Repository};

/// Fully qualified gRPC service name.
pub const SMART_HTTP_SERVICE: &str = "gitaly.SmartHTTPService";

impl Repository {
    /// Creates a repository reference from its storage and relative path.
    pub fn new(storage_name: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            storage_name: storage_name.into(),
            relative_path: relative_path.into(),
            ..Default::default()
        }
    }

    /// Sets the GitLab repository identifier (e.g. `project-42`).
    pub fn with_gl_repository(mut self, gl_repository: impl Into<String>) -> Self {
        self.gl_repository = gl_repository.into();
        self
    }
}

impl InfoRefsRequest {
    /// Creates a request targeting `repository`.
    pub fn for_repository(repository: &Repository) -> Self {
        Self {
            repository: Some(repository.clone()),
        }
    }
}

impl InfoRefsResponse {
    /// Wraps a chunk of advertisement bytes.
    pub fn new(data: impl Into<bytes::Bytes>) -> Self {
        Self { data: data.into() }
    }
}
