//! The info-refs adapter.

use crate::auth::BearerAuth;
use crate::config::ClientConfig;
use crate::rpc::{rpc_name, GrpcSmartHttp, SmartHttpRpc};
use crate::writer::InfoRefsWriter;
use crate::{ClientError, Result};
use gitgate_git::GitService;
use gitgate_proto::{InfoRefsRequest, Repository, SmartHttpServiceClient};
use std::time::Duration;
use tonic::transport::Endpoint;
use validator::Validate;

/// Client for the smart HTTP info-refs calls.
///
/// Holds no per-request state; every call opens its own stream, so one
/// client can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct SmartHttpClient<R = GrpcSmartHttp> {
    rpc: R,
}

impl SmartHttpClient<GrpcSmartHttp> {
    /// Connects to the backend described by `config`.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        let mut endpoint = Endpoint::from_shared(config.address.clone())?
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(secs) = config.request_timeout_secs {
            endpoint = endpoint.timeout(Duration::from_secs(secs));
        }

        tracing::info!(address = %config.address, "Connecting to smart HTTP backend");
        let channel = endpoint.connect().await?;

        let auth = BearerAuth::new(config.token.as_deref())?;
        let rpc = SmartHttpServiceClient::with_interceptor(channel, auth)
            .max_decoding_message_size(config.max_decoding_message_size);

        Ok(Self::new(rpc))
    }
}

impl<R: SmartHttpRpc> SmartHttpClient<R> {
    /// Wraps an RPC implementation.
    pub fn new(rpc: R) -> Self {
        Self { rpc }
    }

    /// Returns the underlying RPC implementation.
    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    /// Opens the info-refs stream for the service named `rpc`.
    ///
    /// `rpc` must be exactly `git-upload-pack` or `git-receive-pack`; any
    /// other value fails with [`ClientError::UnsupportedOperation`] before
    /// anything is sent.
    pub async fn info_refs_response_writer(
        &self,
        repo: &Repository,
        rpc: &str,
    ) -> Result<InfoRefsWriter> {
        let service = rpc.parse::<GitService>().map_err(|_| {
            tracing::debug!(rpc = %rpc, "Rejecting unsupported info refs service");
            ClientError::UnsupportedOperation(rpc.to_string())
        })?;
        self.info_refs_response_writer_for(repo, service).await
    }

    /// Opens the info-refs stream for an already parsed service.
    pub async fn info_refs_response_writer_for(
        &self,
        repo: &Repository,
        service: GitService,
    ) -> Result<InfoRefsWriter> {
        let request = InfoRefsRequest::for_repository(repo);

        tracing::debug!(
            service = %service,
            storage = %repo.storage_name,
            path = %repo.relative_path,
            "Opening info refs stream"
        );

        let result = match service {
            GitService::UploadPack => self.rpc.info_refs_upload_pack(request).await,
            GitService::ReceivePack => self.rpc.info_refs_receive_pack(request).await,
        };

        let stream = result.map_err(|source| {
            let rpc = rpc_name(service);
            tracing::warn!(
                rpc,
                storage = %repo.storage_name,
                path = %repo.relative_path,
                code = ?source.code(),
                error = %source.message(),
                "Info refs call failed"
            );
            ClientError::RemoteCallFailed { rpc, source }
        })?;

        Ok(InfoRefsWriter::new(service, stream))
    }
}
