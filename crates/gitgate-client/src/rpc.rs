//! The RPC capability the info-refs adapter depends on.
//!
//! [`SmartHttpRpc`] is implemented for the tonic stub (with or without the
//! auth interceptor) and for `Arc<T>`, so tests can swap in a double that
//! records which method was called.

use crate::auth::BearerAuth;
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use gitgate_git::GitService;
use gitgate_proto::{InfoRefsRequest, InfoRefsResponse, SmartHttpServiceClient};
use std::sync::Arc;
use tonic::codegen::InterceptedService;
use tonic::transport::Channel;
use tonic::Status;

/// Stream of info-refs response messages.
pub type InfoRefsStream = BoxStream<'static, Result<InfoRefsResponse, Status>>;

/// The tonic client [`SmartHttpClient::connect`](crate::SmartHttpClient::connect) builds.
pub type GrpcSmartHttp = SmartHttpServiceClient<InterceptedService<Channel, BearerAuth>>;

/// Name of the RPC method serving `service`.
pub const fn rpc_name(service: GitService) -> &'static str {
    match service {
        GitService::UploadPack => "InfoRefsUploadPack",
        GitService::ReceivePack => "InfoRefsReceivePack",
    }
}

/// Server-streaming info-refs calls of the smart HTTP service.
#[async_trait]
pub trait SmartHttpRpc: Send + Sync {
    /// Opens the upload-pack advertisement stream.
    async fn info_refs_upload_pack(&self, request: InfoRefsRequest)
        -> Result<InfoRefsStream, Status>;

    /// Opens the receive-pack advertisement stream.
    async fn info_refs_receive_pack(
        &self,
        request: InfoRefsRequest,
    ) -> Result<InfoRefsStream, Status>;
}

#[async_trait]
impl<T: SmartHttpRpc + ?Sized> SmartHttpRpc for Arc<T> {
    async fn info_refs_upload_pack(
        &self,
        request: InfoRefsRequest,
    ) -> Result<InfoRefsStream, Status> {
        (**self).info_refs_upload_pack(request).await
    }

    async fn info_refs_receive_pack(
        &self,
        request: InfoRefsRequest,
    ) -> Result<InfoRefsStream, Status> {
        (**self).info_refs_receive_pack(request).await
    }
}

// The generated stub takes `&mut self` and its method names shadow the trait's,
// so calls go through the inherent path on a clone of the shared channel.
macro_rules! impl_smart_http_rpc {
    ($transport:ty) => {
        #[async_trait]
        impl SmartHttpRpc for SmartHttpServiceClient<$transport> {
            async fn info_refs_upload_pack(
                &self,
                request: InfoRefsRequest,
            ) -> Result<InfoRefsStream, Status> {
                let mut client = self.clone();
                let response =
                    SmartHttpServiceClient::info_refs_upload_pack(&mut client, request).await?;
                Ok(response.into_inner().boxed())
            }

            async fn info_refs_receive_pack(
                &self,
                request: InfoRefsRequest,
            ) -> Result<InfoRefsStream, Status> {
                let mut client = self.clone();
                let response =
                    SmartHttpServiceClient::info_refs_receive_pack(&mut client, request).await?;
                Ok(response.into_inner().boxed())
            }
        }
    };
}

impl_smart_http_rpc!(Channel);
impl_smart_http_rpc!(InterceptedService<Channel, BearerAuth>);
