//! End-to-end tests of the info-refs adapter against an in-process RPC double.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use gitgate_client::{
    ClientError, GitService, InfoRefsRequest, InfoRefsResponse, InfoRefsStream, Repository,
    SmartHttpClient, SmartHttpRpc, StreamError,
};
use proptest::prelude::*;
use std::io;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tokio::io::AsyncWrite;
use tonic::{Code, Status};

// ============================================================================
// Test double
// ============================================================================

#[derive(Default)]
struct MockSmartHttp {
    upload_calls: AtomicUsize,
    receive_calls: AtomicUsize,
    requests: Mutex<Vec<InfoRefsRequest>>,
    chunks: Vec<Bytes>,
    trailing_error: Option<(Code, &'static str)>,
    call_error: Option<(Code, &'static str)>,
    dropped: Option<Arc<AtomicBool>>,
}

impl MockSmartHttp {
    fn with_chunks(chunks: &[&'static [u8]]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| Bytes::from_static(*c)).collect(),
            ..Default::default()
        }
    }

    fn failing(code: Code, message: &'static str) -> Self {
        Self {
            call_error: Some((code, message)),
            ..Default::default()
        }
    }

    fn total_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst) + self.receive_calls.load(Ordering::SeqCst)
    }

    fn respond(&self, request: InfoRefsRequest) -> Result<InfoRefsStream, Status> {
        self.requests.lock().unwrap().push(request);
        if let Some((code, message)) = self.call_error {
            return Err(Status::new(code, message));
        }

        let mut items: Vec<Result<InfoRefsResponse, Status>> = self
            .chunks
            .iter()
            .map(|c| Ok(InfoRefsResponse::new(c.clone())))
            .collect();
        if let Some((code, message)) = self.trailing_error {
            items.push(Err(Status::new(code, message)));
        }

        let guard = self.dropped.clone().map(DropFlag);
        Ok(stream::iter(items)
            .map(move |item| {
                let _ = guard.as_ref();
                item
            })
            .boxed())
    }
}

#[async_trait]
impl SmartHttpRpc for MockSmartHttp {
    async fn info_refs_upload_pack(
        &self,
        request: InfoRefsRequest,
    ) -> Result<InfoRefsStream, Status> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(request)
    }

    async fn info_refs_receive_pack(
        &self,
        request: InfoRefsRequest,
    ) -> Result<InfoRefsStream, Status> {
        self.receive_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(request)
    }
}

/// Sets its flag when the stream holding it is dropped.
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Sink that accepts `capacity` bytes and then fails.
struct BrokenSink {
    accepted: Vec<u8>,
    capacity: usize,
}

impl AsyncWrite for BrokenSink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let room = self.capacity - self.accepted.len();
        if room == 0 {
            return Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "client went away")));
        }
        let n = room.min(buf.len());
        self.accepted.extend_from_slice(&buf[..n]);
        Poll::Ready(Ok(n))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

fn repo() -> Repository {
    Repository::new("default", "group/project.git").with_gl_repository("project-7")
}

const ADVERTISEMENT: &[&[u8]] = &[
    b"001e# service=git-upload-pack\n0000",
    b"003d95d09f2b10159347eece71399a7e2e907ea3df4f refs/heads/main\n",
    b"0000",
];

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn upload_pack_calls_only_upload_pack_rpc() {
    let client = SmartHttpClient::new(MockSmartHttp::with_chunks(ADVERTISEMENT));

    let writer = client
        .info_refs_response_writer(&repo(), "git-upload-pack")
        .await
        .unwrap();

    assert_eq!(writer.service(), GitService::UploadPack);
    assert_eq!(client.rpc().upload_calls.load(Ordering::SeqCst), 1);
    assert_eq!(client.rpc().receive_calls.load(Ordering::SeqCst), 0);

    let requests = client.rpc().requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].repository, Some(repo()));
}

#[tokio::test]
async fn receive_pack_calls_only_receive_pack_rpc() {
    let client = SmartHttpClient::new(MockSmartHttp::with_chunks(ADVERTISEMENT));

    let writer = client
        .info_refs_response_writer(&repo(), "git-receive-pack")
        .await
        .unwrap();

    assert_eq!(writer.service(), GitService::ReceivePack);
    assert_eq!(client.rpc().upload_calls.load(Ordering::SeqCst), 0);
    assert_eq!(client.rpc().receive_calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        client.rpc().requests.lock().unwrap()[0].repository,
        Some(repo())
    );
}

#[tokio::test]
async fn unsupported_service_makes_no_call() {
    let client = SmartHttpClient::new(MockSmartHttp::with_chunks(ADVERTISEMENT));

    for token in [
        "",
        "git-upload-archive",
        "GIT-UPLOAD-PACK",
        "Git-Receive-Pack",
        "git-upload-pack ",
        "upload-pack",
        "info/refs",
    ] {
        let err = client
            .info_refs_response_writer(&repo(), token)
            .await
            .unwrap_err();
        match err {
            ClientError::UnsupportedOperation(got) => assert_eq!(got, token),
            other => panic!("expected UnsupportedOperation for {token:?}, got {other}"),
        }
    }

    assert_eq!(client.rpc().total_calls(), 0);
    assert!(client.rpc().requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn typed_entry_point_dispatches_by_service() {
    let client = SmartHttpClient::new(MockSmartHttp::with_chunks(ADVERTISEMENT));

    for service in GitService::all() {
        let writer = client
            .info_refs_response_writer_for(&repo(), service)
            .await
            .unwrap();
        assert_eq!(writer.service(), service);
    }
    assert_eq!(client.rpc().upload_calls.load(Ordering::SeqCst), 1);
    assert_eq!(client.rpc().receive_calls.load(Ordering::SeqCst), 1);
}

// ============================================================================
// Remote failures
// ============================================================================

#[tokio::test]
async fn rpc_failure_is_reported_with_cause() {
    let client = SmartHttpClient::new(MockSmartHttp::failing(
        Code::NotFound,
        "GetRepoPath: not a git repository",
    ));

    let err = client
        .info_refs_response_writer(&repo(), "git-upload-pack")
        .await
        .unwrap_err();

    match &err {
        ClientError::RemoteCallFailed { rpc, source } => {
            assert_eq!(*rpc, "InfoRefsUploadPack");
            assert_eq!(source.code(), Code::NotFound);
            assert_eq!(source.message(), "GetRepoPath: not a git repository");
        }
        other => panic!("expected RemoteCallFailed, got {other}"),
    }
    assert!(err.to_string().contains("not a git repository"));
    assert_eq!(client.rpc().upload_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn receive_pack_failure_names_receive_pack_rpc() {
    let client = SmartHttpClient::new(MockSmartHttp::failing(Code::Unavailable, "connection refused"));

    let err = client
        .info_refs_response_writer(&repo(), "git-receive-pack")
        .await
        .unwrap_err();

    match err {
        ClientError::RemoteCallFailed { rpc, source } => {
            assert_eq!(rpc, "InfoRefsReceivePack");
            assert_eq!(source.code(), Code::Unavailable);
        }
        other => panic!("expected RemoteCallFailed, got {other}"),
    }
}

// ============================================================================
// Streaming
// ============================================================================

#[tokio::test]
async fn writer_forwards_every_byte_in_order() {
    let client = SmartHttpClient::new(MockSmartHttp::with_chunks(ADVERTISEMENT));
    let writer = client
        .info_refs_response_writer(&repo(), "git-upload-pack")
        .await
        .unwrap();

    let mut out: Vec<u8> = Vec::new();
    let written = writer.write_to(&mut out).await.unwrap();

    let expected: Vec<u8> = ADVERTISEMENT.concat();
    assert_eq!(out, expected);
    assert_eq!(written, expected.len() as u64);

    let adv = gitgate_git::Advertisement::parse(&out).unwrap();
    assert_eq!(adv.service, Some(GitService::UploadPack));
    assert_eq!(adv.refs.len(), 1);
}

#[tokio::test]
async fn stream_error_reports_bytes_written_so_far() {
    let mut mock = MockSmartHttp::with_chunks(&[b"0123456789", b"abcde"]);
    mock.trailing_error = Some((Code::Internal, "rev-list died"));
    let client = SmartHttpClient::new(mock);

    let writer = client
        .info_refs_response_writer(&repo(), "git-upload-pack")
        .await
        .unwrap();
    let mut out: Vec<u8> = Vec::new();
    let err = writer.write_to(&mut out).await.unwrap_err();

    assert_eq!(err.written(), 15);
    assert_eq!(out, b"0123456789abcde");
    match err {
        StreamError::Remote { source, .. } => {
            assert_eq!(source.code(), Code::Internal);
            assert_eq!(source.message(), "rev-list died");
        }
        other => panic!("expected Remote, got {other}"),
    }
}

#[tokio::test]
async fn sink_error_reports_partially_written_bytes() {
    let client = SmartHttpClient::new(MockSmartHttp::with_chunks(&[b"aaaa", b"bbbb", b"cccc"]));
    let writer = client
        .info_refs_response_writer(&repo(), "git-receive-pack")
        .await
        .unwrap();

    let mut sink = BrokenSink {
        accepted: Vec::new(),
        capacity: 6,
    };
    let err = writer.write_to(&mut sink).await.unwrap_err();

    match err {
        StreamError::Sink { written, source } => {
            assert_eq!(written, 6);
            assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
        }
        other => panic!("expected Sink, got {other}"),
    }
    assert_eq!(sink.accepted, b"aaaabb");
}

#[tokio::test]
async fn dropping_writer_releases_stream() {
    let flag = Arc::new(AtomicBool::new(false));
    let mut mock = MockSmartHttp::with_chunks(ADVERTISEMENT);
    mock.dropped = Some(flag.clone());
    let client = SmartHttpClient::new(mock);

    let writer = client
        .info_refs_response_writer(&repo(), "git-upload-pack")
        .await
        .unwrap();
    assert!(!flag.load(Ordering::SeqCst));

    drop(writer);
    assert!(flag.load(Ordering::SeqCst));
}

#[tokio::test]
async fn shared_rpc_serves_concurrent_requests() {
    let rpc = Arc::new(MockSmartHttp::with_chunks(ADVERTISEMENT));
    let client = SmartHttpClient::new(rpc.clone());

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                let service = if i % 2 == 0 {
                    "git-upload-pack"
                } else {
                    "git-receive-pack"
                };
                let writer = client.info_refs_response_writer(&repo(), service).await?;
                let mut out: Vec<u8> = Vec::new();
                let n = writer
                    .write_to(&mut out)
                    .await
                    .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;
                Ok::<_, ClientError>((n, out))
            })
        })
        .collect();

    let expected = ADVERTISEMENT.concat();
    for task in tasks {
        let (n, out) = task.await.unwrap().unwrap();
        assert_eq!(n, expected.len() as u64);
        assert_eq!(out, expected);
    }
    assert_eq!(rpc.upload_calls.load(Ordering::SeqCst), 4);
    assert_eq!(rpc.receive_calls.load(Ordering::SeqCst), 4);
}

// ============================================================================
// Property: the writer is a faithful copy
// ============================================================================

proptest! {
    #[test]
    fn writer_output_is_concatenation_of_chunks(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..2048), 0..32)
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let expected: Vec<u8> = chunks.concat();

        let mock = MockSmartHttp {
            chunks: chunks.into_iter().map(Bytes::from).collect(),
            ..Default::default()
        };
        let client = SmartHttpClient::new(mock);

        let (written, out) = runtime.block_on(async {
            let writer = client
                .info_refs_response_writer(&repo(), "git-upload-pack")
                .await
                .unwrap();
            let mut out: Vec<u8> = Vec::new();
            let written = writer.write_to(&mut out).await.unwrap();
            (written, out)
        });

        prop_assert_eq!(written, expected.len() as u64);
        prop_assert_eq!(out, expected);
    }
}
