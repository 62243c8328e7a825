//! Copies an info-refs response stream into a sink.

use crate::error::StreamError;
use crate::rpc::InfoRefsStream;
use futures::StreamExt;
use gitgate_git::GitService;
use std::{fmt, io};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// An open info-refs stream waiting to be written somewhere.
///
/// The writer is consumed by [`write_to`](Self::write_to), so a stream is
/// drained at most once. Dropping a writer that was never driven drops the
/// stream, which cancels the call on the transport.
pub struct InfoRefsWriter {
    service: GitService,
    stream: InfoRefsStream,
}

impl InfoRefsWriter {
    /// Wraps an open response stream for `service`.
    pub fn new(service: GitService, stream: InfoRefsStream) -> Self {
        Self { service, stream }
    }

    /// Service whose advertisement this writer carries.
    pub fn service(&self) -> GitService {
        self.service
    }

    /// Forwards every message payload to `sink` in order until the stream
    /// ends, then flushes the sink and returns the number of bytes written.
    ///
    /// On failure the error's `written` includes every byte the sink
    /// accepted, even from a message it only took part of.
    pub async fn write_to<W>(mut self, sink: &mut W) -> Result<u64, StreamError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut written: u64 = 0;

        while let Some(message) = self.stream.next().await {
            let message = message.map_err(|source| {
                tracing::warn!(
                    service = %self.service,
                    written,
                    code = ?source.code(),
                    error = %source.message(),
                    "Info refs stream failed"
                );
                StreamError::Remote { written, source }
            })?;

            if message.data.is_empty() {
                continue;
            }

            let mut data = &message.data[..];
            while !data.is_empty() {
                let n = match sink.write(data).await {
                    Ok(0) => Err(io::Error::from(io::ErrorKind::WriteZero)),
                    Ok(n) => Ok(n),
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => Err(e),
                }
                .map_err(|source| StreamError::Sink { written, source })?;
                written += n as u64;
                data = &data[n..];
            }
        }

        sink.flush()
            .await
            .map_err(|source| StreamError::Sink { written, source })?;

        tracing::debug!(service = %self.service, bytes = written, "Info refs stream drained");
        Ok(written)
    }
}

impl fmt::Debug for InfoRefsWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfoRefsWriter")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}
