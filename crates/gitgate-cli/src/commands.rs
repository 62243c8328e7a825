//! CLI command implementations.

use gitgate_client::{ClientError, SmartHttpClient, SmartHttpRpc, StreamError};
use gitgate_git::{Advertisement, GitError, GitService};
use gitgate_proto::Repository;
use serde::Serialize;
use thiserror::Error;
use tokio::io::AsyncWrite;

/// CLI errors.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Stream(#[from] StreamError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;

/// Streams the raw advertisement for `service` into `out`.
pub async fn info_refs<R, W>(
    client: &SmartHttpClient<R>,
    repo: &Repository,
    service: &str,
    out: &mut W,
) -> Result<u64>
where
    R: SmartHttpRpc,
    W: AsyncWrite + Unpin + ?Sized,
{
    let writer = client.info_refs_response_writer(repo, service).await?;
    let written = writer.write_to(out).await?;
    tracing::info!(service = %service, bytes = written, "Wrote info refs");
    Ok(written)
}

/// Fetches and parses the advertisement for `service`.
pub async fn fetch_advertisement<R: SmartHttpRpc>(
    client: &SmartHttpClient<R>,
    repo: &Repository,
    service: &str,
) -> Result<Advertisement> {
    let mut body: Vec<u8> = Vec::new();
    info_refs(client, repo, service, &mut body).await?;
    Ok(Advertisement::parse(&body)?)
}

#[derive(Debug, Serialize)]
struct RefListing<'a> {
    service: Option<&'a str>,
    version: u8,
    capabilities: &'a [String],
    refs: Vec<RefEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct RefEntry<'a> {
    id: &'a str,
    name: &'a str,
}

/// Renders the refs of an advertisement as `<oid> <name>` lines or JSON.
pub fn render_refs(adv: &Advertisement, json: bool) -> Result<String> {
    if json {
        let listing = RefListing {
            service: adv.service.as_ref().map(GitService::as_str),
            version: adv.version,
            capabilities: &adv.capabilities,
            refs: adv
                .refs
                .iter()
                .map(|r| RefEntry {
                    id: &r.id,
                    name: &r.name,
                })
                .collect(),
        };
        return Ok(serde_json::to_string_pretty(&listing)?);
    }

    let mut out = String::new();
    for r in &adv.refs {
        out.push_str(&r.id);
        out.push(' ');
        out.push_str(&r.name);
        out.push('\n');
    }
    Ok(out)
}
