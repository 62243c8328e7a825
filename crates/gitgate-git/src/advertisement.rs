//! Parsing of smart HTTP ref advertisements.
//!
//! An info-refs body looks like:
//!
//! ```text
//! 001e# service=git-upload-pack\n
//! 0000
//! 0103<oid> HEAD\0multi_ack thin-pack side-band ...\n
//! 003f<oid> refs/heads/main\n
//! 0000
//! ```
//!
//! The service header is optional (backends that stream the body to a git
//! client over something other than HTTP leave it out). An empty repository
//! advertises a single `capabilities^{}` line with the zero id. Protocol v2
//! replaces the ref list with `version 2` and one capability per line.

use crate::pktline::{PktLine, PktLineReader};
use crate::{GitError, GitService, Result};

/// Object id git uses for "no object".
pub const ZERO_ID: &str = "0000000000000000000000000000000000000000";

const SERVICE_PREFIX: &str = "# service=";
const EMPTY_REPO_MARKER: &str = "capabilities^{}";

/// A single advertised reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvertisedRef {
    /// Hex object id the ref points to.
    pub id: String,
    /// Full ref name, e.g. `refs/heads/main` or `HEAD`.
    pub name: String,
}

impl AdvertisedRef {
    /// True for the `^{}` entries that carry a peeled tag target.
    pub fn is_peeled(&self) -> bool {
        self.name.ends_with("^{}")
    }
}

/// A parsed info-refs response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advertisement {
    /// Service named in the `# service=` header, if present.
    pub service: Option<GitService>,
    /// Protocol version the server answered with (0 when not announced).
    pub version: u8,
    /// Capabilities, in the order the server listed them.
    pub capabilities: Vec<String>,
    /// Advertised refs in server order.
    pub refs: Vec<AdvertisedRef>,
}

impl Advertisement {
    /// Parses an info-refs body.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let mut reader = PktLineReader::new(body);
        let mut adv = Advertisement::default();

        let mut pkt = next_required(&mut reader)?;
        if let Some(line) = pkt.as_str() {
            if let Some(name) = line.strip_prefix(SERVICE_PREFIX) {
                let service = name.parse::<GitService>().map_err(|_| {
                    GitError::InvalidAdvertisement(format!("unknown service {name:?}"))
                })?;
                adv.service = Some(service);

                if next_required(&mut reader)? != PktLine::Flush {
                    return Err(GitError::InvalidAdvertisement(
                        "service header not followed by flush".to_string(),
                    ));
                }
                pkt = next_required(&mut reader)?;
            }
        }

        let mut first = true;
        loop {
            let line = match &pkt {
                PktLine::Flush => break,
                PktLine::Data(_) => pkt.as_str().ok_or_else(|| {
                    GitError::InvalidAdvertisement("ref line is not utf-8".to_string())
                })?,
                other => {
                    return Err(GitError::InvalidAdvertisement(format!(
                        "unexpected {other:?} packet"
                    )))
                }
            };

            if first && line.starts_with("version ") {
                adv.version = parse_version(line)?;
            } else if adv.version == 2 {
                adv.capabilities.push(line.to_string());
            } else {
                adv.parse_ref_line(line, first && adv.capabilities.is_empty())?;
                first = false;
            }
            pkt = next_required(&mut reader)?;
        }

        tracing::trace!(
            refs = adv.refs.len(),
            capabilities = adv.capabilities.len(),
            version = adv.version,
            "Parsed ref advertisement"
        );

        Ok(adv)
    }

    fn parse_ref_line(&mut self, line: &str, carries_capabilities: bool) -> Result<()> {
        let (refspec, caps) = match line.split_once('\0') {
            Some((refspec, caps)) => (refspec, Some(caps)),
            None => (line, None),
        };

        if let Some(caps) = caps {
            if !carries_capabilities {
                return Err(GitError::InvalidAdvertisement(
                    "capabilities after the first ref".to_string(),
                ));
            }
            self.capabilities
                .extend(caps.split_ascii_whitespace().map(str::to_string));
        }

        let (id, name) = refspec.split_once(' ').ok_or_else(|| {
            GitError::InvalidAdvertisement(format!("malformed ref line {refspec:?}"))
        })?;
        validate_object_id(id)?;

        if name == EMPTY_REPO_MARKER {
            if id != ZERO_ID {
                return Err(GitError::InvalidAdvertisement(
                    "capabilities^{} must point at the zero id".to_string(),
                ));
            }
            return Ok(());
        }
        if name.is_empty() {
            return Err(GitError::InvalidAdvertisement("empty ref name".to_string()));
        }

        self.refs.push(AdvertisedRef {
            id: id.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }

    /// Returns the ref with the given name.
    pub fn find(&self, name: &str) -> Option<&AdvertisedRef> {
        self.refs.iter().find(|r| r.name == name)
    }

    /// Returns the advertised HEAD, if any.
    pub fn head(&self) -> Option<&AdvertisedRef> {
        self.find("HEAD")
    }

    /// Returns true if the server listed `name`, bare or as `name=value`.
    pub fn has_capability(&self, name: &str) -> bool {
        self.capability(name).is_some()
    }

    /// Returns the value of a `name=value` capability, or "" for a bare one.
    pub fn capability(&self, name: &str) -> Option<&str> {
        self.capabilities.iter().find_map(|cap| {
            if cap == name {
                Some("")
            } else {
                cap.strip_prefix(name)?.strip_prefix('=')
            }
        })
    }

    /// True if the advertisement describes a repository with no refs.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }
}

fn next_required<R: std::io::Read>(reader: &mut PktLineReader<R>) -> Result<PktLine> {
    reader
        .read()?
        .ok_or_else(|| GitError::InvalidAdvertisement("unexpected end of input".to_string()))
}

fn parse_version(line: &str) -> Result<u8> {
    match line.trim_start_matches("version ") {
        "1" => Ok(1),
        "2" => Ok(2),
        other => Err(GitError::InvalidAdvertisement(format!(
            "unsupported protocol version {other:?}"
        ))),
    }
}

fn validate_object_id(id: &str) -> Result<()> {
    if id.len() != 40 && id.len() != 64 {
        return Err(GitError::InvalidAdvertisement(format!(
            "object id {id:?} has length {}",
            id.len()
        )));
    }
    hex::decode(id)
        .map(|_| ())
        .map_err(|_| GitError::InvalidAdvertisement(format!("object id {id:?} is not hex")))
}
