//! Smart HTTP service names.

use crate::GitError;
use std::fmt;
use std::str::FromStr;

/// One of the two git services reachable over smart HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitService {
    /// `git-upload-pack`, serves fetch and clone.
    UploadPack,
    /// `git-receive-pack`, serves push.
    ReceivePack,
}

impl GitService {
    /// Returns both services.
    pub const fn all() -> [GitService; 2] {
        [GitService::UploadPack, GitService::ReceivePack]
    }

    /// Returns the wire token for the service.
    pub const fn as_str(&self) -> &'static str {
        match self {
            GitService::UploadPack => "git-upload-pack",
            GitService::ReceivePack => "git-receive-pack",
        }
    }

    /// Content type of the info-refs response for this service.
    pub const fn advertisement_content_type(&self) -> &'static str {
        match self {
            GitService::UploadPack => "application/x-git-upload-pack-advertisement",
            GitService::ReceivePack => "application/x-git-receive-pack-advertisement",
        }
    }
}

impl FromStr for GitService {
    type Err = GitError;

    /// Parses a service token. Matching is exact: no trimming, no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git-upload-pack" => Ok(GitService::UploadPack),
            "git-receive-pack" => Ok(GitService::ReceivePack),
            other => Err(GitError::UnsupportedService(other.to_string())),
        }
    }
}

impl fmt::Display for GitService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
