//! Error types for leafsync-sync.

use std::path::PathBuf;

use thiserror::Error;

use leafsync_core::error::IdentityError;
use leafsync_remote::RemoteError;

/// All errors that can arise from a sync pass.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("version control error: {0}")]
    Vcs(#[from] VcsError),

    /// The downloaded bytes were not a readable ZIP archive.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Both the plain and the id-suffixed mirror directory names were taken.
    #[error("cannot create mirror directory: {first} and {second} both exist")]
    DirectoryCollision { first: PathBuf, second: PathBuf },
}

impl SyncError {
    /// Failures after which no further project can succeed.
    pub fn aborts_pass(&self) -> bool {
        matches!(self, Self::Remote(e) if e.is_auth())
    }
}

/// Errors from invoking the version-control binary.
#[derive(Debug, Error)]
pub enum VcsError {
    /// The binary could not be started at all.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// `init` on a directory that already has a repository.
    #[error("{dir} is already a repository")]
    AlreadyInitialized { dir: PathBuf },

    /// The mirror directory is not the root of its own repository.
    #[error("{dir} has no repository of its own")]
    NotARepository { dir: PathBuf },

    /// The binary ran and exited unsuccessfully.
    #[error("`{command}` failed in {dir} ({status}): {stderr}")]
    Failed {
        command: String,
        dir: PathBuf,
        status: String,
        stderr: String,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
