//! Error types for leafsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading or writing an identity marker.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The path is not a directory, or it has no marker file.
    #[error("not a mirror: no identity marker at {path}")]
    NotFound { path: PathBuf },

    /// The marker exists but holds nothing but whitespace.
    #[error("identity marker at {path} is empty")]
    Empty { path: PathBuf },

    /// Any other I/O failure, with the marker path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IdentityError {
    /// True when the directory simply isn't a mirror.
    ///
    /// A directory scan skips these; anything else is a real failure.
    pub fn is_not_mirror(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Empty { .. })
    }
}

/// Errors from loading the credentials file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or pass --config")]
    HomeNotFound,

    /// The credentials file does not exist.
    #[error("credentials file not found at {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Neither TOML nor INI yielded an `[auth]` table with both keys. The
    /// source is the TOML error.
    #[error("failed to parse credentials at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
