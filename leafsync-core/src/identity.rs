//! Identity store: the per-mirror `.projectid` marker.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   <mirror>/
//!     .projectid     (raw remote id, no trailing newline)
//!     .git/
//!     …              (extracted project tree)
//! ```
//!
//! The marker is written once, when discovery creates the mirror, and read
//! on every later run. A directory without one is not a mirror.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::IdentityError;
use crate::types::ProjectId;

/// Filename of the identity marker inside a mirror directory.
pub const MARKER_FILE: &str = ".projectid";

/// `<dir>/.projectid` — pure, no I/O.
pub fn marker_path(dir: &Path) -> PathBuf {
    dir.join(MARKER_FILE)
}

/// Read the remote id stored in `dir`'s marker, whitespace-trimmed.
///
/// Returns `IdentityError::NotFound` when `dir` is not a directory or has no
/// marker, and `IdentityError::Empty` when the marker is blank.
pub fn read(dir: &Path) -> Result<ProjectId, IdentityError> {
    let path = marker_path(dir);
    if !dir.is_dir() {
        return Err(IdentityError::NotFound { path });
    }
    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(IdentityError::NotFound { path })
        }
        // `.projectid` is itself a directory.
        Err(_) if path.is_dir() => return Err(IdentityError::NotFound { path }),
        Err(source) => return Err(IdentityError::Io { path, source }),
    };
    let id = contents.trim();
    if id.is_empty() {
        return Err(IdentityError::Empty { path });
    }
    Ok(ProjectId::from(id))
}

/// Write `id` into `dir`'s marker.
///
/// Write flow: `.projectid.tmp` sibling → `rename`, so a crash never leaves a
/// half-written marker behind.
pub fn write(dir: &Path, id: &ProjectId) -> Result<(), IdentityError> {
    let path = marker_path(dir);
    let tmp = dir.join(format!("{MARKER_FILE}.tmp"));
    std::fs::write(&tmp, id.as_str()).map_err(|source| IdentityError::Io {
        path: tmp.clone(),
        source,
    })?;
    if let Err(source) = std::fs::rename(&tmp, &path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(IdentityError::Io { path, source });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
