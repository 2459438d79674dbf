//! Archive materializer.
//!
//! Writes every entry of a downloaded ZIP snapshot into a mirror directory:
//!
//! 1. Resolve the entry's enclosed relative path (entries escaping the
//!    directory are skipped).
//! 2. Skip reserved paths (`.git` at any depth, the root `.projectid`).
//! 3. Directory entries → `create_dir_all`.
//! 4. File entries → create parents, then truncate-and-write.
//!
//! Sync is additive: files present locally but absent from the archive are
//! left alone, so deletions made on the remote side are not mirrored.

use std::io::Cursor;
use std::path::{Component, Path};

use serde::Serialize;

use leafsync_core::identity::MARKER_FILE;

use crate::error::{io_err, SyncError};

/// What a single `materialize` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaterializeSummary {
    pub files_written: usize,
    pub dirs_created: usize,
    pub skipped: usize,
}

/// Extract `bytes` (a ZIP archive) into `dir`, overwriting same-named files.
pub fn materialize(bytes: &[u8], dir: &Path) -> Result<MaterializeSummary, SyncError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut summary = MaterializeSummary::default();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let Some(rel) = entry.enclosed_name().map(|p| p.to_path_buf()) else {
            tracing::warn!(entry = entry.name(), "skipping archive entry with unsafe path");
            summary.skipped += 1;
            continue;
        };
        if is_reserved(&rel) {
            tracing::warn!(entry = entry.name(), "skipping archive entry on a reserved path");
            summary.skipped += 1;
            continue;
        }

        let out = dir.join(&rel);
        if entry.is_dir() {
            std::fs::create_dir_all(&out).map_err(|e| io_err(&out, e))?;
            summary.dirs_created += 1;
            continue;
        }

        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
        }
        let mut file = std::fs::File::create(&out).map_err(|e| io_err(&out, e))?;
        std::io::copy(&mut entry, &mut file).map_err(|e| io_err(&out, e))?;
        tracing::debug!("extracted: {}", out.display());
        summary.files_written += 1;
    }

    Ok(summary)
}

/// A `.git` at any depth, or the root identity marker. The first belongs to
/// git (nested ones would be staged as gitlinks), the second to the mirror.
fn is_reserved(rel: &Path) -> bool {
    if rel.components().any(|c| c == Component::Normal(".git".as_ref())) {
        return true;
    }
    rel == Path::new(MARKER_FILE)
}
