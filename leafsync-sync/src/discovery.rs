//! Project discovery.
//!
//! Reconciles the remote project list against the mirrors already present
//! under a root directory and creates a mirror for every unseen project.
//!
//! ```text
//! <root>/
//!   My_Paper/        .projectid = p1
//!   My_Paper_p2/     .projectid = p2   (second project named "My Paper")
//!   scratch/         no marker → not a mirror, left alone
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use leafsync_core::{identity, MappingTable, ProjectId, RemoteProject};

use crate::error::{io_err, SyncError};
use crate::vcs::Vcs;

/// Result of a discovery run.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOutcome {
    /// Every mirror under the root, pre-existing and new.
    pub table: MappingTable,
    /// Mirrors created by this run, in listing order.
    pub created: Vec<PathBuf>,
}

/// Build the mapping table from the markers of `root`'s immediate children.
///
/// Children that are not directories, or have no usable marker, are skipped.
pub fn scan(root: &Path) -> Result<MappingTable, SyncError> {
    let mut table = MappingTable::new();
    let entries = std::fs::read_dir(root).map_err(|e| io_err(root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(root, e))?;
        let path = entry.path();
        match identity::read(&path) {
            Ok(id) => {
                tracing::debug!(id = %id, "found mirror {}", path.display());
                table.insert(path, id);
            }
            Err(e) if e.is_not_mirror() => {
                tracing::debug!("not a mirror: {}", path.display());
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(table)
}

/// Directory name for a project: trimmed, whitespace runs and path
/// separators turned into `_`. Falls back to the id when nothing usable is
/// left.
pub fn mirror_dir_name(name: &str, id: &ProjectId) -> String {
    let sanitized = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .replace(['/', '\\'], "_");
    match sanitized.as_str() {
        "" | "." | ".." => id.to_string(),
        _ => sanitized,
    }
}

/// Scan `root`, then create, mark and init a mirror for every project in
/// `projects` whose id no mirror holds yet.
pub fn discover(
    root: &Path,
    projects: &[RemoteProject],
    vcs: &dyn Vcs,
) -> Result<DiscoveryOutcome, SyncError> {
    let mut table = scan(root)?;
    let mut created = Vec::new();

    for project in projects {
        if table.contains_id(&project.id) {
            continue;
        }
        let dir = create_mirror_dir(root, project)?;
        if let Err(e) = init_mirror(&dir, &project.id, vcs) {
            // A half-built mirror would be skipped by every later scan.
            if let Err(cleanup) = std::fs::remove_dir_all(&dir) {
                tracing::warn!(error = %cleanup, "could not remove {}", dir.display());
            }
            return Err(e);
        }
        tracing::info!(id = %project.id, name = %project.name, "created mirror {}", dir.display());
        table.insert(dir.clone(), project.id.clone());
        created.push(dir);
    }

    Ok(DiscoveryOutcome { table, created })
}

/// Repository first, marker last: a directory only counts as a mirror once
/// both exist.
fn init_mirror(dir: &Path, id: &ProjectId, vcs: &dyn Vcs) -> Result<(), SyncError> {
    vcs.init(dir)?;
    identity::write(dir, id)?;
    Ok(())
}

/// `root/<name>`, or `root/<name>_<id>` when the first is taken.
fn create_mirror_dir(root: &Path, project: &RemoteProject) -> Result<PathBuf, SyncError> {
    let name = mirror_dir_name(&project.name, &project.id);
    let first = root.join(&name);
    match std::fs::create_dir(&first) {
        Ok(()) => return Ok(first),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
        Err(e) => return Err(io_err(&first, e)),
    }

    let second = root.join(format!("{name}_{}", project.id));
    tracing::debug!(
        "{} exists, using {}",
        first.display(),
        second.display()
    );
    match std::fs::create_dir(&second) {
        Ok(()) => Ok(second),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(SyncError::DirectoryCollision { first, second })
        }
        Err(e) => Err(io_err(&second, e)),
    }
}
