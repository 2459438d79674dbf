//! Sync orchestration and the shared pipeline entrypoint used by the CLI.
//!
//! Per project, per pass:
//!
//! ```text
//! Idle → Downloading → Materialized → Staged → Committed → Pushed
//!                                           ↘ Unchanged  ↘ NotPushed
//! ```
//!
//! Nothing is persisted between passes; every run starts at `Idle`.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use leafsync_core::{identity, ProjectId};
use leafsync_remote::RemoteSession;

use crate::archive::materialize;
use crate::discovery::discover;
use crate::error::{io_err, SyncError};
use crate::vcs::{Vcs, COMMIT_MESSAGE};

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Where a project's sync currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Idle,
    Downloading,
    Materialized,
    Staged,
    Committed,
    Unchanged,
    Pushed,
    NotPushed,
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SyncState::Idle => "idle",
            SyncState::Downloading => "downloading",
            SyncState::Materialized => "materialized",
            SyncState::Staged => "staged",
            SyncState::Committed => "committed",
            SyncState::Unchanged => "unchanged",
            SyncState::Pushed => "pushed",
            SyncState::NotPushed => "not-pushed",
        };
        f.write_str(s)
    }
}

/// Whether the snapshot produced a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum CommitOutcome {
    /// Working tree matched the last commit; nothing was committed or pushed.
    Unchanged,
    Committed { pushed: bool },
}

/// Outcome of syncing one mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOutcome {
    pub path: PathBuf,
    pub id: ProjectId,
    pub files_written: usize,
    pub commit: CommitOutcome,
}

/// A mirror whose sync failed during a full pass.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectFailure {
    pub path: PathBuf,
    pub id: ProjectId,
    pub error: String,
}

/// Summary of a sync pass.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    /// Mirrors created by discovery during this pass.
    pub created: Vec<PathBuf>,
    pub projects: Vec<ProjectOutcome>,
    pub failures: Vec<ProjectFailure>,
}

impl SyncReport {
    fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            created: Vec::new(),
            projects: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn commits(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| matches!(p.commit, CommitOutcome::Committed { .. }))
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Syncer
// ---------------------------------------------------------------------------

/// Drives sync passes against one remote session and one VCS.
pub struct Syncer<'a> {
    session: &'a mut dyn RemoteSession,
    vcs: &'a dyn Vcs,
}

impl<'a> Syncer<'a> {
    pub fn new(session: &'a mut dyn RemoteSession, vcs: &'a dyn Vcs) -> Self {
        Self { session, vcs }
    }

    /// Sync one existing mirror. Fails if `path` has no identity marker.
    pub fn sync_project(&mut self, path: &Path) -> Result<ProjectOutcome, SyncError> {
        let id = identity::read(path)?;
        self.sync_mirror(path, &id)
    }

    /// Discover new projects under `root` (creating it if absent), then sync
    /// every mirror.
    ///
    /// Discovery and authentication failures abort the pass; any other
    /// per-project failure is recorded in [`SyncReport::failures`] and the
    /// pass moves on to the next mirror.
    pub fn sync_all(&mut self, root: &Path) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::new(Utc::now());

        std::fs::create_dir_all(root).map_err(|e| io_err(root, e))?;
        let projects = self.session.list_projects()?;
        let discovery = discover(root, &projects, self.vcs)?;
        tracing::info!(
            mirrors = discovery.table.len(),
            created = discovery.created.len(),
            "discovery finished"
        );
        report.created = discovery.created;

        for (dir, id) in discovery.table.iter() {
            match self.sync_mirror(dir, id) {
                Ok(outcome) => report.projects.push(outcome),
                Err(e) if e.aborts_pass() => return Err(e),
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "sync failed for {}", dir.display());
                    report.failures.push(ProjectFailure {
                        path: dir.to_path_buf(),
                        id: id.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Download → materialize → stage → (commit → push) for a known mirror.
    fn sync_mirror(&mut self, dir: &Path, id: &ProjectId) -> Result<ProjectOutcome, SyncError> {
        transition(dir, SyncState::Idle, SyncState::Downloading);
        let bytes = self.session.fetch_archive(id)?;

        let summary = materialize(&bytes, dir)?;
        transition(dir, SyncState::Downloading, SyncState::Materialized);

        let commit = commit_snapshot(self.vcs, dir)?;
        Ok(ProjectOutcome {
            path: dir.to_path_buf(),
            id: id.clone(),
            files_written: summary.files_written,
            commit,
        })
    }
}

/// Stage everything; commit and push only if that left the tree dirty.
pub fn commit_snapshot(vcs: &dyn Vcs, dir: &Path) -> Result<CommitOutcome, SyncError> {
    vcs.stage_all(dir)?;
    transition(dir, SyncState::Materialized, SyncState::Staged);

    if !vcs.is_dirty(dir)? {
        transition(dir, SyncState::Staged, SyncState::Unchanged);
        tracing::info!("unchanged: {}", dir.display());
        return Ok(CommitOutcome::Unchanged);
    }

    vcs.commit(dir, COMMIT_MESSAGE)?;
    transition(dir, SyncState::Staged, SyncState::Committed);
    tracing::info!("committed: {}", dir.display());

    let pushed = if vcs.has_remote(dir)? {
        vcs.push(dir)?;
        transition(dir, SyncState::Committed, SyncState::Pushed);
        tracing::info!("pushed: {}", dir.display());
        true
    } else {
        transition(dir, SyncState::Committed, SyncState::NotPushed);
        false
    };
    Ok(CommitOutcome::Committed { pushed })
}

fn transition(dir: &Path, from: SyncState, to: SyncState) {
    tracing::debug!(%from, %to, "{}", dir.display());
}

// ---------------------------------------------------------------------------
// Shared entrypoint
// ---------------------------------------------------------------------------

/// Scope for a sync pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// One existing mirror directory.
    Mirror(PathBuf),
    /// Discovery plus every mirror under a root directory.
    All(PathBuf),
}

/// Run the sync pipeline for a scope.
///
/// A `Mirror` run yields a report with a single project; its error is
/// returned directly rather than recorded as a failure.
pub fn run(
    session: &mut dyn RemoteSession,
    vcs: &dyn Vcs,
    scope: SyncScope,
) -> Result<SyncReport, SyncError> {
    let mut syncer = Syncer::new(session, vcs);
    match scope {
        SyncScope::All(root) => syncer.sync_all(&root),
        SyncScope::Mirror(path) => {
            let mut report = SyncReport::new(Utc::now());
            report.projects.push(syncer.sync_project(&path)?);
            Ok(report)
        }
    }
}
