//! # leafsync-sync
//!
//! The synchronization engine: discovery of new remote projects, archive
//! materialization, and the stage → check → commit → push protocol.
//!
//! Call [`pipeline::run`] with a [`SyncScope`], or drive a [`Syncer`]
//! directly.

pub mod archive;
pub mod discovery;
pub mod error;
pub mod pipeline;
pub mod vcs;

pub use archive::{materialize, MaterializeSummary};
pub use discovery::{discover, scan, DiscoveryOutcome};
pub use error::{SyncError, VcsError};
pub use pipeline::{
    CommitOutcome, ProjectFailure, ProjectOutcome, SyncReport, SyncScope, SyncState, Syncer,
};
pub use vcs::{GitCli, Vcs, COMMIT_MESSAGE};
