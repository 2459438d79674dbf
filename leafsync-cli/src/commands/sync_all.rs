//! `leafsync sync_all [path]` — discovery plus sync of every mirror.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use leafsync_remote::OverleafSession;
use leafsync_sync::pipeline::{self, SyncScope};

use super::{output, GlobalOpts};

/// Arguments for `leafsync sync_all`.
#[derive(Args, Debug)]
pub struct SyncAllArgs {
    /// Root directory holding one mirror per remote project; created if absent.
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

impl SyncAllArgs {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let config = opts.load_config()?;
        let mut session = OverleafSession::new(&config);
        let git = opts.git();

        let report = pipeline::run(&mut session, &git, SyncScope::All(self.path.clone()))
            .with_context(|| format!("sync_all failed for '{}'", self.path.display()))?;

        output::print_report(&report, opts.json)?;
        if !report.is_success() {
            anyhow::bail!(
                "{} of {} project(s) failed to sync",
                report.failures.len(),
                report.failures.len() + report.projects.len()
            );
        }
        Ok(())
    }
}
