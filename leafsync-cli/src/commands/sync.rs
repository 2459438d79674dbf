//! `leafsync sync [path]` — sync one existing mirror.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use leafsync_remote::OverleafSession;
use leafsync_sync::pipeline::{self, SyncScope};

use super::{output, GlobalOpts};

/// Arguments for `leafsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Mirror directory (must contain a .projectid marker).
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

impl SyncArgs {
    pub fn run(self, opts: &GlobalOpts) -> Result<()> {
        let config = opts.load_config()?;
        let mut session = OverleafSession::new(&config);
        let git = opts.git();

        let report = pipeline::run(&mut session, &git, SyncScope::Mirror(self.path.clone()))
            .with_context(|| format!("sync failed for '{}'", self.path.display()))?;

        output::print_report(&report, opts.json)
    }
}
