//! Human and JSON rendering of a [`SyncReport`].

use anyhow::Result;
use colored::Colorize;

use leafsync_sync::{CommitOutcome, SyncReport};

pub fn print_report(report: &SyncReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    for path in &report.created {
        println!("{} new mirror {}", "+".green(), path.display());
    }

    for p in &report.projects {
        let line = match p.commit {
            CommitOutcome::Unchanged => format!("{} {}: unchanged", "·".dimmed(), p.path.display()),
            CommitOutcome::Committed { pushed: true } => format!(
                "{} {}: committed and pushed ({} files)",
                "✓".green(),
                p.path.display(),
                p.files_written
            ),
            CommitOutcome::Committed { pushed: false } => format!(
                "{} {}: committed ({} files, no remote)",
                "✓".green(),
                p.path.display(),
                p.files_written
            ),
        };
        println!("{line}");
    }

    for f in &report.failures {
        println!("{} {} ({}): {}", "✗".red(), f.path.display(), f.id, f.error);
    }

    if report.projects.is_empty() && report.failures.is_empty() {
        println!("No mirrors found and no remote projects listed.");
    }
    Ok(())
}
