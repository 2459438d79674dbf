//! leafsync: mirror remote LaTeX projects into local git repositories.
//!
//! # Usage
//!
//! ```text
//! leafsync [--url <base>] [--config <file>] [--json] sync [path]
//! leafsync [--url <base>] [--config <file>] [--json] sync_all [path]
//! ```
//!
//! Credentials are read from `~/.overleaf` (or `--config`), never from the
//! command line.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{sync::SyncArgs, sync_all::SyncAllArgs, GlobalOpts};
use leafsync_core::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "leafsync",
    version,
    about = "Mirror remote LaTeX projects into local git repositories",
    long_about = None,
)]
struct Cli {
    /// Base URL of the service.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    url: String,

    /// User-Agent header sent to the service.
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Credentials file to use instead of ~/.overleaf.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit a machine-readable JSON report on stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Commit author name, overriding git config.
    #[arg(long, global = true, requires = "author_email")]
    author_name: Option<String>,

    /// Commit author email, overriding git config.
    #[arg(long, global = true, requires = "author_name")]
    author_email: Option<String>,

    /// Log debug detail to stderr (same as RUST_LOG=debug).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sync one existing mirror directory.
    Sync(SyncArgs),

    /// Discover new remote projects and sync every mirror under a directory.
    #[command(name = "sync_all", alias = "sync-all")]
    SyncAll(SyncAllArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let opts = GlobalOpts {
        url: cli.url,
        user_agent: cli.user_agent,
        config: cli.config,
        json: cli.json,
        author: cli.author_name.zip(cli.author_email),
    };
    match cli.command {
        Commands::Sync(args) => args.run(&opts),
        Commands::SyncAll(args) => args.run(&opts),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
