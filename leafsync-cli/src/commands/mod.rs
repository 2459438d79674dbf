//! Subcommands and the options they share.

pub mod output;
pub mod sync;
pub mod sync_all;

use std::path::PathBuf;

use anyhow::{Context, Result};

use leafsync_core::{config, Config};
use leafsync_sync::GitCli;

/// Options that apply to every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalOpts {
    pub url: String,
    pub user_agent: String,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub author: Option<(String, String)>,
}

impl GlobalOpts {
    /// Load credentials and build the run's [`Config`].
    pub fn load_config(&self) -> Result<Config> {
        let credentials = match &self.config {
            Some(path) => config::load_credentials_from(path),
            None => config::load_credentials(),
        }
        .context("failed to load credentials")?;
        let config =
            Config::new(self.url.clone(), credentials).with_user_agent(self.user_agent.clone());
        tracing::debug!(url = %config.base_url, email = %config.credentials.email, "configuration loaded");
        Ok(config)
    }

    pub fn git(&self) -> GitCli {
        match &self.author {
            Some((name, email)) => GitCli::new().with_identity(name, email),
            None => GitCli::new(),
        }
    }
}
