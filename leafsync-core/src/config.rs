//! Runtime configuration.
//!
//! A [`Config`] is built once by the binary and handed to every component
//! that needs the base URL or credentials. Nothing here is global.
//!
//! # Credentials file
//!
//! ```toml
//! # ~/.overleaf
//! [auth]
//! email = "me@example.com"
//! password = "secret"
//! ```
//!
//! Files written for the older INI format, with unquoted values, are read
//! too. Values are taken verbatim: no quote stripping, no escapes.
//!
//! As with the rest of the workspace, loaders come in two forms:
//! - `load_credentials_at(home)` — explicit home; used in tests with `TempDir`
//! - `load_credentials()` — derives home from `dirs::home_dir()`

use std::fmt;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use serde::Deserialize;

use crate::error::ConfigError;

/// Production URL of the remote service.
pub const DEFAULT_BASE_URL: &str = "https://www.overleaf.com";

/// User-Agent sent on every request. The login flow is served to browsers,
/// so this matches a desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/86.0.4240.75 Safari/537.36";

/// Name of the credentials file under the user's home directory.
pub const CREDENTIALS_FILE: &str = ".overleaf";

/// Login credentials for the remote service.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything a sync run needs to reach the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL, without trailing slash.
    pub base_url: String,
    pub credentials: Credentials,
    pub user_agent: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            base_url,
            credentials,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[derive(Deserialize)]
struct CredentialsFile {
    auth: Credentials,
}

/// `<home>/.overleaf` — pure, no I/O.
pub fn credentials_path_at(home: &Path) -> PathBuf {
    home.join(CREDENTIALS_FILE)
}

/// Load credentials from an explicit file path.
pub fn load_credentials_from(path: &Path) -> Result<Credentials, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match toml::from_str::<CredentialsFile>(&contents) {
        Ok(file) => Ok(file.auth),
        // The TOML error is the one reported; it names the offending line.
        Err(source) => credentials_from_ini(&contents).ok_or_else(|| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// `[auth]` section of an INI file, if it has both keys.
fn credentials_from_ini(contents: &str) -> Option<Credentials> {
    let opts = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(contents, opts).ok()?;
    let auth = ini.section(Some("auth"))?;
    Some(Credentials {
        email: auth.get("email")?.to_owned(),
        password: auth.get("password")?.to_owned(),
    })
}

/// Load credentials from `<home>/.overleaf`.
pub fn load_credentials_at(home: &Path) -> Result<Credentials, ConfigError> {
    load_credentials_from(&credentials_path_at(home))
}

/// `load_credentials_at` convenience wrapper.
pub fn load_credentials() -> Result<Credentials, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
    load_credentials_at(&home)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
