//! leafsync core library: domain types, identity markers, configuration, errors.
//!
//! - [`types`] — [`ProjectId`], [`RemoteProject`], [`MappingTable`]
//! - [`identity`] — read / write the per-mirror `.projectid` marker
//! - [`config`] — explicit runtime configuration and credential loading
//! - [`error`] — [`IdentityError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod identity;
pub mod types;

pub use config::{Config, Credentials, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
pub use error::{ConfigError, IdentityError};
pub use types::{MappingTable, ProjectId, RemoteProject};
