//! # leafsync-remote
//!
//! The remote service, seen through two capabilities: list the user's
//! projects and fetch one project's ZIP archive. Everything service-specific
//! (login flow, markup scraping) stays inside this crate.
//!
//! - [`RemoteSession`] — the capability trait the sync engine depends on
//! - [`OverleafSession`] — ureq-backed implementation with a cookie session
//! - [`scrape`] — token and project-list extraction from page markup

pub mod error;
pub mod scrape;
pub mod session;

pub use error::RemoteError;
pub use session::OverleafSession;

use leafsync_core::{ProjectId, RemoteProject};

/// Authenticated access to the remote service.
///
/// Implementations log in lazily and reuse one session for every call.
pub trait RemoteSession {
    /// Every project visible to the logged-in user, in the service's order.
    fn list_projects(&mut self) -> Result<Vec<RemoteProject>, RemoteError>;

    /// Raw ZIP bytes of the full tree of project `id`.
    fn fetch_archive(&mut self, id: &ProjectId) -> Result<Vec<u8>, RemoteError>;
}
