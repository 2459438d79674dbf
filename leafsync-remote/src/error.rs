//! Error types for leafsync-remote.

use thiserror::Error;

/// All errors that can arise talking to the remote service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure or an unexpected HTTP status.
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// Reading a response body failed.
    #[error("failed to read response from {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The login page carried no anti-forgery token.
    #[error("no CSRF token found on the login page; the page layout may have changed")]
    CsrfTokenNotFound,

    /// The service refused the credentials.
    #[error("login rejected by the server (HTTP {status}); check the credentials file")]
    LoginRejected { status: u16 },

    /// The landing page carried no project metadata.
    #[error("no project list found on the landing page; not logged in, or the page layout changed")]
    ProjectListNotFound,

    /// The embedded project metadata was not the JSON we expect.
    #[error("project list JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RemoteError {
    /// Authentication-class failures, which abort the whole invocation.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::CsrfTokenNotFound | Self::LoginRejected { .. })
    }
}
