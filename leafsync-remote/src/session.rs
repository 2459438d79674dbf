//! ureq-backed session against an Overleaf-compatible service.
//!
//! One [`ureq::Agent`] (with its cookie store) lives for the whole process;
//! it is the only session cache. Login happens on first use.

use std::io::Read;

use leafsync_core::{Config, Credentials, ProjectId, RemoteProject};

use crate::error::RemoteError;
use crate::scrape;
use crate::RemoteSession;

/// Authenticated HTTP session.
pub struct OverleafSession {
    base_url: String,
    credentials: Credentials,
    agent: ureq::Agent,
    logged_in: bool,
}

impl OverleafSession {
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(&config.user_agent)
            .build();
        Self {
            base_url: config.base_url.clone(),
            credentials: config.credentials.clone(),
            agent,
            logged_in: false,
        }
    }

    /// `<base>/<path>`; `path` may or may not start with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` with the logged-in session and return the body bytes.
    pub fn fetch_authenticated(&mut self, path: &str) -> Result<Vec<u8>, RemoteError> {
        self.ensure_login()?;
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self.agent.get(&url).call().map_err(|e| http_err(&url, e))?;
        read_body(&url, response)
    }

    fn ensure_login(&mut self) -> Result<(), RemoteError> {
        if self.logged_in {
            return Ok(());
        }

        let login_url = self.url("login");
        tracing::debug!(url = %login_url, "fetching login page");
        let page = self
            .agent
            .get(&login_url)
            .call()
            .map_err(|e| http_err(&login_url, e))?;
        let page = String::from_utf8_lossy(&read_body(&login_url, page)?).into_owned();
        let token = scrape::csrf_token(&page).ok_or(RemoteError::CsrfTokenNotFound)?;

        let result = self.agent.post(&login_url).send_form(&[
            ("_csrf", token.as_str()),
            ("email", self.credentials.email.as_str()),
            ("password", self.credentials.password.as_str()),
        ]);
        match result {
            Ok(_) => {}
            Err(ureq::Error::Status(status @ (401 | 403), _)) => {
                return Err(RemoteError::LoginRejected { status })
            }
            Err(e) => return Err(http_err(&login_url, e)),
        }

        tracing::info!(email = %self.credentials.email, "logged in");
        self.logged_in = true;
        Ok(())
    }
}

impl RemoteSession for OverleafSession {
    fn list_projects(&mut self) -> Result<Vec<RemoteProject>, RemoteError> {
        let body = self.fetch_authenticated("/")?;
        let projects = scrape::projects(&String::from_utf8_lossy(&body))?;
        tracing::debug!(count = projects.len(), "listed remote projects");
        Ok(projects)
    }

    fn fetch_archive(&mut self, id: &ProjectId) -> Result<Vec<u8>, RemoteError> {
        self.fetch_authenticated(&format!("project/{id}/download/zip"))
    }
}

fn http_err(url: &str, source: ureq::Error) -> RemoteError {
    RemoteError::Http {
        url: url.to_owned(),
        source: Box::new(source),
    }
}

fn read_body(url: &str, response: ureq::Response) -> Result<Vec<u8>, RemoteError> {
    let mut body = Vec::new();
    response
        .into_reader()
        .read_to_end(&mut body)
        .map_err(|source| RemoteError::Io {
            url: url.to_owned(),
            source,
        })?;
    Ok(body)
}
