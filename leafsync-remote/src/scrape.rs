//! Markup scraping for the login token and the project list.
//!
//! The service embeds both as `<meta>` tags. The patterns below are the only
//! place that knows their shape; when the service changes its markup, this is
//! the file to fix.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use leafsync_core::RemoteProject;

use crate::error::RemoteError;

static CSRF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta\s+name="ol-csrfToken"\s+content="([^"]+)""#).expect("csrf pattern")
});

/// Current layout: an object whose `projects` field holds the list.
static PROJECTS_BLOB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<meta\s+name="ol-prefetchedProjectsBlob"\s+data-type="json"\s+content="(.*?)""#)
        .expect("projects blob pattern")
});

/// Older layout: a bare JSON array.
static PROJECTS_LEGACY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<meta\s+name="ol-projects"\s+data-type="json"\s+content="(.*?)""#)
        .expect("legacy projects pattern")
});

#[derive(Deserialize)]
struct ProjectsBlob {
    projects: Vec<RemoteProject>,
}

/// Extract the per-session anti-forgery token from the login page.
pub fn csrf_token(html: &str) -> Option<String> {
    CSRF.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| html_escape::decode_html_entities(m.as_str()).into_owned())
}

/// Extract the project list from the authenticated landing page.
///
/// Tries the current `ol-prefetchedProjectsBlob` tag first, then the older
/// `ol-projects` tag.
pub fn projects(html: &str) -> Result<Vec<RemoteProject>, RemoteError> {
    if let Some(json) = meta_content(&PROJECTS_BLOB, html) {
        let blob: ProjectsBlob = serde_json::from_str(&json)?;
        return Ok(blob.projects);
    }
    if let Some(json) = meta_content(&PROJECTS_LEGACY, html) {
        return Ok(serde_json::from_str(&json)?);
    }
    Err(RemoteError::ProjectListNotFound)
}

fn meta_content(re: &Regex, html: &str) -> Option<String> {
    let raw = re.captures(html)?.get(1)?.as_str();
    Some(html_escape::decode_html_entities(raw).into_owned())
}
