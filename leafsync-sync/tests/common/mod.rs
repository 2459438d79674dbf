//! Shared fixtures: in-memory remote, recording VCS, ZIP builder, git helpers.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use std::process::Command;

use leafsync_core::{ProjectId, RemoteProject};
use leafsync_remote::{RemoteError, RemoteSession};
use leafsync_sync::{GitCli, Vcs, VcsError};
use zip::write::SimpleFileOptions;

// ---------------------------------------------------------------------------
// Remote
// ---------------------------------------------------------------------------

/// Remote service held entirely in memory.
#[derive(Default)]
pub struct FakeSession {
    pub projects: Vec<RemoteProject>,
    pub archives: HashMap<ProjectId, Vec<u8>>,
    pub fetched: Vec<ProjectId>,
    pub reject_login: bool,
}

impl FakeSession {
    pub fn with_project(mut self, id: &str, name: &str, archive: Vec<u8>) -> Self {
        self.projects.push(RemoteProject::new(id, name));
        self.archives.insert(ProjectId::from(id), archive);
        self
    }

    pub fn set_archive(&mut self, id: &str, archive: Vec<u8>) {
        self.archives.insert(ProjectId::from(id), archive);
    }
}

impl RemoteSession for FakeSession {
    fn list_projects(&mut self) -> Result<Vec<RemoteProject>, RemoteError> {
        if self.reject_login {
            return Err(RemoteError::LoginRejected { status: 401 });
        }
        Ok(self.projects.clone())
    }

    fn fetch_archive(&mut self, id: &ProjectId) -> Result<Vec<u8>, RemoteError> {
        if self.reject_login {
            return Err(RemoteError::LoginRejected { status: 401 });
        }
        self.fetched.push(id.clone());
        self.archives.get(id).cloned().ok_or_else(|| RemoteError::Io {
            url: format!("fake://project/{id}/download/zip"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such project"),
        })
    }
}

// ---------------------------------------------------------------------------
// VCS
// ---------------------------------------------------------------------------

/// Records every call; dirtiness, remote presence and failures are scripted.
#[derive(Default)]
pub struct RecordingVcs {
    pub calls: RefCell<Vec<String>>,
    pub dirty: Cell<bool>,
    pub remote: Cell<bool>,
    failing: RefCell<Vec<String>>,
}

impl RecordingVcs {
    pub fn dirty(remote: bool) -> Self {
        let vcs = Self::default();
        vcs.dirty.set(true);
        vcs.remote.set(remote);
        vcs
    }

    pub fn clean() -> Self {
        Self::default()
    }

    /// Make `op` ("init", "stage", "status", "commit", "remote", "push")
    /// fail for the mirror directory named `dir_name`. The call is still
    /// recorded.
    pub fn fail_on(self, op: &str, dir_name: &str) -> Self {
        self.failing.borrow_mut().push(format!("{op} {dir_name}"));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, op: &str, label: &str, dir: &Path) -> Result<(), VcsError> {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.calls.borrow_mut().push(format!("{label} {name}"));
        if self.failing.borrow().contains(&format!("{op} {name}")) {
            return Err(VcsError::Failed {
                command: format!("git {op}"),
                dir: dir.to_path_buf(),
                status: "exit status: 1".into(),
                stderr: format!("scripted {op} failure"),
            });
        }
        Ok(())
    }
}

impl Vcs for RecordingVcs {
    fn init(&self, dir: &Path) -> Result<(), VcsError> {
        self.record("init", "init", dir)
    }

    fn stage_all(&self, dir: &Path) -> Result<(), VcsError> {
        self.record("stage", "stage", dir)
    }

    fn is_dirty(&self, dir: &Path) -> Result<bool, VcsError> {
        self.record("status", "status", dir)?;
        Ok(self.dirty.get())
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<(), VcsError> {
        self.record("commit", &format!("commit[{message}]"), dir)
    }

    fn has_remote(&self, dir: &Path) -> Result<bool, VcsError> {
        self.record("remote", "remote", dir)?;
        Ok(self.remote.get())
    }

    fn push(&self, dir: &Path) -> Result<(), VcsError> {
        self.record("push", "push", dir)
    }
}

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

/// Write `contents` to `root/rel`, creating parent directories.
pub fn seed(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(&path, contents).expect("seed file");
}

// ---------------------------------------------------------------------------
// Archives
// ---------------------------------------------------------------------------

pub fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, body) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(*name, SimpleFileOptions::default())
                .expect("add dir");
            continue;
        }
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start file");
        writer.write_all(body.as_bytes()).expect("write");
    }
    writer.finish().expect("finish").into_inner()
}

// ---------------------------------------------------------------------------
// Real git
// ---------------------------------------------------------------------------

pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

pub fn test_git() -> GitCli {
    GitCli::new().with_identity("leafsync test", "test@example.invalid")
}

/// Run git in `dir` and return trimmed stdout; panics on failure.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(["-c", "user.name=leafsync test", "-c", "user.email=test@example.invalid"])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run git command");
    assert!(
        output.status.success(),
        "git {:?} failed:\nstdout: {}\nstderr: {}",
        args,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn commit_count(dir: &Path) -> usize {
    let output = Command::new("git")
        .args(["rev-list", "--count", "HEAD"])
        .current_dir(dir)
        .output()
        .expect("run git rev-list");
    if !output.status.success() {
        // No HEAD yet.
        return 0;
    }
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse()
        .expect("commit count")
}
