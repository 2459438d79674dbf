//! Binary-level behaviour that needs no network.

use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn leafsync_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("leafsync"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("RUST_LOG");
    cmd
}

fn write_credentials(home: &Path) {
    std::fs::write(
        home.join(".overleaf"),
        "[auth]\nemail = \"me@example.com\"\npassword = \"pw\"\n",
    )
    .expect("write credentials");
}

#[test]
fn help_lists_both_subcommands() {
    let home = TempDir::new().expect("home");
    leafsync_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync_all"))
        .stdout(predicate::str::contains("--url"));
}

#[test]
fn missing_credentials_file_fails() {
    let home = TempDir::new().expect("home");
    leafsync_cmd(home.path())
        .args(["sync", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("credentials file not found"));
}

#[test]
fn sync_on_non_mirror_fails_without_network() {
    let home = TempDir::new().expect("home");
    write_credentials(home.path());
    let dir = TempDir::new().expect("dir");

    leafsync_cmd(home.path())
        .args(["--url", "http://127.0.0.1:9", "sync"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a mirror"));
}

#[test]
fn explicit_config_flag_is_used() {
    let home = TempDir::new().expect("home");
    let other = TempDir::new().expect("other");
    write_credentials(other.path());
    let dir = TempDir::new().expect("dir");

    // Credentials load from --config, so the failure is about the marker.
    leafsync_cmd(home.path())
        .arg("--config")
        .arg(other.path().join(".overleaf"))
        .arg("sync")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a mirror"));
}

#[test]
fn sync_all_creates_root_before_contacting_server() {
    let home = TempDir::new().expect("home");
    write_credentials(home.path());
    let parent = TempDir::new().expect("parent");
    let root = parent.path().join("mirrors");

    leafsync_cmd(home.path())
        .args(["--url", "http://127.0.0.1:9", "sync_all"])
        .arg(&root)
        .assert()
        .failure()
        .stderr(predicate::str::contains("sync_all failed"));

    assert!(root.is_dir());
}

#[test]
fn author_name_requires_email() {
    let home = TempDir::new().expect("home");
    leafsync_cmd(home.path())
        .args(["--author-name", "Me", "sync", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--author-email"));
}
