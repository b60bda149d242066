// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for Git queries.
//!
//! Tests the git module with real temporary repositories.

use neologd_deb::git::query::{
    has_stashed_changes, has_uncommitted_changes, is_git_repo, is_shallow,
};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Helper to run git commands in a directory
fn run_git(args: &[&str], cwd: &std::path::Path) -> bool {
    Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@test.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@test.com")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Create an initialized git repo in the temp directory
fn init_test_repo(dir: &std::path::Path) {
    run_git(&["init", "-q", "--initial-branch=master"], dir);
    run_git(&["config", "user.email", "test@test.com"], dir);
    run_git(&["config", "user.name", "Test"], dir);
    run_git(&["config", "commit.gpgsign", "false"], dir);
}

/// Create an initialized git repo with an initial commit (README.md)
fn init_test_repo_with_commit(dir: &std::path::Path) {
    init_test_repo(dir);
    fs::write(dir.join("README.md"), "# Test").unwrap();
    run_git(&["add", "."], dir);
    run_git(&["commit", "-q", "-m", "Initial commit"], dir);
}

// =============================================================================
// is_git_repo
// =============================================================================

#[test]
fn git_is_git_repo_true() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    assert!(is_git_repo(temp.path()));
}

#[test]
fn git_is_git_repo_false() {
    let temp = temp_dir();
    assert!(!is_git_repo(temp.path()));
    assert!(!is_git_repo(&temp.path().join("missing")));
}

// =============================================================================
// has_uncommitted_changes
// =============================================================================

#[test]
fn git_no_uncommitted_changes_clean() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());

    assert!(!has_uncommitted_changes(temp.path()).unwrap());
}

#[test]
fn git_has_uncommitted_changes_modified() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());

    fs::write(temp.path().join("README.md"), "# Modified").unwrap();

    assert!(has_uncommitted_changes(temp.path()).unwrap());
}

#[test]
fn git_has_uncommitted_changes_untracked() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());

    fs::write(temp.path().join("untracked.txt"), "untracked").unwrap();

    assert!(has_uncommitted_changes(temp.path()).unwrap());
}

#[test]
fn git_ignored_build_output_is_not_a_change() {
    let temp = temp_dir();
    init_test_repo(temp.path());
    fs::write(temp.path().join(".gitignore"), "build/\n").unwrap();
    run_git(&["add", ".gitignore"], temp.path());
    run_git(&["commit", "-q", "-m", "ignore build"], temp.path());

    fs::create_dir(temp.path().join("build")).unwrap();
    fs::write(temp.path().join("build/sys.dic"), "dic").unwrap();

    assert!(!has_uncommitted_changes(temp.path()).unwrap());
}

// =============================================================================
// has_stashed_changes
// =============================================================================

#[test]
fn git_stash_detection() {
    let temp = temp_dir();
    init_test_repo_with_commit(temp.path());
    assert!(!has_stashed_changes(temp.path()).unwrap());

    fs::write(temp.path().join("README.md"), "# Stashed").unwrap();
    assert!(run_git(&["stash", "-q"], temp.path()));

    assert!(has_stashed_changes(temp.path()).unwrap());
    assert!(!has_uncommitted_changes(temp.path()).unwrap());
}

// =============================================================================
// is_shallow
// =============================================================================

#[test]
fn git_shallow_clone_detection() {
    let temp = temp_dir();
    let upstream = temp.path().join("upstream");
    fs::create_dir(&upstream).unwrap();
    init_test_repo_with_commit(&upstream);
    fs::write(upstream.join("seed.csv"), "a").unwrap();
    run_git(&["add", "."], &upstream);
    run_git(&["commit", "-q", "-m", "seed"], &upstream);

    let url = format!("file://{}", upstream.display());
    assert!(run_git(
        &["clone", "-q", "--depth", "1", &url, "shallow"],
        temp.path()
    ));
    assert!(run_git(&["clone", "-q", &url, "full"], temp.path()));

    assert!(is_shallow(&temp.path().join("shallow")).unwrap());
    assert!(!is_shallow(&temp.path().join("full")).unwrap());
}
