// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared test utilities for tool and stage tests.
//!
//! Provides log capturing for dry-run output and helpers that build local
//! upstream repositories with fixed commit dates.

use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone)]
struct BufferWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer
            .lock()
            .map_err(|_| std::io::Error::other("buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct BufferMakeWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl<'a> MakeWriter<'a> for BufferMakeWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        BufferWriter {
            buffer: self.buffer.clone(),
        }
    }
}

/// Runs an async closure while capturing tracing output at info level.
///
/// Returns the captured log output as a string.
pub(crate) async fn run_with_logs<F, Fut>(f: F) -> Result<String>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<()>>,
{
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_writer(BufferMakeWriter {
            buffer: buffer.clone(),
        })
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .with_target(false)
        .with_level(false)
        .finish();

    let _guard = tracing::subscriber::set_default(subscriber);
    f().await?;

    let guard = buffer
        .lock()
        .map_err(|_| anyhow::anyhow!("log buffer poisoned"))?;
    Ok(String::from_utf8_lossy(&guard).to_string())
}

/// Runs git in `path`, panicking on failure. Returns trimmed stdout.
pub(crate) fn git(path: &Path, args: &[&str]) -> String {
    git_with_env(path, args, &[])
}

fn git_with_env(path: &Path, args: &[&str], env: &[(&str, &str)]) -> String {
    let output = Command::new("git")
        .args(args)
        .envs(env.iter().copied())
        .current_dir(path)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Writes `file` and commits it with author and committer date `date`
/// (`YYYY-MM-DD`, noon UTC). Returns the new commit id.
pub(crate) fn commit_file(path: &Path, file: &str, contents: &str, date: &str) -> String {
    std::fs::write(path.join(file), contents).expect("failed to write file");
    git(path, &["add", file]);
    let stamp = format!("{date}T12:00:00+00:00");
    git_with_env(
        path,
        &[
            "-c",
            "commit.gpgsign=false",
            "commit",
            "--quiet",
            "-m",
            &format!("update {file} on {date}"),
        ],
        &[
            ("GIT_AUTHOR_DATE", stamp.as_str()),
            ("GIT_COMMITTER_DATE", stamp.as_str()),
        ],
    );
    git(path, &["rev-parse", "HEAD"])
}

/// Initializes an upstream-like repository on `master` with one commit
/// dated 2015-03-01 that tracks `README.md` and ignores `build/`.
///
/// Returns the commit id.
pub(crate) fn init_upstream(path: &Path) -> String {
    git(path, &["init", "--quiet", "--initial-branch=master"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test"]);
    std::fs::write(path.join(".gitignore"), "build/\n").expect("failed to write .gitignore");
    git(path, &["add", ".gitignore"]);
    commit_file(path, "README.md", "neologd\n", "2015-03-01")
}
