// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git tool for repository operations.
//!
//! ```text
//! GitTool
//! Operations: Clone | Pull | Fetch | Checkout
//! Builder: url/path/branch/target/shallow
//! Safety: warn on uncommitted checkout, cancellation support
//!
//! Queries: rev_parse, rev_list_before, head_commit, head_commit_stamp
//! ```
//!
//! Operations that change the checkout shell out to `git` through
//! `ProcessBuilder::run_with_cancellation()`. Read-only queries on the
//! working tree state live in `crate::git`; the history queries here need
//! `git rev-list` and `git log` date handling.

use std::path::{Path, PathBuf};

use crate::error::Result;
use anyhow::Context;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};
use crate::git::query::{has_uncommitted_changes, is_git_repo};

/// Remote that `clone` creates and `pull`/`fetch` talk to.
const REMOTE: &str = "origin";

/// Git tool for repository operations.
///
/// # Example
///
/// ```ignore
/// let tool = GitTool::new()
///     .url("https://github.com/neologd/mecab-ipadic-neologd")
///     .path("/var/tmp/mecab-ipadic-neologd")
///     .branch("master")
///     .clone_op();
/// tool.run(&ctx).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GitTool {
    url: Option<String>,
    path: Option<PathBuf>,
    branch: Option<String>,
    target: Option<String>,
    shallow: bool,
    operation: GitOperation,
}

/// Git operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitOperation {
    /// Clone a repository.
    #[default]
    Clone,
    /// Pull updates from remote.
    Pull,
    /// Fetch updates from remote without merging.
    Fetch,
    /// Checkout a branch or commit.
    Checkout,
}

impl GitTool {
    /// Creates a new `GitTool` with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            url: None,
            path: None,
            branch: None,
            target: None,
            shallow: false,
            operation: GitOperation::Clone,
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub const fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    #[must_use]
    pub const fn clone_op(mut self) -> Self {
        self.operation = GitOperation::Clone;
        self
    }

    #[must_use]
    pub const fn pull_op(mut self) -> Self {
        self.operation = GitOperation::Pull;
        self
    }

    #[must_use]
    pub const fn fetch_op(mut self) -> Self {
        self.operation = GitOperation::Fetch;
        self
    }

    #[must_use]
    pub const fn checkout_op(mut self) -> Self {
        self.operation = GitOperation::Checkout;
        self
    }

    async fn do_clone(&self, ctx: &ToolContext) -> Result<()> {
        let url = self
            .url
            .as_ref()
            .context("GitTool: url is required for clone")?;
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for clone")?;

        if ctx.is_dry_run() {
            info!(
                url = %url,
                path = %path.display(),
                shallow = self.shallow,
                branch = ?self.branch,
                "[dry-run] Would clone repository"
            );
            return Ok(());
        }

        let mut builder = ProcessBuilder::which("git")?.arg("clone").arg("--quiet");

        if self.shallow {
            builder = builder.arg("--depth").arg("1");
        }

        if let Some(ref branch) = self.branch {
            builder = builder.arg("--branch").arg(branch);
        }

        builder = builder.arg(url).arg(path);

        debug!(url = %url, path = %path.display(), shallow = self.shallow, "Cloning repository");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Failed to clone {url}"))?;

        if output.is_interrupted() {
            anyhow::bail!("Git clone was interrupted");
        }

        info!(url = %url, path = %path.display(), "Repository cloned successfully");

        Ok(())
    }

    async fn do_pull(&self, ctx: &ToolContext) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for pull")?;
        let remote = REMOTE;

        if ctx.is_dry_run() {
            info!(path = %path.display(), remote, branch = ?self.branch, "[dry-run] Would pull repository");
            return Ok(());
        }

        let mut builder = ProcessBuilder::which("git")?
            .arg("pull")
            .arg("--quiet")
            .arg(remote);
        if let Some(ref branch) = self.branch {
            builder = builder.arg(branch);
        }
        builder = builder.cwd(path);

        debug!(path = %path.display(), remote, "Pulling repository");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Failed to pull in {}", path.display()))?;

        if output.is_interrupted() {
            anyhow::bail!("Git pull was interrupted");
        }

        info!(path = %path.display(), "Repository pulled successfully");

        Ok(())
    }

    async fn do_fetch(&self, ctx: &ToolContext) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for fetch")?;

        let remote = REMOTE;

        if ctx.is_dry_run() {
            info!(path = %path.display(), remote, "[dry-run] Would fetch from remote");
            return Ok(());
        }

        let builder = ProcessBuilder::which("git")?
            .arg("fetch")
            .arg("--quiet")
            .arg(remote)
            .cwd(path);

        debug!(path = %path.display(), remote, "Fetching from remote");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Failed to fetch {} in {}", remote, path.display()))?;

        if output.is_interrupted() {
            anyhow::bail!("Git fetch was interrupted");
        }

        info!(path = %path.display(), remote, "Fetched successfully");

        Ok(())
    }

    async fn do_checkout(&self, ctx: &ToolContext) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for checkout")?;

        let target = self
            .target
            .as_ref()
            .context("GitTool: target is required for checkout")?;

        if !ctx.is_dry_run() && is_git_repo(path) {
            match has_uncommitted_changes(path) {
                Ok(true) => {
                    warn!(
                        path = %path.display(),
                        target,
                        "Repository has uncommitted changes, checkout may fail"
                    );
                }
                Ok(false) => {}
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "Could not check for uncommitted changes");
                }
            }
        }

        if ctx.is_dry_run() {
            info!(path = %path.display(), target, "[dry-run] Would checkout");
            return Ok(());
        }

        let builder = ProcessBuilder::which("git")?
            .arg("-c")
            .arg("advice.detachedHead=false")
            .arg("checkout")
            .arg("-q")
            .arg(target)
            .cwd(path);

        debug!(path = %path.display(), target, "Checking out");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Failed to checkout {} in {}", target, path.display()))?;

        if output.is_interrupted() {
            anyhow::bail!("Git checkout was interrupted");
        }

        info!(path = %path.display(), target, "Checked out successfully");

        Ok(())
    }
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for GitTool {
    fn name(&self) -> &'static str {
        "git"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            match self.operation {
                GitOperation::Clone => self.do_clone(ctx).await,
                GitOperation::Pull => self.do_pull(ctx).await,
                GitOperation::Fetch => self.do_fetch(ctx).await,
                GitOperation::Checkout => self.do_checkout(ctx).await,
            }
        })
    }
}

/// Runs a read-only git query in `path` and returns its trimmed stdout, or
/// `None` when git exits non-zero.
async fn query(ctx: &ToolContext, path: &Path, args: &[&str]) -> Result<Option<String>> {
    let output = ProcessBuilder::which("git")?
        .args(args)
        .cwd(path)
        .capture_stdout()
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run_with_cancellation(ctx.cancel_token().clone())
        .await
        .with_context(|| format!("Failed to run git {} in {}", args.join(" "), path.display()))?;

    if output.is_interrupted() {
        anyhow::bail!("Git query was interrupted");
    }
    if !output.success() {
        return Ok(None);
    }
    Ok(Some(output.stdout().trim().to_string()))
}

/// Resolves `rev` to a commit id, or `None` when it does not exist.
///
/// # Errors
///
/// Returns an error if git cannot be run or the query is interrupted.
pub async fn rev_parse(ctx: &ToolContext, path: &Path, rev: &str) -> Result<Option<String>> {
    let spec = format!("{rev}^{{commit}}");
    let sha = query(ctx, path, &["rev-parse", "--verify", "--quiet", &spec]).await?;
    debug!(path = %path.display(), rev, sha = ?sha, "Resolved revision");
    Ok(sha.filter(|s| !s.is_empty()))
}

/// Finds the last first-parent commit of `rev` committed on or before the
/// end of `date`.
///
/// # Errors
///
/// Returns an error if git cannot be run, `rev` does not exist, or the query
/// is interrupted.
pub async fn rev_list_before(
    ctx: &ToolContext,
    path: &Path,
    rev: &str,
    date: NaiveDate,
) -> Result<Option<String>> {
    let before = format!("--before={date} 23:59:59");
    let sha = query(
        ctx,
        path,
        &["rev-list", "-n", "1", "--first-parent", &before, rev],
    )
    .await?
    .with_context(|| format!("git rev-list failed for '{rev}' in {}", path.display()))?;

    debug!(path = %path.display(), rev, %date, sha = %sha, "Resolved date");
    Ok(Some(sha).filter(|s| !s.is_empty()))
}

/// Returns the checked-out commit id.
///
/// # Errors
///
/// Returns an error if `HEAD` cannot be resolved.
pub async fn head_commit(ctx: &ToolContext, path: &Path) -> Result<String> {
    rev_parse(ctx, path, "HEAD")
        .await?
        .with_context(|| format!("cannot resolve HEAD in {}", path.display()))
}

/// Returns the committer date of `HEAD` as `YYYYMMDD`.
///
/// # Errors
///
/// Returns an error if `git log` fails.
pub async fn head_commit_stamp(ctx: &ToolContext, path: &Path) -> Result<String> {
    query(
        ctx,
        path,
        &["log", "-1", "--format=%cd", "--date=format:%Y%m%d"],
    )
    .await?
    .filter(|s| !s.is_empty())
    .with_context(|| format!("cannot read HEAD commit date in {}", path.display()))
}
