// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Upstream repository stage.
//!
//! ```text
//! SourceTask
//! Clean (RECLONE):  delete checkout (refuses local changes)
//! Fetch:            ensure_checkout --> select_revision
//!   missing       -> git clone [--branch] [--depth 1]
//!   --update      -> git fetch; unpinned: checkout branch + pull
//!   pin commit    -> git checkout <sha>
//!   pin date      -> git rev-list --before (origin/<branch>, else <branch>)
//!   no pin        -> git checkout <branch>
//! BuildAndInstall:  log the checked-out revision
//! ```

use std::path::Path;

use crate::error::{GitError, Result};
use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::info;

use crate::config::Config;
use crate::config::types::RevisionPin;
use crate::git::query::{is_git_repo, is_shallow};
use crate::task::helpers::{ensure_dir, safe_remove_source};
use crate::task::tools::git::{
    GitTool, head_commit, head_commit_stamp, rev_list_before, rev_parse,
};
use crate::task::tools::{Tool, ToolContext};
use crate::task::{CleanFlags, TaskContext, Taskable};

/// The checked-out upstream commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadRevision {
    /// Full commit id.
    pub commit: String,
    /// Committer date as `YYYYMMDD`.
    pub stamp: String,
}

/// Reads the commit id and committer date of `HEAD` in `path`.
///
/// # Errors
///
/// Returns an error if `path` is not a repository or git fails.
pub async fn head_revision(ctx: &ToolContext, path: &Path) -> Result<HeadRevision> {
    Ok(HeadRevision {
        commit: head_commit(ctx, path).await?,
        stamp: head_commit_stamp(ctx, path).await?,
    })
}

/// Resolves what `select_revision` checks out: a commit id for pinned
/// revisions, the branch name otherwise.
///
/// # Errors
///
/// Returns a `GitError::ShallowPin` when pinning in a shallow clone, a
/// `GitError::NoCommitBefore` when no commit matches the date, or an error
/// if git fails.
pub async fn resolve_target(ctx: &ToolContext, config: &Config) -> Result<String> {
    let checkout = config.paths.checkout();
    let branch = &config.source.branch;
    let pin = config.source.pin();

    if pin != RevisionPin::Branch && is_shallow(&checkout)? {
        return Err(GitError::ShallowPin {
            path: checkout.display().to_string(),
        }
        .into());
    }

    match pin {
        RevisionPin::Commit(sha) => Ok(sha),
        RevisionPin::Branch => Ok(branch.clone()),
        RevisionPin::Date(date) => {
            let remote_ref = format!("origin/{branch}");
            let rev = if rev_parse(ctx, &checkout, &remote_ref).await?.is_some() {
                remote_ref
            } else {
                branch.clone()
            };
            rev_list_before(ctx, &checkout, &rev, date)
                .await?
                .ok_or_else(|| {
                    GitError::NoCommitBefore {
                        branch: rev,
                        date: date.to_string(),
                    }
                    .into()
                })
        }
    }
}

/// Upstream checkout stage.
#[derive(Debug, Clone)]
pub struct SourceTask {
    name: String,
}

impl Default for SourceTask {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceTask {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "source".to_string(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the clean phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout has local changes or cannot be
    /// deleted.
    pub async fn do_clean(&self, ctx: &TaskContext, flags: CleanFlags) -> Result<()> {
        if flags.contains(CleanFlags::RECLONE) {
            let checkout = ctx.config().paths.checkout();
            safe_remove_source(ctx, &checkout, "checkout").await?;
        }
        Ok(())
    }

    /// Execute the fetch phase: clone or update, then check out the
    /// selected revision.
    ///
    /// # Errors
    ///
    /// Returns an error if any git operation fails or the revision cannot
    /// be resolved.
    pub async fn do_fetch(&self, ctx: &TaskContext) -> Result<()> {
        self.ensure_checkout(ctx).await?;
        self.select_revision(ctx).await
    }

    /// Execute the build and install phase: report the checked-out revision.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision cannot be read.
    pub async fn do_build_and_install(&self, ctx: &TaskContext) -> Result<()> {
        let checkout = ctx.config().paths.checkout();
        if ctx.is_dry_run() && !checkout.exists() {
            return Ok(());
        }
        let head = head_revision(&ctx.tool_context(), &checkout).await?;
        info!(commit = %head.commit, date = %head.stamp, "Upstream revision");
        Ok(())
    }

    /// Clones the repository when missing, or updates it when requested.
    ///
    /// # Errors
    ///
    /// Returns a `GitError::NotARepository` if the checkout exists but is not
    /// a git work tree, or an error if git fails.
    pub async fn ensure_checkout(&self, ctx: &TaskContext) -> Result<()> {
        let config = ctx.config();
        let checkout = config.paths.checkout();
        let source = &config.source;
        let tool_ctx = ctx.tool_context();

        if !checkout.exists() {
            if let Some(parent) = checkout.parent() {
                ensure_dir(ctx, parent, "work directory").await?;
            }

            info!(url = %source.url, branch = %source.branch, "Cloning upstream repository");

            return GitTool::new()
                .url(&source.url)
                .path(&checkout)
                .branch(&source.branch)
                .shallow(source.shallow)
                .clone_op()
                .run(&tool_ctx)
                .await
                .with_context(|| format!("failed to clone {}", source.url));
        }

        if !is_git_repo(&checkout) {
            return Err(GitError::NotARepository {
                path: checkout.display().to_string(),
            }
            .into());
        }

        if !source.update {
            info!(path = %checkout.display(), "Using existing checkout");
            return Ok(());
        }

        info!(path = %checkout.display(), "Updating checkout");
        GitTool::new()
            .path(&checkout)
            .fetch_op()
            .run(&tool_ctx)
            .await?;

        if source.pin() == RevisionPin::Branch {
            GitTool::new()
                .path(&checkout)
                .target(&source.branch)
                .checkout_op()
                .run(&tool_ctx)
                .await?;
            GitTool::new()
                .path(&checkout)
                .branch(&source.branch)
                .pull_op()
                .run(&tool_ctx)
                .await?;
        }

        Ok(())
    }

    /// Checks out the pinned commit, the last commit on or before the pinned
    /// date, or the branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the revision cannot be resolved or checked out.
    pub async fn select_revision(&self, ctx: &TaskContext) -> Result<()> {
        let config = ctx.config();
        let checkout = config.paths.checkout();
        let tool_ctx = ctx.tool_context();

        if ctx.is_dry_run() && !checkout.exists() {
            info!(pin = %config.source.pin(), "[dry-run] Would select revision");
            return Ok(());
        }

        let target = resolve_target(&tool_ctx, config).await?;
        info!(pin = %config.source.pin(), target = %target, "Selecting revision");

        GitTool::new()
            .path(&checkout)
            .target(&target)
            .checkout_op()
            .run(&tool_ctx)
            .await
    }
}

impl Taskable for SourceTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn do_clean<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_clean(ctx, ctx.clean_flags()))
    }

    fn do_fetch<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_fetch(ctx))
    }

    fn do_build_and_install<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_build_and_install(ctx))
    }
}
