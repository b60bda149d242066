// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Revision command: resolve the pinning options without building.

use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{GitError, Result};
use crate::git::query::is_git_repo;
use crate::task::tasks::source::resolve_target;
use crate::task::tools::git::{GitTool, rev_parse};
use crate::task::tools::{Tool, ToolContext};

/// Resolves the commit a build with `config` would check out.
///
/// Fetches first when `source.update` is set.
///
/// # Errors
///
/// Returns a `GitError::NotARepository` if there is no checkout yet, or an
/// error if the revision cannot be resolved.
pub async fn selected_revision(config: &Config) -> Result<String> {
    let config = Arc::new(config.clone());
    let ctx = ToolContext::new(
        Arc::clone(&config),
        CancellationToken::new(),
        config.global.dry,
    );
    let checkout = config.paths.checkout();

    if !is_git_repo(&checkout) {
        return Err(anyhow::Error::new(GitError::NotARepository {
            path: checkout.display().to_string(),
        })
        .context("no upstream checkout; run `neologd-deb build source` first"));
    }

    if config.source.update {
        GitTool::new().path(&checkout).fetch_op().run(&ctx).await?;
    }

    let target = resolve_target(&ctx, &config).await?;
    rev_parse(&ctx, &checkout, &target)
        .await?
        .with_context(|| format!("unknown revision '{target}' in {}", checkout.display()))
}

/// Prints the selected commit id.
///
/// # Errors
///
/// Returns an error if the revision cannot be resolved.
pub async fn run_revision_command(config: &Config) -> Result<()> {
    let sha = selected_revision(config).await?;
    tracing::info!(pin = %config.source.pin(), commit = %sha, "Selected revision");
    println!("{sha}");
    Ok(())
}
