// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Common stage helper functions.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`check_source_safe_to_delete`] | Verify git repo has no uncommitted/stashed changes |
//! | [`safe_remove_source`] | Remove a checkout with the uncommitted changes check |
//! | [`remove_dir`] | Remove a generated directory (dry-run aware) |
//! | [`ensure_dir`] | Create directory if it doesn't exist (dry-run aware) |

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::error::Result;
use crate::git::query::{has_stashed_changes, has_uncommitted_changes, is_git_repo};
use crate::task::TaskContext;

/// Check if a git checkout is safe to delete.
///
/// # Errors
///
/// Returns an error if the directory has uncommitted or stashed changes, or
/// if its state cannot be read, and `ignore_uncommitted` is false.
pub fn check_source_safe_to_delete(path: &Path, ignore_uncommitted: bool) -> Result<()> {
    if ignore_uncommitted || !is_git_repo(path) {
        return Ok(());
    }

    let unreadable = || format!("cannot check {} for local changes", path.display());

    if has_uncommitted_changes(path).with_context(unreadable)? {
        anyhow::bail!(
            "Cannot delete {} - has uncommitted changes. \
             Use --ignore-uncommitted-changes to force.",
            path.display()
        );
    }

    if has_stashed_changes(path).with_context(unreadable)? {
        anyhow::bail!(
            "Cannot delete {} - has stashed changes. \
             Use --ignore-uncommitted-changes to force.",
            path.display()
        );
    }

    Ok(())
}

/// Remove a checkout after the uncommitted changes check.
///
/// # Errors
///
/// Returns an error if the directory has uncommitted changes or if the
/// deletion fails.
pub async fn safe_remove_source(ctx: &TaskContext, path: &Path, label: &str) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    check_source_safe_to_delete(path, ctx.config().global.ignore_uncommitted)?;
    remove_dir(ctx, path, label).await
}

/// Remove a directory tree if it exists.
///
/// # Errors
///
/// Returns an error if the deletion fails.
pub async fn remove_dir(ctx: &TaskContext, path: &Path, label: &str) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    if ctx.is_dry_run() {
        info!(path = %path.display(), "[dry-run] Would delete {}", label);
    } else {
        info!(path = %path.display(), "Deleting {}", label);
        tokio::fs::remove_dir_all(path)
            .await
            .with_context(|| format!("failed to delete {}", path.display()))?;
    }

    Ok(())
}

/// Ensure a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an error if the directory creation fails.
pub async fn ensure_dir(ctx: &TaskContext, path: &Path, label: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if ctx.is_dry_run() {
        info!(path = %path.display(), "[dry-run] Would create {}", label);
    } else {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("failed to create {}", path.display()))?;
    }

    Ok(())
}
