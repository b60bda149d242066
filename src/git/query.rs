// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations using gix backend.
//!
//! ```text
//! query.rs --> GixBackend --> .git/ (no subprocess)
//! ```

use crate::error::NeologdResult;
use std::path::Path;

use super::backend::{GitQuery, GixBackend};

#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// Check for uncommitted changes (staged, unstaged, or untracked files).
///
/// # Errors
///
/// Returns a `GitError` if opening the repository or the status check fails.
pub fn has_uncommitted_changes(path: &Path) -> NeologdResult<bool> {
    GixBackend::has_uncommitted_changes(path)
}

/// Check for stashed changes.
///
/// # Errors
///
/// Returns a `GitError` if opening the repository or reference lookup fails.
pub fn has_stashed_changes(path: &Path) -> NeologdResult<bool> {
    GixBackend::has_stashed_changes(path)
}

/// Check if the repository is a shallow clone.
///
/// # Errors
///
/// Returns a `GitError` if opening the repository fails.
pub fn is_shallow(path: &Path) -> NeologdResult<bool> {
    GixBackend::is_shallow(path)
}
