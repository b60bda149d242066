// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read) --> GixBackend (pure Rust gix)
//! ```
//!
//! Mutations (clone, fetch, checkout) go through the git CLI in
//! `task::tools::git`.

use crate::error::{GitError, GixError, NeologdResult};
use std::path::Path;

/// Read-only git query operations.
///
/// Implementors inspect repository state without modification. Paths are
/// the work tree root; parent directories are not searched.
pub trait GitQuery {
    /// Check if path is the root of a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Check for uncommitted changes (staged, unstaged, or untracked files).
    ///
    /// Ignored files do not count.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if opening the repository or the status check fails.
    fn has_uncommitted_changes(path: &Path) -> NeologdResult<bool>;

    /// Check for stashed changes.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if opening the repository or reference lookup fails.
    fn has_stashed_changes(path: &Path) -> NeologdResult<bool>;

    /// Check if the repository is a shallow clone.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if opening the repository fails.
    fn is_shallow(path: &Path) -> NeologdResult<bool>;
}

/// Pure Rust git backend using gix.
pub struct GixBackend;

impl GixBackend {
    fn open(path: &Path) -> Result<gix::Repository, GitError> {
        gix::open(path).map_err(|e| GitError::Gix(GixError::Open(Box::new(e))))
    }
}

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::open(path).is_ok_and(|repo| repo.workdir().is_some())
    }

    fn has_uncommitted_changes(path: &Path) -> NeologdResult<bool> {
        use gix::status::UntrackedFiles;

        let repo = Self::open(path)?;

        let has_changes = repo
            .status(gix::progress::Discard)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to prepare status check".to_string(),
            })?
            .untracked_files(UntrackedFiles::Files)
            .into_iter(None)
            .map_err(|_| GitError::CommandFailed {
                command: "status".to_string(),
                message: "failed to check repository status".to_string(),
            })?
            .next()
            .is_some();

        Ok(has_changes)
    }

    fn has_stashed_changes(path: &Path) -> NeologdResult<bool> {
        let repo = Self::open(path)?;

        // refs/stash exists iff there are stashed changes
        match repo.find_reference("refs/stash") {
            Ok(_) => Ok(true),
            Err(gix::reference::find::existing::Error::NotFound { name: _ }) => Ok(false),
            Err(e) => Err(GitError::Gix(GixError::Head(e)).into()),
        }
    }

    fn is_shallow(path: &Path) -> NeologdResult<bool> {
        Ok(Self::open(path)?.is_shallow())
    }
}
