// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dictionary build stage.
//!
//! ```text
//! DictionaryTask
//! Clean (REBUILD):  delete <checkout>/build
//! BuildAndInstall:
//!   artifacts present, stamp == HEAD  -> skip
//!   artifacts present, stamp != HEAD  -> delete build/, rebuild
//!   otherwise                         -> run build script
//!   then: verify sys.dic, write build/.neologd-deb-revision
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::{info, warn};

use crate::error::{FsError, Result};
use crate::task::helpers::remove_dir;
use crate::task::tasks::source::head_revision;
use crate::task::tools::script::BuildScriptTool;
use crate::task::tools::{Tool, ToolContext};
use crate::task::{CleanFlags, TaskContext, Taskable};
use crate::utility::fs::walk::{WalkOptions, find_dirs};

/// File in the build directory recording the commit the artifacts came from.
pub const REVISION_STAMP: &str = ".neologd-deb-revision";

/// File that marks a directory as a compiled MeCab dictionary.
pub const SYSTEM_DICTIONARY: &str = "sys.dic";

/// Finds the newest artifact directory under `build_dir`.
///
/// Candidates match `glob` at the top level and contain `sys.dic`; the last
/// one in name order wins.
///
/// # Errors
///
/// Returns an error if `glob` is invalid.
pub fn find_artifact_dir(build_dir: &Path, glob: &str) -> Result<Option<PathBuf>> {
    if !build_dir.is_dir() {
        return Ok(None);
    }

    let dirs = find_dirs(build_dir, glob, &WalkOptions::top_level())?;
    Ok(dirs
        .into_iter()
        .rev()
        .find(|dir| dir.join(SYSTEM_DICTIONARY).is_file()))
}

/// Reads the recorded source commit of a previous build.
async fn read_stamp(build_dir: &Path) -> Option<String> {
    tokio::fs::read_to_string(build_dir.join(REVISION_STAMP))
        .await
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Dictionary build stage.
#[derive(Debug, Clone)]
pub struct DictionaryTask {
    name: String,
}

impl Default for DictionaryTask {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryTask {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "dictionary".to_string(),
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
    /// Returns an error if the build directory cannot be deleted.
    pub async fn do_clean(&self, ctx: &TaskContext, flags: CleanFlags) -> Result<()> {
        if flags.contains(CleanFlags::REBUILD) {
            let build_dir = ctx.config().paths.build_dir();
            remove_dir(ctx, &build_dir, "dictionary build").await?;
        }
        Ok(())
    }

    /// Execute the build and install phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the build script fails or produces no dictionary.
    pub async fn do_build_and_install(&self, ctx: &TaskContext) -> Result<()> {
        self.ensure_build(ctx).await.map(|_| ())
    }

    /// Builds the dictionary unless current artifacts already exist.
    ///
    /// Returns the artifact directory, or `None` in dry-run mode when nothing
    /// has been built yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout is missing, the build script fails,
    /// or the script leaves no artifact directory behind.
    pub async fn ensure_build(&self, ctx: &TaskContext) -> Result<Option<PathBuf>> {
        let config = ctx.config();
        let checkout = config.paths.checkout();
        let build_dir = config.paths.build_dir();
        let glob = &config.build.artifact_dir_glob;
        let tool_ctx = ctx.tool_context();

        if !checkout.is_dir() {
            if ctx.is_dry_run() {
                info!(
                    script = %config.build.script.display(),
                    "[dry-run] Would run build script"
                );
                return Ok(None);
            }
            return Err(anyhow::Error::new(FsError::NotFound(
                checkout.display().to_string(),
            ))
            .context("upstream checkout is missing; run the source stage first"));
        }

        let head = head_revision(&tool_ctx, &checkout).await?;

        if let Some(existing) = find_artifact_dir(&build_dir, glob)? {
            match read_stamp(&build_dir).await {
                Some(stamp) if stamp != head.commit => {
                    warn!(
                        built = %stamp,
                        head = %head.commit,
                        "Dictionary was built from another revision, rebuilding"
                    );
                    remove_dir(ctx, &build_dir, "stale dictionary build").await?;
                }
                _ => {
                    info!(dir = %existing.display(), "Dictionary already built");
                    return Ok(Some(existing));
                }
            }
        }

        info!(commit = %head.commit, "Building dictionary");
        BuildScriptTool::new()
            .script(&config.build.script)
            .args(&config.build.script_args)
            .cwd(&checkout)
            .run(&tool_ctx)
            .await?;

        if ctx.is_dry_run() {
            return Ok(None);
        }

        let artifact_dir = find_artifact_dir(&build_dir, glob)?.with_context(|| {
            format!(
                "build script left no directory matching '{glob}' with {SYSTEM_DICTIONARY} in {}",
                build_dir.display()
            )
        })?;

        tokio::fs::write(build_dir.join(REVISION_STAMP), format!("{}\n", head.commit))
            .await
            .with_context(|| format!("failed to write {REVISION_STAMP}"))?;

        info!(dir = %artifact_dir.display(), "Dictionary built");
        Ok(Some(artifact_dir))
    }
}

/// Returns the current artifact directory without building.
///
/// # Errors
///
/// Returns an error if the configured glob is invalid.
pub fn current_artifact_dir(ctx: &ToolContext) -> Result<Option<PathBuf>> {
    let config = ctx.config();
    find_artifact_dir(&config.paths.build_dir(), &config.build.artifact_dir_glob)
}

impl Taskable for DictionaryTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn do_clean<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_clean(ctx, ctx.clean_flags()))
    }

    fn do_fetch<'a>(&'a self, _ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async { Ok(()) })
    }

    fn do_build_and_install<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_build_and_install(ctx))
    }
}

#[cfg(test)]
mod tests;
