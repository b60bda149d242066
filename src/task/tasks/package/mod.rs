// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Debian package stage.
//!
//! ```text
//! PackageTask (BuildAndInstall)
//!   artifact dir --> <work_dir>/neologd-deb-XXXXXX/       (staging)
//!                      <name>-<version>/dic/*             (copied artifacts)
//!                      <name>-<version>/debian/*          (write_skeleton)
//!   dpkg-buildpackage -us -uc -b    (cwd <name>-<version>)
//!   <staging>/*.deb --> output dir
//!   staging removed unless keep_staging
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use futures_util::future::BoxFuture;
use tracing::info;

use crate::debian::skeleton::write_skeleton;
use crate::debian::{DebVersion, PackageMeta};
use crate::error::{FsError, PackageError, Result};
use crate::task::helpers::ensure_dir;
use crate::task::tasks::dictionary::current_artifact_dir;
use crate::task::tasks::source::head_revision;
use crate::task::tools::dpkg::DpkgBuildpackageTool;
use crate::task::tools::{Tool, ToolContext};
use crate::task::{TaskContext, Taskable};
use crate::utility::fs::copy::copy_matching_async;
use crate::utility::fs::walk::{WalkOptions, find_files};

/// Prefix of the temporary staging directory inside the work directory.
pub const STAGING_PREFIX: &str = "neologd-deb-";

/// Builds package metadata for the checked-out revision.
///
/// The version date is the pinned date when one is configured, otherwise
/// the committer date of `HEAD`.
///
/// # Errors
///
/// Returns an error if git fails or the name or version is invalid.
pub async fn package_meta(ctx: &ToolContext) -> Result<PackageMeta> {
    let config = ctx.config();
    let head = head_revision(ctx, &config.paths.checkout()).await?;
    let upstream = &config.package.upstream_version;

    let version = match config.source.date {
        Some(date) => DebVersion::new(upstream.clone(), date)?,
        None => DebVersion::from_stamp(upstream.clone(), &head.stamp)?,
    };

    PackageMeta::from_config(&config.package, &config.source, version, &head.commit)
}

/// Debian package stage.
#[derive(Debug, Clone)]
pub struct PackageTask {
    name: String,
}

impl Default for PackageTask {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageTask {
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "package".to_string(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Execute the build and install phase.
    ///
    /// # Errors
    ///
    /// Returns an error if any packaging step fails.
    pub async fn do_build_and_install(&self, ctx: &TaskContext) -> Result<()> {
        self.build_package(ctx).await.map(|_| ())
    }

    /// Assembles the package, runs the packager and copies the `.deb` files
    /// to the output directory.
    ///
    /// Returns the copied files; empty in dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns an error if no dictionary has been built, no artifact or
    /// package file is found, or the packager fails.
    pub async fn build_package(&self, ctx: &TaskContext) -> Result<Vec<PathBuf>> {
        let config = ctx.config();
        let tool_ctx = ctx.tool_context();

        let Some(artifact_dir) = current_artifact_dir(&tool_ctx)? else {
            if ctx.is_dry_run() {
                info!("[dry-run] Would assemble and build the Debian package");
                return Ok(Vec::new());
            }
            return Err(anyhow::Error::new(FsError::NotFound(
                config.paths.build_dir().display().to_string(),
            ))
            .context("no built dictionary found; run the dictionary stage first"));
        };

        let meta = package_meta(&tool_ctx).await?;
        info!(
            package = %meta.name,
            version = %meta.version,
            commit = %meta.upstream_commit,
            "Assembling package"
        );

        if ctx.is_dry_run() {
            info!(
                dir = %artifact_dir.display(),
                patterns = ?config.package.artifacts,
                "[dry-run] Would stage {}", meta.source_dir_name()
            );
            DpkgBuildpackageTool::new()
                .program(&config.package.buildpackage)
                .extra_args(&config.package.buildpackage_args)
                .source_dir(config.paths.work_dir.join(meta.source_dir_name()))
                .run(&tool_ctx)
                .await?;
            info!(
                output = %config.paths.output().display(),
                "[dry-run] Would copy .deb files"
            );
            return Ok(Vec::new());
        }

        ensure_dir(ctx, &config.paths.work_dir, "work directory").await?;
        let staging = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempdir_in(&config.paths.work_dir)
            .with_context(|| {
                format!(
                    "failed to create staging directory in {}",
                    config.paths.work_dir.display()
                )
            })?;

        let result = assemble_and_build(ctx, &tool_ctx, &meta, &artifact_dir, staging.path()).await;

        if config.package.keep_staging {
            let kept = staging.keep();
            info!(path = %kept.display(), "Keeping staging directory");
        }

        let debs = result?;
        collect_output(ctx, &debs).await
    }
}

async fn assemble_and_build(
    ctx: &TaskContext,
    tool_ctx: &ToolContext,
    meta: &PackageMeta,
    artifact_dir: &Path,
    staging: &Path,
) -> Result<Vec<PathBuf>> {
    let config = ctx.config();
    let source_dir = staging.join(meta.source_dir_name());

    let patterns = &config.package.artifacts;
    let copied = copy_matching_async(artifact_dir, &source_dir.join("dic"), patterns).await?;
    if copied.is_empty() {
        return Err(PackageError::NoArtifacts {
            dir: artifact_dir.display().to_string(),
            patterns: patterns.clone(),
        }
        .into());
    }
    info!(count = copied.len(), "Copied dictionary files");

    let timestamp = chrono::Local::now().to_rfc2822();
    write_skeleton(&source_dir, meta, &timestamp).await?;

    DpkgBuildpackageTool::new()
        .program(&config.package.buildpackage)
        .extra_args(&config.package.buildpackage_args)
        .source_dir(&source_dir)
        .run(tool_ctx)
        .await?;

    let debs = find_files(staging, "*.deb", &WalkOptions::top_level())?;
    if debs.is_empty() {
        return Err(PackageError::NoPackages(staging.display().to_string()).into());
    }
    Ok(debs)
}

async fn collect_output(ctx: &TaskContext, debs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let output = ctx.config().paths.output();
    ensure_dir(ctx, &output, "output directory").await?;

    let mut copied = Vec::with_capacity(debs.len());
    for deb in debs {
        let Some(file_name) = deb.file_name() else {
            continue;
        };
        let target = output.join(file_name);
        tokio::fs::copy(deb, &target).await.with_context(|| {
            format!("failed to copy {} to {}", deb.display(), target.display())
        })?;
        info!(path = %target.display(), "Package written");
        copied.push(target);
    }
    Ok(copied)
}

impl Taskable for PackageTask {
    fn name(&self) -> &str {
        &self.name
    }

    fn do_clean<'a>(&'a self, _ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async { Ok(()) })
    }

    fn do_fetch<'a>(&'a self, _ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async { Ok(()) })
    }

    fn do_build_and_install<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_build_and_install(ctx))
    }
}
