// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `dpkg-buildpackage` invocation.
//!
//! ```text
//! DpkgBuildpackageTool
//!   dpkg-buildpackage -us -uc -b [extra args...]
//!   cwd = <staging>/<name>-<version>
//!   .deb files land in <staging>
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

/// Executable used unless overridden with [`DpkgBuildpackageTool::program`].
pub const DPKG_BUILDPACKAGE: &str = "dpkg-buildpackage";

/// Unsigned binary-only build.
const DEFAULT_ARGS: [&str; 3] = ["-us", "-uc", "-b"];

/// Builds binary packages from a Debian source tree.
#[derive(Debug, Clone, Default)]
pub struct DpkgBuildpackageTool {
    source_dir: Option<PathBuf>,
    extra_args: Vec<String>,
    program: Option<String>,
}

impl DpkgBuildpackageTool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory containing `debian/`.
    #[must_use]
    pub fn source_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.source_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Overrides the executable; a bare name is looked up in `PATH`.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Full argument list passed to the packager.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        DEFAULT_ARGS
            .iter()
            .map(ToString::to_string)
            .chain(self.extra_args.iter().cloned())
            .collect()
    }

    async fn do_run(&self, ctx: &ToolContext) -> Result<()> {
        let source_dir = self
            .source_dir
            .as_ref()
            .context("DpkgBuildpackageTool: source_dir is required")?;
        let program = self.program.as_deref().unwrap_or(DPKG_BUILDPACKAGE);
        let args = self.arguments();

        if ctx.is_dry_run() {
            info!(
                dir = %source_dir.display(),
                args = ?args,
                "[dry-run] Would run {}", program
            );
            return Ok(());
        }

        let builder = ProcessBuilder::which(program)?
            .args(&args)
            .cwd(source_dir)
            .name(program);

        debug!(dir = %source_dir.display(), "Building package");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("{program} failed in {}", source_dir.display()))?;

        if output.is_interrupted() {
            anyhow::bail!("{program} was interrupted");
        }

        info!(dir = %source_dir.display(), "Package built");

        Ok(())
    }
}

impl Tool for DpkgBuildpackageTool {
    fn name(&self) -> &str {
        self.program.as_deref().unwrap_or(DPKG_BUILDPACKAGE)
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_run(ctx))
    }
}
