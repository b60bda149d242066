// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Upstream dictionary build script.
//!
//! ```text
//! BuildScriptTool
//!   <checkout>/libexec/make-mecab-ipadic-neologd.sh [script_args...]
//!   cwd = checkout, output forwarded to the log
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext};
use crate::core::process::builder::ProcessBuilder;
use crate::error::{FsError, Result};

/// Runs the upstream build script inside the checkout.
#[derive(Debug, Clone, Default)]
pub struct BuildScriptTool {
    script: Option<PathBuf>,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl BuildScriptTool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script path; relative paths resolve against the working directory.
    #[must_use]
    pub fn script(mut self, script: impl AsRef<Path>) -> Self {
        self.script = Some(script.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Absolute script path.
    ///
    /// # Errors
    ///
    /// Returns an error if the script or working directory is missing from
    /// the builder.
    pub fn script_path(&self) -> Result<PathBuf> {
        let script = self
            .script
            .as_ref()
            .context("BuildScriptTool: script is required")?;
        if script.is_absolute() {
            return Ok(script.clone());
        }
        let cwd = self
            .cwd
            .as_ref()
            .context("BuildScriptTool: cwd is required for a relative script")?;
        Ok(cwd.join(script))
    }

    async fn do_run(&self, ctx: &ToolContext) -> Result<()> {
        let script = self.script_path()?;

        if ctx.is_dry_run() {
            info!(
                script = %script.display(),
                args = ?self.args,
                "[dry-run] Would run build script"
            );
            return Ok(());
        }

        if !script.is_file() {
            return Err(anyhow::Error::new(FsError::NotFound(
                script.display().to_string(),
            ))
            .context("upstream build script is missing"));
        }

        let mut builder = ProcessBuilder::new(&script)
            .args(&self.args)
            .name("build script");
        if let Some(ref cwd) = self.cwd {
            builder = builder.cwd(cwd);
        }

        debug!(script = %script.display(), "Running build script");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .with_context(|| format!("Build script {} failed", script.display()))?;

        if output.is_interrupted() {
            anyhow::bail!("Build script was interrupted");
        }

        info!(script = %script.display(), "Build script finished");

        Ok(())
    }
}

impl Tool for BuildScriptTool {
    fn name(&self) -> &'static str {
        "build-script"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.do_run(ctx))
    }
}

#[cfg(test)]
mod tests;
