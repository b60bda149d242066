// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build command arguments.
//!
//! # Flag Effects
//!
//! ```text
//! --commit / --date     pin the revision (mutually exclusive)
//! --reclone --rebuild   clean actions, run before fetching
//! --no-package          stop after the dictionary stage
//! [STAGE...]            source, dictionary, package (default: all)
//! ```

use chrono::NaiveDate;
use clap::ArgAction;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the `build` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BuildArgs {
    /// Revision selection.
    #[command(flatten)]
    pub revision: RevisionArgs,

    /// Clean actions.
    #[command(flatten)]
    pub clean: CleanArgs,

    /// When --reclone is given, the checkout is deleted even if it contains
    /// uncommitted or stashed changes.
    #[arg(long = "ignore-uncommitted-changes")]
    pub ignore_uncommitted: bool,

    /// Stops after the dictionary stage.
    #[arg(long = "no-package", action = ArgAction::SetTrue)]
    pub no_package: bool,

    /// Keeps the staging directory after packaging.
    #[arg(long = "keep-staging", action = ArgAction::SetTrue)]
    pub keep_staging: bool,

    /// Directory receiving the .deb files (default: current directory).
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Stages to run: source, dictionary, package. Runs all when empty.
    #[arg(value_name = "STAGE")]
    pub stages: Vec<String>,
}

/// Which upstream revision to check out.
#[derive(Debug, Clone, Default, Args)]
pub struct RevisionArgs {
    /// Fetches and fast-forwards an existing checkout.
    #[arg(short = 'u', long, action = ArgAction::SetTrue)]
    pub update: bool,

    /// Checks out this commit.
    #[arg(long, value_name = "SHA", conflicts_with = "date")]
    pub commit: Option<String>,

    /// Checks out the last commit on or before this day (YYYY-MM-DD).
    #[arg(long, value_name = "DATE", conflicts_with = "commit")]
    pub date: Option<NaiveDate>,
}

/// Clean actions.
#[derive(Debug, Clone, Default, Args)]
pub struct CleanArgs {
    /// Deletes the checkout and clones again.
    #[arg(long, action = ArgAction::SetTrue)]
    pub reclone: bool,

    /// Deletes the dictionary build output and runs the build script again.
    #[arg(short = 'b', long, action = ArgAction::SetTrue)]
    pub rebuild: bool,
}

impl RevisionArgs {
    /// Converts revision arguments to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let mut overrides = Vec::new();
        if self.update {
            overrides.push("source/update=true".to_string());
        }
        if let Some(ref sha) = self.commit {
            overrides.push(format!("source/commit={sha}"));
        }
        if let Some(date) = self.date {
            overrides.push(format!("source/date={date}"));
        }
        overrides
    }
}

impl BuildArgs {
    /// Converts build arguments to configuration overrides.
    #[must_use]
    pub fn to_config_overrides(&self) -> Vec<String> {
        let flag_overrides = [
            (self.ignore_uncommitted, "global/ignore_uncommitted=true"),
            (self.keep_staging, "package/keep_staging=true"),
        ]
        .into_iter()
        .filter(|(cond, _)| *cond)
        .map(|(_, key)| key.to_string());

        self.revision
            .to_config_overrides()
            .into_iter()
            .chain(flag_overrides)
            .chain(
                self.output_dir
                    .as_ref()
                    .map(|dir| format!("paths/output={}", dir.display())),
            )
            .collect()
    }
}
