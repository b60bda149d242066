// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for neologd-deb.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, PathsConfig, SourceConfig, BuildConfig, PackageConfig
//! ```
//!
//! # Revision Pinning
//!
//! ```text
//! RevisionPin: Commit(sha) | Date(YYYY-MM-DD) | Branch (default)
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Upstream repository of the dictionary.
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/neologd/mecab-ipadic-neologd";

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log every action instead of performing it.
    pub dry: bool,
    /// Log level for stderr output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file (no file logging when unset).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    /// Allow deleting a checkout with uncommitted git changes.
    pub ignore_uncommitted: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
            ignore_uncommitted: false,
        }
    }
}

/// Which revision of the upstream repository to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevisionPin {
    /// A specific commit id (full or abbreviated).
    Commit(String),
    /// The last first-parent commit on the branch on or before this day.
    Date(NaiveDate),
    /// The tip of the configured branch.
    Branch,
}

impl std::fmt::Display for RevisionPin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Commit(sha) => write!(f, "commit {sha}"),
            Self::Date(date) => write!(f, "date {date}"),
            Self::Branch => write!(f, "branch tip"),
        }
    }
}

/// Upstream repository settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    /// Clone URL.
    pub url: String,
    /// Branch to clone, update, and resolve dates against.
    pub branch: String,
    /// Clone with `--depth 1`.
    pub shallow: bool,
    /// Fetch and fast-forward an existing checkout.
    pub update: bool,
    /// Pin the checkout to this commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Pin the checkout to the last commit on or before this day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            branch: "master".to_string(),
            shallow: false,
            update: false,
            commit: None,
            date: None,
        }
    }
}

impl SourceConfig {
    /// Returns the requested revision pin.
    ///
    /// A commit takes precedence over a date; validation rejects configs
    /// that set both.
    #[must_use]
    pub fn pin(&self) -> RevisionPin {
        match (&self.commit, self.date) {
            (Some(sha), _) => RevisionPin::Commit(sha.clone()),
            (None, Some(date)) => RevisionPin::Date(date),
            (None, None) => RevisionPin::Branch,
        }
    }
}

/// Dictionary build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Build script, relative to the checkout unless absolute.
    pub script: PathBuf,
    /// Extra arguments passed to the build script.
    pub script_args: Vec<String>,
    /// Glob matching artifact directories under `<checkout>/build`.
    pub artifact_dir_glob: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from("libexec/make-mecab-ipadic-neologd.sh"),
            script_args: Vec::new(),
            artifact_dir_glob: "mecab-ipadic-*-neologd-*".to_string(),
        }
    }
}

/// Debian package settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    /// Binary and source package name.
    pub name: String,
    /// Upstream part of the version; the build date is appended.
    pub upstream_version: String,
    /// `Name <email>`; falls back to `DEBFULLNAME`/`DEBEMAIL`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer: Option<String>,
    pub section: String,
    pub priority: String,
    pub architecture: String,
    pub homepage: String,
    /// Extra runtime dependencies, appended after `${misc:Depends}`.
    pub depends: Vec<String>,
    /// Synopsis line followed by an optional long description.
    pub description: String,
    pub distribution: String,
    pub urgency: String,
    /// Installation directory of the dictionary, without leading slash.
    pub install_dir: String,
    /// `update-alternatives` priority for `mecab-dictionary`; 0 disables it.
    pub alternatives_priority: u32,
    /// File name globs selecting artifacts to package.
    pub artifacts: Vec<String>,
    /// Packager executable, looked up in `PATH` unless it is a path.
    pub buildpackage: String,
    /// Extra arguments for the packager after `-us -uc -b`.
    pub buildpackage_args: Vec<String>,
    /// Keep the staging directory after the run.
    pub keep_staging: bool,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: "mecab-ipadic-neologd".to_string(),
            upstream_version: "0.0.7".to_string(),
            maintainer: None,
            section: "misc".to_string(),
            priority: "optional".to_string(),
            architecture: "all".to_string(),
            homepage: DEFAULT_SOURCE_URL.to_string(),
            depends: Vec::new(),
            description: "Neologism dictionary for MeCab based on IPADIC\n\
                mecab-ipadic-neologd is a system dictionary for the MeCab\n\
                morphological analyzer, extended with new words extracted\n\
                from many language resources on the Web."
                .to_string(),
            distribution: "unstable".to_string(),
            urgency: "medium".to_string(),
            install_dir: "var/lib/mecab/dic/ipadic-neologd".to_string(),
            alternatives_priority: 60,
            artifacts: vec![
                "*.bin".to_string(),
                "*.dic".to_string(),
                "*.def".to_string(),
                "dicrc".to_string(),
            ],
            buildpackage: "dpkg-buildpackage".to_string(),
            buildpackage_args: Vec::new(),
            keep_staging: false,
        }
    }
}
