// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for neologd-deb.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. neologd-deb.toml (cwd, optional)
//! 3. --ini files
//! 4. NEOLOGD_DEB_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! NEOLOGD_DEB_GLOBAL__DRY=true            → global.dry = true
//! NEOLOGD_DEB_PATHS__WORK_DIR=/srv/build  → paths.work_dir = "/srv/build"
//! NEOLOGD_DEB_PACKAGE__DEPENDS=mecab,foo  → package.depends = ["mecab", "foo"]
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use anyhow::Context;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::PathsConfig;
use types::{BuildConfig, GlobalConfig, PackageConfig, SourceConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Paths configuration.
    pub paths: PathsConfig,
    /// Upstream repository.
    pub source: SourceConfig,
    /// Dictionary build.
    pub build: BuildConfig,
    /// Debian package metadata.
    pub package: PackageConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use neologd_deb::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("neologd-deb.toml")
    ///     .with_env_prefix("NEOLOGD_DEB")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Resolve all paths and validate configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if:
    /// - both `source.commit` and `source.date` are set,
    /// - `source.commit` is not a hexadecimal commit id,
    /// - a revision is pinned while `source.shallow` is enabled,
    /// - `source.branch`, `package.artifacts` or `package.buildpackage` is empty.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        self.paths.resolve()?;

        let invalid = |section: &str, key: &str, message: &str| ConfigError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            message: message.to_string(),
        };

        if self.source.commit.is_some() && self.source.date.is_some() {
            return Err(invalid("source", "commit", "cannot be combined with 'date'").into());
        }
        let commit_re =
            Regex::new("^[0-9a-fA-F]{4,40}$").context("failed to compile commit id regex")?;
        if let Some(sha) = &self.source.commit
            && !commit_re.is_match(sha)
        {
            return Err(invalid(
                "source",
                "commit",
                &format!("'{sha}' is not a hexadecimal commit id"),
            )
            .into());
        }
        if self.source.shallow && (self.source.commit.is_some() || self.source.date.is_some()) {
            return Err(invalid(
                "source",
                "shallow",
                "revision pinning needs full history",
            )
            .into());
        }
        if self.source.branch.trim().is_empty() {
            return Err(invalid("source", "branch", "must not be empty").into());
        }
        if self.package.artifacts.is_empty() {
            return Err(invalid("package", "artifacts", "at least one pattern is required").into());
        }
        if self.package.buildpackage.trim().is_empty() {
            return Err(invalid("package", "buildpackage", "must not be empty").into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap` with keys aligned.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_paths_options(&mut options);
        self.format_source_options(&mut options);
        self.format_build_options(&mut options);
        self.format_package_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global
                .log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "global.ignore_uncommitted".into(),
            self.global.ignore_uncommitted.to_string(),
        );
    }

    fn format_paths_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "paths.work_dir".into(),
            self.paths.work_dir.display().to_string(),
        );
        options.insert(
            "paths.checkout".into(),
            self.paths.checkout().display().to_string(),
        );
        options.insert(
            "paths.output".into(),
            self.paths.output().display().to_string(),
        );
    }

    fn format_source_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("source.url".into(), self.source.url.clone());
        options.insert("source.branch".into(), self.source.branch.clone());
        options.insert("source.shallow".into(), self.source.shallow.to_string());
        options.insert("source.update".into(), self.source.update.to_string());
        options.insert(
            "source.commit".into(),
            self.source.commit.clone().unwrap_or_default(),
        );
        options.insert(
            "source.date".into(),
            self.source.date.map(|d| d.to_string()).unwrap_or_default(),
        );
    }

    fn format_build_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "build.script".into(),
            self.build.script.display().to_string(),
        );
        options.insert("build.script_args".into(), self.build.script_args.join(" "));
        options.insert(
            "build.artifact_dir_glob".into(),
            self.build.artifact_dir_glob.clone(),
        );
    }

    fn format_package_options(&self, options: &mut BTreeMap<String, String>) {
        let p = &self.package;
        options.insert("package.name".into(), p.name.clone());
        options.insert("package.upstream_version".into(), p.upstream_version.clone());
        options.insert(
            "package.maintainer".into(),
            p.maintainer.clone().unwrap_or_default(),
        );
        options.insert("package.section".into(), p.section.clone());
        options.insert("package.priority".into(), p.priority.clone());
        options.insert("package.architecture".into(), p.architecture.clone());
        options.insert("package.homepage".into(), p.homepage.clone());
        options.insert("package.depends".into(), p.depends.join(", "));
        options.insert(
            "package.description".into(),
            p.description.lines().next().unwrap_or_default().to_string(),
        );
        options.insert("package.distribution".into(), p.distribution.clone());
        options.insert("package.urgency".into(), p.urgency.clone());
        options.insert("package.install_dir".into(), p.install_dir.clone());
        options.insert(
            "package.alternatives_priority".into(),
            p.alternatives_priority.to_string(),
        );
        options.insert("package.artifacts".into(), p.artifacts.join(" "));
        options.insert("package.buildpackage".into(), p.buildpackage.clone());
        options.insert(
            "package.buildpackage_args".into(),
            p.buildpackage_args.join(" "),
        );
        options.insert("package.keep_staging".into(), p.keep_staging.to_string());
    }
}
