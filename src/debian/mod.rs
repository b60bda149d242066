// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Debian package metadata and source tree generation.
//!
//! ```text
//! PackageConfig + DebVersion + upstream commit
//!            |
//!            v
//!       PackageMeta
//!            |
//!            v
//!   templates::render_*()     pure string rendering
//!            |
//!            v
//!   skeleton::write_skeleton()
//!   <staging>/<name>-<version>/debian/
//!     control changelog rules install copyright
//!     source/format [postinst prerm]
//! ```

pub mod skeleton;
pub mod templates;


use anyhow::Context;
use chrono::NaiveDate;
use regex::Regex;

use crate::config::types::{PackageConfig, SourceConfig};
use crate::error::{PackageError, Result};

/// Maintainer used when neither the config nor the environment names one.
pub const DEFAULT_MAINTAINER: &str = "neologd-deb <neologd-deb@localhost>";

/// Package version: `<upstream>+<YYYYMMDD>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebVersion {
    upstream: String,
    date: NaiveDate,
}

impl DebVersion {
    /// Creates a version and validates it against Debian version syntax.
    ///
    /// # Errors
    ///
    /// Returns a `PackageError::InvalidVersion` if the rendered version is not
    /// a valid native Debian version, which has no `-revision` part.
    pub fn new(upstream: impl Into<String>, date: NaiveDate) -> Result<Self> {
        let version = Self {
            upstream: upstream.into(),
            date,
        };
        let re = Regex::new("^[0-9][A-Za-z0-9.+~]*$")
            .context("failed to compile version regex")?;
        let rendered = version.to_string();
        if !re.is_match(&rendered) {
            return Err(PackageError::InvalidVersion(rendered).into());
        }
        Ok(version)
    }

    /// Creates a version from a `YYYYMMDD` stamp such as `git log
    /// --date=format:%Y%m%d` prints.
    ///
    /// # Errors
    ///
    /// Returns an error if the stamp is not a valid date or the version is
    /// invalid.
    pub fn from_stamp(upstream: impl Into<String>, stamp: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(stamp.trim(), "%Y%m%d")
            .with_context(|| format!("invalid date stamp '{stamp}'"))?;
        Self::new(upstream, date)
    }

    #[must_use]
    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }
}

impl std::fmt::Display for DebVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}", self.upstream, self.date.format("%Y%m%d"))
    }
}

/// Validates a Debian package name.
///
/// # Errors
///
/// Returns a `PackageError::InvalidName` if the name does not match
/// `^[a-z0-9][a-z0-9+.-]+$`.
pub fn validate_package_name(name: &str) -> Result<()> {
    let re = Regex::new("^[a-z0-9][a-z0-9+.-]+$").context("failed to compile name regex")?;
    if re.is_match(name) {
        Ok(())
    } else {
        Err(PackageError::InvalidName(name.to_string()).into())
    }
}

/// Picks the maintainer: the configured value, else `DEBFULLNAME`/`NAME` with
/// `DEBEMAIL`/`EMAIL` from `lookup`, else [`DEFAULT_MAINTAINER`].
#[must_use]
pub fn resolve_maintainer<F>(configured: Option<&str>, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(m) = configured.map(str::trim).filter(|m| !m.is_empty()) {
        return m.to_string();
    }

    let first = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| lookup(k).filter(|v| !v.trim().is_empty()))
    };

    match (first(&["DEBFULLNAME", "NAME"]), first(&["DEBEMAIL", "EMAIL"])) {
        (Some(name), Some(email)) => format!("{} <{}>", name.trim(), email.trim()),
        _ => DEFAULT_MAINTAINER.to_string(),
    }
}

/// Everything the templates need to render the Debian source tree.
#[derive(Debug, Clone)]
pub struct PackageMeta {
    pub name: String,
    pub version: DebVersion,
    pub maintainer: String,
    pub section: String,
    pub priority: String,
    pub architecture: String,
    pub homepage: String,
    pub depends: Vec<String>,
    pub description: String,
    pub distribution: String,
    pub urgency: String,
    pub install_dir: String,
    pub alternatives_priority: u32,
    pub upstream_url: String,
    pub upstream_commit: String,
}

impl PackageMeta {
    /// Builds package metadata from configuration and the built revision.
    ///
    /// The maintainer falls back to the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the package name is invalid.
    pub fn from_config(
        package: &PackageConfig,
        source: &SourceConfig,
        version: DebVersion,
        upstream_commit: &str,
    ) -> Result<Self> {
        validate_package_name(&package.name)?;

        Ok(Self {
            name: package.name.clone(),
            version,
            maintainer: resolve_maintainer(package.maintainer.as_deref(), |k| {
                std::env::var(k).ok()
            }),
            section: package.section.clone(),
            priority: package.priority.clone(),
            architecture: package.architecture.clone(),
            homepage: package.homepage.clone(),
            depends: package.depends.clone(),
            description: package.description.clone(),
            distribution: package.distribution.clone(),
            urgency: package.urgency.clone(),
            install_dir: package.install_dir.trim_matches('/').to_string(),
            alternatives_priority: package.alternatives_priority,
            upstream_url: source.url.clone(),
            upstream_commit: upstream_commit.to_string(),
        })
    }

    /// `<name>-<version>`, the source directory `dpkg-buildpackage` runs in.
    #[must_use]
    pub fn source_dir_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }

    /// Whether maintainer scripts register the dictionary with
    /// `update-alternatives`.
    #[must_use]
    pub const fn registers_alternative(&self) -> bool {
        self.alternatives_priority > 0
    }
}
