// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path configuration.
//!
//! ```text
//! work_dir/                 (default /var/tmp)
//!   mecab-ipadic-neologd/   (checkout)
//!     build/<artifacts>/
//!   neologd-deb-XXXXXX/     (staging, temporary)
//! output/                   (default: current directory)
//! ```
//!
//! Relative `checkout` resolves against `work_dir`; relative `output`
//! resolves against the current directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Default name of the checkout directory inside `work_dir`.
pub const CHECKOUT_DIR_NAME: &str = "mecab-ipadic-neologd";

/// Working and output paths configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Parent of the checkout and the staging directory.
    pub work_dir: PathBuf,
    /// Upstream checkout (default: `work_dir/mecab-ipadic-neologd`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout: Option<PathBuf>,
    /// Where built `.deb` files are copied (default: current directory).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("/var/tmp"),
            checkout: None,
            output: None,
        }
    }
}

impl PathsConfig {
    /// Resolve relative paths and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if `work_dir` is empty, or an
    /// error if the current directory cannot be determined.
    pub fn resolve(&mut self) -> Result<()> {
        if self.work_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: "paths".to_string(),
                key: "work_dir".to_string(),
                message: "must not be empty".to_string(),
            }
            .into());
        }

        let cwd = std::env::current_dir()?;
        if self.work_dir.is_relative() {
            self.work_dir = cwd.join(&self.work_dir);
        }

        let resolve = |path: &mut Option<PathBuf>, parent: &Path, default: &str| match path {
            Some(p) if p.is_relative() => {
                *path = Some(parent.join(p.clone()));
            }
            None => {
                *path = Some(parent.join(default));
            }
            _ => {}
        };

        resolve(&mut self.checkout, &self.work_dir, CHECKOUT_DIR_NAME);
        self.output = Some(match self.output.take() {
            Some(p) if p.is_relative() => cwd.join(p),
            Some(p) => p,
            None => cwd,
        });

        Ok(())
    }

    /// Get the checkout path, defaulting when unresolved.
    #[must_use]
    pub fn checkout(&self) -> PathBuf {
        self.checkout
            .clone()
            .unwrap_or_else(|| self.work_dir.join(CHECKOUT_DIR_NAME))
    }

    /// Get the output directory, defaulting to `.` when unresolved.
    #[must_use]
    pub fn output(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// `<checkout>/build`, where the upstream script writes its artifacts.
    #[must_use]
    pub fn build_dir(&self) -> PathBuf {
        self.checkout().join("build")
    }
}
