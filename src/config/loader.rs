// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file(req)
//!   .add_toml_file(opt)
//!   .add_toml_str()
//!   .with_env_prefix()
//!   .set()
//!        |
//!        v
//!    build() --> Config
//! ```

use std::path::PathBuf;

use super::Config;
use crate::error::{ConfigError, Result};

/// Config keys that environment variables and `--set` take as comma-separated lists.
const LIST_KEYS: &[&str] = &[
    "build.script_args",
    "package.depends",
    "package.artifacts",
    "package.buildpackage_args",
];

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file to the loader.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid TOML, `build()` will return an error.
    #[must_use]
    pub fn add_toml_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.files.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
        Ok(self)
    }

    /// Applies `section/key=value` overrides from the command line.
    ///
    /// List keys take comma-separated values.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if an override is not of the form
    /// `section/key=value`.
    pub fn apply_overrides<S: AsRef<str>>(self, overrides: &[S]) -> Result<Self> {
        overrides.iter().try_fold(self, |loader, raw| {
            let raw = raw.as_ref();
            let parsed = raw
                .split_once('=')
                .and_then(|(path, value)| {
                    path.split_once('/').map(|(section, key)| (section, key, value))
                })
                .filter(|(section, key, _)| !section.is_empty() && !key.is_empty());
            let Some((section, key, value)) = parsed else {
                return Err(ConfigError::InvalidValue {
                    section: "cli".to_string(),
                    key: "set".to_string(),
                    message: format!("'{raw}' is not of the form section/key=value"),
                }
                .into());
            };

            let dotted = format!("{}.{}", section.trim(), key.trim());
            if LIST_KEYS.contains(&dotted.as_str()) {
                loader.set(&dotted, split_list(value))
            } else {
                loader.set(&dotted, value)
            }
        })
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid TOML syntax.
    /// - Environment variables cannot be parsed.
    /// - The merged configuration cannot be deserialized into the `Config` struct.
    pub fn build(self) -> Result<Config> {
        let builder = match &self.env_prefix {
            Some(prefix) => self.builder.add_source(EnvSource::new(prefix)),
            None => self.builder,
        };
        let cfg = builder.build()?;
        let mut config: Config = cfg.try_deserialize()?;
        config.resolve_and_validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

/// `<PREFIX>_<SECTION>__<KEY>` environment variables as a config source.
///
/// Values stay strings so commit ids and versions keep their exact text;
/// serde converts them for `bool` and integer fields. [`LIST_KEYS`] split
/// on commas.
#[derive(Debug, Clone)]
struct EnvSource {
    prefix: String,
}

impl EnvSource {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: format!("{}_", prefix.to_uppercase()),
        }
    }

    /// Maps a variable name to its dotted config key.
    fn key_for(&self, name: &str) -> Option<String> {
        let rest = name.strip_prefix(&self.prefix)?;
        let parts: Vec<String> = rest.split("__").map(str::to_lowercase).collect();
        if parts.len() < 2 || parts.iter().any(String::is_empty) {
            return None;
        }
        Some(parts.join("."))
    }
}

impl config::Source for EnvSource {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> std::result::Result<config::Map<String, config::Value>, config::ConfigError> {
        let origin = "the environment".to_string();
        let mut map = config::Map::new();
        for (name, value) in std::env::vars_os() {
            let (Some(name), Some(value)) = (name.to_str(), value.to_str()) else {
                continue;
            };
            let Some(key) = self.key_for(name) else {
                continue;
            };
            let kind = if LIST_KEYS.contains(&key.as_str()) {
                config::ValueKind::Array(
                    split_list(value)
                        .into_iter()
                        .map(|item| config::Value::new(Some(&origin), item))
                        .collect(),
                )
            } else {
                config::ValueKind::String(value.to_string())
            };
            map.insert(key, config::Value::new(Some(&origin), kind));
        }
        Ok(map)
    }
}

/// Splits a comma-separated list, dropping empty items.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
