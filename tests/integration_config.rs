// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests the Config module with realistic TOML configurations.

use chrono::NaiveDate;
use neologd_deb::config::Config;
use neologd_deb::config::loader::ConfigLoader;
use neologd_deb::config::types::RevisionPin;
use neologd_deb::error::ConfigError;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_minimal() {
    let config = Config::parse("").unwrap();
    assert_eq!(config.source.branch, "master");
    assert_eq!(config.source.pin(), RevisionPin::Branch);
    assert_eq!(config.package.name, "mecab-ipadic-neologd");
    assert_eq!(config.package.alternatives_priority, 60);
}

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
dry = true
output_log_level = 4

[paths]
work_dir = "/srv/neologd"
output = "/srv/debs"

[source]
url = "https://mirror.example.org/neologd.git"
branch = "develop"
date = "2020-09-10"

[build]
script_args = ["--eliminate-redundant-entry"]

[package]
maintainer = "Jane Doe <jane@example.org>"
depends = ["mecab-utils"]
install_dir = "/usr/share/mecab/dic/neologd"
alternatives_priority = 0
buildpackage_args = ["-j4"]
"#;
    let config = Config::parse(toml).unwrap();

    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level.as_u8(), 4);
    assert_eq!(
        config.paths.checkout().display().to_string(),
        "/srv/neologd/mecab-ipadic-neologd"
    );
    assert_eq!(config.paths.output().display().to_string(), "/srv/debs");
    assert_eq!(
        config.source.pin(),
        RevisionPin::Date(NaiveDate::from_ymd_opt(2020, 9, 10).unwrap())
    );
    assert_eq!(config.build.script_args, ["--eliminate-redundant-entry"]);
    assert_eq!(config.package.depends, ["mecab-utils"]);
    assert_eq!(config.package.alternatives_priority, 0);
    assert_eq!(config.package.buildpackage_args, ["-j4"]);
}

#[test]
fn config_relative_checkout_resolves_against_work_dir() {
    let config = Config::parse("[paths]\nwork_dir = \"/srv/neologd\"\ncheckout = \"src/neologd\"\n")
        .unwrap();
    assert_eq!(
        config.paths.build_dir().display().to_string(),
        "/srv/neologd/src/neologd/build"
    );
}

#[test]
fn config_rejects_commit_and_date() {
    let err = Config::parse("[source]\ncommit = \"abc123\"\ndate = \"2020-09-10\"\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'commit' in section '[source]': cannot be combined with 'date'"
    );
}

#[test]
fn config_rejects_shallow_pin() {
    let err = Config::parse("[source]\nshallow = true\ndate = \"2020-09-10\"\n").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { key, .. }) if key == "shallow"
    ));
}

#[test]
fn config_rejects_empty_buildpackage() {
    let err = Config::parse("[package]\nbuildpackage = \" \"\n").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::InvalidValue { key, .. }) if key == "buildpackage"
    ));
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_files_layer_in_order() {
    let temp = tempfile::tempdir().unwrap();
    let site = temp.path().join("site.toml");
    let local = temp.path().join("local.toml");
    std::fs::write(
        &site,
        "[package]\nurgency = \"low\"\ndistribution = \"bookworm\"\n",
    )
    .unwrap();
    std::fs::write(&local, "[package]\nurgency = \"high\"\n").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(temp.path().join("neologd-deb.toml"))
        .add_toml_file(&site)
        .add_toml_file(&local);
    assert_eq!(
        loader.format_loaded_files(),
        [
            format!("1. [file] {}", site.display()),
            format!("2. [file] {}", local.display()),
        ]
    );

    let config = loader.build().unwrap();
    assert_eq!(config.package.urgency, "high");
    assert_eq!(config.package.distribution, "bookworm");
}

#[test]
fn config_overrides_beat_files() {
    let config = ConfigLoader::new()
        .add_toml_str("[package]\nurgency = \"high\"\n")
        .apply_overrides(&["package/urgency=critical"])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.package.urgency, "critical");
}

// =============================================================================
// Options output
// =============================================================================

#[test]
fn config_format_options_source_section() {
    let config = Config::parse(
        "[paths]\nwork_dir = \"/srv/neologd\"\n\
         [source]\nurl = \"/srv/mirror/neologd.git\"\ncommit = \"0a1b2c3d\"\n",
    )
    .unwrap();

    let source: Vec<String> = config
        .format_options()
        .into_iter()
        .filter(|line| line.starts_with("source."))
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    insta::assert_debug_snapshot!(source, @r#"
    [
        "source.branch = master",
        "source.commit = 0a1b2c3d",
        "source.date =",
        "source.shallow = false",
        "source.update = false",
        "source.url = /srv/mirror/neologd.git",
    ]
    "#);
}

// =============================================================================
// Environment variables
// =============================================================================

#[test]
fn config_env_values_keep_their_text() {
    // SAFETY: the variables use a prefix no other test reads
    unsafe {
        std::env::set_var("NDEBENVTEXT_SOURCE__COMMIT", "01234567");
        std::env::set_var("NDEBENVTEXT_PACKAGE__UPSTREAM_VERSION", "1.0");
        std::env::set_var("NDEBENVTEXT_PACKAGE__ALTERNATIVES_PRIORITY", "40");
        std::env::set_var("NDEBENVTEXT_PACKAGE__DEPENDS", "mecab, mecab-utils");
        std::env::set_var("NDEBENVTEXT_GLOBAL__DRY", "true");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[global]\ndry = false\n")
        .with_env_prefix("NDEBENVTEXT")
        .build();

    // SAFETY: same as above
    unsafe {
        for key in [
            "NDEBENVTEXT_SOURCE__COMMIT",
            "NDEBENVTEXT_PACKAGE__UPSTREAM_VERSION",
            "NDEBENVTEXT_PACKAGE__ALTERNATIVES_PRIORITY",
            "NDEBENVTEXT_PACKAGE__DEPENDS",
            "NDEBENVTEXT_GLOBAL__DRY",
        ] {
            std::env::remove_var(key);
        }
    }

    let config = config.unwrap();
    assert_eq!(config.source.commit.as_deref(), Some("01234567"));
    assert_eq!(config.package.upstream_version, "1.0");
    assert_eq!(config.package.alternatives_priority, 40);
    assert_eq!(config.package.depends, ["mecab", "mecab-utils"]);
    assert!(config.global.dry);
}

#[test]
fn config_cli_overrides_beat_env() {
    // SAFETY: the variable uses a prefix no other test reads
    unsafe {
        std::env::set_var("NDEBENVCLI_PACKAGE__URGENCY", "low");
    }

    let config = ConfigLoader::new()
        .with_env_prefix("NDEBENVCLI")
        .apply_overrides(&["package/urgency=high"])
        .and_then(ConfigLoader::build);

    // SAFETY: same as above
    unsafe {
        std::env::remove_var("NDEBENVCLI_PACKAGE__URGENCY");
    }

    assert_eq!(config.unwrap().package.urgency, "high");
}
