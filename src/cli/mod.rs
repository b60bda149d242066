// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for neologd-deb using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! neologd-deb [global options] <command>
//! build [stages...]
//! revision
//! options
//! inis
//! version
//! ```

pub mod build;
pub mod global;


use crate::cli::build::{BuildArgs, RevisionArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// mecab-ipadic-neologd Debian package builder
///
/// Builds a Debian package of the mecab-ipadic-neologd dictionary from its
/// upstream repository.
#[derive(Debug, Parser)]
#[command(
    name = "neologd-deb",
    author,
    version,
    about = "mecab-ipadic-neologd Debian package builder",
    long_about = "neologd-deb Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Builds a Debian package of the mecab-ipadic-neologd dictionary.\n\n\
                  `neologd-deb build` clones the upstream repository, runs its\n\
                  build script and packages the result with dpkg-buildpackage.\n\
                  `neologd-deb build --date 2020-09-10` builds the dictionary as\n\
                  it was on that day. See `neologd-deb <command> --help` for more\n\
                  information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  neologd-deb loads `neologd-deb.toml` from the current directory\n\
                  when it exists. Additional files can be given with --ini, those\n\
                  are loaded afterwards and override it. NEOLOGD_DEB_* environment\n\
                  variables (NEOLOGD_DEB_PACKAGE__MAINTAINER) override files, and\n\
                  command-line flags override everything. Use --no-default-inis to\n\
                  only use --ini."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by neologd-deb.
    Inis,

    /// Builds the dictionary package.
    Build(BuildArgs),

    /// Prints the upstream commit the revision options select.
    Revision(RevisionArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
