// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Config --> Command Dispatch
//!   Build | Revision | Options | Inis | Version
//! ```

use std::process::ExitCode;

use neologd_deb::cli::global::GlobalOptions;
use neologd_deb::cli::{self, Command};
use neologd_deb::cmd::build::run_build_command;
use neologd_deb::cmd::config::{run_inis_command, run_options_command};
use neologd_deb::cmd::revision::run_revision_command;
use neologd_deb::config::Config;
use neologd_deb::config::loader::ConfigLoader;
use neologd_deb::logging::init_logging;
use neologd_deb::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Config file picked up from the current directory.
const DEFAULT_INI: &str = "neologd-deb.toml";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "NEOLOGD_DEB";

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .with_show_target(console_level == LogLevel::DUMP)
        .maybe_with_log_file(global.log_file.as_ref().map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            load_config(&cli.global, &[]).map(|config| run_options_command(&config))
        }
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Build(args)) => match load_config(&cli.global, &args.to_config_overrides())
        {
            Ok(config) => run_build_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::Revision(args)) => {
            match load_config(&cli.global, &args.to_config_overrides()) {
                Ok(config) => run_revision_command(&config).await,
                Err(e) => Err(e),
            }
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(DEFAULT_INI);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

fn load_config(
    global: &GlobalOptions,
    command_overrides: &[String],
) -> neologd_deb::error::Result<Config> {
    let mut overrides = global.to_config_overrides();
    overrides.extend_from_slice(command_overrides);

    build_config_loader(global)
        .apply_overrides(&overrides)
        .and_then(ConfigLoader::build)
        .map_err(|e| {
            eprintln!("Failed to load config: {e}");
            e
        })
}
