// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build command implementation for neologd-deb.

use std::sync::Arc;

use crate::cli::build::BuildArgs;
use crate::config::Config;
use crate::error::Result;
use crate::task::manager::TaskManager;
use crate::task::{CleanFlags, Stage};

/// Main handler for build command.
///
/// Revision and packaging flags are expected to be merged into `config`
/// already; only stage selection and clean actions are read from `args`.
///
/// # Errors
///
/// Returns an error if a stage name is unknown or a stage fails.
pub async fn run_build_command(args: &BuildArgs, config: &Config) -> Result<()> {
    let config = Arc::new(config.clone());

    let clean_flags = compute_clean_flags(args);
    let stages = resolve_stages(args)?;

    let mut manager = TaskManager::new(Arc::clone(&config))
        .with_dry_run(config.global.dry)
        .with_clean_flags(clean_flags);

    let cancel_token = manager.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, interrupting stages...");
            cancel_token.cancel();
        }
    });

    if stages.is_empty() {
        tracing::warn!(stages = ?args.stages, "No stages left to run");
    } else {
        tracing::info!(
            stages = ?stages.iter().map(Stage::name).collect::<Vec<_>>(),
            pin = %config.source.pin(),
            "Resolved stages to run"
        );
    }
    for stage in stages {
        manager.add(stage.task());
    }

    match manager.run_all().await {
        Ok(()) => {
            tracing::info!("Build completed successfully");
            Ok(())
        }
        Err(e) => {
            eprintln!("Build failed: {e}");
            Err(e)
        }
    }
}

pub(crate) fn compute_clean_flags(args: &BuildArgs) -> CleanFlags {
    let mut clean_flags = CleanFlags::empty();
    if args.clean.reclone {
        clean_flags |= CleanFlags::RECLONE;
    }
    if args.clean.rebuild {
        clean_flags |= CleanFlags::REBUILD;
    }
    clean_flags
}

pub(crate) fn resolve_stages(args: &BuildArgs) -> Result<Vec<Stage>> {
    let mut stages = Stage::resolve(&args.stages)?;
    if args.no_package {
        stages.retain(|stage| *stage != Stage::Package);
    }
    Ok(stages)
}
