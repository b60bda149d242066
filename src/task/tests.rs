// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{CleanFlags, Phase, Stage, Task, TaskContext, Taskable};
use crate::config::Config;
use crate::error::TaskError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn test_config() -> Arc<Config> {
    Arc::new(Config::default())
}

#[test]
fn test_phase_names() {
    let names: Vec<_> = Phase::all().iter().map(Phase::name).collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "clean",
        "fetch",
        "build_and_install",
    ]
    "#);
}

#[test]
fn test_clean_flags() {
    let flags = CleanFlags::RECLONE | CleanFlags::REBUILD;
    assert!(flags.contains(CleanFlags::RECLONE));
    assert!(flags.contains(CleanFlags::REBUILD));
    assert!(CleanFlags::default().is_empty());
}

#[test]
fn test_task_context_defaults() {
    let ctx = TaskContext::new(test_config(), CancellationToken::new());
    insta::assert_debug_snapshot!(
        (
            ctx.is_dry_run(),
            ctx.clean_flags().is_empty(),
        ),
        @r"
    (
        false,
        true,
    )
    "
    );
}

#[test]
fn test_task_context_builder() {
    let ctx = TaskContext::new(test_config(), CancellationToken::new())
        .with_dry_run(true)
        .with_clean_flags(CleanFlags::REBUILD);

    assert!(ctx.is_dry_run());
    assert_eq!(ctx.clean_flags(), CleanFlags::REBUILD);
    assert!(ctx.tool_context().is_dry_run());
}

#[test]
fn test_task_context_cancellation() {
    let token = CancellationToken::new();
    let ctx = TaskContext::new(test_config(), token.clone());
    assert!(!ctx.is_cancelled());
    token.cancel();
    assert!(ctx.is_cancelled());
    assert!(ctx.tool_context().is_cancelled());
}

#[test]
fn test_stage_resolve_orders_and_dedups() {
    let stages = Stage::resolve(&["package", "source", "Package"]).unwrap();
    assert_eq!(stages, vec![Stage::Source, Stage::Package]);

    let all = Stage::resolve::<&str>(&[]).unwrap();
    assert_eq!(all, Stage::all());
}

#[test]
fn test_stage_resolve_unknown() {
    let err = Stage::resolve(&["install"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TaskError>(),
        Some(TaskError::NotFound(name)) if name == "install"
    ));
    insta::assert_snapshot!(err.to_string(), @"stage 'install' not found");
}

#[test]
fn test_stage_tasks() {
    let names: Vec<String> = Stage::all()
        .iter()
        .map(|s| Taskable::name(&s.task()).to_string())
        .collect();
    insta::assert_debug_snapshot!(names, @r#"
    [
        "source",
        "dictionary",
        "package",
    ]
    "#);
}

#[tokio::test]
async fn test_task_run_cancelled() {
    let token = CancellationToken::new();
    token.cancel();
    let ctx = TaskContext::new(test_config(), token).with_dry_run(true);

    let err = Task::Source(super::SourceTask::new())
        .run(&ctx)
        .await
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"stage 'source' was interrupted");
}

#[tokio::test]
async fn test_task_run_skips_clean_without_flags() {
    let temp = tempfile::tempdir().unwrap();
    let build = temp.path().join("checkout/build");
    std::fs::create_dir_all(&build).unwrap();

    let mut config = Config::default();
    config.paths.checkout = Some(temp.path().join("checkout"));
    let ctx = TaskContext::new(Arc::new(config), CancellationToken::new());

    // The checkout is not a repository, so the build phase fails; the clean
    // phase must not have removed the build directory before it.
    assert!(
        Task::Dictionary(super::DictionaryTask::new())
            .run(&ctx)
            .await
            .is_err()
    );
    assert!(build.is_dir());
}
