// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use super::TaskManager;
use crate::config::Config;
use crate::task::{CleanFlags, Stage};

fn test_config() -> Arc<Config> {
    Arc::new(Config::default())
}

#[test]
fn test_task_manager_cancel_token_is_shared() {
    let manager = TaskManager::new(test_config());
    assert!(!manager.is_cancelled());
    manager.cancel_token().cancel();
    assert!(manager.is_cancelled());
}

#[tokio::test]
async fn test_task_manager_run_empty() {
    TaskManager::new(test_config()).run_all().await.unwrap();
}

#[tokio::test]
async fn test_task_manager_run_cancelled() {
    let mut manager = TaskManager::new(test_config()).with_dry_run(true);
    for stage in Stage::resolve(&["package", "source"]).unwrap() {
        manager.add(stage.task());
    }
    manager.cancel_token().cancel();

    let err = manager.run_all().await.unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"Task execution interrupted before task 1");
}

#[tokio::test]
async fn test_task_manager_dry_run_clean_keeps_build() {
    let temp = tempfile::tempdir().unwrap();
    let build = temp.path().join("checkout/build");
    std::fs::create_dir_all(&build).unwrap();

    let mut config = Config::default();
    config.paths.checkout = Some(temp.path().join("checkout"));
    let mut manager = TaskManager::new(Arc::new(config))
        .with_dry_run(true)
        .with_clean_flags(CleanFlags::REBUILD);
    manager.add(Stage::Dictionary.task());

    // Dry run: the clean phase only logs, and the build phase needs a
    // repository, so the run fails with the directory untouched.
    assert!(manager.run_all().await.is_err());
    assert!(build.is_dir());
}
