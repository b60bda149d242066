// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{DictionaryTask, REVISION_STAMP, find_artifact_dir};
use crate::config::Config;
use crate::error::FsError;
use crate::task::tools::test_utils::{commit_file, init_upstream, run_with_logs};
use crate::task::{CleanFlags, TaskContext};

const ARTIFACT_DIR: &str = "mecab-ipadic-2.7.0-20070801-neologd-20200910";

/// Fake build script: writes a dictionary and counts its runs in `runs.log`.
fn fake_build_script(root: &Path) -> PathBuf {
    let script = root.join("make-dictionary.sh");
    std::fs::write(
        &script,
        format!(
            "#!/bin/sh\nset -e\necho run >> \"{runs}\"\n\
             mkdir -p build/{ARTIFACT_DIR}\n\
             echo sys > build/{ARTIFACT_DIR}/sys.dic\n\
             echo rc > build/{ARTIFACT_DIR}/dicrc\n",
            runs = root.join("runs.log").display()
        ),
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    script
}

fn runs(root: &Path) -> usize {
    std::fs::read_to_string(root.join("runs.log"))
        .map(|s| s.lines().count())
        .unwrap_or(0)
}

fn setup(root: &Path) -> (Config, String) {
    let checkout = root.join("checkout");
    std::fs::create_dir(&checkout).unwrap();
    let head = init_upstream(&checkout);

    let mut config = Config::default();
    config.paths.work_dir = root.to_path_buf();
    config.paths.checkout = Some(checkout);
    config.build.script = fake_build_script(root);
    (config, head)
}

fn ctx(config: Config) -> TaskContext {
    TaskContext::new(Arc::new(config), CancellationToken::new())
}

#[test]
fn test_find_artifact_dir_picks_last_with_sys_dic() {
    let temp = tempfile::tempdir().unwrap();
    let build = temp.path();
    for name in [
        "mecab-ipadic-2.7.0-20070801-neologd-20190101",
        "mecab-ipadic-2.7.0-20070801-neologd-20200910",
        "mecab-ipadic-2.7.0-20070801-neologd-20210101",
        "unrelated",
    ] {
        std::fs::create_dir(build.join(name)).unwrap();
    }
    for name in [
        "mecab-ipadic-2.7.0-20070801-neologd-20190101",
        "mecab-ipadic-2.7.0-20070801-neologd-20200910",
        "unrelated",
    ] {
        std::fs::write(build.join(name).join("sys.dic"), "x").unwrap();
    }

    let found = find_artifact_dir(build, "mecab-ipadic-*-neologd-*").unwrap();
    assert_eq!(
        found.unwrap(),
        build.join("mecab-ipadic-2.7.0-20070801-neologd-20200910")
    );

    assert!(
        find_artifact_dir(&build.join("missing"), "*")
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_build_writes_stamp_and_skips_second_time() {
    let temp = tempfile::tempdir().unwrap();
    let (config, head) = setup(temp.path());
    let build_dir = config.paths.build_dir();
    let ctx = ctx(config);
    let task = DictionaryTask::new();

    let dir = task.ensure_build(&ctx).await.unwrap().unwrap();
    assert_eq!(dir, build_dir.join(ARTIFACT_DIR));
    assert_eq!(
        std::fs::read_to_string(build_dir.join(REVISION_STAMP))
            .unwrap()
            .trim(),
        head
    );

    task.ensure_build(&ctx).await.unwrap();
    assert_eq!(runs(temp.path()), 1);
}

#[tokio::test]
async fn test_stale_build_is_rebuilt() {
    let temp = tempfile::tempdir().unwrap();
    let (config, _) = setup(temp.path());
    let checkout = config.paths.checkout();
    let build_dir = config.paths.build_dir();
    let ctx = ctx(config);
    let task = DictionaryTask::new();

    task.ensure_build(&ctx).await.unwrap();
    let newer = commit_file(&checkout, "seed.csv", "a\n", "2016-01-10");
    task.ensure_build(&ctx).await.unwrap();

    assert_eq!(runs(temp.path()), 2);
    assert_eq!(
        std::fs::read_to_string(build_dir.join(REVISION_STAMP))
            .unwrap()
            .trim(),
        newer
    );
}

#[tokio::test]
async fn test_rebuild_clean_removes_build_dir() {
    let temp = tempfile::tempdir().unwrap();
    let (config, _) = setup(temp.path());
    let build_dir = config.paths.build_dir();
    let ctx = ctx(config);
    let task = DictionaryTask::new();

    task.ensure_build(&ctx).await.unwrap();
    task.do_clean(&ctx, CleanFlags::RECLONE).await.unwrap();
    assert!(build_dir.exists());

    task.do_clean(&ctx, CleanFlags::REBUILD).await.unwrap();
    assert!(!build_dir.exists());

    task.ensure_build(&ctx).await.unwrap();
    assert_eq!(runs(temp.path()), 2);
}

#[tokio::test]
async fn test_script_without_output_fails() {
    let temp = tempfile::tempdir().unwrap();
    let (mut config, _) = setup(temp.path());
    let script = temp.path().join("noop.sh");
    std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    config.build.script = script;

    let err = DictionaryTask::new()
        .ensure_build(&ctx(config))
        .await
        .unwrap_err();
    assert!(
        err.to_string()
            .starts_with("build script left no directory matching 'mecab-ipadic-*-neologd-*'")
    );
}

#[tokio::test]
async fn test_missing_checkout() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.paths.checkout = Some(temp.path().join("absent"));

    let err = DictionaryTask::new()
        .ensure_build(&ctx(config))
        .await
        .unwrap_err();
    assert!(err.downcast_ref::<FsError>().is_some());
}

#[tokio::test]
async fn test_dry_run_does_not_build() {
    let temp = tempfile::tempdir().unwrap();
    let (config, _) = setup(temp.path());
    let build_dir = config.paths.build_dir();
    let dry = ctx(config).with_dry_run(true);

    let logs = run_with_logs(|| async {
        let built = DictionaryTask::new().ensure_build(&dry).await?;
        assert!(built.is_none());
        Ok(())
    })
    .await
    .unwrap();

    assert!(logs.contains("[dry-run] Would run build script"));
    assert!(!build_dir.exists());
    assert_eq!(runs(temp.path()), 0);
}
