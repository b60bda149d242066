// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::BuildScriptTool;
use crate::config::Config;
use crate::error::{FsError, ProcessError};
use crate::task::tools::test_utils::run_with_logs;
use crate::task::tools::{Tool, ToolContext};

fn ctx(dry_run: bool) -> ToolContext {
    ToolContext::new(Arc::new(Config::default()), CancellationToken::new(), dry_run)
}

fn write_script(path: &Path, body: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, format!("#!/bin/sh\nset -e\n{body}\n")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

#[test]
fn test_script_path_resolution() {
    let relative = BuildScriptTool::new()
        .script("libexec/make.sh")
        .cwd("/var/tmp/checkout");
    assert_eq!(
        relative.script_path().unwrap(),
        Path::new("/var/tmp/checkout/libexec/make.sh")
    );

    let absolute = BuildScriptTool::new().script("/opt/make.sh").cwd("/x");
    assert_eq!(absolute.script_path().unwrap(), Path::new("/opt/make.sh"));

    assert!(BuildScriptTool::new().script("make.sh").script_path().is_err());
    assert!(BuildScriptTool::new().script_path().is_err());
}

#[tokio::test]
async fn test_runs_in_checkout_with_args() {
    let temp = tempfile::tempdir().unwrap();
    write_script(
        &temp.path().join("libexec/make.sh"),
        "mkdir -p build\necho \"$@\" > build/args.txt",
    );

    BuildScriptTool::new()
        .script("libexec/make.sh")
        .args(["-a", "--eliminate-redundant-entry"])
        .cwd(temp.path())
        .run(&ctx(false))
        .await
        .unwrap();

    let args = std::fs::read_to_string(temp.path().join("build/args.txt")).unwrap();
    insta::assert_snapshot!(args.trim(), @"-a --eliminate-redundant-entry");
}

#[tokio::test]
async fn test_missing_script_names_path() {
    let temp = tempfile::tempdir().unwrap();
    let err = BuildScriptTool::new()
        .script("libexec/missing.sh")
        .cwd(temp.path())
        .run(&ctx(false))
        .await
        .unwrap_err();

    let expected = temp.path().join("libexec/missing.sh");
    assert!(matches!(
        err.downcast_ref::<FsError>(),
        Some(FsError::NotFound(path)) if Path::new(path) == expected
    ));
    assert!(format!("{err:#}").starts_with("upstream build script is missing: path not found:"));
}

#[tokio::test]
async fn test_failing_script_reports_exit_code() {
    let temp = tempfile::tempdir().unwrap();
    write_script(&temp.path().join("make.sh"), "exit 4");

    let err = BuildScriptTool::new()
        .script("make.sh")
        .cwd(temp.path())
        .run(&ctx(false))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::NonZeroExit { code: 4, .. })
    ));
}

#[tokio::test]
async fn test_dry_run_does_not_require_script() {
    let temp = tempfile::tempdir().unwrap();
    let dry = ctx(true);
    let logs = run_with_logs(|| async {
        BuildScriptTool::new()
            .script("libexec/make-mecab-ipadic-neologd.sh")
            .cwd(temp.path())
            .run(&dry)
            .await
    })
    .await
    .unwrap();

    assert!(logs.contains("[dry-run] Would run build script"));
    assert!(logs.contains("make-mecab-ipadic-neologd.sh"));
}
