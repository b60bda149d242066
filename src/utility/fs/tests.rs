// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::copy::{copy_matching_async, matching_files};
use super::walk::{WalkOptions, find_dirs, find_files};
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn names(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
        .collect()
}

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, "").unwrap();
}

// =============================================================================
// walk
// =============================================================================

#[test]
fn test_find_files_recursive() {
    let temp = temp_dir();
    touch(temp.path(), "file1.rs");
    touch(temp.path(), "file2.txt");
    touch(temp.path(), "subdir/file3.rs");

    let rust_files = find_files(temp.path(), "**/*.rs", &WalkOptions::default()).unwrap();

    assert_eq!(names(&rust_files), vec!["file1.rs", "file3.rs"]);
}

#[test]
fn test_find_files_top_level_only() {
    let temp = temp_dir();
    touch(temp.path(), "a_1.0_all.deb");
    touch(temp.path(), "nested/b_1.0_all.deb");
    touch(temp.path(), "a_1.0.buildinfo");

    let debs = find_files(temp.path(), "*.deb", &WalkOptions::top_level()).unwrap();

    assert_eq!(names(&debs), vec!["a_1.0_all.deb"]);
}

#[test]
fn test_find_files_ignores_gitignore_when_asked() {
    let temp = temp_dir();
    // ignore only honors .gitignore inside a git repository
    std::fs::create_dir(temp.path().join(".git")).unwrap();
    std::fs::write(temp.path().join(".gitignore"), "*.deb\n").unwrap();
    touch(temp.path(), "pkg.deb");

    let respected = find_files(temp.path(), "*.deb", &WalkOptions::default()).unwrap();
    let ignored = find_files(temp.path(), "*.deb", &WalkOptions::top_level()).unwrap();

    assert!(respected.is_empty());
    assert_eq!(names(&ignored), vec!["pkg.deb"]);
}

#[test]
fn test_find_dirs_sorted() {
    let temp = temp_dir();
    std::fs::create_dir_all(temp.path().join("mecab-ipadic-2.7.0-20070801-neologd-20200910"))
        .unwrap();
    std::fs::create_dir_all(temp.path().join("mecab-ipadic-2.7.0-20070801-neologd-20150301"))
        .unwrap();
    std::fs::create_dir_all(temp.path().join("unrelated")).unwrap();

    let dirs = find_dirs(
        temp.path(),
        "mecab-ipadic-*-neologd-*",
        &WalkOptions::top_level(),
    )
    .unwrap();

    insta::assert_debug_snapshot!(names(&dirs), @r#"
    [
        "mecab-ipadic-2.7.0-20070801-neologd-20150301",
        "mecab-ipadic-2.7.0-20070801-neologd-20200910",
    ]
    "#);
}

#[test]
fn test_find_files_missing_root() {
    let err = find_files("/nonexistent/neologd-deb", "*", &WalkOptions::default()).unwrap_err();
    assert!(err.to_string().contains("root directory does not exist"));
}

#[test]
fn test_find_files_invalid_pattern() {
    let temp = temp_dir();
    let err = find_files(temp.path(), "{a", &WalkOptions::default()).unwrap_err();
    assert!(err.to_string().contains("invalid glob pattern"));
}

// =============================================================================
// copy
// =============================================================================

#[tokio::test]
async fn test_matching_files_filters_by_name() {
    let temp = temp_dir();
    for name in ["sys.dic", "unk.dic", "matrix.bin", "dicrc", "left-id.def", "x.csv"] {
        touch(temp.path(), name);
    }
    touch(temp.path(), "sub/ignored.dic");

    let matched = matching_files(temp.path(), &["*.bin", "*.dic", "*.def", "dicrc"])
        .await
        .unwrap();

    insta::assert_debug_snapshot!(names(&matched), @r#"
    [
        "dicrc",
        "left-id.def",
        "matrix.bin",
        "sys.dic",
        "unk.dic",
    ]
    "#);
}

#[tokio::test]
async fn test_copy_matching_async_creates_destination() {
    let src = temp_dir();
    let dst = temp_dir();
    std::fs::write(src.path().join("sys.dic"), "dictionary").unwrap();
    touch(src.path(), "seed.csv");

    let target = dst.path().join("pkg/dic");
    let copied = copy_matching_async(src.path(), &target, &["*.dic"])
        .await
        .unwrap();

    assert_eq!(copied, vec![target.join("sys.dic")]);
    assert_eq!(
        std::fs::read_to_string(target.join("sys.dic")).unwrap(),
        "dictionary"
    );
    assert!(!target.join("seed.csv").exists());
}

#[tokio::test]
async fn test_copy_matching_async_no_matches() {
    let src = temp_dir();
    let dst = temp_dir();
    touch(src.path(), "README");

    let copied = copy_matching_async(src.path(), dst.path(), &["*.dic"])
        .await
        .unwrap();

    assert!(copied.is_empty());
}
