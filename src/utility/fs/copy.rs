// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use wax::{Glob, Program};

/// Compiles a list of file name patterns.
///
/// # Errors
///
/// Returns an error naming the first pattern that is not a valid glob.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Glob<'_>>> {
    patterns
        .iter()
        .map(|p| {
            let p = p.as_ref();
            Glob::new(p).map_err(|e| anyhow::anyhow!("invalid glob pattern '{p}': {e}"))
        })
        .collect()
}

/// Lists the regular files at the top level of `src` whose names match any
/// of `patterns`, sorted by name.
///
/// # Errors
///
/// Returns an error if a pattern is invalid or `src` cannot be read.
pub async fn matching_files<S: AsRef<str>>(src: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    let globs = compile_patterns(patterns)?;

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    let mut matched = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        let is_file = entry
            .file_type()
            .await
            .with_context(|| format!("failed to stat {}", entry.path().display()))?
            .is_file();
        if !is_file {
            continue;
        }

        let name = PathBuf::from(entry.file_name());
        if globs.iter().any(|g| g.is_match(name.as_path())) {
            matched.push(entry.path());
        }
    }

    matched.sort();
    Ok(matched)
}

/// Copies files from the top level of `src` whose names match any of
/// `patterns` into `dst` (async version).
///
/// Creates `dst` if it doesn't exist. Does not recurse into subdirectories.
/// Returns the destination paths of the copied files, sorted by name.
///
/// # Example
/// ```no_run
/// use neologd_deb::utility::fs::copy::copy_matching_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let copied = copy_matching_async(
///     Path::new("/build/out"),
///     Path::new("/staging/dic"),
///     &["*.dic", "dicrc"],
/// )
/// .await?;
/// println!("copied {} files", copied.len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if a pattern is invalid or any IO operation fails.
pub async fn copy_matching_async<S: AsRef<str>>(
    src: &Path,
    dst: &Path,
    patterns: &[S],
) -> Result<Vec<PathBuf>> {
    let sources = matching_files(src, patterns).await?;

    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut copied = Vec::with_capacity(sources.len());
    for src_path in sources {
        let Some(name) = src_path.file_name() else {
            continue;
        };
        let dst_path = dst.join(name);
        fs::copy(&src_path, &dst_path).await.with_context(|| {
            format!(
                "failed to copy {} to {}",
                src_path.display(),
                dst_path.display()
            )
        })?;
        copied.push(dst_path);
    }

    Ok(copied)
}
