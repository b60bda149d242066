// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Writes the `debian/` directory of a staging source tree.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use super::PackageMeta;
use super::templates;
use crate::error::Result;

const EXECUTABLE_MODE: u32 = 0o755;

async fn write_file(path: &Path, contents: &str, executable: bool) -> Result<PathBuf> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    if executable {
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(EXECUTABLE_MODE))
            .await
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }
    debug!(path = %path.display(), "wrote");
    Ok(path.to_path_buf())
}

/// Writes `debian/` under `source_dir` and returns the written files in
/// creation order.
///
/// `timestamp` is the changelog date in RFC 2822 form.
///
/// # Errors
///
/// Returns an error if a directory or file cannot be created.
pub async fn write_skeleton(
    source_dir: &Path,
    meta: &PackageMeta,
    timestamp: &str,
) -> Result<Vec<PathBuf>> {
    let debian = source_dir.join("debian");
    let source = debian.join("source");
    tokio::fs::create_dir_all(&source)
        .await
        .with_context(|| format!("failed to create {}", source.display()))?;

    let mut written = vec![
        write_file(&debian.join("control"), &templates::render_control(meta), false).await?,
        write_file(
            &debian.join("changelog"),
            &templates::render_changelog(meta, timestamp),
            false,
        )
        .await?,
        write_file(&debian.join("rules"), &templates::render_rules(), true).await?,
        write_file(&debian.join("install"), &templates::render_install(meta), false).await?,
        write_file(
            &debian.join("copyright"),
            &templates::render_copyright(meta),
            false,
        )
        .await?,
        write_file(&source.join("format"), templates::SOURCE_FORMAT, false).await?,
    ];

    if let Some(postinst) = templates::render_postinst(meta) {
        written.push(write_file(&debian.join("postinst"), &postinst, true).await?);
    }
    if let Some(prerm) = templates::render_prerm(meta) {
        written.push(write_file(&debian.join("prerm"), &prerm, true).await?);
    }

    Ok(written)
}
