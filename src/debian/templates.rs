// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rendering of the files under `debian/`.

use std::fmt::Write as _;

use super::PackageMeta;

/// Contents of `debian/source/format`.
pub const SOURCE_FORMAT: &str = "3.0 (native)\n";

/// Alternatives link name shared by all MeCab system dictionaries.
pub const ALTERNATIVES_NAME: &str = "mecab-dictionary";

/// Alternatives link path read by MeCab's default `dicrc` lookup.
pub const ALTERNATIVES_LINK: &str = "/var/lib/mecab/dic/debian";

/// Writes a `Description:` field, folding the long description into
/// continuation lines with ` .` for blank lines.
fn write_description(out: &mut String, description: &str) {
    let mut lines = description.trim().lines();
    let _ = writeln!(out, "Description: {}", lines.next().unwrap_or_default().trim());
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            let _ = writeln!(out, " .");
        } else {
            let _ = writeln!(out, " {line}");
        }
    }
}

/// Renders `debian/control`.
#[must_use]
pub fn render_control(meta: &PackageMeta) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Source: {}", meta.name);
    let _ = writeln!(out, "Section: {}", meta.section);
    let _ = writeln!(out, "Priority: {}", meta.priority);
    let _ = writeln!(out, "Maintainer: {}", meta.maintainer);
    let _ = writeln!(out, "Build-Depends: debhelper-compat (= 13)");
    let _ = writeln!(out, "Standards-Version: 4.6.2");
    if !meta.homepage.is_empty() {
        let _ = writeln!(out, "Homepage: {}", meta.homepage);
    }
    let _ = writeln!(out, "Rules-Requires-Root: no");

    let depends: Vec<&str> = std::iter::once("${misc:Depends}")
        .chain(meta.depends.iter().map(String::as_str))
        .collect();

    let _ = writeln!(out, "\nPackage: {}", meta.name);
    let _ = writeln!(out, "Architecture: {}", meta.architecture);
    let _ = writeln!(out, "Depends: {}", depends.join(", "));
    write_description(&mut out, &meta.description);
    out
}

/// Renders `debian/changelog` with a single entry.
///
/// `timestamp` must be an RFC 2822 date, as `chrono::Local::now().to_rfc2822()`
/// produces.
#[must_use]
pub fn render_changelog(meta: &PackageMeta, timestamp: &str) -> String {
    format!(
        concat!(
            "{} ({}) {}; urgency={}\n\n",
            "  * Build of upstream commit {} from {}\n\n",
            " -- {}  {}\n"
        ),
        meta.name,
        meta.version,
        meta.distribution,
        meta.urgency,
        meta.upstream_commit,
        meta.upstream_url,
        meta.maintainer,
        timestamp
    )
}

/// Renders `debian/rules`.
///
/// The source tree holds only prebuilt artifacts, so debhelper's build and
/// install steps are emptied and `dh_install` does the copying.
#[must_use]
pub fn render_rules() -> String {
    concat!(
        "#!/usr/bin/make -f\n",
        "\n",
        "%:\n",
        "\tdh $@\n",
        "\n",
        "override_dh_auto_build:\n",
        "\n",
        "override_dh_auto_install:\n",
    )
    .to_string()
}

/// Renders `debian/install`.
#[must_use]
pub fn render_install(meta: &PackageMeta) -> String {
    format!("dic/* {}\n", meta.install_dir)
}

/// Renders `debian/copyright` in machine-readable format.
#[must_use]
pub fn render_copyright(meta: &PackageMeta) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/"
    );
    let _ = writeln!(out, "Upstream-Name: mecab-ipadic-neologd");
    let _ = writeln!(out, "Source: {}", meta.upstream_url);
    let _ = writeln!(out);
    let _ = writeln!(out, "Files: *");
    let _ = writeln!(out, "Copyright: 2015-2020 Toshinori Sato (@overlast)");
    let _ = writeln!(out, "License: Apache-2.0");
    let _ = writeln!(out);
    let _ = writeln!(out, "Files: debian/*");
    let _ = writeln!(out, "Copyright: {}", meta.maintainer);
    let _ = writeln!(out, "License: Apache-2.0");
    let _ = writeln!(out);
    let _ = writeln!(out, "License: Apache-2.0");
    let _ = writeln!(
        out,
        " On Debian systems, the full text of the Apache License, Version 2.0"
    );
    let _ = writeln!(
        out,
        " can be found in the file `/usr/share/common-licenses/Apache-2.0'."
    );
    out
}

/// Renders `debian/postinst`, or `None` when no alternative is registered.
#[must_use]
pub fn render_postinst(meta: &PackageMeta) -> Option<String> {
    if !meta.registers_alternative() {
        return None;
    }
    Some(format!(
        concat!(
            "#!/bin/sh\n",
            "set -e\n",
            "\n",
            "if [ \"$1\" = \"configure\" ]; then\n",
            "    update-alternatives --install {link} {name} /{dir} {priority}\n",
            "fi\n",
            "\n",
            "#DEBHELPER#\n",
            "\n",
            "exit 0\n"
        ),
        link = ALTERNATIVES_LINK,
        name = ALTERNATIVES_NAME,
        dir = meta.install_dir,
        priority = meta.alternatives_priority
    ))
}

/// Renders `debian/prerm`, or `None` when no alternative is registered.
#[must_use]
pub fn render_prerm(meta: &PackageMeta) -> Option<String> {
    if !meta.registers_alternative() {
        return None;
    }
    Some(format!(
        concat!(
            "#!/bin/sh\n",
            "set -e\n",
            "\n",
            "if [ \"$1\" = \"remove\" ] || [ \"$1\" = \"deconfigure\" ]; then\n",
            "    update-alternatives --remove {name} /{dir}\n",
            "fi\n",
            "\n",
            "#DEBHELPER#\n",
            "\n",
            "exit 0\n"
        ),
        name = ALTERNATIVES_NAME,
        dir = meta.install_dir
    ))
}
