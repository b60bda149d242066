// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pipeline stages.
//!
//! ```text
//! SourceTask      clone / update / pin the upstream checkout
//!      |
//! DictionaryTask  run the upstream build script into <checkout>/build
//!      |
//! PackageTask     stage artifacts + debian/, run dpkg-buildpackage,
//!                 copy .deb files to the output directory
//! ```

pub mod dictionary;
pub mod package;
pub mod source;
