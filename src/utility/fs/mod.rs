// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:  find_files()   glob over files  (ignore::WalkParallel)
//!        find_dirs()    glob over directories
//!        WalkOptions    max_depth, hidden, gitignore
//! copy:  matching_files()       top-level files matching name globs
//!        copy_matching_async()  tokio::fs copy of those files
//! ```

pub mod copy;
pub mod walk;

#[cfg(test)]
mod tests;
