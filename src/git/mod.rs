// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git repository queries.
//!
//! ```text
//!     query.rs
//!        |
//!        v
//!  ,-----------------,
//!  | backend (trait) |
//!  '--------+--------'
//!           |
//!           v
//!       GitQuery
//!     (gix, read)
//!           |
//!           v
//!      GixBackend
//!      .is_repo  .uncommit
//!      .stashed  .shallow
//! ```
//!
//! Writes and history walks (clone, fetch, checkout, rev-list) use the git
//! CLI through [`crate::task::tools::git::GitTool`].

pub mod backend;
pub mod query;
