// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process management.
//!
//! ```text
//!    core
//!     |
//!     v
//!  process
//!     |
//!  Builder, Output, flags
//! ```

pub mod process;
