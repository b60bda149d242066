// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            NeologdError (~24 bytes)
//!                     |
//!   +-----+-----+-----+-----+-----+-----+
//!   |     |     |     |     |     |     |
//!   v     v     v     v     v     v     v
//!  Git  Cfg   Task  Proc   Fs   Pkg  Io/Other
//!  Box  Box   Box   Box   Box   Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git     NotARepository, CommandFailed, Gix, NoCommitBefore, ShallowPin
//!   Config  InvalidValue
//!   Task    NotFound, Interrupted
//!   Process ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Fs      NotFound
//!   Package InvalidName, InvalidVersion, NoArtifacts
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`NeologdError`].
pub type NeologdResult<T> = std::result::Result<T, NeologdError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum NeologdError {
    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Pipeline stage error.
    #[error("task error: {0}")]
    Task(#[from] Box<TaskError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// Debian package metadata or assembly error.
    #[error("package error: {0}")]
    Package(#[from] Box<PackageError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for NeologdError {
                fn from(err: $error) -> Self {
                    NeologdError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    TaskError => Task,
    ProcessError => Process,
    FsError => Fs,
    PackageError => Package,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository at path.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Path exists but is not a git work tree.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// No commit on the branch is older than the requested date.
    #[error("no commit on '{branch}' on or before {date}")]
    NoCommitBefore { branch: String, date: String },

    /// Revision pinning needs full history.
    #[error("cannot pin a revision in shallow clone {path}")]
    ShallowPin { path: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Task Errors ---

/// Pipeline stage errors.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Stage was not found.
    #[error("stage '{0}' not found")]
    NotFound(String),

    /// Stage was interrupted.
    #[error("stage '{0}' was interrupted")]
    Interrupted(String),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),
}

// --- Package Errors ---

/// Debian package assembly errors.
#[derive(Debug, Error)]
pub enum PackageError {
    /// Package name violates Debian policy.
    #[error("invalid package name '{0}'")]
    InvalidName(String),

    /// Version string violates Debian policy.
    #[error("invalid package version '{0}'")]
    InvalidVersion(String),

    /// No build output matched the artifact patterns.
    #[error("no artifacts matching {patterns:?} in {dir}")]
    NoArtifacts { dir: String, patterns: Vec<String> },

    /// The packager produced no `.deb` files.
    #[error("no .deb files produced in {0}")]
    NoPackages(String),
}
