// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pipeline stage execution.
//!
//! # Architecture
//!
//! ```text
//! TaskManager
//!      |
//!      v
//!   Task enum ----> TaskContext (config, cancel token, dry run)
//!      |
//!      v
//!    Phases
//!   /  |   \
//!  v   v    v
//! Clean Fetch Build+Install
//!                  |
//!                  v
//!               Tools
//!       git, build script, dpkg-buildpackage
//!
//! Task variants (fixed order): Source, Dictionary, Package
//! ```
//!
//! # Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`TaskManager`](manager::TaskManager) | Runs stages in order with cancellation |
//! | [`Task`] | Enum dispatching to the stage implementations |
//! | [`Taskable`] | Trait defining the common stage interface |
//! | [`Stage`] | Stage names accepted on the command line |
//! | [`Phase`] | Three-phase lifecycle: Clean → Fetch → `BuildAndInstall` |
//! | [`CleanFlags`] | Bitflags controlling what to clean |
//! | [`TaskContext`] | Execution context with config and cancellation token |
//!
//! The [`Task`] enum implements `Taskable` via the `impl_taskable_for_task!`
//! macro, which generates a match arm for each variant.

pub mod helpers;
pub mod manager;
pub mod tasks;
pub mod tools;

use bitflags::bitflags;
use futures_util::future::BoxFuture;
use std::str::FromStr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::{Result, TaskError};
use crate::task::tools::ToolContext;

use tasks::dictionary::DictionaryTask;
use tasks::package::PackageTask;
use tasks::source::SourceTask;

/// Task execution phase.
///
/// Each stage goes through these phases in order during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Clean phase: delete the checkout or the build output.
    /// Controlled by `CleanFlags`.
    Clean,

    /// Fetch phase: clone, update and check out the upstream repository.
    Fetch,

    /// Build and install phase: build the dictionary or assemble the package.
    BuildAndInstall,
}

impl Phase {
    /// Returns all phases in execution order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Clean, Self::Fetch, Self::BuildAndInstall]
    }

    /// Returns the display name for this phase.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Fetch => "fetch",
            Self::BuildAndInstall => "build_and_install",
        }
    }
}

bitflags! {
    /// Flags controlling what gets cleaned during the Clean phase.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CleanFlags: u8 {
        /// Delete the checkout and clone again.
        const RECLONE = 0x01;

        /// Delete `<checkout>/build` and run the build script again.
        const REBUILD = 0x02;
    }
}

/// A pipeline stage name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Source,
    Dictionary,
    Package,
}

impl Stage {
    /// Returns all stages in pipeline order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Source, Self::Dictionary, Self::Package]
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Dictionary => "dictionary",
            Self::Package => "package",
        }
    }

    /// Resolves stage names into pipeline order without duplicates.
    ///
    /// An empty list selects every stage.
    ///
    /// # Errors
    ///
    /// Returns a `TaskError::NotFound` for an unknown name.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>> {
        if names.is_empty() {
            return Ok(Self::all().to_vec());
        }
        let mut stages = names
            .iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<Self>>>()?;
        stages.sort_unstable();
        stages.dedup();
        Ok(stages)
    }

    /// Creates the task implementing this stage.
    #[must_use]
    pub fn task(self) -> Task {
        match self {
            Self::Source => Task::Source(SourceTask::new()),
            Self::Dictionary => Task::Dictionary(DictionaryTask::new()),
            Self::Package => Task::Package(PackageTask::new()),
        }
    }
}

impl FromStr for Stage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|stage| stage.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TaskError::NotFound(s.to_string()).into())
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for stage implementations.
///
/// Methods return `BoxFuture` so the `Task` enum can dispatch to them through
/// the `impl_taskable_for_task!` macro.
pub trait Taskable {
    /// Returns the task name.
    fn name(&self) -> &str;

    /// Executes the clean phase.
    ///
    /// Clean flags are obtained from `ctx.clean_flags()`.
    fn do_clean<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>>;

    /// Executes the fetch phase.
    fn do_fetch<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>>;

    /// Executes the build and install phase.
    fn do_build_and_install<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>>;
}

/// Context provided to tasks during execution.
#[derive(Clone)]
pub struct TaskContext {
    config: Arc<Config>,
    cancel_token: CancellationToken,
    dry_run: bool,
    clean_flags: CleanFlags,
}

impl TaskContext {
    /// Creates a new `TaskContext`.
    #[must_use]
    pub const fn new(config: Arc<Config>, cancel_token: CancellationToken) -> Self {
        Self {
            config,
            cancel_token,
            dry_run: false,
            clean_flags: CleanFlags::empty(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub const fn clean_flags(&self) -> CleanFlags {
        self.clean_flags
    }

    /// Sets dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Sets clean flags.
    #[must_use]
    pub const fn with_clean_flags(mut self, flags: CleanFlags) -> Self {
        self.clean_flags = flags;
        self
    }

    /// Checks if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Creates a `ToolContext` from this `TaskContext`.
    #[must_use]
    pub fn tool_context(&self) -> ToolContext {
        ToolContext::new(
            Arc::clone(&self.config),
            self.cancel_token.clone(),
            self.dry_run,
        )
    }
}

/// A pipeline stage.
#[derive(Debug, Clone)]
pub enum Task {
    /// Clone, update and pin the upstream checkout.
    Source(SourceTask),
    /// Run the upstream build script.
    Dictionary(DictionaryTask),
    /// Assemble the Debian source tree and run the packager.
    Package(PackageTask),
}

impl Task {
    /// Runs the task through all applicable phases.
    ///
    /// The clean phase runs only when enabled with clean flags set. Checks
    /// for cancellation between phases.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails or if the task is interrupted.
    pub async fn run(&self, ctx: &TaskContext) -> Result<()> {
        for phase in Phase::all() {
            if *phase == Phase::Clean && ctx.clean_flags().is_empty() {
                continue;
            }

            if ctx.is_cancelled() {
                tracing::debug!(task = %Taskable::name(self), phase = phase.name(), "Interrupted");
                return Err(TaskError::Interrupted(Taskable::name(self).to_string()).into());
            }

            tracing::debug!(task = %Taskable::name(self), phase = phase.name(), "Starting phase");
            match phase {
                Phase::Clean => Taskable::do_clean(self, ctx).await?,
                Phase::Fetch => Taskable::do_fetch(self, ctx).await?,
                Phase::BuildAndInstall => Taskable::do_build_and_install(self, ctx).await?,
            }
        }

        Ok(())
    }
}

/// Macro to implement Taskable for Task enum by delegating to inner types.
macro_rules! impl_taskable_for_task {
    ($($variant:ident),+ $(,)?) => {
        impl Taskable for Task {
            fn name(&self) -> &str {
                match self {
                    $(Task::$variant(t) => Taskable::name(t),)+
                }
            }

            fn do_clean<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
                match self {
                    $(Task::$variant(t) => Taskable::do_clean(t, ctx),)+
                }
            }

            fn do_fetch<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
                match self {
                    $(Task::$variant(t) => Taskable::do_fetch(t, ctx),)+
                }
            }

            fn do_build_and_install<'a>(&'a self, ctx: &'a TaskContext) -> BoxFuture<'a, Result<()>> {
                match self {
                    $(Task::$variant(t) => Taskable::do_build_and_install(t, ctx),)+
                }
            }
        }
    };
}

impl_taskable_for_task!(Source, Dictionary, Package);

#[cfg(test)]
mod tests;
