// neologd-deb: mecab-ipadic-neologd Debian package builder
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Task manager for orchestrating stage execution.
//!
//! ```text
//! TaskManager::new(config)
//!   .with_dry_run()  .with_clean_flags()
//!   .add(task)
//!   .run_all().await
//!       per stage: Clean (only with clean flags) --> Fetch --> Build
//!       stages run one after another, never concurrently
//! ```

use std::sync::Arc;

use crate::error::Result;
use anyhow::Context;
use tokio_util::sync::CancellationToken;

use crate::config::Config;

use super::{CleanFlags, Task, TaskContext, Taskable};

/// Manager for orchestrating stage execution.
///
/// Tasks are executed sequentially in the order they were added.
pub struct TaskManager {
    tasks: Vec<Task>,
    cancel_token: CancellationToken,
    config: Arc<Config>,
    dry_run: bool,
    clean_flags: CleanFlags,
}

impl TaskManager {
    /// Creates a new `TaskManager` with the given configuration.
    #[must_use]
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            tasks: Vec::new(),
            cancel_token: CancellationToken::new(),
            config,
            dry_run: false,
            clean_flags: CleanFlags::empty(),
        }
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

    /// Adds a task to be executed.
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Returns the cancellation token for sharing with a signal handler.
    ///
    /// Cancelling it kills the running subprocess and no further stage
    /// starts.
    #[must_use]
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    fn create_context(&self) -> TaskContext {
        TaskContext::new(Arc::clone(&self.config), self.cancel_token.clone())
            .with_dry_run(self.dry_run)
            .with_clean_flags(self.clean_flags)
    }

    /// Runs all tasks sequentially.
    ///
    /// # Errors
    ///
    /// Returns an error if any task fails or if cancellation is requested.
    pub async fn run_all(&self) -> Result<()> {
        if self.tasks.is_empty() {
            tracing::debug!("No tasks to run");
            return Ok(());
        }

        tracing::info!(task_count = self.tasks.len(), "Starting task execution");

        let ctx = self.create_context();

        for (i, task) in self.tasks.iter().enumerate() {
            if self.is_cancelled() {
                anyhow::bail!("Task execution interrupted before task {}", i + 1);
            }

            tracing::info!(
                task = %task.name(),
                index = i + 1,
                total = self.tasks.len(),
                "Running task"
            );

            task.run(&ctx)
                .await
                .with_context(|| format!("Task '{}' failed", task.name()))?;
        }

        tracing::info!("All tasks completed successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
