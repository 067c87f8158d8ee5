// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::report::HookOutcome;
use crate::core::process::builder::{ProcessBuilder, ProcessFlags};

/// External build step run once after the copy phase.
///
/// The command line is split on whitespace; the program runs in the source
/// directory with the published target directory appended as its last
/// argument. Output goes straight to the terminal unless it is routed to
/// the log with [`BuildHook::with_logged_output`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildHook {
    command: String,
    log_output: bool,
}

impl BuildHook {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            log_output: false,
        }
    }

    /// Sends the hook's output to the log instead of the terminal, keeping
    /// stdout free for machine-readable output.
    #[must_use]
    pub fn with_logged_output(mut self) -> Self {
        self.log_output = true;
        self
    }

    #[must_use]
    pub const fn logs_output(&self) -> bool {
        self.log_output
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Runs the hook to completion (or until `token` is cancelled).
    ///
    /// Never fails: a hook that cannot be spawned is reported through
    /// [`HookOutcome::error`].
    pub async fn run(&self, source: &Path, target: &Path, token: CancellationToken) -> HookOutcome {
        let builder = match ProcessBuilder::from_command_line(&self.command, source) {
            Ok(builder) => builder,
            Err(e) => {
                warn!(command = %self.command, error = %e, "build hook not started");
                return HookOutcome::failed(&self.command, e.to_string());
            }
        };

        info!(command = %self.command, "running build hook");
        let builder = builder.arg(target).flag(ProcessFlags::ALLOW_FAILURE);
        let builder = if self.log_output {
            builder.forward_to_log()
        } else {
            builder.inherit_stdio()
        };
        let result = builder.run_with_cancellation(token).await;

        match result {
            Ok(output) if output.is_interrupted() => {
                warn!(command = %self.command, "build hook interrupted");
                HookOutcome::interrupted(&self.command)
            }
            Ok(output) => {
                if output.success() {
                    info!(command = %self.command, "build hook finished");
                } else {
                    warn!(command = %self.command, exit_code = output.exit_code(), "build hook failed");
                }
                HookOutcome::exited(&self.command, output.exit_code())
            }
            Err(e) => {
                warn!(command = %self.command, error = %e, "build hook not started");
                HookOutcome::failed(&self.command, format!("{e:#}"))
            }
        }
    }
}
