// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish outcome.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// What went wrong with a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The source entry could not be read (e.g. a broken symlink).
    SourceUnreadable,
    /// The destination could not be created or written.
    TargetUnwritable,
    /// The directory walk itself reported an error.
    Walk,
}

/// One entry that could not be published. The walk carried on regardless.
#[derive(Debug, Clone, Serialize)]
pub struct PublishFailure {
    path: PathBuf,
    kind: FailureKind,
    message: String,
}

impl PublishFailure {
    pub(crate) fn new(path: impl Into<PathBuf>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }

    /// Path relative to the source root (empty for walk errors without one).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        self.kind
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// How the build hook ended.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HookOutcome {
    command: String,
    exit_code: Option<i32>,
    interrupted: bool,
    error: Option<String>,
}

impl HookOutcome {
    pub(crate) fn exited(command: impl Into<String>, exit_code: i32) -> Self {
        Self {
            command: command.into(),
            exit_code: Some(exit_code),
            ..Self::default()
        }
    }

    pub(crate) fn interrupted(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            interrupted: true,
            ..Self::default()
        }
    }

    pub(crate) fn failed(command: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// The hook command line as configured.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Exit code, if the hook ran to completion.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    /// Why the hook could not be started, if it never ran.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Summary of one publish run. Serializes to JSON for `publish --json`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PublishReport {
    target: PathBuf,
    dry_run: bool,
    directories: usize,
    files_copied: usize,
    bytes_copied: u64,
    skipped: usize,
    failures: Vec<PublishFailure>,
    hook: Option<HookOutcome>,
}

impl PublishReport {
    pub(crate) fn new(target: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            target: target.into(),
            dry_run,
            ..Self::default()
        }
    }

    pub(crate) const fn record_directory(&mut self) {
        self.directories += 1;
    }

    pub(crate) const fn record_file(&mut self, bytes: u64) {
        self.files_copied += 1;
        self.bytes_copied += bytes;
    }

    pub(crate) const fn record_skip(&mut self) {
        self.skipped += 1;
    }

    pub(crate) fn record_failure(&mut self, failure: PublishFailure) {
        self.failures.push(failure);
    }

    pub(crate) fn set_hook(&mut self, outcome: HookOutcome) {
        self.hook = Some(outcome);
    }

    /// Target directory the source was mirrored into.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Nothing was written; counters describe what would have been.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Directories created (or already present) under the target.
    #[must_use]
    pub const fn directories(&self) -> usize {
        self.directories
    }

    #[must_use]
    pub const fn files_copied(&self) -> usize {
        self.files_copied
    }

    #[must_use]
    pub const fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }

    /// Ignored entries. A pruned directory counts once for its whole subtree.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn failures(&self) -> &[PublishFailure] {
        &self.failures
    }

    #[must_use]
    pub const fn hook(&self) -> Option<&HookOutcome> {
        self.hook.as_ref()
    }

    /// No entry failed and the hook, if any, exited with 0.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.hook.as_ref().is_none_or(HookOutcome::success)
    }
}
