// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish pipeline: mirror a mod's source tree into the game's mods folder.
//!
//! ```text
//! publish(source, target, rules, options)
//!   check source is a dir ─────────── SourceUnreadable
//!   check target not inside source ── TargetInsideSource
//!   check source not inside target ── SourceInsideTarget
//!        |
//!   plan(source, rules)      walk phase (sync, pruned)
//!   bad nested rule file ──────────── InvalidRules
//!        |
//!   clean? remove target
//!   create target ─────────────────── TargetUnwritable
//!        |
//!   copy phase (sequential)
//!     Directory ──> ensure_dir_async
//!     File      ──> copy_file_async
//!     Symlink   ──> file: copy content, dir: skip, broken: failure
//!     errors collected, walk never aborts
//!        |
//!   BuildHook::run (once, even after failures)
//!        |
//!   PublishReport
//! ```

pub mod hook;
pub mod plan;
pub mod report;
pub mod scaffold;


use bon::Builder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::PublishError;
use crate::pattern::RuleSet;
use crate::utility::fs::copy::{copy_file_async, ensure_dir_async, remove_dir_all_async};

pub use hook::BuildHook;
pub use plan::{CopyPlan, EntryKind, PlanAction, PlanEntry, plan};
pub use report::{FailureKind, HookOutcome, PublishFailure, PublishReport};
pub use scaffold::{generate_config_file, generate_ignore_file};

/// Options for one publish run.
#[derive(Debug, Clone, Default, Builder)]
pub struct PublishOptions {
    /// Build step to run after copying
    #[builder(setters(name = with_hook))]
    hook: Option<BuildHook>,
    /// Walk and report only; touch nothing
    #[builder(setters(name = with_dry_run), default = false)]
    dry_run: bool,
    /// Remove the existing target before copying
    #[builder(setters(name = with_clean), default = false)]
    clean: bool,
    /// Interrupts the build hook
    #[builder(setters(name = with_cancel), default)]
    cancel: CancellationToken,
}

impl PublishOptions {
    #[must_use]
    pub const fn hook(&self) -> Option<&BuildHook> {
        self.hook.as_ref()
    }

    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub const fn clean(&self) -> bool {
        self.clean
    }
}

/// Mirrors `source` into `target`, skipping everything `rules` ignores.
///
/// Per-entry problems are collected in the returned report; only problems
/// with the two roots abort the run.
///
/// # Errors
///
/// - `PublishError::SourceUnreadable` if `source` is missing or not a directory.
/// - `PublishError::TargetInsideSource` if `target` lies within `source`.
/// - `PublishError::SourceInsideTarget` if `source` lies within `target`.
/// - `PublishError::InvalidRules` if a rule file below the root is invalid.
/// - `PublishError::TargetUnwritable` if `target` cannot be cleaned or created.
pub async fn publish(
    source: &Path,
    target: &Path,
    rules: Arc<RuleSet>,
    options: &PublishOptions,
) -> Result<PublishReport, PublishError> {
    let source = check_source(source)?;
    let target = check_target(&source, target)?;

    info!(
        source = %source.display(),
        target = %target.display(),
        rules = rules.len(),
        dry_run = options.dry_run(),
        "publishing"
    );

    let (entries, walk_errors, rule_errors) = plan(&source, rules).into_parts();
    if let Some(err) = rule_errors.into_iter().next() {
        return Err(PublishError::InvalidRules(err));
    }

    if !options.dry_run() {
        prepare_target(&target, options.clean()).await?;
    }

    let mut report = PublishReport::new(&target, options.dry_run());
    for failure in walk_errors {
        report.record_failure(failure);
    }

    for entry in &entries {
        if options.dry_run() {
            tally_dry(&mut report, &source, entry);
        } else {
            copy_entry(&mut report, &source, &target, entry).await;
        }
    }

    if let Some(hook) = options.hook() {
        if options.dry_run() {
            info!(command = %hook.command(), "dry run, build hook not run");
        } else {
            let outcome = hook.run(&source, &target, options.cancel.clone()).await;
            report.set_hook(outcome);
        }
    }

    info!(
        directories = report.directories(),
        files = report.files_copied(),
        skipped = report.skipped(),
        failures = report.failures().len(),
        "publish finished"
    );
    Ok(report)
}

fn check_source(source: &Path) -> Result<PathBuf, PublishError> {
    let unreadable = |reason: String| PublishError::SourceUnreadable {
        path: source.display().to_string(),
        reason,
    };
    let canonical = std::fs::canonicalize(source).map_err(|e| unreadable(e.to_string()))?;
    if !canonical.is_dir() {
        return Err(unreadable("not a directory".to_string()));
    }
    Ok(canonical)
}

/// Resolves `target` through its deepest existing ancestor so symlinked
/// prefixes compare equal to the canonical source.
fn check_target(source: &Path, target: &Path) -> Result<PathBuf, PublishError> {
    let absolute = std::path::absolute(target).map_err(|e| PublishError::TargetUnwritable {
        path: target.display().to_string(),
        source: e,
    })?;

    let resolved = absolute
        .ancestors()
        .find_map(|ancestor| {
            let canonical = std::fs::canonicalize(ancestor).ok()?;
            let rest = absolute.strip_prefix(ancestor).ok()?;
            Some(canonical.join(rest))
        })
        .unwrap_or(absolute);

    if resolved.starts_with(source) {
        return Err(PublishError::TargetInsideSource {
            source_dir: source.display().to_string(),
            target: resolved.display().to_string(),
        });
    }
    if source.starts_with(&resolved) {
        return Err(PublishError::SourceInsideTarget {
            source_dir: source.display().to_string(),
            target: resolved.display().to_string(),
        });
    }
    Ok(resolved)
}

async fn prepare_target(target: &Path, clean: bool) -> Result<(), PublishError> {
    let unwritable = |source| PublishError::TargetUnwritable {
        path: target.display().to_string(),
        source,
    };

    if clean {
        info!(target = %target.display(), "clearing existing target");
        remove_dir_all_async(target)
            .await
            .map_err(|e| unwritable(std::io::Error::other(e)))?;
    }
    tokio::fs::create_dir_all(target).await.map_err(unwritable)
}

fn tally_dry(report: &mut PublishReport, source: &Path, entry: &PlanEntry) {
    match (entry.action(), entry.kind()) {
        (PlanAction::Skip, _) => report.record_skip(),
        (PlanAction::Copy, EntryKind::Directory) => report.record_directory(),
        (PlanAction::Copy, EntryKind::File) => {
            let bytes = std::fs::metadata(source.join(entry.path())).map_or(0, |m| m.len());
            report.record_file(bytes);
        }
        (PlanAction::Copy, EntryKind::Symlink) => match std::fs::metadata(source.join(entry.path())) {
            Ok(meta) if meta.is_dir() => report.record_skip(),
            Ok(meta) => report.record_file(meta.len()),
            Err(e) => report.record_failure(PublishFailure::new(
                entry.path(),
                FailureKind::SourceUnreadable,
                e.to_string(),
            )),
        },
    }
}

async fn copy_entry(report: &mut PublishReport, source: &Path, target: &Path, entry: &PlanEntry) {
    let rel = entry.path();
    let src = source.join(rel);
    let dst = target.join(rel);

    if entry.action() == PlanAction::Skip {
        report.record_skip();
        return;
    }

    if entry.kind() == EntryKind::Directory {
        match ensure_dir_async(&dst).await {
            Ok(()) => {
                debug!(path = %rel.display(), "directory");
                report.record_directory();
            }
            Err(e) => {
                warn!(path = %rel.display(), error = %e, "cannot create directory");
                report.record_failure(PublishFailure::new(
                    rel,
                    FailureKind::TargetUnwritable,
                    e.to_string(),
                ));
            }
        }
        return;
    }

    // Follows symlinks: a dangling link fails here.
    let meta = match tokio::fs::metadata(&src).await {
        Ok(meta) => meta,
        Err(e) => {
            warn!(path = %rel.display(), error = %e, "cannot read source");
            report.record_failure(PublishFailure::new(
                rel,
                FailureKind::SourceUnreadable,
                e.to_string(),
            ));
            return;
        }
    };
    if meta.is_dir() {
        warn!(path = %rel.display(), "symlinked directory not published");
        report.record_skip();
        return;
    }

    match copy_file_async(&src, &dst).await {
        Ok(bytes) => {
            debug!(path = %rel.display(), bytes, "copied");
            report.record_file(bytes);
        }
        Err(e) => {
            let kind = if Path::new(e.path()) == src {
                FailureKind::SourceUnreadable
            } else {
                FailureKind::TargetUnwritable
            };
            warn!(path = %rel.display(), error = %e, "copy failed");
            report.record_failure(PublishFailure::new(rel, kind, e.to_string()));
        }
    }
}
