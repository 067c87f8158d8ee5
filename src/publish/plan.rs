// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Walk phase: decide copy or skip for every entry of the source tree.
//!
//! ```text
//! pruned_walk(source)
//!   filter_entry: scoped.is_ignored(rel, is_dir)?   root + nested rule files
//!     yes ──> PrunedEntry ──> PlanEntry { Skip }   (dirs never descended)
//!     no  ──> DirEntry    ──> PlanEntry { Copy }
//!   walk error ─────────────> PublishFailure { Walk }
//!   bad nested rule file ───> rule_errors
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, trace, warn};

use super::report::{FailureKind, PublishFailure};
use crate::error::PatternError;
use crate::pattern::{RuleSet, ScopedRules, normalize_path};
use crate::utility::fs::walk::{PrunedWalk, WalkOptions, pruned_walk};

/// File-system kind of a walked entry. Symlinks are never followed while
/// walking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
}

/// Decision for a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    Copy,
    Skip,
}

/// One relative path found during the walk and what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    path: PathBuf,
    kind: EntryKind,
    action: PlanAction,
}

impl PlanEntry {
    /// Path relative to the source root.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    #[must_use]
    pub const fn action(&self) -> PlanAction {
        self.action
    }

    /// `/`-separated relative path, as matched against the rules.
    #[must_use]
    pub fn display_path(&self) -> String {
        normalize_path(&self.path)
    }
}

/// Result of the walk phase: entries in walk order plus walk errors.
#[derive(Debug, Default)]
pub struct CopyPlan {
    entries: Vec<PlanEntry>,
    walk_errors: Vec<PublishFailure>,
    rule_errors: Vec<PatternError>,
}

impl CopyPlan {
    /// Entries in depth-first, file-name order. Parents precede children.
    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Errors the walker reported (unreadable directories and the like).
    #[must_use]
    pub fn walk_errors(&self) -> &[PublishFailure] {
        &self.walk_errors
    }

    /// Rule files below the root that could not be read or compiled. Their
    /// directories were walked without them.
    #[must_use]
    pub fn rule_errors(&self) -> &[PatternError] {
        &self.rule_errors
    }

    /// Entries that will be copied.
    pub fn to_copy(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.action == PlanAction::Copy)
    }

    /// Entries that were excluded by the rules.
    pub fn to_skip(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.action == PlanAction::Skip)
    }

    pub(crate) fn into_parts(self) -> (Vec<PlanEntry>, Vec<PublishFailure>, Vec<PatternError>) {
        (self.entries, self.walk_errors, self.rule_errors)
    }
}

fn relative_to(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

/// Walks `source` and classifies every entry below it.
///
/// Ignored directories are pruned: they appear once as `Skip` and their
/// contents are never visited. Rule files named by
/// [`RuleSet::nested_files`] apply to the directory they sit in. The source
/// root itself is not part of the plan. `source` is assumed to be an existing directory; [`super::publish`]
/// checks that before planning.
pub fn plan(source: &Path, rules: Arc<RuleSet>) -> CopyPlan {
    let root = source.to_path_buf();
    let filter_root = root.clone();
    let scoped = Arc::new(ScopedRules::new(&root, rules));
    let filter_rules = Arc::clone(&scoped);
    let mut walk = pruned_walk(&root, &WalkOptions::default(), move |entry, is_dir| {
        let rel = relative_to(&filter_root, entry.path());
        let ignored = filter_rules.is_ignored(&rel, is_dir);
        trace!(path = %rel.display(), is_dir, ignored, "rule check");
        !ignored
    });

    let mut plan = CopyPlan::default();
    while let Some(next) = walk.next() {
        drain_pruned_into(&mut plan, &walk, &root);
        match next {
            Ok(entry) if entry.depth() == 0 => {}
            Ok(entry) => {
                let kind = match entry.file_type() {
                    Some(ft) if ft.is_dir() => EntryKind::Directory,
                    Some(ft) if ft.is_symlink() => EntryKind::Symlink,
                    _ => EntryKind::File,
                };
                plan.entries.push(PlanEntry {
                    path: relative_to(&root, entry.path()),
                    kind,
                    action: PlanAction::Copy,
                });
            }
            Err(e) => {
                warn!(error = %e, "walk error");
                let path = error_path(&e).map_or_else(PathBuf::new, |p| relative_to(&root, p));
                plan.walk_errors
                    .push(PublishFailure::new(path, FailureKind::Walk, e.to_string()));
            }
        }
    }
    drain_pruned_into(&mut plan, &walk, &root);
    plan.rule_errors = scoped.take_errors();

    plan
}

fn drain_pruned_into(plan: &mut CopyPlan, walk: &PrunedWalk, root: &Path) {
    for pruned in walk.drain_pruned() {
        let path = relative_to(root, pruned.path());
        debug!(path = %path.display(), "skip");
        plan.entries.push(PlanEntry {
            path,
            kind: if pruned.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            action: PlanAction::Skip,
        });
    }
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        _ => None,
    }
}
