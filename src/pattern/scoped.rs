// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Rule files found below the source root, each scoped to its directory.
//!
//! ```text
//! is_ignored("Source/obj/x.dll", false)
//!   ancestors "Source", "Source/obj" (as dirs): any ignored? ──> ignored
//!   else the deepest layer with a matching rule decides:
//!     Source/obj/<rule files>   matched as "x.dll"
//!     Source/<rule files>       matched as "obj/x.dll"
//!     root RuleSet              matched as "Source/obj/x.dll"
//! ```
//!
//! Layers are read the first time a path inside their directory is
//! queried, so rule files inside ignored directories are never opened.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use super::{RuleMatch, RuleSet, normalize_path};
use crate::error::PatternError;

/// The root [`RuleSet`] plus the per-directory rule files it names in
/// [`RuleSet::nested_files`].
#[derive(Debug)]
pub struct ScopedRules {
    source: PathBuf,
    root: Arc<RuleSet>,
    layers: Mutex<HashMap<String, Option<Arc<RuleSet>>>>,
    errors: Mutex<Vec<PatternError>>,
}

impl ScopedRules {
    /// Scopes `root` to the tree at `source`.
    pub fn new(source: impl Into<PathBuf>, root: Arc<RuleSet>) -> Self {
        Self {
            source: source.into(),
            root,
            layers: Mutex::new(HashMap::new()),
            errors: Mutex::new(Vec::new()),
        }
    }

    /// Whether `path` (relative to the source root) is excluded.
    ///
    /// Same ancestor rule as [`RuleSet::is_ignored`]: nothing inside an
    /// excluded directory can be re-included.
    pub fn is_ignored(&self, path: impl AsRef<Path>, is_dir: bool) -> bool {
        let normalized = normalize_path(path.as_ref());
        if normalized.is_empty() {
            return false;
        }
        let segments: Vec<&str> = normalized.split('/').collect();

        (1..segments.len()).any(|end| self.decide(&segments[..end], true))
            || self.decide(&segments, is_dir)
    }

    /// Drains the errors of rule files read so far.
    pub fn take_errors(&self) -> Vec<PatternError> {
        std::mem::take(&mut *self.errors.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn decide(&self, segments: &[&str], is_dir: bool) -> bool {
        for depth in (1..segments.len()).rev() {
            let Some(layer) = self.layer(&segments[..depth].join("/")) else {
                continue;
            };
            match layer.matched(segments[depth..].join("/"), is_dir) {
                RuleMatch::Unmatched => {}
                found => return found.is_ignore(),
            }
        }
        self.root.matched(segments.join("/"), is_dir).is_ignore()
    }

    fn layer(&self, dir: &str) -> Option<Arc<RuleSet>> {
        if self.root.nested_files().is_empty() {
            return None;
        }
        let mut layers = self.layers.lock().unwrap_or_else(PoisonError::into_inner);
        layers
            .entry(dir.to_string())
            .or_insert_with(|| self.load_layer(dir))
            .clone()
    }

    fn load_layer(&self, dir: &str) -> Option<Arc<RuleSet>> {
        let dir_path = self.source.join(dir);
        let loaded = self
            .root
            .nested_files()
            .iter()
            .try_fold(RuleSet::builder(), |builder, name| {
                builder.add_file(dir_path.join(name))
            })
            .and_then(super::RuleSetBuilder::build);

        match loaded {
            Ok(rules) if rules.is_empty() => None,
            Ok(rules) => {
                debug!(dir, rules = rules.len(), "nested ignore rules");
                Some(Arc::new(rules))
            }
            Err(e) => {
                warn!(dir, error = %e, "invalid nested ignore rules");
                self.errors
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(e);
                None
            }
        }
    }
}
