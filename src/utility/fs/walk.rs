// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use bon::Builder;
use flume::{Receiver, unbounded};
use ignore::{DirEntry, Walk, WalkBuilder};
use std::path::{Path, PathBuf};

/// Options for a pruned, sequential directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Visit siblings in file-name order
    #[builder(setters(name = with_sorted), default = true)]
    sorted: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns whether siblings are visited in file-name order.
    #[must_use]
    pub const fn sorted(&self) -> bool {
        self.sorted
    }
}

/// An entry the prune predicate rejected. Directories are never descended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrunedEntry {
    path: PathBuf,
    is_dir: bool,
}

impl PrunedEntry {
    /// Full path of the rejected entry.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the rejected entry was a directory (its subtree was skipped).
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }
}

/// Depth-first walk that reports pruned entries alongside the kept ones.
///
/// Built on `ignore::Walk` with every standard filter disabled: hidden
/// files, `.gitignore` files and friends are *not* consulted. The only
/// filter is the caller's predicate, evaluated before descending.
pub struct PrunedWalk {
    walk: Walk,
    pruned: Receiver<PrunedEntry>,
}

impl PrunedWalk {
    /// Drains entries pruned since the last call.
    ///
    /// The predicate runs before the walker yields the next kept entry, so
    /// draining after every `next()` keeps pruned and kept entries in walk
    /// order.
    pub fn drain_pruned(&self) -> impl Iterator<Item = PrunedEntry> + '_ {
        self.pruned.try_iter()
    }
}

impl Iterator for PrunedWalk {
    type Item = Result<DirEntry, ignore::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next()
    }
}

/// Builds a `WalkBuilder` with the given options and no implicit filters.
fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    builder.standard_filters(false);
    builder.follow_links(false);

    if options.sorted() {
        builder.sort_by_file_name(std::ffi::OsStr::cmp);
    }

    builder
}

/// Walks `root` sequentially, pruning every entry for which `keep` returns
/// false.
///
/// `keep` receives the entry and whether it is a directory. Symlinks are
/// never followed and count as files. The root itself is never pruned.
///
/// # Example
/// ```no_run
/// use rimpub::utility::fs::walk::{pruned_walk, WalkOptions};
///
/// let mut walk = pruned_walk("/path/to/mod", &WalkOptions::default(), |entry, _| {
///     entry.file_name() != "obj"
/// });
/// while let Some(entry) = walk.next() {
///     for pruned in walk.drain_pruned() {
///         println!("skipped {}", pruned.path().display());
///     }
///     println!("kept {}", entry?.path().display());
/// }
/// # Ok::<(), ignore::Error>(())
/// ```
pub fn pruned_walk<P, F>(root: P, options: &WalkOptions, keep: F) -> PrunedWalk
where
    P: AsRef<Path>,
    F: Fn(&DirEntry, bool) -> bool + Send + Sync + 'static,
{
    let (tx, rx) = unbounded::<PrunedEntry>();

    let mut builder = build_walker(root.as_ref(), options);
    builder.filter_entry(move |entry| {
        let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
        if keep(entry, is_dir) {
            return true;
        }
        // Receiver lives as long as the walk, send cannot fail while walking
        let _ = tx.send(PrunedEntry {
            path: entry.path().to_path_buf(),
            is_dir,
        });
        false
    });

    PrunedWalk {
        walk: builder.build(),
        pruned: rx,
    }
}
