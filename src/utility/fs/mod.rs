// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities: pruned traversal and async copy.
//!
//! ```text
//! walk:  pruned_walk()      ignore::Walk, no standard filters
//!        PrunedWalk         kept entries + drain_pruned()
//!        WalkOptions        sorted
//! copy:  copy_file_async()  tokio::fs, clears read-only dst,
//!                           errors name the failing side
//!        ensure_dir_async() create_dir_all
//!        remove_dir_all_async()
//! ```

pub mod copy;
pub mod walk;

#[cfg(test)]
mod tests;
