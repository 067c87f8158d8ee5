// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   walk:  pruned_walk(), PrunedWalk, WalkOptions
//!   copy:  copy_file_async(), ensure_dir_async(), remove_dir_all_async()
//! ```

pub mod fs;
