// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for running external processes.
//!
//! ```text
//!      core
//!       |
//!    process
//!       |
//!    Builder ──> Output
//!    which cache, cancellation
//! ```

pub mod process;
