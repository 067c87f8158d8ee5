// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning and management.
//!
//! ```text
//! ProcessBuilder::from_command_line("dotnet build", cwd)
//!   .arg() .inherit_stdio() / .forward_to_log() .flag(ALLOW_FAILURE)
//!   .run_with_cancellation(token)
//!       --> tokio::process::Command
//!           log or inherit stdout/stderr
//!       --> ProcessOutput { exit_code, interrupted }
//! ```

pub mod builder;
mod runner;
#[cfg(test)]
mod tests;
