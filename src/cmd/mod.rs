// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   publish, config, generate
//! ```

pub mod config;
pub mod generate;
pub mod publish;


use std::io::{BufRead, Write};

/// Asks a y/N question on stderr and reads the answer from stdin.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written.
pub fn confirm(prompt: &str) -> std::io::Result<bool> {
    confirm_with(std::io::stdin().lock(), std::io::stderr().lock(), prompt)
}

/// [`confirm`] over arbitrary streams. Only `y` and `yes` count as yes;
/// end of input counts as no.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn confirm_with<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    prompt: &str,
) -> std::io::Result<bool> {
    write!(output, "{prompt} (y/N): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
