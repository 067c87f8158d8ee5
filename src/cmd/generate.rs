// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generate command implementation for rimpub.

use anyhow::Context;
use std::path::{Path, PathBuf};

use crate::cli::generate::{GenerateArgs, GenerateTarget};
use crate::config::project::{IGNORE_FILE_NAME, PROJECT_CONFIG_FILE_NAME};
use crate::error::Result;
use crate::publish::{generate_config_file, generate_ignore_file};

/// Main handler for the generate command. Without a target, writes both
/// files.
///
/// # Errors
///
/// Returns an error if a file exists and `--force` was not given, or if a
/// file cannot be written.
pub fn run_generate_command(args: &GenerateArgs) -> Result<()> {
    let dir = match &args.source_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };

    for path in generate_in(&dir, args.target, args.force)? {
        println!("Generated {}", path.display());
    }
    Ok(())
}

/// Writes the requested scaffold(s) into `dir` and returns the written paths.
///
/// # Errors
///
/// Returns a `ScaffoldError` from the first file that could not be written.
pub fn generate_in(dir: &Path, target: Option<GenerateTarget>, force: bool) -> Result<Vec<PathBuf>> {
    let targets = target.map_or_else(
        || vec![GenerateTarget::IgnoreFile, GenerateTarget::ConfigFile],
        |target| vec![target],
    );

    let mut written = Vec::with_capacity(targets.len());
    for target in targets {
        let path = match target {
            GenerateTarget::IgnoreFile => {
                let path = dir.join(IGNORE_FILE_NAME);
                generate_ignore_file(&path, force)?;
                path
            }
            GenerateTarget::ConfigFile => {
                let path = dir.join(PROJECT_CONFIG_FILE_NAME);
                generate_config_file(&path, force)?;
                path
            }
        };
        tracing::debug!(path = %path.display(), "scaffold written");
        written.push(path);
    }
    Ok(written)
}
