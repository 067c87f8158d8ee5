// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command arguments.
//!
//! ```text
//! target = (--target-dir | configured mods dir) / <project name>
//! source = --source-dir | current directory
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `publish` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PublishArgs {
    /// Mods directory to publish into, instead of the configured one.
    #[arg(short = 't', long = "target-dir", value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// Mod folder to publish (default: current directory).
    #[arg(short = 'd', long = "source-dir", value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Deletes the existing published folder before copying.
    #[arg(short = 'c', long)]
    pub clean: bool,

    /// Answers yes to every confirmation.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Skips the build hook.
    #[arg(long = "no-build")]
    pub no_build: bool,

    /// Prints the report as JSON on stdout.
    #[arg(long)]
    pub json: bool,
}
