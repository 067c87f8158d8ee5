// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generate command arguments.

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments for the `generate` command.
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// File to generate (default: both)
    #[command(subcommand)]
    pub target: Option<GenerateTarget>,

    /// Overwrites existing files.
    #[arg(short = 'f', long, global = true)]
    pub force: bool,

    /// Mod folder to write into (default: current directory).
    #[arg(short = 'd', long = "source-dir", value_name = "DIR", global = true)]
    pub source_dir: Option<PathBuf>,
}

/// Files `generate` can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum GenerateTarget {
    /// Writes `.rimpub-ignore`.
    #[command(visible_alias = "ignore")]
    IgnoreFile,

    /// Writes `.rimpub.toml`.
    #[command(visible_alias = "config")]
    ConfigFile,
}
