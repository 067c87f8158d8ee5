// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for rimpub using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! rimpub [global options] <command>
//! publish   (pub, p)   [--target-dir DIR] [--source-dir DIR] [--clean] [-y] [--no-build] [--json]
//! config    (cfg, c)   get [KEY] | set KEY VALUE | check | path
//! generate  (gen, g)   [ignore-file | config-file] [--force]
//! version
//! ```

pub mod config;
pub mod generate;
pub mod global;
pub mod publish;


use crate::cli::config::ConfigArgs;
use crate::cli::generate::GenerateArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::publish::PublishArgs;
use clap::{Parser, Subcommand};

/// Publish a `RimWorld` mod into the game's mods folder.
#[derive(Debug, Parser)]
#[command(
    name = "rimpub",
    author,
    version,
    about = "RimWorld mod publisher",
    long_about = "rimpub Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Copies a mod development folder into the game's Mods folder,\n\
                  leaving out everything matched by .gitignore-style rules.\n\n\
                  Run `rimpub publish` inside a mod folder to publish it. See\n\
                  `rimpub <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  User settings live in ~/.rimpub/Config.toml (created on first\n\
                  run, with the game directory detected from Steam). Any key can\n\
                  be overridden with RIMPUB_<KEY> environment variables or --set.\n\
                  Per-mod settings live in .rimpub.toml in the mod folder, and\n\
                  ignore rules in .rimpub-ignore."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Copies the mod into the mods directory.
    #[command(visible_aliases = ["pub", "p"])]
    Publish(PublishArgs),

    /// Shows or changes the user configuration.
    #[command(visible_aliases = ["cfg", "c"])]
    Config(ConfigArgs),

    /// Writes a starter ignore file and/or project config.
    #[command(visible_aliases = ["gen", "g"])]
    Generate(GenerateArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
