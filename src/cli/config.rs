// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config command arguments.

use clap::{Args, Subcommand};

/// Arguments for the `config` command.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Config operation (default: get)
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config operations.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Prints one key, or all keys.
    Get {
        /// Key to print; all keys when omitted
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },

    /// Sets a key and saves the config file. An empty value unsets it.
    Set {
        /// Key to set
        #[arg(value_name = "KEY")]
        key: String,

        /// New value
        #[arg(value_name = "VALUE")]
        value: String,
    },

    /// Checks that the mods directory can be found.
    Check,

    /// Prints the config file path.
    Path,
}
