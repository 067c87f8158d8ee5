// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE     ← User config file (default ~/.rimpub/Config.toml)
//! --dry             ← Walk and report, write nothing
//! --log-level N     ← Console verbosity (0-6)
//! --file-log-level  ← File verbosity (overrides --log-level)
//! --log-file FILE   ← Also log to FILE
//! --set KEY=VAL     ← Direct config override
//!
//! Precedence: --set > RIMPUB_* env > config file > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to the user configuration file.
    #[arg(long = "config", value_name = "FILE", env = "RIMPUB_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Walks the source and reports what would be copied without
    /// touching the target or running the build hook.
    #[arg(long, global = true)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", global = true, value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Sets a config key for this run only, such as 'no_ask=true'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "KEY=VALUE", global = true, action = clap::ArgAction::Append)]
    pub options: Vec<String>,
}

impl GlobalOptions {
    /// Splits `--set` options into `(key, value)` overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an option without `=`.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>, ConfigError> {
        self.options
            .iter()
            .map(|option| {
                option
                    .split_once('=')
                    .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                    .filter(|(key, _)| !key.is_empty())
                    .ok_or_else(|| ConfigError::InvalidValue {
                        key: option.clone(),
                        message: "expected KEY=VALUE".to_string(),
                    })
            })
            .collect()
    }
}
