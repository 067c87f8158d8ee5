// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config-related commands for rimpub.

use std::path::Path;

use crate::cli::config::{ConfigAction, ConfigArgs};
use crate::config::AppConfig;
use crate::config::store;
use crate::error::{Result, bail_out};

/// Main handler for the config command.
///
/// `app` is the effective config (file, env, `--set`); `config_path` is the
/// file `set` writes to.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, unwritable config
/// files, or when `check` finds problems.
pub fn run_config_command(args: &ConfigArgs, app: &AppConfig, config_path: &Path) -> Result<()> {
    match &args.action {
        None | Some(ConfigAction::Get { key: None }) => {
            run_options_command(app);
            Ok(())
        }
        Some(ConfigAction::Get { key: Some(key) }) => {
            println!("{}", app.get(key)?.unwrap_or_default());
            Ok(())
        }
        Some(ConfigAction::Set { key, value }) => run_set_command(config_path, key, value),
        Some(ConfigAction::Check) => run_check_command(app),
        Some(ConfigAction::Path) => {
            println!("{}", config_path.display());
            Ok(())
        }
    }
}

/// Display current configuration options.
pub fn run_options_command(app: &AppConfig) {
    for line in app.format_options() {
        println!("{line}");
    }
}

/// Sets one key in the config file.
///
/// # Errors
///
/// Returns an error if the key or value is invalid or the file cannot be
/// read or written.
pub fn run_set_command(config_path: &Path, key: &str, value: &str) -> Result<()> {
    let mut saved = store::load_file(config_path)?;
    saved.set(key, value)?;
    store::save(&saved, config_path)?;
    tracing::info!(path = %config_path.display(), key, "config updated");
    println!("{key} = {}", saved.get(key)?.unwrap_or_default());
    Ok(())
}

/// Reports whether a mods directory can be found.
///
/// # Errors
///
/// Returns an error if any problem was found.
pub fn run_check_command(app: &AppConfig) -> Result<()> {
    let problems = app.check();
    if problems.is_empty() {
        if let Some(dir) = app.mods_dir() {
            println!("OK: mods directory {}", dir.display());
        }
        return Ok(());
    }
    for problem in &problems {
        eprintln!("{problem}");
    }
    Err(bail_out(format!("{} config problem(s) found", problems.len())).into())
}
