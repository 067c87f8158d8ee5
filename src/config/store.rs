// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The user config file, `~/.rimpub/Config.toml`.
//!
//! ```text
//! ensure_exists(path, resolver)   first run: seed path_game, save
//!        |
//! load(path, overrides)           file < RIMPUB_* env < --set
//!        |
//! save(config, path)              header + TOML, temp file + rename
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::AppConfig;
use super::loader::ConfigLoader;
use super::paths::PathResolver;
use crate::error::{ConfigError, Result};

/// Directory under the home directory holding the user config.
pub const CONFIG_DIR_NAME: &str = ".rimpub";

/// User config file name.
pub const CONFIG_FILE_NAME: &str = "Config.toml";

/// Environment variable prefix (`RIMPUB_PATH_MODS`, ...).
pub const ENV_PREFIX: &str = "RIMPUB";

/// First line of every saved config file.
pub const CONFIG_HEADER: &str = "# This file was generated by rimpub, do not edit manually";

/// `~/.rimpub/Config.toml`.
///
/// # Errors
///
/// Returns `ConfigError::NoHomeDir` if the home directory is unknown.
pub fn default_config_path() -> std::result::Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoHomeDir)
}

/// Creates the config file on first run, detecting the game directory.
///
/// Returns `true` if a new file was written.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn ensure_exists(path: &Path, resolver: &dyn PathResolver) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let config = AppConfig {
        path_game: resolver.game_dir(),
        ..AppConfig::default()
    };
    save(&config, path)?;
    match &config.path_game {
        Some(game) => info!(
            path = %path.display(),
            game = %game.display(),
            "created config with detected game directory"
        ),
        None => info!(
            path = %path.display(),
            "created config; game directory not detected, set path_game or path_mods"
        ),
    }
    Ok(true)
}

/// Loads the user config: file, then `RIMPUB_*` env vars, then `overrides`.
///
/// A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file is not valid TOML or an override names an
/// unknown key or carries an invalid value.
pub fn load(path: &Path, overrides: &[(String, String)]) -> Result<AppConfig> {
    let loader = ConfigLoader::new()
        .add_toml_file_optional(path)
        .with_env_prefix(ENV_PREFIX);
    for line in loader.format_loaded_files() {
        debug!("config source {line}");
    }
    let mut config: AppConfig = loader.build_as()?;
    for (key, value) in overrides {
        config.set(key, value)?;
    }
    Ok(config)
}

/// Loads only what is saved in `path`, ignoring env vars and overrides.
///
/// Basis for `config set`: env vars and `--set` values are not persisted.
///
/// # Errors
///
/// Returns an error if the file is not valid TOML.
pub fn load_file(path: &Path) -> Result<AppConfig> {
    ConfigLoader::new().add_toml_file_optional(path).build_as()
}

/// Writes `config` to `path`, creating parent directories.
///
/// Written to a temp file beside `path`, then renamed over it.
///
/// # Errors
///
/// Returns `ConfigError::WriteError` on any failure.
pub fn save(config: &AppConfig, path: &Path) -> std::result::Result<(), ConfigError> {
    let write_error = |message: String| ConfigError::WriteError {
        path: path.display().to_string(),
        message,
    };

    let body = toml::to_string_pretty(config).map_err(|e| write_error(e.to_string()))?;
    let content = format!("{CONFIG_HEADER}\n\n{body}");

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;

    let mut file = NamedTempFile::new_in(parent).map_err(|e| write_error(e.to_string()))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| write_error(e.to_string()))?;
    file.persist(path).map_err(|e| write_error(e.error.to_string()))?;

    debug!(path = %path.display(), "saved config");
    Ok(())
}
