// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for rimpub.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. ~/.rimpub/Config.toml   (or --config / RIMPUB_CONFIG)
//! 3. RIMPUB_* env vars
//! 4. CLI overrides (--set key=value)
//!
//! per mod: <source>/.rimpub.toml  ──> ProjectConfig
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! RIMPUB_PATH_MODS=/path   → path_mods = "/path"
//! RIMPUB_NO_ASK=true       → no_ask = true
//! RIMPUB_BUILD_HOOK="..."  → build_hook = "..."
//! ```

pub mod loader;
pub mod paths;
pub mod project;
pub mod store;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::ConfigError;

use paths::MODS_DIR_NAME;

/// User-level settings shared by every mod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Mods directory; wins over `path_game`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_mods: Option<PathBuf>,
    /// Game install directory; mods go to `<path_game>/Mods`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path_game: Option<PathBuf>,
    /// Never ask for confirmation.
    pub no_ask: bool,
    /// Default build hook for projects without their own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_hook: Option<String>,
}

/// Something `config check` found wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    /// Neither `path_mods` nor `path_game` is set.
    NoModsDir,
    /// The configured game directory does not exist.
    GameDirMissing(PathBuf),
    /// The resolved mods directory does not exist.
    ModsDirMissing(PathBuf),
}

impl fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoModsDir => write!(
                f,
                "no mods directory: set path_mods or path_game (rimpub config set path_game <dir>)"
            ),
            Self::GameDirMissing(path) => {
                write!(f, "game directory does not exist: {}", path.display())
            }
            Self::ModsDirMissing(path) => {
                write!(f, "mods directory does not exist: {}", path.display())
            }
        }
    }
}

impl AppConfig {
    /// Every settable key, in display order.
    pub const KEYS: [&'static str; 4] = ["path_mods", "path_game", "no_ask", "build_hook"];

    /// Where published mods go: `path_mods`, else `<path_game>/Mods`.
    #[must_use]
    pub fn mods_dir(&self) -> Option<PathBuf> {
        self.path_mods.clone().or_else(|| {
            self.path_game
                .as_ref()
                .map(|game| game.join(MODS_DIR_NAME))
        })
    }

    /// Value of `key` as text; `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for keys not in [`Self::KEYS`].
    pub fn get(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let display = |p: &Option<PathBuf>| p.as_ref().map(|p| p.display().to_string());
        match key {
            "path_mods" => Ok(display(&self.path_mods)),
            "path_game" => Ok(display(&self.path_game)),
            "no_ask" => Ok(Some(self.no_ask.to_string())),
            "build_hook" => Ok(self.build_hook.clone()),
            _ => Err(ConfigError::UnknownKey {
                key: key.to_string(),
            }),
        }
    }

    /// Sets `key` from text. An empty value unsets optional keys.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownKey` for unknown keys and
    /// `ConfigError::InvalidValue` when `no_ask` is not `true` or `false`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let optional = |v: &str| (!v.is_empty()).then(|| v.to_string());
        match key {
            "path_mods" => self.path_mods = optional(value).map(PathBuf::from),
            "path_game" => self.path_game = optional(value).map(PathBuf::from),
            "no_ask" => {
                self.no_ask = parse_bool(value).ok_or_else(|| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected true or false, got '{value}'"),
                })?;
            }
            "build_hook" => self.build_hook = optional(value),
            _ => {
                return Err(ConfigError::UnknownKey {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Problems that would stop `publish` from finding a target.
    #[must_use]
    pub fn check(&self) -> Vec<ConfigProblem> {
        let mut problems = Vec::new();
        if self.path_mods.is_none()
            && let Some(game) = &self.path_game
            && !game.is_dir()
        {
            problems.push(ConfigProblem::GameDirMissing(game.clone()));
        }
        match self.mods_dir() {
            None => problems.push(ConfigProblem::NoModsDir),
            Some(dir) if !dir.is_dir() => problems.push(ConfigProblem::ModsDirMissing(dir)),
            Some(_) => {}
        }
        problems
    }

    /// `key = value` lines, aligned, unset values shown empty.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let options: BTreeMap<usize, (&str, String)> = Self::KEYS
            .iter()
            .enumerate()
            .map(|(i, key)| {
                let value = self.get(key).ok().flatten().unwrap_or_default();
                (i, (*key, value))
            })
            .collect();

        let max_key_len = Self::KEYS.iter().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_values()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}
