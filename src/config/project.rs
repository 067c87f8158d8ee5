// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-mod settings read from `.rimpub.toml` in the source directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::AppConfig;
use super::loader::ConfigLoader;
use crate::error::{ConfigError, PatternError, Result};
use crate::pattern::{DEFAULT_PATTERNS, RuleSet, normalize_path};
use crate::publish::BuildHook;

/// Project config file name.
pub const PROJECT_CONFIG_FILE_NAME: &str = ".rimpub.toml";

/// Default ignore file name.
pub const IGNORE_FILE_NAME: &str = ".rimpub-ignore";

/// Settings of one mod project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Folder name under the mods directory (default: source folder name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Build hook, overrides the user-level one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_hook: Option<String>,
    /// Ignore file, relative to the source directory.
    pub ignore_file: PathBuf,
    /// Also apply `.gitignore` files and `.git/info/exclude`.
    pub respect_gitignore: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            build_hook: None,
            ignore_file: PathBuf::from(IGNORE_FILE_NAME),
            respect_gitignore: true,
        }
    }
}

impl ProjectConfig {
    /// Loads `<source_dir>/.rimpub.toml`, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is not valid TOML or has
    /// unknown keys.
    pub fn load(source_dir: &Path) -> Result<Self> {
        let path = source_dir.join(PROJECT_CONFIG_FILE_NAME);
        debug!(path = %path.display(), exists = path.exists(), "project config");
        ConfigLoader::new()
            .add_toml_file_optional(&path)
            .build_as::<Self>()
    }

    /// Target folder name: `name` if set, otherwise the source folder name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if neither is available (e.g. the
    /// source is a filesystem root).
    pub fn resolve_name(&self, source_dir: &Path) -> std::result::Result<String, ConfigError> {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return Ok(name.trim().to_string());
        }
        debug!("no 'name' configured, using the folder name");
        std::fs::canonicalize(source_dir)
            .ok()
            .as_deref()
            .unwrap_or(source_dir)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ConfigError::MissingKey {
                key: "name".to_string(),
            })
    }

    /// Builds the rule set for this project: defaults, then
    /// `.git/info/exclude` and the root `.gitignore` (if respected), then
    /// the ignore file.
    ///
    /// `.gitignore` files in subdirectories, and ignore files of the same
    /// name when `ignore_file` is a bare file name, are registered as
    /// nested rule files scoped to their directory.
    ///
    /// # Errors
    ///
    /// Returns a `PatternError` if a rule file is unreadable or invalid.
    pub fn rules(&self, source_dir: &Path) -> std::result::Result<RuleSet, PatternError> {
        let mut builder = RuleSet::builder().defaults();
        let mut nested = Vec::new();

        let ignore_rel = normalize_path(&self.ignore_file);
        let bare_name = !ignore_rel.is_empty() && !ignore_rel.contains('/');

        // A renamed ignore file must not be published either.
        if !ignore_rel.is_empty() && !DEFAULT_PATTERNS.contains(&ignore_rel.as_str()) {
            builder = builder.add_pattern(if bare_name {
                ignore_rel.clone()
            } else {
                format!("/{ignore_rel}")
            });
        }

        if self.respect_gitignore {
            builder = builder
                .add_file(source_dir.join(".git").join("info").join("exclude"))?
                .add_file(source_dir.join(".gitignore"))?;
            nested.push(".gitignore".to_string());
        }
        builder = builder.add_file(source_dir.join(&self.ignore_file))?;
        if bare_name {
            nested.push(ignore_rel);
        }
        builder.nested_files(nested).build()
    }

    /// The hook to run: the project's own, else the user-level one.
    #[must_use]
    pub fn build_hook(&self, app: &AppConfig) -> Option<BuildHook> {
        self.build_hook
            .as_deref()
            .or(app.build_hook.as_deref())
            .map(str::trim)
            .filter(|command| !command.is_empty())
            .map(BuildHook::new)
    }
}
