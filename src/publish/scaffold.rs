// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `generate` scaffolds: the ignore file and the project config.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use tracing::{debug, info};

use crate::config::project::ProjectConfig;
use crate::error::ScaffoldError;
use crate::pattern::DEFAULT_PATTERNS;

const IGNORE_HEADER: &str = "\
# rimpub ignore file
#
# Files and directories matching these patterns are not published.
# Syntax follows .gitignore: `*` stays within a path segment, `**` spans
# segments, a trailing `/` matches directories only, a leading `!` re-includes
# a path, and later lines override earlier ones.
#
# Always excluded:
";

const IGNORE_EXAMPLES: &str = "\
#
# Examples:
# Source/
# *.psd
# !Textures/Preview.png
";

const CONFIG_HEADER: &str = "\
# rimpub project configuration
#
# name               folder created under the game's Mods directory
# build_hook         command run after publishing, target dir appended
# ignore_file        patterns excluded from publishing
# respect_gitignore  also apply the root .gitignore
";

/// Text written by [`generate_ignore_file`].
#[must_use]
pub fn ignore_file_template() -> String {
    let mut text = String::from(IGNORE_HEADER);
    for pattern in DEFAULT_PATTERNS {
        let _ = writeln!(text, "#   {pattern}");
    }
    text.push_str(IGNORE_EXAMPLES);
    text
}

/// Writes the ignore file template to `path`.
///
/// # Errors
///
/// Returns `ScaffoldError::FileExists` if `path` exists and `overwrite` is
/// false (the file is left untouched), or `ScaffoldError::WriteFailed`.
pub fn generate_ignore_file(path: &Path, overwrite: bool) -> Result<(), ScaffoldError> {
    write_scaffold(path, &ignore_file_template(), overwrite)?;
    info!(path = %path.display(), "generated ignore file");
    Ok(())
}

/// Writes a default project config to `path`, naming the mod after the
/// directory that contains it.
///
/// # Errors
///
/// Same as [`generate_ignore_file`], plus `ScaffoldError::RenderFailed` if
/// the config cannot be serialized.
pub fn generate_config_file(path: &Path, overwrite: bool) -> Result<(), ScaffoldError> {
    let name = path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned());
    let config = ProjectConfig {
        name,
        ..ProjectConfig::default()
    };

    let body = toml::to_string_pretty(&config).map_err(|e| ScaffoldError::RenderFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    write_scaffold(path, &format!("{CONFIG_HEADER}\n{body}"), overwrite)?;
    info!(path = %path.display(), "generated project config");
    Ok(())
}

fn write_scaffold(path: &Path, content: &str, overwrite: bool) -> Result<(), ScaffoldError> {
    let write_failed = |source| ScaffoldError::WriteFailed {
        path: path.display().to_string(),
        source,
    };

    if overwrite {
        debug!(path = %path.display(), "overwriting");
        return std::fs::write(path, content).map_err(write_failed);
    }

    // create_new fails atomically when the file is already there
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                ScaffoldError::FileExists {
                    path: path.display().to_string(),
                }
            } else {
                write_failed(e)
            }
        })?;
    file.write_all(content.as_bytes()).map_err(write_failed)
}
