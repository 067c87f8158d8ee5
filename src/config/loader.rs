// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional(path)
//!   .with_env_prefix()
//!        |
//!        v
//!    build_as::<T>() --> T
//! ```

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            files: Vec::new(),
        }
    }

    /// Adds a TOML configuration file that may be absent.
    ///
    /// The file is read when `build_as()` is called; invalid TOML makes it
    /// fail. Only files that exist show up in `format_loaded_files()`.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(false));
        if p.exists() {
            self.files.push(("optional".to_string(), p.to_path_buf()));
        }
        self
    }

    /// Reads `<PREFIX>_<KEY>` environment variables; `RIMPUB_NO_ASK=true`
    /// sets `no_ask`. Keys are flat, so underscores are kept.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Builds the configuration from all added sources and deserializes it.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration files have invalid TOML syntax.
    /// - The merged configuration cannot be deserialized into `T`.
    pub fn build_as<T: DeserializeOwned>(self) -> Result<T> {
        let builder = match &self.env_prefix {
            Some(prefix) => self
                .builder
                .add_source(config::Environment::with_prefix(prefix).try_parsing(true)),
            None => self.builder,
        };
        let cfg = builder.build()?;
        Ok(cfg.try_deserialize()?)
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
