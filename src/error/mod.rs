// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            RimpubError (~24 bytes)
//!                     |
//!   +-------+-------+-+-----+-------+-----+
//!   |       |       |       |       |     |
//!   v       v       v       v       v     v
//! Bail  Pattern  Publish Scaffold Config Process/Fs/Io/Other
//!         Box      Box     Box     Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Pattern   InvalidPattern, ReadFailed
//!   Publish   SourceUnreadable, TargetUnwritable, TargetInsideSource,
//!             SourceInsideTarget, InvalidRules
//!   Scaffold  FileExists, WriteFailed
//!   Config    UnknownKey, InvalidValue, MissingKey, WriteError
//!   Process   ExecutableNotFound, SpawnFailed, NonZeroExit
//!   Fs        NotFound, PermissionDenied, IoError
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`RimpubError`].
pub type RimpubResult<T> = std::result::Result<T, RimpubError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum RimpubError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Ignore rule compilation failed.
    #[error("pattern error: {0}")]
    Pattern(#[from] Box<PatternError>),

    /// Publish could not start.
    #[error("publish error: {0}")]
    Publish(#[from] Box<PublishError>),

    /// Scaffold generation refused or failed.
    #[error("scaffold error: {0}")]
    Scaffold(#[from] Box<ScaffoldError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`RimpubError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> RimpubError {
    RimpubError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for RimpubError {
                fn from(err: $error) -> Self {
                    RimpubError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    PatternError => Pattern,
    PublishError => Publish,
    ScaffoldError => Scaffold,
    ConfigError => Config,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Pattern Errors ---

/// Ignore rule errors.
#[derive(Debug, Error)]
pub enum PatternError {
    /// A rule that cannot be turned into a matcher.
    #[error("invalid pattern '{pattern}' at {origin}:{line}: {reason}")]
    InvalidPattern {
        origin: String,
        line: usize,
        pattern: String,
        reason: String,
    },

    /// The ignore file exists but could not be read.
    #[error("failed to read ignore file '{path}': {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Publish Errors ---

/// Errors that stop a publish before any entry is copied.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Source root is missing or not a directory.
    #[error("source directory '{path}' is unreadable: {reason}")]
    SourceUnreadable { path: String, reason: String },

    /// Target root cannot be created or cleared.
    #[error("target directory '{path}' is not writable: {source}")]
    TargetUnwritable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Target lies inside the source tree.
    #[error("target directory '{target}' is inside the source directory '{source_dir}'")]
    TargetInsideSource { source_dir: String, target: String },

    /// Source lies inside the target tree, so cleaning would delete it.
    #[error("source directory '{source_dir}' is inside the target directory '{target}'")]
    SourceInsideTarget { source_dir: String, target: String },

    /// A rule file found below the source root is invalid.
    #[error("invalid ignore rules: {0}")]
    InvalidRules(#[source] PatternError),
}

// --- Scaffold Errors ---

/// Errors from the `generate` scaffolds.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Refusing to clobber an existing file.
    #[error("file already exists: {path} (pass --force to overwrite)")]
    FileExists { path: String },

    /// Writing the scaffold failed.
    #[error("failed to write '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Serializing the scaffold content failed.
    #[error("failed to render '{path}': {message}")]
    RenderFailed { path: String, message: String },
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key is not a known configuration key.
    #[error("unknown config key '{key}'")]
    UnknownKey { key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}'")]
    MissingKey { key: String },

    /// The home directory could not be determined.
    #[error("cannot determine the home directory")]
    NoHomeDir,

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}': {message}")]
    WriteError { path: String, message: String },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Empty command line.
    #[error("build hook command is empty")]
    EmptyCommand,

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// The path the failed operation was applied to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) | Self::IoError { path, .. } => path,
        }
    }

    /// Classifies an I/O error raised for `path`.
    pub fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        let display = path.display().to_string();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(display),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(display),
            _ => Self::IoError {
                path: display,
                source,
            },
        }
    }
}

#[cfg(test)]
mod tests;
