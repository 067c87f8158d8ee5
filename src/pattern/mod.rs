// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Gitignore-style pattern matching.
//!
//! ```text
//! RuleSet::builder()
//!   .defaults()            .git .gitignore .rimpub-ignore .rimpub.toml
//!   .add_file(.gitignore)  optional
//!   .add_file(ignore file) optional
//!   .nested_files([...])   rule file names looked up in subdirectories
//!   .build() ──> RuleSet [rule 0, rule 1, … rule n]
//!
//! is_ignored("a/b/c", is_dir)
//!   ancestors "a", "a/b" (as dirs): any ignored? ──> ignored
//!   else last rule matching "a/b/c" decides:
//!     plain ──> ignored   negated ──> kept   none ──> kept
//!
//! ScopedRules::new(source, rule_set)   adds the nested rule files
//! ```

pub mod rule;
pub mod scoped;


use std::path::Path;
use tracing::debug;

use crate::error::PatternError;

pub use rule::IgnoreRule;
pub use scoped::ScopedRules;

/// Patterns every publish starts from.
///
/// VCS metadata and rimpub's own project files never belong in the game folder.
pub const DEFAULT_PATTERNS: &[&str] = &[".git", ".gitignore", ".rimpub-ignore", ".rimpub.toml"];

/// Outcome of matching one path against a [`RuleSet`].
#[derive(Debug, Clone, Copy)]
pub enum RuleMatch<'a> {
    /// The last matching rule is a plain pattern.
    Ignored(&'a IgnoreRule),
    /// The last matching rule is a negation.
    Included(&'a IgnoreRule),
    /// No rule matched.
    Unmatched,
}

impl<'a> RuleMatch<'a> {
    /// Whether this outcome excludes the path.
    #[must_use]
    pub const fn is_ignore(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    /// The deciding rule, if any.
    #[must_use]
    pub const fn rule(&self) -> Option<&'a IgnoreRule> {
        match self {
            Self::Ignored(rule) | Self::Included(rule) => Some(rule),
            Self::Unmatched => None,
        }
    }
}

/// Ordered, compiled set of ignore rules.
///
/// Built once and read-only afterwards; share it behind an `Arc` when a
/// walker callback needs it.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<IgnoreRule>,
    nested_files: Vec<String>,
}

impl RuleSet {
    /// Compiles raw pattern lines in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidPattern` for the first unparsable line.
    pub fn compile<I, S>(lines: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut rules = Vec::new();
        push_lines(&mut rules, "<inline>", lines)?;
        Ok(Self {
            rules,
            nested_files: Vec::new(),
        })
    }

    /// Starts a builder that concatenates several rule sources.
    #[must_use]
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Names of the rule files that also apply inside subdirectories.
    #[must_use]
    pub fn nested_files(&self) -> &[String] {
        &self.nested_files
    }

    /// Returns the number of compiled rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rule was compiled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Matches `path` alone (no ancestor inheritance): the last matching
    /// rule wins.
    pub fn matched(&self, path: impl AsRef<Path>, is_dir: bool) -> RuleMatch<'_> {
        let normalized = normalize_path(path.as_ref());
        self.matched_normalized(Path::new(&normalized), is_dir)
    }

    /// Whether `path` is excluded, either by its own last matching rule or
    /// because one of its ancestor directories is excluded.
    ///
    /// A negation cannot re-include a path whose parent directory is
    /// excluded, same as git.
    pub fn is_ignored(&self, path: impl AsRef<Path>, is_dir: bool) -> bool {
        let normalized = normalize_path(path.as_ref());
        if normalized.is_empty() {
            return false;
        }
        let path = Path::new(&normalized);

        let mut ancestors: Vec<&Path> = path
            .ancestors()
            .skip(1)
            .filter(|ancestor| !ancestor.as_os_str().is_empty())
            .collect();
        ancestors.reverse();
        if ancestors
            .into_iter()
            .any(|ancestor| self.matched_normalized(ancestor, true).is_ignore())
        {
            return true;
        }

        self.matched_normalized(path, is_dir).is_ignore()
    }

    fn matched_normalized(&self, path: &Path, is_dir: bool) -> RuleMatch<'_> {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(path, is_dir))
            .map_or(RuleMatch::Unmatched, |rule| {
                if rule.is_negated() {
                    RuleMatch::Included(rule)
                } else {
                    RuleMatch::Ignored(rule)
                }
            })
    }
}

/// A named chunk of rule lines waiting to be compiled.
#[derive(Debug, Clone)]
struct RuleSource {
    origin: String,
    lines: Vec<String>,
}

/// Concatenates rule sources in order and compiles them in one pass.
#[derive(Debug, Clone, Default)]
pub struct RuleSetBuilder {
    sources: Vec<RuleSource>,
    nested_files: Vec<String>,
}

impl RuleSetBuilder {
    /// Adds [`DEFAULT_PATTERNS`].
    #[must_use]
    pub fn defaults(self) -> Self {
        self.add_lines("<defaults>", DEFAULT_PATTERNS.iter().copied())
    }

    /// Adds a single pattern.
    #[must_use]
    pub fn add_pattern(self, pattern: impl Into<String>) -> Self {
        self.add_lines("<extra>", [pattern.into()])
    }

    /// Adds lines under a name used in error messages.
    #[must_use]
    pub fn add_lines<I, S>(mut self, origin: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.push(RuleSource {
            origin: origin.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Names rule files (e.g. `.gitignore`) whose copies in subdirectories
    /// apply to that subdirectory, later names taking precedence.
    #[must_use]
    pub fn nested_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nested_files.extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds the contents of an ignore file. A missing file, or a parent that
    /// is not a directory, adds nothing.
    ///
    /// # Errors
    ///
    /// Returns `PatternError::ReadFailed` if the file exists but cannot be
    /// read as UTF-8 text.
    pub fn add_file(self, path: impl AsRef<Path>) -> Result<Self, PatternError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "loaded ignore rules");
                Ok(self.add_lines(
                    path.display().to_string(),
                    content.lines().map(str::to_string),
                ))
            }
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory
                ) =>
            {
                debug!(path = %path.display(), "no ignore file");
                Ok(self)
            }
            Err(source) => Err(PatternError::ReadFailed {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Compiles every source into one [`RuleSet`].
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidPattern` for the first unparsable line.
    pub fn build(self) -> Result<RuleSet, PatternError> {
        let mut rules = Vec::new();
        for source in self.sources {
            push_lines(&mut rules, &source.origin, source.lines)?;
        }
        Ok(RuleSet {
            rules,
            nested_files: self.nested_files,
        })
    }
}

fn push_lines<I, S>(rules: &mut Vec<IgnoreRule>, origin: &str, lines: I) -> Result<(), PatternError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (offset, line) in lines.into_iter().enumerate() {
        if let Some(rule) = IgnoreRule::parse(line.as_ref(), origin, offset + 1, rules.len())? {
            rules.push(rule);
        }
    }
    Ok(())
}

/// Normalizes a relative path for matching: `/` separators on every OS,
/// no `.` segments, no leading or doubled separators.
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}
