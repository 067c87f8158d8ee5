// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! A single parsed ignore rule.
//!
//! ```text
//! raw line ──> comment/blank? ──> None
//!    │
//!    ├─ trim trailing spaces, keeping one escaped by "\"
//!    ├─ "!"  -> negated        "\!" / "\#" -> literal
//!    ├─ "/"… or …/… -> rooted
//!    ├─ …/   -> dir_only
//!    └─ glob -> single-rule Gitignore matcher
//! ```

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

use crate::error::PatternError;

/// One gitignore-style rule with its derived metadata.
///
/// Immutable once parsed. The glob itself is compiled by the `ignore` crate,
/// which guarantees the translation follows git's own rules; everything that
/// decides *between* rules (precedence, ancestors) lives in [`super::RuleSet`].
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    pattern: String,
    negated: bool,
    dir_only: bool,
    rooted: bool,
    index: usize,
    line: usize,
    matcher: Gitignore,
}

impl IgnoreRule {
    /// Parses one line of an ignore file.
    ///
    /// Returns `Ok(None)` for blank lines and comments. `index` is the
    /// position of the rule within its [`super::RuleSet`], `line` the 1-based
    /// line number within `origin` (used for error messages only).
    ///
    /// # Errors
    ///
    /// Returns `PatternError::InvalidPattern` if the line has no name
    /// component (`!`, `/`, `!/`) or the glob cannot be compiled.
    pub fn parse(
        raw: &str,
        origin: &str,
        line: usize,
        index: usize,
    ) -> Result<Option<Self>, PatternError> {
        if raw.starts_with('#') {
            return Ok(None);
        }
        let text = trim_unescaped_end(raw);
        if text.is_empty() {
            return Ok(None);
        }

        let invalid = |reason: &str| PatternError::InvalidPattern {
            origin: origin.to_string(),
            line,
            pattern: text.to_string(),
            reason: reason.to_string(),
        };

        let (body, negated) = if let Some(escaped) = text
            .strip_prefix('\\')
            .filter(|rest| rest.starts_with('!') || rest.starts_with('#'))
        {
            (escaped, false)
        } else if let Some(rest) = text.strip_prefix('!') {
            (rest, true)
        } else {
            (text, false)
        };

        let (body, dir_only) = body
            .strip_suffix('/')
            .map_or((body, false), |rest| (rest, true));
        let rooted = body.contains('/');

        if body.trim_start_matches('/').is_empty() {
            return Err(invalid(if negated {
                "empty negation"
            } else {
                "pattern has no name component"
            }));
        }

        let mut builder = GitignoreBuilder::new("");
        builder
            .add_line(None, text)
            .map_err(|e| invalid(&e.to_string()))?;
        let matcher = builder.build().map_err(|e| invalid(&e.to_string()))?;

        Ok(Some(Self {
            pattern: text.to_string(),
            negated,
            dir_only,
            rooted,
            index,
            line,
            matcher,
        }))
    }

    /// The rule as written (trailing whitespace trimmed).
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// `!`-prefixed rule that re-includes what earlier rules excluded.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    /// Trailing `/`: only matches directories.
    #[must_use]
    pub const fn is_dir_only(&self) -> bool {
        self.dir_only
    }

    /// Contains a non-trailing `/`: anchored at the ignore file's directory.
    #[must_use]
    pub const fn is_rooted(&self) -> bool {
        self.rooted
    }

    /// Position within the owning rule set; higher wins.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// 1-based line number within the source the rule came from.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Tests the glob alone, ignoring other rules and ancestors.
    ///
    /// `path` must already be normalized (relative, `/`-separated).
    pub(crate) fn matches(&self, path: &Path, is_dir: bool) -> bool {
        !self.matcher.matched(path, is_dir).is_none()
    }
}

/// Strips trailing whitespace, keeping the first whitespace character when
/// an odd run of backslashes escapes it.
fn trim_unescaped_end(raw: &str) -> &str {
    let trimmed = raw.trim_end();
    let backslashes = trimmed.bytes().rev().take_while(|&b| b == b'\\').count();
    if backslashes % 2 == 0 {
        return trimmed;
    }
    let escaped = raw[trimmed.len()..].chars().next().map_or(0, char::len_utf8);
    &raw[..trimmed.len() + escaped]
}
