//! Substitution directive model
//!
//! A directive is parsed once per invocation and stays immutable while the
//! line processor streams input through it.

use crate::config::FlagSemantics;
use regex::bytes::Regex;
use std::fmt;

/// Substitution flag, at most one per directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubstFlag {
    /// Unrecognized or empty flag token
    #[default]
    NoFlag,
    /// g - all occurrences
    Global,
    /// gi - all occurrences, ignoring case
    GlobalCaseInsensitive,
    /// d - delete matching lines
    Delete,
    /// p - print matching lines
    Print,
}

impl SubstFlag {
    /// Map a flag token to its variant. Unknown tokens are accepted as `NoFlag`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "g" => SubstFlag::Global,
            "gi" => SubstFlag::GlobalCaseInsensitive,
            "d" => SubstFlag::Delete,
            "p" => SubstFlag::Print,
            _ => SubstFlag::NoFlag,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            SubstFlag::NoFlag => "",
            SubstFlag::Global => "g",
            SubstFlag::GlobalCaseInsensitive => "gi",
            SubstFlag::Delete => "d",
            SubstFlag::Print => "p",
        }
    }
}

/// Inclusive, 1-indexed line range.
///
/// `start > end` is allowed and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: i64,
    pub end: i64,
}

impl LineRange {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Check whether a 1-based line number falls inside the range
    pub fn contains(&self, line_number: usize) -> bool {
        let line = i64::try_from(line_number).unwrap_or(i64::MAX);
        self.start <= line && line <= self.end
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start, self.end)
    }
}

/// A parsed substitution directive
#[derive(Debug, Clone)]
pub struct Substitution {
    /// Verb field; only "s" has meaning downstream
    pub command: String,
    pub pattern: Regex,
    /// Replacement template, `$1` / `${name}` expand capture groups
    pub replacement: String,
    pub flag: SubstFlag,
    /// Flag field exactly as written
    pub flag_token: String,
    pub line_range: Option<LineRange>,
    /// How `flag` is executed; the pattern was compiled for this mode
    pub flag_semantics: FlagSemantics,
}

impl Substitution {
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl PartialEq for Substitution {
    fn eq(&self, other: &Self) -> bool {
        self.command == other.command
            && self.pattern.as_str() == other.pattern.as_str()
            && self.replacement == other.replacement
            && self.flag == other.flag
            && self.flag_token == other.flag_token
            && self.line_range == other.line_range
            && self.flag_semantics == other.flag_semantics
    }
}
