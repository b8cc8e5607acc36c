//! Error types for ccsed.

use crate::regex_error::EnhancedRegexError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using SedError.
pub type Result<T> = std::result::Result<T, SedError>;

/// Errors surfaced by the directive parser, the line processor and the
/// in-place rewrite.
#[derive(Debug, Error)]
pub enum SedError {
    /// Missing or inconsistent command-line arguments.
    #[error("{0}")]
    Argument(String),

    /// Directive matches no recognized shape.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Pattern field is not a valid regular expression.
    #[error(transparent)]
    RegexCompile(#[from] EnhancedRegexError),

    /// Named input file could not be opened.
    #[error("{hint}\n  cause: {cause}")]
    FileOpen {
        path: PathBuf,
        hint: String,
        cause: io::Error,
    },

    /// I/O failure while reading input, after `line` lines were read.
    #[error("error reading input after line {line}: {cause}")]
    Read { line: usize, cause: io::Error },

    #[error("error writing output: {cause}")]
    Write { cause: io::Error },

    /// Temporary file for in-place editing could not be created or persisted.
    #[error("in-place edit of {} failed: {message}", path.display())]
    InPlace { path: PathBuf, message: String },
}

/// Directive shape errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Not `command/pattern/replacement/flag`.
    #[error(
        "malformed substitution {directive:?}: expected 4 '/'-separated fields \
         (s/pattern/replacement/flag), found {found}"
    )]
    FieldCount { directive: String, found: usize },

    /// Range expression rejected while `-n` was in effect.
    #[error("could not parse substitution: {directive}: {reason}")]
    Range { directive: String, reason: RangeError },
}

/// Why a range expression was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("invalid range expression: {0}")]
    TokenCount(String),

    #[error("invalid line number {token:?}: {message}")]
    Integer { token: String, message: String },
}

impl SedError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SedError::Argument(_) => 2,
            _ => 1,
        }
    }
}
