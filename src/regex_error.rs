//! Regex Error Handling
//!
//! Turns `regex::Error` into a diagnostic that names the offending pattern,
//! classifies the failure and, where possible, suggests a fix.

use regex::Error as RegexError;
use regex::bytes::{Regex, RegexBuilder};
use std::fmt;

/// Regex compile failure with context
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancedRegexError {
    /// The pattern that failed to compile
    pub pattern: String,
    pub error_type: RegexErrorType,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegexErrorType {
    /// Unclosed group or character class
    UnclosedDelimiter { delimiter: char, position: usize },
    /// Repetition operator with nothing to repeat, or a bad counted repetition
    InvalidQuantifier { message: String, position: Option<usize> },
    /// Escape sequence the regex crate does not know
    InvalidEscape { sequence: String },
    /// Look-around and backreferences inside patterns
    Unsupported { message: String },
    /// Compiled program exceeded the size limit
    TooBig,
    Syntax { message: String },
}

impl EnhancedRegexError {
    pub fn from_regex_error(err: &RegexError, pattern: &str) -> Self {
        let error_type = classify_error(err, pattern);
        let suggestion = suggestion_for(&error_type);

        EnhancedRegexError {
            pattern: pattern.to_string(),
            error_type,
            suggestion,
        }
    }
}

impl fmt::Display for EnhancedRegexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "not valid regex pattern: {:?}", self.pattern)?;
        match &self.error_type {
            RegexErrorType::UnclosedDelimiter { delimiter, position } => {
                write!(f, "  unclosed '{}' at position {}", delimiter, position)?;
            }
            RegexErrorType::InvalidQuantifier { message, position } => {
                write!(f, "  invalid repetition")?;
                if let Some(pos) = position {
                    write!(f, " at position {}", pos)?;
                }
                write!(f, ": {}", summary_line(message))?;
            }
            RegexErrorType::InvalidEscape { sequence } => {
                write!(f, "  unrecognized escape sequence '{}'", sequence)?;
            }
            RegexErrorType::Unsupported { message } => {
                write!(f, "  unsupported syntax: {}", summary_line(message))?;
            }
            RegexErrorType::TooBig => {
                write!(f, "  compiled pattern exceeds the size limit")?;
            }
            RegexErrorType::Syntax { message } => {
                write!(f, "  {}", summary_line(message))?;
            }
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for EnhancedRegexError {}

/// Compile a pattern, optionally case-insensitive, with enhanced errors
pub fn compile_pattern(pattern: &str, case_insensitive: bool) -> Result<Regex, EnhancedRegexError> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|err| EnhancedRegexError::from_regex_error(&err, pattern))
}

fn classify_error(err: &RegexError, pattern: &str) -> RegexErrorType {
    let message = match err {
        RegexError::Syntax(message) => message.clone(),
        RegexError::CompiledTooBig(_) => return RegexErrorType::TooBig,
        other => other.to_string(),
    };
    let lower = message.to_lowercase();

    if lower.contains("unclosed group") {
        if let Some(position) = find_unclosed_delimiter(pattern, '(', ')') {
            return RegexErrorType::UnclosedDelimiter { delimiter: '(', position };
        }
    }
    if lower.contains("unclosed character class") {
        if let Some(position) = find_unclosed_delimiter(pattern, '[', ']') {
            return RegexErrorType::UnclosedDelimiter { delimiter: '[', position };
        }
    }

    if lower.contains("look-around") || lower.contains("backreferences are not supported") {
        return RegexErrorType::Unsupported { message };
    }

    if lower.contains("repetition") {
        return RegexErrorType::InvalidQuantifier {
            position: find_invalid_quantifier(pattern),
            message,
        };
    }

    if lower.contains("escape") {
        if let Some(sequence) = find_invalid_escape(pattern) {
            return RegexErrorType::InvalidEscape { sequence };
        }
    }

    RegexErrorType::Syntax { message }
}

fn suggestion_for(error_type: &RegexErrorType) -> Option<String> {
    match error_type {
        RegexErrorType::UnclosedDelimiter { delimiter, .. } => {
            let closer = if *delimiter == '(' { ')' } else { ']' };
            Some(format!(
                "add a closing '{}', or escape the opening one as '\\{}' to match it literally",
                closer, delimiter
            ))
        }
        RegexErrorType::InvalidQuantifier { .. } => Some(
            "a quantifier (*, +, ?, {n}) must follow a character or group, e.g. 'a*', '(foo)+'".to_string(),
        ),
        RegexErrorType::InvalidEscape { sequence } => Some(format!(
            "'{}' is not a known escape; to match the character literally drop the backslash",
            sequence
        )),
        RegexErrorType::Unsupported { .. } => Some(
            "look-around and backreferences inside the pattern are not available; use capture groups and $1 in the replacement".to_string(),
        ),
        RegexErrorType::TooBig | RegexErrorType::Syntax { .. } => None,
    }
}

fn summary_line(message: &str) -> &str {
    message.lines().last().unwrap_or(message).trim()
}

/// Position (in chars) of the last unmatched opening delimiter
fn find_unclosed_delimiter(pattern: &str, open: char, close: char) -> Option<usize> {
    let mut stack: Vec<usize> = Vec::new();
    let mut in_class = false;
    let mut escaped = false;

    for (i, c) in pattern.chars().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if open != '[' {
            match c {
                '[' => in_class = true,
                ']' => in_class = false,
                _ => {}
            }
            if in_class {
                continue;
            }
        }
        if c == open && !(open == '[' && !stack.is_empty()) {
            stack.push(i);
        } else if c == close {
            stack.pop();
        }
    }

    stack.last().copied()
}

fn find_invalid_escape(pattern: &str) -> Option<String> {
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            continue;
        }
        let next = chars.next()?;
        let known = matches!(
            next,
            'n' | 't' | 'r' | 'f' | 'v' | 'a' | '0'..='7'
                | 'x' | 'u' | 'U' | 'p' | 'P'
                | 'w' | 'W' | 'd' | 'D' | 's' | 'S' | 'b' | 'B' | 'A' | 'z'
        ) || next.is_ascii_punctuation();
        if !known {
            return Some(format!("\\{}", next));
        }
    }
    None
}

fn find_invalid_quantifier(pattern: &str) -> Option<usize> {
    let chars: Vec<char> = pattern.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if matches!(c, '*' | '+' | '?') {
            if i == 0 || matches!(chars[i - 1], '(' | '|') {
                return Some(i);
            }
        }
    }
    None
}
