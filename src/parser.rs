//! Directive Parser
//!
//! Turns the raw directive string into a [`Substitution`]. One input slot
//! carries two grammars: `command/pattern/replacement/flag`, and (only when
//! range-restricted output was requested) a `start,endp` range expression.
//! The raw string is first classified into a [`DirectiveShape`], then the
//! shape is built into a directive.

use crate::command::{LineRange, SubstFlag, Substitution};
use crate::config::FlagSemantics;
use crate::error::{ParseError, RangeError, SedError};
use crate::regex_error::compile_pattern;
use tracing::debug;

/// `G` expands to this: every newline becomes two
const DOUBLE_SPACE_DIRECTIVE: &str = "s/\n/\n\n/g";

/// Pass-through substitution used behind a bare range expression
const PASS_THROUGH_DIRECTIVE: &str = "s///g";

/// Raw directive after classification, before any regex is compiled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveShape<'a> {
    Substitution(SubstitutionFields<'a>),
    Range(LineRange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubstitutionFields<'a> {
    pub command: &'a str,
    pub pattern: &'a str,
    pub replacement: &'a str,
    pub flag: &'a str,
}

impl<'a> SubstitutionFields<'a> {
    /// Split on '/' and accept exactly four fields
    pub fn split(raw: &'a str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = raw.split('/').collect();
        match *fields.as_slice() {
            [command, pattern, replacement, flag] => Ok(Self {
                command,
                pattern,
                replacement,
                flag,
            }),
            _ => Err(ParseError::FieldCount {
                directive: raw.to_string(),
                found: fields.len(),
            }),
        }
    }
}

/// Directive parser
pub struct Parser {
    /// `-n`: only print selected lines
    print_selected: bool,
    flag_semantics: FlagSemantics,
}

impl Parser {
    pub fn new(print_selected: bool) -> Self {
        Self {
            print_selected,
            flag_semantics: FlagSemantics::Reference,
        }
    }

    /// Under sed semantics `gi` compiles the pattern case-insensitively.
    /// The mode is recorded on every parsed [`Substitution`].
    pub fn with_flag_semantics(mut self, flag_semantics: FlagSemantics) -> Self {
        self.flag_semantics = flag_semantics;
        self
    }

    /// Parse a raw directive into a substitution
    pub fn parse(&self, raw: &str) -> Result<Substitution, SedError> {
        let raw = expand_shorthand(raw);

        match self.classify(raw)? {
            DirectiveShape::Substitution(fields) => {
                debug!(
                    command = fields.command,
                    pattern = fields.pattern,
                    flag = fields.flag,
                    "parsed substitution directive"
                );
                self.build(fields, None)
            }
            DirectiveShape::Range(range) => {
                debug!(%range, "parsed range expression, using pass-through substitution");
                let fields = SubstitutionFields::split(PASS_THROUGH_DIRECTIVE)?;
                let mut substitution = self.build(fields, Some(range))?;
                substitution.flag = SubstFlag::Print;
                Ok(substitution)
            }
        }
    }

    /// Decide which grammar the raw string belongs to
    pub fn classify<'a>(&self, raw: &'a str) -> Result<DirectiveShape<'a>, ParseError> {
        match SubstitutionFields::split(raw) {
            Ok(fields) => Ok(DirectiveShape::Substitution(fields)),
            Err(field_count_error) => {
                if !self.print_selected {
                    return Err(field_count_error);
                }
                parse_range_expression(raw)
                    .map(DirectiveShape::Range)
                    .map_err(|reason| ParseError::Range {
                        directive: raw.to_string(),
                        reason,
                    })
            }
        }
    }

    fn build(
        &self,
        fields: SubstitutionFields<'_>,
        line_range: Option<LineRange>,
    ) -> Result<Substitution, SedError> {
        let flag = SubstFlag::from_token(fields.flag);
        let case_insensitive = self.flag_semantics == FlagSemantics::Sed
            && flag == SubstFlag::GlobalCaseInsensitive;
        let pattern = compile_pattern(fields.pattern, case_insensitive)?;

        Ok(Substitution {
            command: fields.command.to_string(),
            pattern,
            replacement: fields.replacement.to_string(),
            flag,
            flag_token: fields.flag.to_string(),
            line_range,
            flag_semantics: self.flag_semantics,
        })
    }
}

/// Rewrite the `G` shorthand into its full directive
pub fn expand_shorthand(raw: &str) -> &str {
    if raw == "G" {
        debug!("expanding G shorthand to double-spacing substitution");
        DOUBLE_SPACE_DIRECTIVE
    } else {
        raw
    }
}

/// Parse `start,end` with an optional trailing `p` on the end token
pub fn parse_range_expression(expr: &str) -> Result<LineRange, RangeError> {
    let tokens: Vec<&str> = expr.split(',').collect();
    let [start, end] = *tokens.as_slice() else {
        return Err(RangeError::TokenCount(expr.to_string()));
    };

    let start = parse_line_number(start)?;
    let end = parse_line_number(end.strip_suffix('p').unwrap_or(end))?;

    Ok(LineRange::new(start, end))
}

fn parse_line_number(token: &str) -> Result<i64, RangeError> {
    token.parse::<i64>().map_err(|err| RangeError::Integer {
        token: token.to_string(),
        message: err.to_string(),
    })
}
