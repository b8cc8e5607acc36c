//! Line Processor
//!
//! Streams input one line at a time through a [`Substitution`]. Lines keep
//! their trailing newline while they are matched, so patterns may target
//! the newline itself.

use crate::command::{SubstFlag, Substitution};
use crate::config::FlagSemantics;
use crate::error::{Result, SedError};
use std::borrow::Cow;
use std::io::{BufRead, Write};
use tracing::{debug, error, trace};

/// Counters for one pass over the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines_read: usize,
    pub lines_emitted: usize,
    /// Lines where the pattern matched at least once
    pub lines_changed: usize,
}

/// What to do with one input line
#[derive(Debug)]
enum LineResult<'a> {
    Output {
        text: Cow<'a, [u8]>,
        /// Line number prefix in range-restricted mode
        number: Option<usize>,
        /// Emit twice (`p` flag under sed semantics)
        repeat: bool,
    },
    Skip,
}

/// Applies one substitution to a stream, line by line
pub struct LineProcessor {
    substitution: Substitution,
    /// Range present AND only-selected output requested; fixed before the stream starts
    only_range: bool,
    current_line: usize,
}

impl LineProcessor {
    pub fn new(substitution: Substitution, print_selected: bool) -> Self {
        let only_range = print_selected && substitution.line_range.is_some();
        Self {
            substitution,
            only_range,
            current_line: 0,
        }
    }

    pub fn only_range(&self) -> bool {
        self.only_range
    }

    /// Number of lines read so far in the current (or last) run
    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn substitution(&self) -> &Substitution {
        &self.substitution
    }

    /// Process `input` to completion, writing to `output`
    ///
    /// A read failure stops the run; output already written stays written.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<RunStats> {
        self.current_line = 0;
        let mut stats = RunStats::default();
        let mut line = Vec::new();

        debug!(
            only_range = self.only_range,
            flag = ?self.substitution.flag,
            semantics = ?self.substitution.flag_semantics,
            "starting line processor"
        );

        loop {
            line.clear();
            match input.read_until(b'\n', &mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(cause) => {
                    error!(line = self.current_line, error = %cause, "failed to read input");
                    output.flush().map_err(|cause| SedError::Write { cause })?;
                    return Err(SedError::Read {
                        line: self.current_line,
                        cause,
                    });
                }
            }

            self.current_line += 1;
            stats.lines_read += 1;

            match self.process_line(&line) {
                LineResult::Output { text, number, repeat } => {
                    if matches!(text, Cow::Owned(_)) {
                        stats.lines_changed += 1;
                    }
                    let copies = if repeat { 2 } else { 1 };
                    for _ in 0..copies {
                        write_line(&mut output, number, &text)?;
                        stats.lines_emitted += 1;
                    }
                }
                LineResult::Skip => {
                    trace!(line = self.current_line, "line not emitted");
                }
            }
        }

        output.flush().map_err(|cause| SedError::Write { cause })?;

        debug!(
            lines_read = stats.lines_read,
            lines_emitted = stats.lines_emitted,
            lines_changed = stats.lines_changed,
            "line processor finished"
        );

        Ok(stats)
    }

    fn process_line<'a>(&self, line: &'a [u8]) -> LineResult<'a> {
        let number = if self.only_range {
            match self.substitution.line_range {
                Some(range) if range.contains(self.current_line) => Some(self.current_line),
                _ => return LineResult::Skip,
            }
        } else {
            None
        };

        match self.substitution.flag_semantics {
            FlagSemantics::Reference => LineResult::Output {
                text: self.replace_all(line),
                number,
                repeat: false,
            },
            FlagSemantics::Sed => self.apply_sed_flag(line, number),
        }
    }

    fn apply_sed_flag<'a>(&self, line: &'a [u8], number: Option<usize>) -> LineResult<'a> {
        let sub = &self.substitution;
        match sub.flag {
            SubstFlag::Delete => {
                if sub.pattern.is_match(line) {
                    LineResult::Skip
                } else {
                    LineResult::Output {
                        text: Cow::Borrowed(line),
                        number,
                        repeat: false,
                    }
                }
            }
            SubstFlag::Global | SubstFlag::GlobalCaseInsensitive => LineResult::Output {
                text: self.replace_all(line),
                number,
                repeat: false,
            },
            SubstFlag::Print => {
                let text = sub.pattern.replacen(line, 1, sub.replacement.as_bytes());
                // Selection already prints in range-restricted mode
                let repeat = !self.only_range && matches!(text, Cow::Owned(_));
                LineResult::Output { text, number, repeat }
            }
            SubstFlag::NoFlag => LineResult::Output {
                text: sub.pattern.replacen(line, 1, sub.replacement.as_bytes()),
                number,
                repeat: false,
            },
        }
    }

    fn replace_all<'a>(&self, line: &'a [u8]) -> Cow<'a, [u8]> {
        self.substitution
            .pattern
            .replace_all(line, self.substitution.replacement.as_bytes())
    }
}

fn write_line<W: Write>(output: &mut W, number: Option<usize>, text: &[u8]) -> Result<()> {
    let written = match number {
        Some(n) => write!(output, "{}\t", n).and_then(|_| output.write_all(text)),
        None => output.write_all(text),
    };
    written.map_err(|cause| SedError::Write { cause })
}

/// Run `substitution` over `input` once
pub fn run<R: BufRead, W: Write>(
    substitution: Substitution,
    print_selected: bool,
    input: R,
    output: W,
) -> Result<RunStats> {
    LineProcessor::new(substitution, print_selected).run(input, output)
}
