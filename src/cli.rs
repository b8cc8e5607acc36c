use crate::config::FlagSemantics;
use crate::error::SedError;
use clap::Parser;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

License: MIT
Rust Edition: 2024"
);

#[derive(Parser, Debug)]
#[command(name = "ccsed")]
#[command(about = "Minimal stream editor: one substitution, optional line range")]
#[command(long_about = "ccsed reads text line by line, applies a single substitution and writes the result.

DIRECTIVES:
  s/PATTERN/REPLACEMENT/FLAG   Replace PATTERN (a Rust regex) with REPLACEMENT.
                               REPLACEMENT may use $1, ${name} capture groups.
                               FLAG is one of g, gi, d, p; anything else is ignored.
  START,ENDp                   With -n: print lines START..END, numbered.
  G                            Double-space the input.

STDIN/STDOUT:
  When no file is given, ccsed reads from stdin. Output goes to stdout
  unless -i rewrites the file in place.

EXAMPLES:
  ccsed 's/foo/bar/g' file.txt              Replace all occurrences
  cat file.txt | ccsed 's/(\\w+)/<$1>/g'    Wrap every word
  ccsed -n '2,4p' file.txt                  Print lines 2 to 4 with numbers
  ccsed G file.txt                          Double-space a file
  ccsed -i 's/foo/bar/g' file.txt           Edit file.txt in place")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
struct Cli {
    /// Substitution directive (e.g., 's/old/new/g', '2,4p', 'G')
    #[arg(value_name = "DIRECTIVE")]
    directive: Option<String>,

    /// Input file (defaults to stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Only print selected lines (enables START,ENDp range directives)
    #[arg(short = 'n', long = "quiet", alias = "silent")]
    print_selected: bool,

    /// Edit FILE in place
    #[arg(short = 'i', long = "in-place")]
    in_place: bool,

    /// Configuration file (default: ~/.ccsed/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write debug logs to ~/.ccsed/ccsed.log
    #[arg(long)]
    debug: bool,

    /// Whether substitution flags change execution (overrides config)
    #[arg(long, value_enum, value_name = "MODE")]
    flag_semantics: Option<FlagSemantics>,
}

/// Resolved command-line arguments
#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub directive: String,
    pub file: Option<PathBuf>,
    pub print_selected: bool,
    pub in_place: bool,
    pub config: Option<PathBuf>,
    pub debug: bool,
    pub flag_semantics: Option<FlagSemantics>,
}

pub fn parse_args() -> Result<Args, SedError> {
    resolve(Cli::parse())
}

/// Parse from an explicit argument list (first item is the binary name)
pub fn parse_args_from<I, T>(args: I) -> Result<Args, SedError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| SedError::Argument(e.to_string()))?;
    resolve(cli)
}

fn resolve(cli: Cli) -> Result<Args, SedError> {
    let directive = cli.directive.ok_or_else(|| {
        SedError::Argument(
            "Please provide a substitution directive. Usage: ccsed [-n] [-i] 's/old/new/g' [FILE]"
                .to_string(),
        )
    })?;

    if cli.in_place && cli.file.is_none() {
        return Err(SedError::Argument(
            "In-place editing (-i) requires an input file".to_string(),
        ));
    }

    Ok(Args {
        directive,
        file: cli.file,
        print_selected: cli.print_selected,
        in_place: cli.in_place,
        config: cli.config,
        debug: cli.debug,
        flag_semantics: cli.flag_semantics,
    })
}
