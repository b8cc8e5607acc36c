use anyhow::Result;
use ccsed::cli::{self, Args};
use ccsed::config::{self, Config};
use ccsed::error_helpers::open_input;
use ccsed::{LineProcessor, Parser, RunStats, SedError, in_place, logger};
use colored::Colorize;
use std::io::{self, BufReader, BufWriter};
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => return report(&e.to_string(), e.exit_code()),
    };

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e.downcast_ref::<SedError>().map(SedError::exit_code).unwrap_or(1);
            report(&format!("{:#}", e), code)
        }
    }
}

fn report(message: &str, code: i32) -> ExitCode {
    eprintln!("{} {}", "error:".red().bold(), message);
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn run(args: &Args) -> Result<RunStats> {
    let config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };

    if let Some(log_path) = logger::init_debug_logging(args.debug || config.logging.debug)? {
        info!(log = %log_path.display(), "debug logging enabled");
    }

    let stats = execute(args, &config)?;
    info!(
        lines_read = stats.lines_read,
        lines_emitted = stats.lines_emitted,
        lines_changed = stats.lines_changed,
        "run complete"
    );
    Ok(stats)
}

fn execute(args: &Args, config: &Config) -> Result<RunStats> {
    let flag_semantics = args
        .flag_semantics
        .unwrap_or(config.processing.flag_semantics);

    // Parse before touching any input
    let substitution = Parser::new(args.print_selected)
        .with_flag_semantics(flag_semantics)
        .parse(&args.directive)?;

    info!(
        directive = %args.directive,
        file = ?args.file,
        in_place = args.in_place,
        "executing directive"
    );

    let mut processor = LineProcessor::new(substitution, args.print_selected);

    let stats = match (&args.file, args.in_place) {
        (Some(path), true) => {
            in_place::rewrite_file(path, |reader, writer| processor.run(reader, writer))?
        }
        (Some(path), false) => {
            let input = BufReader::new(open_input(path)?);
            processor.run(input, BufWriter::new(io::stdout().lock()))?
        }
        (None, _) => processor.run(io::stdin().lock(), BufWriter::new(io::stdout().lock()))?,
    };

    Ok(stats)
}
