//! End-to-end scenarios: argument parsing, directive parsing and line
//! processing wired together the way the binary does it.

use std::fs;
use tempfile::TempDir;

use ccsed::cli::parse_args_from;
use ccsed::error_helpers::open_input;
use ccsed::{FlagSemantics, LineProcessor, ParseError, Parser, SedError, in_place};

fn run_cli(argv: &[&str], input: &str) -> Result<String, SedError> {
    let args = parse_args_from(argv.iter().copied())?;
    let flag_semantics = args.flag_semantics.unwrap_or_default();
    let sub = Parser::new(args.print_selected)
        .with_flag_semantics(flag_semantics)
        .parse(&args.directive)?;
    let mut processor = LineProcessor::new(sub, args.print_selected);

    let mut out = Vec::new();
    match &args.file {
        Some(path) => {
            let file = std::io::BufReader::new(open_input(path)?);
            processor.run(file, &mut out)?;
        }
        None => {
            processor.run(input.as_bytes(), &mut out)?;
        }
    }
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn scenario_global_substitution() {
    let out = run_cli(&["ccsed", "s/foo/bar/g"], "foo baz\nno match\n").unwrap();
    assert_eq!(out, "bar baz\nno match\n");
}

#[test]
fn scenario_range_restricted_output() {
    let out = run_cli(&["ccsed", "-n", "2,3p"], "L1\nL2\nL3\nL4\n").unwrap();
    assert_eq!(out, "2\tL2\n3\tL3\n");
}

#[test]
fn scenario_double_spacing() {
    let out = run_cli(&["ccsed", "G"], "x\n").unwrap();
    assert_eq!(out, "x\n\n");
}

#[test]
fn scenario_capture_group_back_reference() {
    let out = run_cli(&["ccsed", r"s/(\w+)/<$1>/g"], "hi there").unwrap();
    assert_eq!(out, "<hi> <there>");
}

#[test]
fn scenario_malformed_directive() {
    let err = run_cli(&["ccsed", "s/foo/bar"], "foo\n").unwrap_err();
    assert!(matches!(
        err,
        SedError::Parse(ParseError::FieldCount { found: 3, .. })
    ));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn scenario_range_without_quiet_flag_is_rejected() {
    let err = run_cli(&["ccsed", "2,3p"], "a\n").unwrap_err();
    assert!(matches!(err, SedError::Parse(ParseError::FieldCount { .. })));
}

#[test]
fn scenario_invalid_range_numbers() {
    let err = run_cli(&["ccsed", "-n", "two,3p"], "a\n").unwrap_err();
    assert!(matches!(err, SedError::Parse(ParseError::Range { .. })));
    assert!(err.to_string().contains("could not parse substitution: two,3p"));
}

#[test]
fn scenario_invalid_regex_names_pattern() {
    let err = run_cli(&["ccsed", "s/[abc/x/g"], "a\n").unwrap_err();
    assert!(matches!(err, SedError::RegexCompile(_)));
    assert!(err.to_string().contains("\"[abc\""));
}

#[test]
fn scenario_missing_directive() {
    let err = run_cli(&["ccsed"], "").unwrap_err();
    assert!(matches!(err, SedError::Argument(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn scenario_reads_named_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("input.txt");
    fs::write(&file_path, "one\ntwo\nthree\n").unwrap();

    let out = run_cli(&["ccsed", "-n", "3,3p", file_path.to_str().unwrap()], "").unwrap();
    assert_eq!(out, "3\tthree\n");
}

#[test]
fn scenario_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.txt");
    let err = run_cli(&["ccsed", "s/a/b/g", missing.to_str().unwrap()], "").unwrap_err();
    assert!(matches!(err, SedError::FileOpen { .. }));
    let msg = err.to_string();
    assert!(msg.contains("File not found"));
    let os_error = fs::File::open(&missing).unwrap_err().to_string();
    assert!(msg.contains(&os_error), "got: {}", msg);
}

#[test]
fn scenario_unknown_flag_is_not_an_error() {
    let out = run_cli(&["ccsed", "s/a/b/xyz"], "aa\n").unwrap();
    assert_eq!(out, "bb\n");
}

#[test]
fn scenario_sed_flag_semantics() {
    let out = run_cli(&["ccsed", "--flag-semantics", "sed", "s/a/b/"], "aa\n").unwrap();
    assert_eq!(out, "ba\n");
    let out = run_cli(&["ccsed", "--flag-semantics", "sed", "s/A/b/gi"], "aa\n").unwrap();
    assert_eq!(out, "bb\n");
    assert_eq!(FlagSemantics::default(), FlagSemantics::Reference);
}

#[test]
fn scenario_in_place_edit() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("notes.txt");
    fs::write(&file_path, "alpha\nbeta\n").unwrap();

    let args = parse_args_from(["ccsed", "-i", "G", file_path.to_str().unwrap()]).unwrap();
    assert!(args.in_place);

    let sub = Parser::new(args.print_selected).parse(&args.directive).unwrap();
    let mut processor = LineProcessor::new(sub, args.print_selected);
    let stats = in_place::rewrite_file(&file_path, |reader, writer| processor.run(reader, writer))
        .unwrap();

    assert_eq!(stats.lines_read, 2);
    assert_eq!(fs::read_to_string(&file_path).unwrap(), "alpha\n\nbeta\n\n");
}
