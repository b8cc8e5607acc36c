//! Property-based tests for ccsed
//!
//! These use proptest to check the parser and line processor invariants
//! over generated directives and inputs.

use ccsed::parser::parse_range_expression;
use ccsed::{LineProcessor, LineRange, ParseError, Parser, SedError, SubstFlag};

use proptest::prelude::*;

fn process(directive: &str, print_selected: bool, input: &[u8]) -> Vec<u8> {
    let sub = Parser::new(print_selected).parse(directive).unwrap();
    let mut processor = LineProcessor::new(sub, print_selected);
    let mut out = Vec::new();
    processor.run(input, &mut out).unwrap();
    out
}

// ============================================================================
// Directive parser
// ============================================================================

proptest! {
    /// Four fields with a literal pattern come back verbatim
    #[test]
    fn prop_four_fields_round_trip(
        command in "[a-z]{0,2}",
        pattern in "[a-z0-9 ]{0,10}",
        replacement in "[a-zA-Z0-9 $<>]{0,10}",
        flag in "[a-z]{0,3}"
    ) {
        let raw = format!("{}/{}/{}/{}", command, pattern, replacement, flag);
        let sub = Parser::new(false).parse(&raw).unwrap();

        prop_assert_eq!(&sub.command, &command);
        prop_assert_eq!(sub.pattern_str(), pattern.as_str());
        prop_assert_eq!(&sub.replacement, &replacement);
        prop_assert_eq!(&sub.flag_token, &flag);
        prop_assert_eq!(sub.flag, SubstFlag::from_token(&flag));
        prop_assert!(sub.line_range.is_none());
    }

    /// Ordered ranges parse to exactly what was written
    #[test]
    fn prop_ordered_range_parses(a in 0i64..10_000, len in 0i64..10_000, suffix in prop::bool::ANY) {
        let b = a + len;
        let expr = if suffix { format!("{},{}p", a, b) } else { format!("{},{}", a, b) };
        prop_assert_eq!(parse_range_expression(&expr), Ok(LineRange::new(a, b)));
    }

    /// Reversed ranges parse but select no line
    #[test]
    fn prop_reversed_range_selects_nothing(a in 1i64..10_000, gap in 1i64..100) {
        let range = parse_range_expression(&format!("{},{}p", a + gap, a)).unwrap();
        prop_assert!((0..20_000usize).step_by(7).all(|line| !range.contains(line)));
        prop_assert!(!range.contains(a as usize));
    }

    /// Anything with a non-digit token is rejected, never a panic
    #[test]
    fn prop_malformed_range_is_parse_error(
        start in "[0-9]{0,3}[a-oq-z ]{1,3}[0-9]{0,3}",
        end in "[0-9]{1,3}"
    ) {
        let raw = format!("{},{}p", start, end);
        let result = Parser::new(true).parse(&raw);
        let is_range_error = matches!(result, Err(SedError::Parse(ParseError::Range { .. })));
        prop_assert!(is_range_error);
    }

    /// Arbitrary directive strings never panic the parser
    #[test]
    fn prop_parser_never_panics(raw in ".{0,30}", print_selected in prop::bool::ANY) {
        let _ = Parser::new(print_selected).parse(&raw);
    }
}

// ============================================================================
// Line processor
// ============================================================================

proptest! {
    /// Same directive, same input, same bytes
    #[test]
    fn prop_run_is_idempotent(
        lines in prop::collection::vec("[a-z ]{0,20}", 0..30),
        pattern in "[a-z]{1,3}"
    ) {
        let input = lines.join("\n");
        let sub = Parser::new(false).parse(&format!("s/{}/X/g", pattern)).unwrap();
        let mut processor = LineProcessor::new(sub, false);

        let mut first = Vec::new();
        let mut second = Vec::new();
        processor.run(input.as_bytes(), &mut first).unwrap();
        processor.run(input.as_bytes(), &mut second).unwrap();
        prop_assert_eq!(first, second);
    }

    /// One count per physical line, terminated or not
    #[test]
    fn prop_counts_every_physical_line(
        lines in prop::collection::vec("[a-z]{1,10}", 1..40),
        trailing_newline in prop::bool::ANY
    ) {
        let mut input = lines.join("\n");
        if trailing_newline {
            input.push('\n');
        }
        let sub = Parser::new(false).parse("s/q/Q/g").unwrap();
        let mut processor = LineProcessor::new(sub, false);
        let stats = processor.run(input.as_bytes(), Vec::new()).unwrap();

        prop_assert_eq!(stats.lines_read, lines.len());
        prop_assert_eq!(processor.current_line(), lines.len());
    }

    /// Without matches the output is the input, byte for byte
    #[test]
    fn prop_no_match_is_passthrough(text in "[a-w\n]{0,200}") {
        prop_assert_eq!(process("s/[xyz]+/REPLACED/g", false, text.as_bytes()), text.as_bytes());
    }

    /// Global replacement leaves no occurrence behind
    #[test]
    fn prop_global_substitution_replaces_all(
        prefix in "[a-e]{0,10}",
        suffix in "[a-e]{0,10}",
        count in 1usize..10
    ) {
        let text = format!("{}{}{}\n", prefix, "foo".repeat(count), suffix);
        let out = String::from_utf8(process("s/foo/QUUX/g", false, text.as_bytes())).unwrap();

        prop_assert!(!out.contains("foo"));
        prop_assert_eq!(out.matches("QUUX").count(), count);
    }

    /// Range output holds exactly the selected lines, numbered, in order
    #[test]
    fn prop_range_output_matches_selection(
        lines in prop::collection::vec("[a-z]{0,8}", 0..30),
        start in 1i64..30,
        len in 0i64..10
    ) {
        let end = start + len;
        let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        let out = process(&format!("{},{}p", start, end), true, input.as_bytes());

        let expected: String = lines
            .iter()
            .enumerate()
            .map(|(i, l)| (i as i64 + 1, l))
            .filter(|(n, _)| *n >= start && *n <= end)
            .map(|(n, l)| format!("{}\t{}\n", n, l))
            .collect();
        prop_assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    /// G doubles every newline and nothing else
    #[test]
    fn prop_double_spacing(lines in prop::collection::vec("[a-z]{0,8}", 0..20)) {
        let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
        let out = String::from_utf8(process("G", false, input.as_bytes())).unwrap();
        prop_assert_eq!(out, input.replace('\n', "\n\n"));
    }
}
