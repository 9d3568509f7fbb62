// Command-line parsing: input modes and flag combinations.

use clap::error::ErrorKind;
use spartie::cli::{command, Invocation, Mode};

fn parse(args: &[&str]) -> Invocation {
    Invocation::try_parse_from(args).unwrap_or_else(|e| panic!("{:?} rejected: {}", args, e))
}

fn rejection(args: &[&str]) -> ErrorKind {
    match Invocation::try_parse_from(args) {
        Ok(invocation) => panic!("{:?} accepted as {:?}", args, invocation),
        Err(error) => error.kind(),
    }
}

#[test]
fn command_definition_is_consistent() {
    command().debug_assert();
}

#[test]
fn no_input_starts_the_repl() {
    assert_eq!(parse(&["spartie"]).mode, Mode::Repl);
}

#[test]
fn interactive_flag_starts_the_repl() {
    let invocation = parse(&["spartie", "-i", "-v"]);
    assert_eq!(invocation.mode, Mode::Repl);
    assert_eq!(invocation.verbosity, 1);
}

#[test]
fn file_and_eval_select_their_mode() {
    assert_eq!(
        parse(&["spartie", "script.sp"]).mode,
        Mode::File("script.sp".to_string())
    );
    assert_eq!(
        parse(&["spartie", "-e", "1 + 1"]).mode,
        Mode::Eval("1 + 1".to_string())
    );
}

#[test]
fn tokens_applies_to_file_or_eval() {
    let invocation = parse(&["spartie", "--tokens", "-e", "1"]);
    assert!(invocation.tokens_only);
    assert_eq!(invocation.mode, Mode::Eval("1".to_string()));

    assert_eq!(rejection(&["spartie", "--tokens"]), ErrorKind::MissingRequiredArgument);
}

#[test]
fn interactive_conflicts_with_other_input() {
    assert_eq!(rejection(&["spartie", "-i", "script.sp"]), ErrorKind::ArgumentConflict);
    assert_eq!(rejection(&["spartie", "-i", "-e", "1"]), ErrorKind::ArgumentConflict);
    assert_eq!(rejection(&["spartie", "script.sp", "-e", "1"]), ErrorKind::ArgumentConflict);
}

#[test]
fn verbosity_counts_repeats() {
    assert_eq!(parse(&["spartie", "-vv", "-e", "1"]).verbosity, 2);
}
