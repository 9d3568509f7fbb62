use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing::Level;

use spartie::cli::{self, Invocation, Mode};
use spartie::{repl, runner};

// Matches the interpreter's historical status for lexical and runtime failures.
const INTERPRET_ERROR: u8 = 2;

fn main() -> ExitCode {
    let invocation = match cli::command().try_get_matches() {
        Ok(matches) => Invocation::from_matches(&matches),
        Err(error) => return usage_error(&error),
    };
    init_logging(invocation.verbosity);

    match &invocation.mode {
        Mode::File(path) => run_file(path, invocation.tokens_only),
        Mode::Eval(source) => run_source(source, Some("<eval>"), invocation.tokens_only),
        Mode::Repl => {
            repl::start();
            ExitCode::SUCCESS
        }
    }
}

// --help and --version come through here too, on stdout and with success.
fn usage_error(error: &clap::Error) -> ExitCode {
    if let Err(io_error) = error.print() {
        eprintln!("{}", io_error);
    }
    if error.use_stderr() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_file(path: &str, tokens_only: bool) -> ExitCode {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return ExitCode::FAILURE;
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let filename = path.display().to_string();
            run_source(&source, Some(&filename), tokens_only)
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_source(source: &str, filename: Option<&str>, tokens_only: bool) -> ExitCode {
    let ok = if tokens_only {
        runner::dump_tokens(source, filename)
    } else {
        runner::run(source, filename)
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(INTERPRET_ERROR)
    }
}
