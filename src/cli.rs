use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use std::ffi::OsString;

/// What the binary was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    File(String),
    Eval(String),
    Repl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub tokens_only: bool,
    pub verbosity: u8,
}

pub fn command() -> Command {
    Command::new("spartie")
        .about("A tree-walking interpreter for the Spartie expression language")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .help("The script file to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .help("Evaluate the given source text")
                .value_name("SOURCE"),
        )
        // FILE and --eval are mutually exclusive.
        .group(ArgGroup::new("input").args(["file", "eval"]))
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue)
                .conflicts_with("input"),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token stream of FILE or --eval instead of evaluating")
                .action(ArgAction::SetTrue)
                .requires("input"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log to stderr (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
}

impl Invocation {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let mode = if matches.get_flag("interactive") {
            Mode::Repl
        } else if let Some(path) = matches.get_one::<String>("file") {
            Mode::File(path.clone())
        } else if let Some(source) = matches.get_one::<String>("eval") {
            Mode::Eval(source.clone())
        } else {
            Mode::Repl
        };

        Self {
            mode,
            tokens_only: matches.get_flag("tokens"),
            verbosity: matches.get_count("verbose"),
        }
    }

    /// Parses an argument list, program name first.
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }
}
