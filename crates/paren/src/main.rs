//! paren - print a C expression with its grouping made explicit
//!
//! Usage: paren [OPTIONS] <label> <expression...>

use clap::{Parser as ClapParser, ValueEnum};
use paren::{Mode, ParenConfig};

/// Parenthesization mode
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum ModeArg {
    /// Parenthesize only where C precedence would change the grouping
    #[default]
    Minimal,
    /// Wrap every binary operation in parentheses
    Explicit,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Minimal => Mode::Minimal,
            ModeArg::Explicit => Mode::Explicit,
        }
    }
}

#[derive(ClapParser, Debug)]
#[command(name = "paren")]
#[command(version)]
#[command(about = "Show how a C expression groups by adding parentheses", long_about = None)]
struct Args {
    /// Parenthesization mode
    #[arg(short, long, value_enum, default_value = "minimal")]
    mode: ModeArg,

    /// Extra identifier to treat as a type name (repeatable)
    #[arg(short = 't', long = "typedef", value_name = "NAME")]
    typedefs: Vec<String>,

    /// Verbose output (debug logging and parse diagnostics on stderr)
    #[arg(short, long)]
    verbose: bool,

    /// Output label followed by the expression words
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = ParenConfig {
        mode: args.mode.into(),
        extra_typedefs: args.typedefs,
        verbose: args.verbose,
    };

    println!("{}", paren::run(&args.words, &config));
}
