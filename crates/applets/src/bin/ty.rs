//! ty - run a code snippet on a remote runner
//!
//! Usage: ty [--url URL] <code...> [-stdin=<input>]

use anyhow::{Context, Result};
use applets::ty::{self, RunRequest, TyConfig, USAGE};
use applets::Curl;
use clap::Parser as ClapParser;

#[derive(ClapParser, Debug)]
#[command(name = "ty")]
#[command(version)]
#[command(about = "Relay code and optional input to a remote runner", long_about = None)]
struct Args {
    /// Runner endpoint
    #[arg(long, default_value = ty::DEFAULT_URL)]
    url: String,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Code words, optionally followed by -stdin=<input>
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    applets::init_logging(args.verbose);

    let Some(request) = RunRequest::from_args(&args.words) else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = TyConfig { url: args.url };
    let output = ty::run(&request, &config, &Curl::new())
        .with_context(|| format!("request to {} failed", config.url))?;

    println!("{}", output);
    Ok(())
}
