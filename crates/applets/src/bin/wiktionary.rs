//! wiktionary - print a word's definitions in one language as JSON
//!
//! Usage: wiktionary [--endpoint URL] <word> <language>

use anyhow::{Context, Result};
use applets::wiktionary::{self, WiktionaryConfig};
use applets::Curl;
use clap::Parser as ClapParser;

#[derive(ClapParser, Debug)]
#[command(name = "wiktionary")]
#[command(version)]
#[command(about = "Fetch Wiktionary definitions as JSON", long_about = None)]
struct Args {
    /// Word to look up
    word: String,

    /// Language code or name, e.g. "en" or "English"
    language: String,

    /// REST definition endpoint
    #[arg(long, default_value = wiktionary::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    applets::init_logging(args.verbose);

    let config = WiktionaryConfig {
        endpoint: args.endpoint,
    };
    let entries = wiktionary::fetch(&args.word, &args.language, &config, &Curl::new())
        .with_context(|| format!("failed to look up '{}'", args.word))?;

    println!("{}", serde_json::to_string(&entries)?);
    Ok(())
}
