//! import-quotegrabs - convert an HTML quote-grab dump to CSV
//!
//! Usage: import-quotegrabs [--input FILE] [--output FILE] [--verbose]

use std::path::PathBuf;

use anyhow::{Context, Result};
use applets::quotegrabs::{self, ImportConfig};
use clap::Parser as ClapParser;

#[derive(ClapParser, Debug)]
#[command(name = "import-quotegrabs")]
#[command(version)]
#[command(about = "Convert an HTML dump of quote-grabs into CSV", long_about = None)]
struct Args {
    /// HTML dump to read
    #[arg(short, long, default_value = "quotegrabs.html")]
    input: PathBuf,

    /// CSV file to write
    #[arg(short, long, default_value = "quotes.csv")]
    output: PathBuf,

    /// Log every converted row
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    applets::init_logging(args.verbose);

    let config = ImportConfig {
        input: args.input,
        output: args.output,
    };
    let summary = quotegrabs::import(&config).with_context(|| {
        format!(
            "failed to import {} into {}",
            config.input.display(),
            config.output.display()
        )
    })?;

    println!(
        "{} grabs from {} channels written to {}",
        summary.written,
        summary.channels,
        config.output.display()
    );
    Ok(())
}
