//! applets - one-shot command-line helpers
//!
//! Each binary under `src/bin/` is a thin clap wrapper over a module here:
//!
//! - `ty`: relay code to a remote runner (`ty`, `fetch`)
//! - `wiktionary`: definitions for a word as JSON (`wiktionary`, `fetch`, `html`)
//! - `import-quotegrabs`: HTML quote-grab dump to CSV (`quotegrabs`, `html`)

pub mod error;
pub mod fetch;
pub mod html;
pub mod quotegrabs;
pub mod ty;
pub mod wiktionary;

pub use error::{AppletError, AppletResult};
pub use fetch::Curl;

/// Install the stderr logger; `RUST_LOG` overrides the default level
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}
