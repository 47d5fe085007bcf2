//! Shared infrastructure: source spans, errors and diagnostics

mod error;
mod span;

pub use error::{DiagnosticReporter, ParenError, ParenResult};
pub use span::Span;
