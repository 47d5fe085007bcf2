//! Abstract Syntax Tree definitions for a single C expression

mod expr;
mod types;

pub use expr::*;
pub use types::*;
