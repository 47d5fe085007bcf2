//! paren - re-print C expressions with explicit parentheses
//!
//! The library parses a single C expression and renders it back to source,
//! adding the parentheses needed to make its grouping visible.
//!
//! ## Architecture
//!
//! - **Lexer** (`lexer/`): logos-based tokenizer
//! - **Parser** (`parser/`): recursive descent over the C expression grammar,
//!   resolving casts and `sizeof` against a typedef table (`typedefs`)
//! - **AST** (`ast/`): expression and type-name nodes
//! - **Printer** (`printer/`): the parenthesization policy, in two modes
//! - **Driver** (`driver/`): the command behavior as a library function
//! - **Common** (`common/`): spans, errors, diagnostics

pub mod common;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod typedefs;
pub mod printer;
pub mod driver;

// Re-exports for convenience
pub use common::{DiagnosticReporter, ParenError, ParenResult, Span};
pub use driver::{parenthesize_expression, run, Outcome, ParenConfig};
pub use printer::{Mode, Printer};
pub use typedefs::TypedefTable;
