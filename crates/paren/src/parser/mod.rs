//! Parser module for C expressions

#[allow(clippy::module_inception)]
mod parser;

pub use parser::Parser;
