//! Lexer module for tokenizing C expressions

mod token;
mod scanner;

pub use token::{Token, TokenKind};
pub use scanner::Lexer;
