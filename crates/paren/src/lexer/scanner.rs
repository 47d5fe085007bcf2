//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{ParenError, ParenResult, Span};
use logos::Logos;

/// Lexer for C expressions
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source text
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            at_eof: false,
        }
    }

    /// Get the next token; returns `Eof` forever once input is exhausted
    pub fn next_token(&mut self) -> ParenResult<Token> {
        let len = self.inner.source().len();
        if self.at_eof {
            return Ok(Token::new(TokenKind::Eof, Span::new(len, len)));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = self.inner.span();
                Ok(Token::new(kind, Span::new(span.start, span.end)))
            }
            Some(Err(())) => {
                let span = self.inner.span();
                Err(ParenError::lexer(
                    format!("unexpected character '{}'", self.inner.slice()),
                    Span::new(span.start, span.end),
                ))
            }
            None => {
                self.at_eof = true;
                Ok(Token::new(TokenKind::Eof, Span::new(len, len)))
            }
        }
    }

    /// Tokenize the entire source and return all tokens, ending with `Eof`
    #[cfg(test)]
    fn tokenize_all(mut self) -> ParenResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_type_keywords() {
        let mut lexer = Lexer::new("unsigned long const _Bool sizeof _Alignof");

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Unsigned));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Long));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Const));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Bool));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Sizeof));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Alignof));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eof));
    }

    #[test]
    fn test_reserved_words_are_not_identifiers() {
        let mut lexer = Lexer::new("return returns");

        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Reserved(s) if s == "return"
        ));
        assert!(matches!(
            lexer.next_token().unwrap().kind,
            TokenKind::Identifier(s) if s == "returns"
        ));
    }

    #[test]
    fn test_numeric_literals_keep_spelling() {
        let kinds = kinds("42 0x1F 0b1010 0777 123u 456L 3.14 .5f 1e10");

        assert!(matches!(&kinds[0], TokenKind::IntLiteral(s) if s == "42"));
        assert!(matches!(&kinds[1], TokenKind::IntLiteral(s) if s == "0x1F"));
        assert!(matches!(&kinds[2], TokenKind::IntLiteral(s) if s == "0b1010"));
        assert!(matches!(&kinds[3], TokenKind::IntLiteral(s) if s == "0777"));
        assert!(matches!(&kinds[4], TokenKind::IntLiteral(s) if s == "123u"));
        assert!(matches!(&kinds[5], TokenKind::IntLiteral(s) if s == "456L"));
        assert!(matches!(&kinds[6], TokenKind::FloatLiteral(s) if s == "3.14"));
        assert!(matches!(&kinds[7], TokenKind::FloatLiteral(s) if s == ".5f"));
        assert!(matches!(&kinds[8], TokenKind::FloatLiteral(s) if s == "1e10"));
    }

    #[test]
    fn test_string_and_char_literals() {
        let kinds = kinds(r#""hello world" 'a' '\n' L"wide""#);

        assert!(matches!(&kinds[0], TokenKind::StringLiteral(s) if s == "\"hello world\""));
        assert!(matches!(&kinds[1], TokenKind::CharLiteral(s) if s == "'a'"));
        assert!(matches!(&kinds[2], TokenKind::CharLiteral(s) if s == "'\\n'"));
        assert!(matches!(&kinds[3], TokenKind::StringLiteral(s) if s == "L\"wide\""));
    }

    #[test]
    fn test_longest_operator_wins() {
        let kinds = kinds("a<<=b->c++");

        assert!(matches!(kinds[1], TokenKind::LtLtEq));
        assert!(matches!(kinds[3], TokenKind::Arrow));
        assert!(matches!(kinds[5], TokenKind::PlusPlus));
        assert!(matches!(kinds[6], TokenKind::Eof));
    }

    #[test]
    fn test_comments_are_skipped() {
        let kinds = kinds("x /* block */ + // line\n y");

        assert!(matches!(&kinds[0], TokenKind::Identifier(s) if s == "x"));
        assert!(matches!(kinds[1], TokenKind::Plus));
        assert!(matches!(&kinds[2], TokenKind::Identifier(s) if s == "y"));
    }

    #[test]
    fn test_unexpected_character_is_an_error() {
        let err = Lexer::new("a @ b").tokenize_all().unwrap_err();
        assert_eq!(err.to_string(), "unexpected character '@' at column 3");
    }

    #[test]
    fn test_eof_span_points_past_input() {
        let tokens = Lexer::new("ab").tokenize_all().unwrap();
        assert_eq!(tokens.last().unwrap().span, Span::new(2, 2));
    }
}
