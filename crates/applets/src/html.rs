//! Minimal HTML tokenizer
//!
//! Enough for extracting text from tables and definition snippets: start and
//! end tags with lowercased names, and text with character references
//! decoded. Comments, doctypes and processing instructions are skipped.

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"<![^>]*>")]   // Skip comments and doctype
#[logos(skip r"<\?[^>]*>")]  // Skip processing instructions
pub enum HtmlToken {
    #[regex(r"<[a-zA-Z][a-zA-Z0-9]*[^>]*>", |lex| tag_name(&lex.slice()[1..]))]
    StartTag(String),

    #[regex(r"</[a-zA-Z][a-zA-Z0-9]*[^>]*>", |lex| tag_name(&lex.slice()[2..]))]
    EndTag(String),

    #[regex(r"[^<]+", |lex| decode_entities(lex.slice()))]
    #[token("<", |_| "<".to_string())]
    Text(String),
}

fn tag_name(rest: &str) -> String {
    rest.chars()
        .take_while(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Tokenize a document; unrecognized input degrades to text
pub fn tokenize(html: &str) -> Vec<HtmlToken> {
    let mut lexer = HtmlToken::lexer(html);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push(token),
            Err(()) => tokens.push(HtmlToken::Text(lexer.slice().to_string())),
        }
    }
    tokens
}

/// All text content with markup removed
pub fn strip_tags(html: &str) -> String {
    tokenize(html)
        .into_iter()
        .filter_map(|token| match token {
            HtmlToken::Text(text) => Some(text),
            _ => None,
        })
        .collect()
}

/// Decode named and numeric character references; unknown ones are kept
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
