//! Token definitions for the C expression lexer

use crate::common::Span;
use logos::Logos;

/// Token with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// All token kinds that can appear in a C expression
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f\v]+")]  // Skip whitespace
#[logos(skip r"//[^\n]*")]      // Skip line comments
#[logos(skip r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")] // Skip block comments
pub enum TokenKind {
    // === Type keywords ===
    #[token("char")]
    Char,
    #[token("const")]
    Const,
    #[token("double")]
    Double,
    #[token("enum")]
    Enum,
    #[token("float")]
    Float,
    #[token("int")]
    Int,
    #[token("long")]
    Long,
    #[token("restrict")]
    Restrict,
    #[token("short")]
    Short,
    #[token("signed")]
    Signed,
    #[token("struct")]
    Struct,
    #[token("union")]
    Union,
    #[token("unsigned")]
    Unsigned,
    #[token("void")]
    Void,
    #[token("volatile")]
    Volatile,
    #[token("_Bool")]
    Bool,
    #[token("_Complex")]
    Complex,
    #[token("_Atomic")]
    Atomic,

    // === Operator keywords ===
    #[token("sizeof")]
    Sizeof,
    #[token("_Alignof")]
    Alignof,

    // Statement and storage keywords never start an expression
    #[token("auto", |lex| lex.slice().to_string())]
    #[token("break", |lex| lex.slice().to_string())]
    #[token("case", |lex| lex.slice().to_string())]
    #[token("continue", |lex| lex.slice().to_string())]
    #[token("default", |lex| lex.slice().to_string())]
    #[token("do", |lex| lex.slice().to_string())]
    #[token("else", |lex| lex.slice().to_string())]
    #[token("extern", |lex| lex.slice().to_string())]
    #[token("for", |lex| lex.slice().to_string())]
    #[token("goto", |lex| lex.slice().to_string())]
    #[token("if", |lex| lex.slice().to_string())]
    #[token("inline", |lex| lex.slice().to_string())]
    #[token("register", |lex| lex.slice().to_string())]
    #[token("return", |lex| lex.slice().to_string())]
    #[token("static", |lex| lex.slice().to_string())]
    #[token("switch", |lex| lex.slice().to_string())]
    #[token("typedef", |lex| lex.slice().to_string())]
    #[token("while", |lex| lex.slice().to_string())]
    #[token("_Generic", |lex| lex.slice().to_string())]
    #[token("_Noreturn", |lex| lex.slice().to_string())]
    #[token("_Static_assert", |lex| lex.slice().to_string())]
    #[token("_Thread_local", |lex| lex.slice().to_string())]
    Reserved(String),

    // === Identifiers ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // === Literals ===
    // Integer literals (decimal, hex, octal, binary), kept verbatim
    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*", |lex| lex.slice().to_string())]
    #[regex(r"0[bB][01]+[uUlL]*", |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[uUlL]*", |lex| lex.slice().to_string())]
    IntLiteral(String),

    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?[fFlL]?", priority = 3, callback = |lex| lex.slice().to_string())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?[fFlL]?", priority = 2, callback = |lex| lex.slice().to_string())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+[fFlL]?", priority = 1, callback = |lex| lex.slice().to_string())]
    FloatLiteral(String),

    #[regex(r"(u8|u|U|L)?'([^'\\\n]|\\.)*'", |lex| lex.slice().to_string())]
    CharLiteral(String),

    #[regex(r#"(u8|u|U|L)?"([^"\\\n]|\\.)*""#, |lex| lex.slice().to_string())]
    StringLiteral(String),

    // === Operators ===
    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Increment/Decrement
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,

    // Comparison
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,

    // Logical
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("!")]
    Bang,

    // Bitwise
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("<<")]
    LtLt,
    #[token(">>")]
    GtGt,

    // Assignment
    #[token("=")]
    Eq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<=")]
    LtLtEq,
    #[token(">>=")]
    GtGtEq,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("->")]
    Arrow,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("...")]
    Ellipsis,

    // Special
    Eof,
}

impl TokenKind {
    /// Check if this token is a built-in type specifier keyword
    pub fn is_type_specifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Void
                | TokenKind::Char
                | TokenKind::Short
                | TokenKind::Int
                | TokenKind::Long
                | TokenKind::Float
                | TokenKind::Double
                | TokenKind::Signed
                | TokenKind::Unsigned
                | TokenKind::Bool
                | TokenKind::Complex
                | TokenKind::Struct
                | TokenKind::Union
                | TokenKind::Enum
        )
    }

    /// Check if this token is a type qualifier
    pub fn is_type_qualifier(&self) -> bool {
        matches!(
            self,
            TokenKind::Const | TokenKind::Volatile | TokenKind::Restrict | TokenKind::Atomic
        )
    }

    /// Source spelling of a keyword token
    pub fn keyword(&self) -> Option<&'static str> {
        let word = match self {
            TokenKind::Char => "char",
            TokenKind::Const => "const",
            TokenKind::Double => "double",
            TokenKind::Enum => "enum",
            TokenKind::Float => "float",
            TokenKind::Int => "int",
            TokenKind::Long => "long",
            TokenKind::Restrict => "restrict",
            TokenKind::Short => "short",
            TokenKind::Signed => "signed",
            TokenKind::Struct => "struct",
            TokenKind::Union => "union",
            TokenKind::Unsigned => "unsigned",
            TokenKind::Void => "void",
            TokenKind::Volatile => "volatile",
            TokenKind::Bool => "_Bool",
            TokenKind::Complex => "_Complex",
            TokenKind::Atomic => "_Atomic",
            TokenKind::Sizeof => "sizeof",
            TokenKind::Alignof => "_Alignof",
            _ => return None,
        };
        Some(word)
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(word) = self.keyword() {
            return write!(f, "'{}'", word);
        }
        match self {
            TokenKind::Reserved(s) => write!(f, "keyword '{}'", s),
            TokenKind::Identifier(s) => write!(f, "identifier '{}'", s),
            TokenKind::IntLiteral(s) => write!(f, "integer '{}'", s),
            TokenKind::FloatLiteral(s) => write!(f, "float '{}'", s),
            TokenKind::CharLiteral(s) => write!(f, "char {}", s),
            TokenKind::StringLiteral(s) => write!(f, "string {}", s),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::PlusPlus => write!(f, "'++'"),
            TokenKind::MinusMinus => write!(f, "'--'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::LtEq => write!(f, "'<='"),
            TokenKind::GtEq => write!(f, "'>='"),
            TokenKind::AmpAmp => write!(f, "'&&'"),
            TokenKind::PipePipe => write!(f, "'||'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Amp => write!(f, "'&'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Caret => write!(f, "'^'"),
            TokenKind::Tilde => write!(f, "'~'"),
            TokenKind::LtLt => write!(f, "'<<'"),
            TokenKind::GtGt => write!(f, "'>>'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::PlusEq => write!(f, "'+='"),
            TokenKind::MinusEq => write!(f, "'-='"),
            TokenKind::StarEq => write!(f, "'*='"),
            TokenKind::SlashEq => write!(f, "'/='"),
            TokenKind::PercentEq => write!(f, "'%='"),
            TokenKind::AmpEq => write!(f, "'&='"),
            TokenKind::PipeEq => write!(f, "'|='"),
            TokenKind::CaretEq => write!(f, "'^='"),
            TokenKind::LtLtEq => write!(f, "'<<='"),
            TokenKind::GtGtEq => write!(f, "'>>='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Semi => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Question => write!(f, "'?'"),
            TokenKind::Ellipsis => write!(f, "'...'"),
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "{:?}", self),
        }
    }
}
