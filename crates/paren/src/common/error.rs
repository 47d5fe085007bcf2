//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use thiserror::Error;
use super::Span;

/// Expression error with source location
#[derive(Error, Debug)]
pub enum ParenError {
    #[error("{message} at column {column}", column = .span.column())]
    Lexer { message: String, span: Span },

    #[error("{message} at column {column}", column = .span.column())]
    Parser { message: String, span: Span },
}

impl ParenError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            ParenError::Lexer { span, .. } | ParenError::Parser { span, .. } => *span,
        }
    }
}

pub type ParenResult<T> = Result<T, ParenError>;

/// Diagnostic reporter for pretty error output on stderr
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    pub fn report_error(&self, file_id: usize, error: &ParenError) {
        let (title, message) = match error {
            ParenError::Lexer { message, .. } => ("Lexer error", message),
            ParenError::Parser { message, .. } => ("Syntax error", message),
        };
        let diagnostic = Diagnostic::error()
            .with_message(title)
            .with_labels(vec![
                Label::primary(file_id, error.span().range()).with_message(message)
            ]);

        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
