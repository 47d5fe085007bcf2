//! Command driver: label + expression words in, one output line out

use std::fmt;

use log::debug;

use crate::common::{DiagnosticReporter, ParenError, ParenResult};
use crate::parser::Parser;
use crate::printer::{Mode, Printer};
use crate::typedefs::TypedefTable;

/// Name under which the expression is registered for diagnostics
const INPUT_NAME: &str = "<input>";

/// Options for a parenthesize run
#[derive(Debug, Clone, Default)]
pub struct ParenConfig {
    pub mode: Mode,
    /// Type names known in addition to the standard typedefs
    pub extra_typedefs: Vec<String>,
    /// Also render parse errors as diagnostics on stderr
    pub verbose: bool,
}

impl ParenConfig {
    fn typedefs(&self) -> TypedefTable {
        let mut table = TypedefTable::standard();
        table.extend(self.extra_typedefs.iter().cloned());
        table
    }
}

/// Result of one invocation, printed as a single line
#[derive(Debug)]
pub enum Outcome {
    Rendered { label: String, text: String },
    Failed { label: String, error: ParenError },
    Usage { label: String },
    NoArguments,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Rendered { label, text } => write!(f, "{}: {}", label, text),
            Outcome::Failed { label, error } => write!(f, "{}: Error: {}", label, error),
            Outcome::Usage { label } => write!(f, "{}: Usage: paren <expression>", label),
            Outcome::NoArguments => write!(f, "error"),
        }
    }
}

/// Parse `source` and render it under `config`
pub fn parenthesize_expression(source: &str, config: &ParenConfig) -> ParenResult<String> {
    let typedefs = config.typedefs();
    debug!(
        "parsing {:?} in {:?} mode with {} type names",
        source,
        config.mode,
        typedefs.len()
    );

    let mut parser = Parser::new(source, &typedefs)?;
    let expr = parser.parse()?;
    debug!("parsed {:?}", expr.kind);

    Ok(Printer::new(config.mode).render(&expr))
}

/// Run the command on its positional arguments: `<label> <expression...>`
pub fn run(args: &[String], config: &ParenConfig) -> Outcome {
    let Some((label, words)) = args.split_first() else {
        return Outcome::NoArguments;
    };
    let label = label.clone();

    if words.is_empty() {
        return Outcome::Usage { label };
    }

    let source = words.join(" ");
    match parenthesize_expression(&source, config) {
        Ok(text) => Outcome::Rendered { label, text },
        Err(error) => {
            if config.verbose {
                let mut reporter = DiagnosticReporter::new();
                let file_id = reporter.add_file(INPUT_NAME, source.as_str());
                reporter.report_error(file_id, &error);
            }
            Outcome::Failed { label, error }
        }
    }
}
