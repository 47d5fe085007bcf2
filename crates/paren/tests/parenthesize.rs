// End-to-end behavior of the parenthesizer through the public API

use paren::{parenthesize_expression, run, Mode, Outcome, ParenConfig};
use pretty_assertions::assert_eq;

fn config(mode: Mode) -> ParenConfig {
    ParenConfig {
        mode,
        ..ParenConfig::default()
    }
}

fn minimal(source: &str) -> String {
    parenthesize_expression(source, &config(Mode::Minimal)).expect("parse failed")
}

fn explicit(source: &str) -> String {
    parenthesize_expression(source, &config(Mode::Explicit)).expect("parse failed")
}

fn words(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

#[test]
fn test_simple_terms_print_unchanged() {
    for source in ["foo", "0x1F", "arr[3]", "pt.x", "node->next", "printf(\"%d\", n)"] {
        assert_eq!(minimal(source), source);
    }
}

#[test]
fn test_sizeof_rules() {
    assert_eq!(minimal("sizeof(int)"), "sizeof (int)");
    assert_eq!(minimal("sizeof(FILE *)"), "sizeof (FILE *)");
    assert_eq!(minimal("sizeof y"), "sizeof y");
    assert_eq!(minimal("sizeof (a+b)"), "sizeof (a+b)");
    assert_eq!(minimal("sizeof *p"), "sizeof (*p)");
}

#[test]
fn test_assignment_rules() {
    assert_eq!(minimal("a = b+c"), "a = (b+c)");
    assert_eq!(minimal("a = b"), "a = b");
    assert_eq!(minimal("a += f(x)"), "a += f(x)");
}

#[test]
fn test_explicit_mode_wraps_nested_binaries() {
    assert_eq!(explicit("a+b*c"), "(a+(b*c))");
    assert_eq!(explicit("a*b+c"), "((a*b)+c)");
    assert_eq!(explicit("a && b || c == d"), "((a&&b)||(c==d))");
}

#[test]
fn test_modes_agree_on_non_binary_nodes() {
    for source in ["*p++", "&a[0]", "(int)x", "x = y", "sizeof(long)"] {
        assert_eq!(minimal(source), explicit(source), "source: {}", source);
    }
}

#[test]
fn test_output_reparses_to_same_rendering() {
    for source in ["a+b*c-d/e", "x = y ? *p : -q", "(a<<2)|(b&c)", "-(int)(x+1)"] {
        let once = minimal(source);
        assert_eq!(minimal(&once), once, "source: {}", source);
    }
}

#[test]
fn test_cli_usage_and_errors() {
    let cfg = ParenConfig::default();

    assert_eq!(run(&words("bob"), &cfg).to_string(), "bob: Usage: paren <expression>");
    assert_eq!(run(&[], &cfg).to_string(), "error");

    let outcome = run(&words("bob ( a + b"), &cfg);
    let line = outcome.to_string();
    assert!(matches!(outcome, Outcome::Failed { .. }));
    assert!(line.starts_with("bob: Error: "), "line: {}", line);
    assert!(line.contains("end of input"), "line: {}", line);

    let line = run(&words("bob a + b )"), &cfg).to_string();
    assert_eq!(line, "bob: Error: unexpected ')' at column 7");
}

#[test]
fn test_cli_success_line() {
    let cfg = config(Mode::Explicit);
    assert_eq!(run(&words("bob a + b * c"), &cfg).to_string(), "bob: (a+(b*c))");
}
