//! Render an expression tree back to C source with explicit grouping
//!
//! Children are re-rendered from the tree, not copied from the input, so the
//! printer decides at every node whether an operand needs parentheses to keep
//! its original grouping. Two modes are provided:
//!
//! - [`Mode::Minimal`] trusts standard C precedence between binary operators
//!   and only wraps where grouping would otherwise change.
//! - [`Mode::Explicit`] wraps every binary operation in its own parentheses,
//!   so a binary operand never needs extra wrapping from its parent.

use crate::ast::*;

/// Parenthesization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Minimal,
    Explicit,
}

/// Expression printer
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    mode: Mode,
}

impl Printer {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    /// Render an expression
    pub fn render(&self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Constant(text) => text.clone(),
            ExprKind::Identifier(name) => name.clone(),
            ExprKind::Unary { op, operand } => self.render_unary(*op, operand),
            ExprKind::Assign { op, target, value } => format!(
                "{} {} {}",
                self.render(target),
                op.as_str(),
                self.parenthesize_unless_simple(value)
            ),
            ExprKind::Binary { op, left, right } => self.render_binary(*op, left, right),
            ExprKind::Ternary {
                condition,
                then_expr,
                else_expr,
            } => format!(
                "{} ? {} : {}",
                self.parenthesize_unless_simple(condition),
                self.parenthesize_unless_simple(then_expr),
                self.parenthesize_unless_simple(else_expr)
            ),
            ExprKind::Call { callee, args } => {
                let args: Vec<String> = args
                    .iter()
                    .map(|arg| self.parenthesize_if(arg, |a| matches!(a.kind, ExprKind::Comma(_))))
                    .collect();
                format!("{}({})", self.parenthesize_unless_simple(callee), args.join(", "))
            }
            ExprKind::Index { array, index } => format!(
                "{}[{}]",
                self.parenthesize_unless_simple(array),
                self.render(index)
            ),
            ExprKind::Member {
                object,
                access,
                field,
            } => format!(
                "{}{}{}",
                self.parenthesize_unless_simple(object),
                access.as_str(),
                field
            ),
            ExprKind::Cast { ty, expr } => format!(
                "({}){}",
                self.render_type_name(ty),
                self.parenthesize_unless_simple(expr)
            ),
            ExprKind::Typename(ty) => self.render_type_name(ty),
            ExprKind::Comma(exprs) => {
                let items: Vec<String> = exprs
                    .iter()
                    .map(|e| self.parenthesize_if(e, |e| matches!(e.kind, ExprKind::Comma(_))))
                    .collect();
                items.join(", ")
            }
        }
    }

    /// Whether a node binds at least as tightly as any unary or binary
    /// operator, and so never needs enclosing parentheses on its own
    pub fn is_simple(&self, expr: &Expr) -> bool {
        match expr.kind {
            ExprKind::Constant(_)
            | ExprKind::Identifier(_)
            | ExprKind::Index { .. }
            | ExprKind::Member { .. }
            | ExprKind::Call { .. } => true,
            ExprKind::Binary { .. } => self.mode == Mode::Explicit,
            _ => false,
        }
    }

    fn parenthesize_if(&self, expr: &Expr, condition: impl Fn(&Expr) -> bool) -> String {
        let text = self.render(expr);
        if condition(expr) {
            format!("({})", text)
        } else {
            text
        }
    }

    fn parenthesize_unless_simple(&self, expr: &Expr) -> String {
        self.parenthesize_if(expr, |e| !self.is_simple(e))
    }

    fn render_unary(&self, op: UnaryOp, operand: &Expr) -> String {
        if op.accepts_type() {
            return match &operand.kind {
                ExprKind::Typename(ty) => format!("{} ({})", op.as_str(), self.render_type_name(ty)),
                _ => format!("{} {}", op.as_str(), self.parenthesize_unless_simple(operand)),
            };
        }

        let operand = self.parenthesize_if(operand, |e| {
            matches!(e.kind, ExprKind::Index { .. }) || !self.is_simple(e)
        });
        if op.is_postfix() {
            format!("{}{}", operand, op.as_str())
        } else {
            format!("{}{}", op.as_str(), operand)
        }
    }

    fn render_binary(&self, op: BinaryOp, left: &Expr, right: &Expr) -> String {
        let (lhs, rhs) = match self.mode {
            Mode::Explicit => (
                self.parenthesize_unless_simple(left),
                self.parenthesize_unless_simple(right),
            ),
            Mode::Minimal => (
                // Left operands may share the parent's level; right operands
                // must bind strictly tighter to keep left associativity
                self.parenthesize_if(left, |e| {
                    !(self.is_simple(e) || binds_tighter(e, op.precedence(), true))
                }),
                self.parenthesize_if(right, |e| {
                    !(self.is_simple(e) || binds_tighter(e, op.precedence(), false))
                }),
            ),
        };

        // `0xe+1` would lex as a single preprocessing number
        let spaced = matches!(op, BinaryOp::Add | BinaryOp::Sub) && ends_in_exponent_letter(&lhs);
        let text = if spaced {
            format!("{} {} {}", lhs, op.as_str(), rhs)
        } else {
            format!("{}{}{}", lhs, op.as_str(), rhs)
        };

        match self.mode {
            Mode::Explicit => format!("({})", text),
            Mode::Minimal => text,
        }
    }

    /// Render a type name as an unnamed C declaration
    pub fn render_type_name(&self, ty: &TypeName) -> String {
        let base = ty.specifiers.join(" ");
        let declarator = self.render_declarator(&ty.declarator);
        if declarator.is_empty() {
            base
        } else {
            format!("{} {}", base, declarator)
        }
    }

    fn render_declarator(&self, declarator: &Declarator) -> String {
        let chain = declarator.chain();
        let mut text = String::new();

        for (i, part) in chain.iter().enumerate() {
            let after_pointer = i > 0 && matches!(chain[i - 1], Declarator::Pointer { .. });
            match part {
                Declarator::Array { size, .. } => {
                    if after_pointer {
                        text = format!("({})", text);
                    }
                    let size = size.as_ref().map(|s| self.render(s)).unwrap_or_default();
                    text.push_str(&format!("[{}]", size));
                }
                Declarator::Function {
                    params, variadic, ..
                } => {
                    if after_pointer {
                        text = format!("({})", text);
                    }
                    let mut params: Vec<String> =
                        params.iter().map(|p| self.render_type_name(p)).collect();
                    if *variadic {
                        params.push("...".to_string());
                    }
                    text.push_str(&format!("({})", params.join(", ")));
                }
                Declarator::Pointer { qualifiers, .. } => {
                    text = if qualifiers.is_empty() {
                        format!("*{}", text)
                    } else if text.is_empty() {
                        format!("* {}", qualifiers.join(" "))
                    } else {
                        format!("* {} {}", qualifiers.join(" "), text)
                    };
                }
                Declarator::Base => {}
            }
        }

        text
    }
}

/// Whether `text` ends with a number whose last character is `e`, `E`, `p`
/// or `P`, which a following `+` or `-` would extend
fn ends_in_exponent_letter(text: &str) -> bool {
    let word = &text[text
        .trim_end_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        .len()..];
    word.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && word.ends_with(['e', 'E', 'p', 'P'])
}

fn binds_tighter(expr: &Expr, parent: u8, allow_equal: bool) -> bool {
    match &expr.kind {
        ExprKind::Binary { op, .. } if allow_equal => op.precedence() >= parent,
        ExprKind::Binary { op, .. } => op.precedence() > parent,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::typedefs::TypedefTable;
    use pretty_assertions::assert_eq;

    fn render(mode: Mode, source: &str) -> String {
        let typedefs = TypedefTable::standard();
        let expr = Parser::new(source, &typedefs).unwrap().parse().unwrap();
        Printer::new(mode).render(&expr)
    }

    fn minimal(source: &str) -> String {
        render(Mode::Minimal, source)
    }

    fn explicit(source: &str) -> String {
        render(Mode::Explicit, source)
    }

    #[test]
    fn test_simple_terms_unchanged() {
        for source in ["x", "42", "'c'", "a[i]", "s.f", "p->f", "f(a, b)"] {
            assert_eq!(minimal(source), source);
            assert_eq!(explicit(source), source);
        }
    }

    #[test]
    fn test_sizeof_forms() {
        assert_eq!(minimal("sizeof(size_t)"), "sizeof (size_t)");
        assert_eq!(minimal("sizeof y"), "sizeof y");
        assert_eq!(minimal("sizeof(y)"), "sizeof y");
        assert_eq!(minimal("sizeof (a+b)"), "sizeof (a+b)");
        assert_eq!(minimal("sizeof(unsigned long)"), "sizeof (unsigned long)");
        assert_eq!(minimal("_Alignof(int)"), "_Alignof (int)");
    }

    #[test]
    fn test_assignment_wraps_non_simple_value() {
        assert_eq!(minimal("a = b+c"), "a = (b+c)");
        assert_eq!(minimal("a = b"), "a = b");
        assert_eq!(minimal("a = b = c"), "a = (b = c)");
        assert_eq!(minimal("x <<= -y"), "x <<= (-y)");
    }

    #[test]
    fn test_unary_operands() {
        assert_eq!(minimal("*p"), "*p");
        assert_eq!(minimal("*a[1]"), "*(a[1])");
        assert_eq!(minimal("&s.f"), "&s.f");
        assert_eq!(minimal("- -x"), "-(-x)");
        assert_eq!(minimal("!(a && b)"), "!(a&&b)");
        assert_eq!(minimal("x++"), "x++");
        assert_eq!(minimal("(*p)++"), "(*p)++");
        assert_eq!(minimal("--*p"), "--(*p)");
    }

    #[test]
    fn test_minimal_trusts_precedence() {
        assert_eq!(minimal("a + b * c"), "a+b*c");
        assert_eq!(minimal("(a + b) * c"), "(a+b)*c");
        assert_eq!(minimal("a - (b - c)"), "a-(b-c)");
        assert_eq!(minimal("(a - b) - c"), "a-b-c");
        assert_eq!(minimal("a || b && c"), "a||b&&c");
        assert_eq!(minimal("-a + b"), "(-a)+b");
    }

    #[test]
    fn test_explicit_wraps_every_binary() {
        assert_eq!(explicit("a+b*c"), "(a+(b*c))");
        assert_eq!(explicit("(a+b)*c"), "((a+b)*c)");
        assert_eq!(explicit("a = b+c"), "a = (b+c)");
        assert_eq!(explicit("sizeof (a+b)"), "sizeof (a+b)");
        assert_eq!(explicit("-a + b"), "((-a)+b)");
        assert_eq!(explicit("f(a+b)[i+1]"), "f((a+b))[(i+1)]");
    }

    #[test]
    fn test_casts_and_types() {
        assert_eq!(minimal("(int)x"), "(int)x");
        assert_eq!(minimal("(char *)(a + b)"), "(char *)(a+b)");
        assert_eq!(minimal("(int (*)[3])p"), "(int (*)[3])p");
        assert_eq!(minimal("(int *[3])p"), "(int *[3])p");
        assert_eq!(minimal("(void (*)(int, ...))f"), "(void (*)(int, ...))f");
        assert_eq!(minimal("(const char * const)s"), "(const char * const)s");
        assert_eq!(minimal("(struct foo *)p"), "(struct foo *)p");
    }

    #[test]
    fn test_ternary_and_comma() {
        assert_eq!(minimal("a < b ? a : b"), "(a<b) ? a : b");
        assert_eq!(minimal("a, b = c"), "a, b = c");
        assert_eq!(minimal("f((a, b), c)"), "f((a, b), c)");
    }

    #[test]
    fn test_exponent_letter_before_sign_is_spaced() {
        assert_eq!(minimal("0xe + 1"), "0xe + 1");
        assert_eq!(minimal("0x1E - y"), "0x1E - y");
        assert_eq!(minimal("a + 0xe - 1"), "a+0xe - 1");
        assert_eq!(explicit("0xe + 1"), "(0xe + 1)");
        assert_eq!(minimal("0xe * 1"), "0xe*1");
        assert_eq!(minimal("1e5 + 1"), "1e5+1");
        assert_eq!(minimal("size + 1"), "size+1");
    }

    #[test]
    fn test_postfix_on_non_simple_operand() {
        assert_eq!(minimal("(a + b)[0]"), "(a+b)[0]");
        assert_eq!(minimal("(*f)(x)"), "(*f)(x)");
        assert_eq!(minimal("(*p).x"), "(*p).x");
    }
}
