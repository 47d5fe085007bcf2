//! Recursive descent parser for C expressions

use crate::ast::*;
use crate::common::{ParenError, ParenResult, Span};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::typedefs::TypedefTable;

/// Recursive descent parser for a single C expression
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    typedefs: &'a TypedefTable,
}

/// Declarator suffix, collected left to right before being applied
enum Suffix {
    Array(Option<Box<Expr>>),
    Function(Vec<TypeName>, bool),
}

impl Suffix {
    fn wrap(self, inner: Declarator) -> Declarator {
        match self {
            Suffix::Array(size) => Declarator::Array {
                inner: Box::new(inner),
                size,
            },
            Suffix::Function(params, variadic) => Declarator::Function {
                inner: Box::new(inner),
                params,
                variadic,
            },
        }
    }
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source; identifiers in `typedefs`
    /// are treated as type names
    pub fn new(source: &'a str, typedefs: &'a TypedefTable) -> ParenResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token()?;
        Ok(Self {
            lexer,
            current,
            typedefs,
        })
    }

    /// Parse a complete expression; trailing tokens are an error
    pub fn parse(&mut self) -> ParenResult<Expr> {
        let expr = self.parse_expression()?;
        if !self.at_end() {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> ParenResult<Token> {
        let prev = std::mem::replace(&mut self.current, self.lexer.next_token()?);
        Ok(prev)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current.kind) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> ParenResult<bool> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParenResult<Token> {
        if self.check(&kind) {
            self.advance()
        } else {
            Err(ParenError::parser(
                format!("expected {}, found {}", kind, self.current.kind),
                self.current.span,
            ))
        }
    }

    fn unexpected(&self) -> ParenError {
        ParenError::parser(format!("unexpected {}", self.current.kind), self.current.span)
    }

    fn is_typedef_name(&self, kind: &TokenKind) -> bool {
        matches!(kind, TokenKind::Identifier(name) if self.typedefs.contains(name))
    }

    fn starts_type_name(&self) -> bool {
        let kind = &self.current.kind;
        kind.is_type_specifier() || kind.is_type_qualifier() || self.is_typedef_name(kind)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expression(&mut self) -> ParenResult<Expr> {
        let first = self.parse_assignment_expression()?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }

        let mut span = first.span;
        let mut exprs = vec![first];
        while self.match_token(&TokenKind::Comma)? {
            let next = self.parse_assignment_expression()?;
            span = span.merge(next.span);
            exprs.push(next);
        }

        Ok(Expr::new(ExprKind::Comma(exprs), span))
    }

    fn parse_assignment_expression(&mut self) -> ParenResult<Expr> {
        let start_span = self.current.span;
        let left = self.parse_conditional_expression()?;

        if let Some(op) = self.get_assignment_op() {
            self.advance()?;
            let right = self.parse_assignment_expression()?;
            let span = start_span.merge(right.span);

            return Ok(Expr::new(
                ExprKind::Assign {
                    op,
                    target: Box::new(left),
                    value: Box::new(right),
                },
                span,
            ));
        }

        Ok(left)
    }

    fn get_assignment_op(&self) -> Option<AssignOp> {
        match &self.current.kind {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::AddAssign),
            TokenKind::MinusEq => Some(AssignOp::SubAssign),
            TokenKind::StarEq => Some(AssignOp::MulAssign),
            TokenKind::SlashEq => Some(AssignOp::DivAssign),
            TokenKind::PercentEq => Some(AssignOp::ModAssign),
            TokenKind::AmpEq => Some(AssignOp::AndAssign),
            TokenKind::PipeEq => Some(AssignOp::OrAssign),
            TokenKind::CaretEq => Some(AssignOp::XorAssign),
            TokenKind::LtLtEq => Some(AssignOp::ShlAssign),
            TokenKind::GtGtEq => Some(AssignOp::ShrAssign),
            _ => None,
        }
    }

    fn parse_conditional_expression(&mut self) -> ParenResult<Expr> {
        let start_span = self.current.span;
        let condition = self.parse_binary_expression(0)?;

        if self.match_token(&TokenKind::Question)? {
            let then_expr = self.parse_expression()?;
            self.expect(TokenKind::Colon)?;
            let else_expr = self.parse_conditional_expression()?;
            let span = start_span.merge(else_expr.span);

            return Ok(Expr::new(
                ExprKind::Ternary {
                    condition: Box::new(condition),
                    then_expr: Box::new(then_expr),
                    else_expr: Box::new(else_expr),
                },
                span,
            ));
        }

        Ok(condition)
    }

    /// Precedence climbing over the left-associative binary levels
    fn parse_binary_expression(&mut self, min_precedence: u8) -> ParenResult<Expr> {
        let mut left = self.parse_cast_expression()?;

        while let Some(op) = self.get_binary_op() {
            if op.precedence() < min_precedence {
                break;
            }
            self.advance()?;
            let right = self.parse_binary_expression(op.precedence() + 1)?;
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn get_binary_op(&self) -> Option<BinaryOp> {
        match &self.current.kind {
            TokenKind::PipePipe => Some(BinaryOp::LogOr),
            TokenKind::AmpAmp => Some(BinaryOp::LogAnd),
            TokenKind::Pipe => Some(BinaryOp::BitOr),
            TokenKind::Caret => Some(BinaryOp::BitXor),
            TokenKind::Amp => Some(BinaryOp::BitAnd),
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::Ne),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::LtEq => Some(BinaryOp::Le),
            TokenKind::GtEq => Some(BinaryOp::Ge),
            TokenKind::LtLt => Some(BinaryOp::Shl),
            TokenKind::GtGt => Some(BinaryOp::Shr),
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    fn parse_cast_expression(&mut self) -> ParenResult<Expr> {
        if !self.check(&TokenKind::LParen) {
            return self.parse_unary_expression();
        }

        let start_span = self.advance()?.span;
        if !self.starts_type_name() {
            // Parenthesized expression, possibly followed by postfix operators
            let expr = self.parse_expression()?;
            self.expect(TokenKind::RParen)?;
            return self.parse_postfix_suffixes(expr);
        }

        let ty = self.parse_type_name()?;
        self.expect(TokenKind::RParen)?;
        if self.check(&TokenKind::LBrace) {
            return Err(ParenError::parser(
                "compound literals are not supported",
                self.current.span,
            ));
        }

        let operand = self.parse_cast_expression()?;
        let span = start_span.merge(operand.span);
        Ok(Expr::new(
            ExprKind::Cast {
                ty,
                expr: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_unary_expression(&mut self) -> ParenResult<Expr> {
        let start_span = self.current.span;

        let op = match &self.current.kind {
            TokenKind::PlusPlus => UnaryOp::PreInc,
            TokenKind::MinusMinus => UnaryOp::PreDec,
            TokenKind::Amp => UnaryOp::AddrOf,
            TokenKind::Star => UnaryOp::Deref,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::Sizeof => UnaryOp::Sizeof,
            TokenKind::Alignof => UnaryOp::Alignof,
            _ => return self.parse_postfix_expression(),
        };
        self.advance()?;

        let operand = match op {
            UnaryOp::PreInc | UnaryOp::PreDec => self.parse_unary_expression()?,
            UnaryOp::Sizeof | UnaryOp::Alignof => self.parse_sizeof_operand()?,
            _ => self.parse_cast_expression()?,
        };
        let span = start_span.merge(operand.span);

        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    /// Operand of sizeof/_Alignof: `(type-name)` or a unary expression
    fn parse_sizeof_operand(&mut self) -> ParenResult<Expr> {
        if !self.check(&TokenKind::LParen) {
            return self.parse_unary_expression();
        }

        let start_span = self.advance()?.span;
        if self.starts_type_name() {
            let ty = self.parse_type_name()?;
            let end = self.expect(TokenKind::RParen)?;
            if self.check(&TokenKind::LBrace) {
                return Err(ParenError::parser(
                    "compound literals are not supported",
                    self.current.span,
                ));
            }
            return Ok(Expr::new(ExprKind::Typename(ty), start_span.merge(end.span)));
        }

        let expr = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        self.parse_postfix_suffixes(expr)
    }

    fn parse_postfix_expression(&mut self) -> ParenResult<Expr> {
        let expr = self.parse_primary_expression()?;
        self.parse_postfix_suffixes(expr)
    }

    fn parse_postfix_suffixes(&mut self, mut expr: Expr) -> ParenResult<Expr> {
        loop {
            let start_span = expr.span;
            match &self.current.kind {
                TokenKind::LBracket => {
                    self.advance()?;
                    let index = self.parse_expression()?;
                    let end = self.expect(TokenKind::RBracket)?;
                    expr = Expr::new(
                        ExprKind::Index {
                            array: Box::new(expr),
                            index: Box::new(index),
                        },
                        start_span.merge(end.span),
                    );
                }
                TokenKind::LParen => {
                    self.advance()?;
                    let args = self.parse_argument_list()?;
                    let end = self.expect(TokenKind::RParen)?;
                    expr = Expr::new(
                        ExprKind::Call {
                            callee: Box::new(expr),
                            args,
                        },
                        start_span.merge(end.span),
                    );
                }
                TokenKind::Dot | TokenKind::Arrow => {
                    let access = if self.check(&TokenKind::Dot) {
                        MemberAccess::Dot
                    } else {
                        MemberAccess::Arrow
                    };
                    self.advance()?;
                    let field = if let TokenKind::Identifier(name) = &self.current.kind {
                        name.clone()
                    } else {
                        return Err(ParenError::parser(
                            format!("expected field name, found {}", self.current.kind),
                            self.current.span,
                        ));
                    };
                    let end = self.advance()?;
                    expr = Expr::new(
                        ExprKind::Member {
                            object: Box::new(expr),
                            access,
                            field,
                        },
                        start_span.merge(end.span),
                    );
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let op = if self.check(&TokenKind::PlusPlus) {
                        UnaryOp::PostInc
                    } else {
                        UnaryOp::PostDec
                    };
                    let end = self.advance()?;
                    expr = Expr::new(
                        ExprKind::Unary {
                            op,
                            operand: Box::new(expr),
                        },
                        start_span.merge(end.span),
                    );
                }
                _ => break,
            }
        }

        Ok(expr)
    }

    fn parse_argument_list(&mut self) -> ParenResult<Vec<Expr>> {
        let mut args = Vec::new();

        if self.check(&TokenKind::RParen) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_assignment_expression()?);
            if !self.match_token(&TokenKind::Comma)? {
                break;
            }
        }

        Ok(args)
    }

    fn parse_primary_expression(&mut self) -> ParenResult<Expr> {
        let span = self.current.span;

        match &self.current.kind {
            TokenKind::IntLiteral(s) | TokenKind::FloatLiteral(s) | TokenKind::CharLiteral(s) => {
                let text = s.clone();
                self.advance()?;
                Ok(Expr::new(ExprKind::Constant(text), span))
            }
            TokenKind::StringLiteral(s) => {
                let mut text = s.clone();
                let mut span = span;
                self.advance()?;
                // Adjacent string literals concatenate: "a" "b" is "ab"
                while let TokenKind::StringLiteral(next) = &self.current.kind {
                    let body_start = next.find('"').map_or(0, |i| i + 1);
                    text.pop();
                    text.push_str(&next[body_start..]);
                    span = span.merge(self.current.span);
                    self.advance()?;
                }
                Ok(Expr::new(ExprKind::Constant(text), span))
            }
            TokenKind::Identifier(name) if self.typedefs.contains(name) => Err(
                ParenError::parser(format!("unexpected type name '{}'", name), span),
            ),
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance()?;
                Ok(Expr::new(ExprKind::Identifier(name), span))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected()),
        }
    }

    // =========================================================================
    // Type names
    // =========================================================================

    fn parse_type_name(&mut self) -> ParenResult<TypeName> {
        let start_span = self.current.span;
        let mut specifiers = Vec::new();
        let mut has_type = false;

        loop {
            let kind = self.current.kind.clone();
            match kind {
                TokenKind::Struct | TokenKind::Union | TokenKind::Enum => {
                    if let Some(word) = kind.keyword() {
                        specifiers.push(word.to_string());
                    }
                    self.advance()?;
                    let tag = match &self.current.kind {
                        TokenKind::Identifier(name) => name.clone(),
                        _ => {
                            return Err(ParenError::parser(
                                format!("expected tag name, found {}", self.current.kind),
                                self.current.span,
                            ));
                        }
                    };
                    self.advance()?;
                    specifiers.push(tag);
                    has_type = true;
                }
                _ if kind.is_type_specifier() || kind.is_type_qualifier() => {
                    if let Some(word) = kind.keyword() {
                        specifiers.push(word.to_string());
                    }
                    has_type |= kind.is_type_specifier();
                    self.advance()?;
                }
                // A typedef name only counts when no other type has been named
                TokenKind::Identifier(name) if !has_type && self.typedefs.contains(&name) => {
                    specifiers.push(name);
                    has_type = true;
                    self.advance()?;
                }
                _ => break,
            }
        }

        if !has_type {
            return Err(ParenError::parser(
                format!("expected type specifier, found {}", self.current.kind),
                self.current.span,
            ));
        }

        let declarator = self.parse_abstract_declarator()?;
        let span = start_span.merge(self.current.span);
        Ok(TypeName::new(specifiers, declarator, span))
    }

    fn parse_type_qualifiers(&mut self) -> ParenResult<Vec<String>> {
        let mut qualifiers = Vec::new();
        while self.current.kind.is_type_qualifier() {
            if let Some(word) = self.current.kind.keyword() {
                qualifiers.push(word.to_string());
            }
            self.advance()?;
        }
        Ok(qualifiers)
    }

    /// Abstract declarator: `*`s, an optional parenthesized declarator, then
    /// array/function suffixes. Built against `Declarator::Base`.
    fn parse_abstract_declarator(&mut self) -> ParenResult<Declarator> {
        let mut ty = Declarator::Base;
        while self.match_token(&TokenKind::Star)? {
            let qualifiers = self.parse_type_qualifiers()?;
            ty = Declarator::pointer(qualifiers, ty);
        }

        let mut nested = None;
        let mut suffixes = Vec::new();

        if self.match_token(&TokenKind::LParen)? {
            let opens_declarator = matches!(
                self.current.kind,
                TokenKind::Star | TokenKind::LBracket | TokenKind::LParen
            );
            if opens_declarator {
                nested = Some(self.parse_abstract_declarator()?);
                self.expect(TokenKind::RParen)?;
            } else {
                suffixes.push(self.parse_parameter_suffix()?);
            }
        }

        loop {
            if self.match_token(&TokenKind::LBracket)? {
                let size = if self.check(&TokenKind::RBracket) {
                    None
                } else {
                    Some(Box::new(self.parse_assignment_expression()?))
                };
                self.expect(TokenKind::RBracket)?;
                suffixes.push(Suffix::Array(size));
            } else if self.match_token(&TokenKind::LParen)? {
                suffixes.push(self.parse_parameter_suffix()?);
            } else {
                break;
            }
        }

        // The leftmost suffix is the outermost type constructor
        for suffix in suffixes.into_iter().rev() {
            ty = suffix.wrap(ty);
        }

        Ok(match nested {
            Some(inner) => inner.substitute(ty),
            None => ty,
        })
    }

    /// Parameter types of a function suffix; the `(` is already consumed
    fn parse_parameter_suffix(&mut self) -> ParenResult<Suffix> {
        let mut params = Vec::new();
        let mut variadic = false;

        if !self.check(&TokenKind::RParen) {
            loop {
                if self.match_token(&TokenKind::Ellipsis)? {
                    variadic = true;
                    break;
                }
                params.push(self.parse_type_name()?);
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }

        self.expect(TokenKind::RParen)?;
        Ok(Suffix::Function(params, variadic))
    }
}
