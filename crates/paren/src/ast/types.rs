//! Type names: the `T` in `(T)x` and `sizeof (T)`

use super::Expr;
use crate::common::Span;

/// An abstract type name: specifiers plus a declarator without an identifier
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    /// Qualifier, keyword and typedef words in source order,
    /// e.g. `["const", "unsigned", "long"]` or `["struct", "foo"]`
    pub specifiers: Vec<String>,
    pub declarator: Declarator,
    pub span: Span,
}

impl TypeName {
    pub fn new(specifiers: Vec<String>, declarator: Declarator, span: Span) -> Self {
        Self {
            specifiers,
            declarator,
            span,
        }
    }
}

/// Derived-type constructors wrapped around the specifier type.
///
/// `Base` stands for the specifier type itself; every other variant
/// derives a new type from `inner`.
#[derive(Debug, Clone, PartialEq)]
pub enum Declarator {
    Base,

    /// Pointer to `inner`, with qualifiers written after the `*`
    Pointer {
        qualifiers: Vec<String>,
        inner: Box<Declarator>,
    },

    /// Array of `inner`
    Array {
        inner: Box<Declarator>,
        size: Option<Box<Expr>>,
    },

    /// Function returning `inner`
    Function {
        inner: Box<Declarator>,
        params: Vec<TypeName>,
        variadic: bool,
    },
}

impl Declarator {
    pub fn pointer(qualifiers: Vec<String>, inner: Declarator) -> Self {
        Declarator::Pointer {
            qualifiers,
            inner: Box::new(inner),
        }
    }

    /// Replace the `Base` leaf with `replacement`.
    ///
    /// A parenthesized abstract declarator is parsed against `Base` first;
    /// the type built from the suffixes that follow it is plugged in here.
    pub fn substitute(self, replacement: Declarator) -> Declarator {
        match self {
            Declarator::Base => replacement,
            Declarator::Pointer { qualifiers, inner } => Declarator::Pointer {
                qualifiers,
                inner: Box::new(inner.substitute(replacement)),
            },
            Declarator::Array { inner, size } => Declarator::Array {
                inner: Box::new(inner.substitute(replacement)),
                size,
            },
            Declarator::Function {
                inner,
                params,
                variadic,
            } => Declarator::Function {
                inner: Box::new(inner.substitute(replacement)),
                params,
                variadic,
            },
        }
    }

    /// Constructors from the outermost type inward, excluding `Base`
    pub fn chain(&self) -> Vec<&Declarator> {
        let mut chain = Vec::new();
        let mut current = self;
        loop {
            match current {
                Declarator::Base => break,
                Declarator::Pointer { inner, .. }
                | Declarator::Array { inner, .. }
                | Declarator::Function { inner, .. } => {
                    chain.push(current);
                    current = inner;
                }
            }
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_plugs_base_leaf() {
        // (*) applied to "array of Base" gives "pointer to array of Base"
        let inner = Declarator::pointer(vec![], Declarator::Base);
        let outer = Declarator::Array {
            inner: Box::new(Declarator::Base),
            size: None,
        };

        let combined = inner.substitute(outer);
        let chain = combined.chain();

        assert_eq!(chain.len(), 2);
        assert!(matches!(chain[0], Declarator::Pointer { .. }));
        assert!(matches!(chain[1], Declarator::Array { .. }));
    }

    #[test]
    fn test_chain_of_base_is_empty() {
        assert!(Declarator::Base.chain().is_empty());
    }
}
