//! Phase instantiations of the tree family.
//!
//! [`Expr`] ties the knot: an expression whose embedded expressions are
//! expressions of the same phase. The reference slot is what changes between
//! phases: raw [`Name`]s after parsing ([`parsed`]), [`Symbol`]s after
//! resolution ([`resolved`]).

pub mod parsed;
pub mod resolved;

use crate::ast::{AbsKind, Case, Exp, Literal, NameMap, ScopeId};
use crate::{Name, Span, Spanned};

/// A phase expression: one [`Exp`] layer whose sub-expressions are `Expr<R>`.
#[derive(Clone, Debug)]
pub struct Expr<R>(pub Exp<Expr<R>, R>);

impl<R> Expr<R> {
    pub fn new(node: Exp<Expr<R>, R>) -> Self {
        Expr(node)
    }

    pub fn node(&self) -> &Exp<Expr<R>, R> {
        &self.0
    }

    pub fn into_node(self) -> Exp<Expr<R>, R> {
        self.0
    }

    pub fn sym(pos: Span, reference: R) -> Self {
        Expr(Exp::Sym { pos, reference })
    }

    pub fn literal(literal: Literal) -> Self {
        Expr(Exp::Literal(literal))
    }

    pub fn int(pos: Span, value: i64) -> Self {
        Expr(Exp::Literal(Literal::int(pos, value)))
    }

    pub fn tuple(pos: Span, items: Vec<Expr<R>>) -> Self {
        Expr(Exp::Tuple { pos, items })
    }

    pub fn with(pos: Span, function: Expr<R>, argument: Expr<R>) -> Self {
        Expr(Exp::With {
            pos,
            function: Box::new(function),
            argument: Box::new(argument),
        })
    }

    pub fn record(pos: Span, fields: impl IntoIterator<Item = (Name, Expr<R>)>) -> Self {
        Expr(Exp::Record {
            pos,
            fields: fields.into_iter().collect::<NameMap<_>>(),
        })
    }

    pub fn abs(pos: Span, kind: AbsKind, cases: Vec<Case<Expr<R>, R>>) -> Self {
        Expr(Exp::Abs { pos, kind, cases })
    }
}

impl<R> Spanned for Expr<R> {
    fn span(&self) -> Span {
        self.0.span()
    }
}

impl<R> From<Exp<Expr<R>, R>> for Expr<R> {
    fn from(node: Exp<Expr<R>, R>) -> Self {
        Expr(node)
    }
}

/// A resolved reference: the scope a name was found in, and the name.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Symbol {
    pub scope: ScopeId,
    pub name: Name,
}

impl Symbol {
    pub const fn new(scope: ScopeId, name: Name) -> Self {
        Symbol { scope, name }
    }
}
