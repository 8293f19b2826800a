//! Expression nodes.
//!
//! `Exp<E, R>` is one layer of expression: every sub-expression sits in the
//! `E` slot. A concrete phase closes the recursion with
//! [`Expr`](crate::Expr), whose `E` is itself.

use super::{AbsKind, BuilderKind, Case, Compound, Fields, Literal, NameMap, Scope};
use crate::{Name, Span, Spanned};

#[derive(Clone, Debug)]
pub enum Exp<E, R> {
    /// `{ decl; exp; ... }`: opens a dynamic scope.
    Compound {
        pos: Span,
        items: Vec<Compound<E, R>>,
    },

    /// `fun { p => e | ... }`, `forall`, `exists`
    Abs {
        pos: Span,
        kind: AbsKind,
        cases: Vec<Case<E, R>>,
    },

    /// `match e { p => e | ... }`
    Match {
        pos: Span,
        scrutinee: Box<E>,
        cases: Vec<Case<E, R>>,
    },

    /// `e : t`
    Ascribe {
        pos: Span,
        value: Box<E>,
        ty: Box<E>,
    },

    /// An operator/application chain that still has to be reparsed by fixity.
    Seq { pos: Span, items: Vec<E> },

    /// `{ a = e, b = f }`; field order is not significant.
    Record { pos: Span, fields: NameMap<E> },

    /// `{ a : t, b : u }` with declaration order.
    RecordType { pos: Span, fields: Fields<E, R> },

    /// `(e, f, ...)`
    Tuple { pos: Span, items: Vec<E> },

    /// `e.a.b`
    Project {
        pos: Span,
        value: Box<E>,
        path: Vec<Name>,
    },

    /// A reference.
    Sym { pos: Span, reference: R },

    /// `f with a`: curried application.
    With {
        pos: Span,
        function: Box<E>,
        argument: Box<E>,
    },

    /// `e where p`
    Where {
        pos: Span,
        value: Box<E>,
        proposition: Box<E>,
    },

    /// An anonymous builder literal.
    Anon {
        pos: Span,
        kind: BuilderKind,
        supers: Vec<E>,
        params: Fields<E, R>,
        body: Box<Scope<E, R>>,
    },

    Literal(Literal),
}

/// Element names of the expression variants, indexed by [`Exp::tag`].
pub const EXP_TAGS: [&str; 14] = [
    "compound",
    "abs",
    "match",
    "ascribe",
    "seq",
    "record",
    "record-type",
    "tuple",
    "project",
    "sym",
    "with",
    "where",
    "anon",
    "literal",
];

impl<E, R> Exp<E, R> {
    /// Declaration-order discriminator.
    pub fn tag(&self) -> u8 {
        match self {
            Exp::Compound { .. } => 0,
            Exp::Abs { .. } => 1,
            Exp::Match { .. } => 2,
            Exp::Ascribe { .. } => 3,
            Exp::Seq { .. } => 4,
            Exp::Record { .. } => 5,
            Exp::RecordType { .. } => 6,
            Exp::Tuple { .. } => 7,
            Exp::Project { .. } => 8,
            Exp::Sym { .. } => 9,
            Exp::With { .. } => 10,
            Exp::Where { .. } => 11,
            Exp::Anon { .. } => 12,
            Exp::Literal(_) => 13,
        }
    }
}

impl<E, R> Spanned for Exp<E, R> {
    fn span(&self) -> Span {
        match self {
            Exp::Compound { pos, .. }
            | Exp::Abs { pos, .. }
            | Exp::Match { pos, .. }
            | Exp::Ascribe { pos, .. }
            | Exp::Seq { pos, .. }
            | Exp::Record { pos, .. }
            | Exp::RecordType { pos, .. }
            | Exp::Tuple { pos, .. }
            | Exp::Project { pos, .. }
            | Exp::Sym { pos, .. }
            | Exp::With { pos, .. }
            | Exp::Where { pos, .. }
            | Exp::Anon { pos, .. } => *pos,
            Exp::Literal(literal) => literal.pos,
        }
    }
}
