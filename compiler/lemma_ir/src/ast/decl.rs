//! Declarations and the small structural nodes they are built from.

use super::{BuilderKind, Fields, Fixity, Pattern, Relation, TruthKind, Visibility};
use crate::{Span, Spanned};

/// One bound pattern inside a field or argument list.
#[derive(Clone, Debug)]
pub struct Entry<E, R> {
    pub pos: Span,
    /// Implicit entries are filled in by elaboration rather than written.
    pub implicit: bool,
    pub pattern: Pattern<E, R>,
}

/// A pattern and the body it selects, inside an abstraction or match.
#[derive(Clone, Debug)]
pub struct Case<E, R> {
    pub pos: Span,
    pub pattern: Pattern<E, R>,
    pub body: E,
}

/// A pattern bound to an optional initializer.
#[derive(Clone, Debug)]
pub struct Def<E, R> {
    pub pos: Span,
    pub pattern: Pattern<E, R>,
    pub init: Option<E>,
}

#[derive(Clone, Debug)]
pub struct Import<E> {
    pub pos: Span,
    pub visibility: Visibility,
    pub target: E,
}

/// Discharges the theorem `theorem` with `body`.
#[derive(Clone, Debug)]
pub struct Proof<E, R> {
    pub pos: Span,
    pub theorem: R,
    pub body: E,
}

/// A named fact. The name is the key it is bound under in its scope.
#[derive(Clone, Debug)]
pub struct Truth<E> {
    pub pos: Span,
    pub kind: TruthKind,
    pub visibility: Visibility,
    pub prop: E,
    pub proof: Option<E>,
}

/// A definition introducing a new entity kind.
#[derive(Clone, Debug)]
pub struct Builder<E, R> {
    pub pos: Span,
    pub kind: BuilderKind,
    pub visibility: Visibility,
    pub params: Fields<E, R>,
    pub supers: Vec<E>,
    pub body: E,
}

/// One precedence constraint of an operator against another.
#[derive(Clone, Debug)]
pub struct Precedence<E> {
    pub relation: Relation,
    pub operator: E,
}

/// Operator metadata.
#[derive(Clone, Debug)]
pub struct Syntax<E> {
    pub pos: Span,
    pub fixity: Fixity,
    pub precedence: Vec<Precedence<E>>,
}

/// An item of an expression sequence that mixes statements and declarations.
#[derive(Clone, Debug)]
pub enum Compound<E, R> {
    Exp(E),
    Def(Def<E, R>),
}

/// Element names of the compound variants, indexed by [`Compound::tag`].
pub const COMPOUND_TAGS: [&str; 2] = ["statement", "declaration"];

impl<E, R> Compound<E, R> {
    pub fn tag(&self) -> u8 {
        match self {
            Compound::Exp(_) => 0,
            Compound::Def(_) => 1,
        }
    }
}

macro_rules! spanned_by_pos {
    ($([$($g:ident),*] $ty:ty),* $(,)?) => {
        $(
            impl<$($g),*> Spanned for $ty {
                fn span(&self) -> Span {
                    self.pos
                }
            }
        )*
    };
}

spanned_by_pos!(
    [E, R] Entry<E, R>,
    [E, R] Case<E, R>,
    [E, R] Def<E, R>,
    [E] Import<E>,
    [E, R] Proof<E, R>,
    [E] Truth<E>,
    [E, R] Builder<E, R>,
    [E] Syntax<E>,
    [E, R] super::Field<E, R>,
    [E, R] super::Scope<E, R>,
);

impl<E: Spanned, R> Spanned for Compound<E, R> {
    fn span(&self) -> Span {
        match self {
            Compound::Exp(exp) => exp.span(),
            Compound::Def(def) => def.pos,
        }
    }
}
