//! Match/bind shapes.

use super::{Literal, NameMap};
use crate::{Name, Span, Spanned};

/// A pattern, generic over embedded expressions `E` and references `R`.
#[derive(Clone, Debug)]
pub enum Pattern<E, R> {
    /// `p | q | ...`
    Option {
        pos: Span,
        alternatives: Vec<Pattern<E, R>>,
    },

    /// `C p`
    Deconstruct {
        pos: Span,
        constructor: R,
        argument: Box<Pattern<E, R>>,
    },

    /// `{ a = p, b = q }`; a strict split rejects fields it does not name.
    Split {
        pos: Span,
        fields: NameMap<Pattern<E, R>>,
        strict: bool,
    },

    /// `p : t`
    Typed {
        pos: Span,
        pattern: Box<Pattern<E, R>>,
        ty: E,
    },

    /// `x @ p`
    As {
        pos: Span,
        name: Name,
        pattern: Box<Pattern<E, R>>,
    },

    /// `x`
    Name { pos: Span, name: Name },

    /// A literal that must match exactly.
    Exact { literal: Literal },
}

/// Element names of the pattern variants, indexed by [`Pattern::tag`].
pub const PATTERN_TAGS: [&str; 7] = [
    "option",
    "deconstruct",
    "split",
    "typed",
    "as",
    "name",
    "exact",
];

impl<E, R> Pattern<E, R> {
    /// Declaration-order discriminator.
    pub fn tag(&self) -> u8 {
        match self {
            Pattern::Option { .. } => 0,
            Pattern::Deconstruct { .. } => 1,
            Pattern::Split { .. } => 2,
            Pattern::Typed { .. } => 3,
            Pattern::As { .. } => 4,
            Pattern::Name { .. } => 5,
            Pattern::Exact { .. } => 6,
        }
    }

    /// Names this pattern binds, left to right.
    pub fn binders(&self) -> Vec<Name> {
        let mut out = Vec::new();
        self.collect_binders(&mut out);
        out
    }

    fn collect_binders(&self, out: &mut Vec<Name>) {
        match self {
            Pattern::Option { alternatives, .. } => {
                // Every alternative binds the same names; the first one speaks for all.
                if let Some(first) = alternatives.first() {
                    first.collect_binders(out);
                }
            }
            Pattern::Deconstruct { argument, .. } => argument.collect_binders(out),
            Pattern::Split { fields, .. } => {
                for (_, pattern) in fields.sorted() {
                    pattern.collect_binders(out);
                }
            }
            Pattern::Typed { pattern, .. } => pattern.collect_binders(out),
            Pattern::As { name, pattern, .. } => {
                out.push(*name);
                pattern.collect_binders(out);
            }
            Pattern::Name { name, .. } => out.push(*name),
            Pattern::Exact { .. } => {}
        }
    }
}

impl<E, R> Spanned for Pattern<E, R> {
    fn span(&self) -> Span {
        match self {
            Pattern::Option { pos, .. }
            | Pattern::Deconstruct { pos, .. }
            | Pattern::Split { pos, .. }
            | Pattern::Typed { pos, .. }
            | Pattern::As { pos, .. }
            | Pattern::Name { pos, .. } => *pos,
            Pattern::Exact { literal } => literal.pos,
        }
    }
}
