//! Canonical `Ord` (and the `PartialEq`/`Eq`/`PartialOrd` derived from it).

use std::cmp::Ordering;

use crate::ast::{
    Builder, Case, Component, Compound, Def, Entry, Exp, Field, Fields, Import, NameMap, Pattern,
    Precedence, Proof, Scope, Syntax, Truth, VisibilityTable,
};
use crate::Expr;

/// Derive `PartialEq`, `Eq` and `PartialOrd` from an `Ord` implementation.
macro_rules! canonical_eq {
    ($([$($g:ident),*] $ty:ty),* $(,)?) => {
        $(
            impl<$($g: Ord),*> PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.cmp(other) == Ordering::Equal
                }
            }

            impl<$($g: Ord),*> Eq for $ty {}

            impl<$($g: Ord),*> PartialOrd for $ty {
                fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                    Some(self.cmp(other))
                }
            }
        )*
    };
}

/// Lexicographic comparison of the listed fields, in the listed order.
macro_rules! ord_by_fields {
    ($([$($g:ident),*] $ty:ty { $($field:ident),+ }),* $(,)?) => {
        $(
            impl<$($g: Ord),*> Ord for $ty {
                fn cmp(&self, other: &Self) -> Ordering {
                    ($(&self.$field,)+).cmp(&($(&other.$field,)+))
                }
            }
        )*
    };
}

ord_by_fields!(
    [E, R] Entry<E, R> { implicit, pattern },
    [E, R] Field<E, R> { entry, default },
    [E, R] Case<E, R> { pattern, body },
    [E, R] Def<E, R> { pattern, init },
    [E] Import<E> { visibility, target },
    [E, R] Proof<E, R> { theorem, body },
    [E] Truth<E> { kind, visibility, prop, proof },
    [E, R] Builder<E, R> { kind, visibility, params, supers, body },
    [E] Precedence<E> { relation, operator },
    [E] Syntax<E> { fixity, precedence },
    [E, R] Scope<E, R> { id, builders, syntax, truths, defs, proofs, imports },
    [E, R] Component<E, R> { expected, scope },
);

canonical_eq!(
    [E, R] Entry<E, R>,
    [E, R] Field<E, R>,
    [E, R] Case<E, R>,
    [E, R] Def<E, R>,
    [E] Import<E>,
    [E, R] Proof<E, R>,
    [E] Truth<E>,
    [E, R] Builder<E, R>,
    [E] Precedence<E>,
    [E] Syntax<E>,
    [E, R] Scope<E, R>,
    [E, R] Component<E, R>,
    [V] NameMap<V>,
    [T] VisibilityTable<T>,
    [E, R] Fields<E, R>,
    [E, R] Pattern<E, R>,
    [E, R] Compound<E, R>,
    [E, R] Exp<E, R>,
    [R] Expr<R>,
);

impl<V: Ord> Ord for NameMap<V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted().cmp(&other.sorted())
    }
}

impl<T: Ord> Ord for VisibilityTable<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.buckets().cmp(other.buckets())
    }
}

impl<E: Ord, R: Ord> Ord for Fields<E, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.bindings(), self.order()).cmp(&(other.bindings(), other.order()))
    }
}

impl<E: Ord, R: Ord> Ord for Pattern<E, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                Pattern::Option { alternatives: a, .. },
                Pattern::Option { alternatives: b, .. },
            ) => a.cmp(b),
            (
                Pattern::Deconstruct {
                    constructor: c1,
                    argument: a1,
                    ..
                },
                Pattern::Deconstruct {
                    constructor: c2,
                    argument: a2,
                    ..
                },
            ) => (c1, a1).cmp(&(c2, a2)),
            (
                Pattern::Split {
                    fields: f1,
                    strict: s1,
                    ..
                },
                Pattern::Split {
                    fields: f2,
                    strict: s2,
                    ..
                },
            ) => (f1, s1).cmp(&(f2, s2)),
            (
                Pattern::Typed {
                    pattern: p1, ty: t1, ..
                },
                Pattern::Typed {
                    pattern: p2, ty: t2, ..
                },
            ) => (p1, t1).cmp(&(p2, t2)),
            (
                Pattern::As {
                    name: n1,
                    pattern: p1,
                    ..
                },
                Pattern::As {
                    name: n2,
                    pattern: p2,
                    ..
                },
            ) => (n1, p1).cmp(&(n2, p2)),
            (Pattern::Name { name: n1, .. }, Pattern::Name { name: n2, .. }) => n1.cmp(n2),
            (Pattern::Exact { literal: l1 }, Pattern::Exact { literal: l2 }) => l1.cmp(l2),
            // Mismatched variants. No wildcard on the left, so a new variant
            // without a same-variant arm above fails to compile.
            (
                Pattern::Option { .. }
                | Pattern::Deconstruct { .. }
                | Pattern::Split { .. }
                | Pattern::Typed { .. }
                | Pattern::As { .. }
                | Pattern::Name { .. }
                | Pattern::Exact { .. },
                _,
            ) => self.tag().cmp(&other.tag()),
        }
    }
}

impl<E: Ord, R: Ord> Ord for Compound<E, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Compound::Exp(a), Compound::Exp(b)) => a.cmp(b),
            (Compound::Def(a), Compound::Def(b)) => a.cmp(b),
            (Compound::Exp(_) | Compound::Def(_), _) => self.tag().cmp(&other.tag()),
        }
    }
}

impl<E: Ord, R: Ord> Ord for Exp<E, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Exp::Compound { items: a, .. }, Exp::Compound { items: b, .. }) => a.cmp(b),
            (
                Exp::Abs {
                    kind: k1,
                    cases: c1,
                    ..
                },
                Exp::Abs {
                    kind: k2,
                    cases: c2,
                    ..
                },
            ) => (k1, c1).cmp(&(k2, c2)),
            (
                Exp::Match {
                    scrutinee: s1,
                    cases: c1,
                    ..
                },
                Exp::Match {
                    scrutinee: s2,
                    cases: c2,
                    ..
                },
            ) => (s1, c1).cmp(&(s2, c2)),
            (
                Exp::Ascribe {
                    value: v1, ty: t1, ..
                },
                Exp::Ascribe {
                    value: v2, ty: t2, ..
                },
            ) => (v1, t1).cmp(&(v2, t2)),
            (Exp::Seq { items: a, .. }, Exp::Seq { items: b, .. })
            | (Exp::Tuple { items: a, .. }, Exp::Tuple { items: b, .. }) => a.cmp(b),
            (Exp::Record { fields: a, .. }, Exp::Record { fields: b, .. }) => a.cmp(b),
            (Exp::RecordType { fields: a, .. }, Exp::RecordType { fields: b, .. }) => a.cmp(b),
            (
                Exp::Project {
                    value: v1,
                    path: p1,
                    ..
                },
                Exp::Project {
                    value: v2,
                    path: p2,
                    ..
                },
            ) => (v1, p1).cmp(&(v2, p2)),
            (Exp::Sym { reference: a, .. }, Exp::Sym { reference: b, .. }) => a.cmp(b),
            (
                Exp::With {
                    function: f1,
                    argument: a1,
                    ..
                },
                Exp::With {
                    function: f2,
                    argument: a2,
                    ..
                },
            ) => (f1, a1).cmp(&(f2, a2)),
            (
                Exp::Where {
                    value: v1,
                    proposition: p1,
                    ..
                },
                Exp::Where {
                    value: v2,
                    proposition: p2,
                    ..
                },
            ) => (v1, p1).cmp(&(v2, p2)),
            (
                Exp::Anon {
                    kind: k1,
                    supers: s1,
                    params: p1,
                    body: b1,
                    ..
                },
                Exp::Anon {
                    kind: k2,
                    supers: s2,
                    params: p2,
                    body: b2,
                    ..
                },
            ) => (k1, s1, p1, b1).cmp(&(k2, s2, p2, b2)),
            (Exp::Literal(a), Exp::Literal(b)) => a.cmp(b),
            (
                Exp::Compound { .. }
                | Exp::Abs { .. }
                | Exp::Match { .. }
                | Exp::Ascribe { .. }
                | Exp::Seq { .. }
                | Exp::Record { .. }
                | Exp::RecordType { .. }
                | Exp::Tuple { .. }
                | Exp::Project { .. }
                | Exp::Sym { .. }
                | Exp::With { .. }
                | Exp::Where { .. }
                | Exp::Anon { .. }
                | Exp::Literal(_),
                _,
            ) => self.tag().cmp(&other.tag()),
        }
    }
}

impl<R: Ord> Ord for Expr<R> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}
