//! Canonical `Hash`: variant tag first, then fields in declaration order.
//!
//! Must stay in lockstep with `order.rs`: a field that takes part in `cmp`
//! takes part in `hash`, and `pos` takes part in neither.

use std::hash::{Hash, Hasher};

use crate::ast::{
    Builder, Case, Component, Compound, Def, Entry, Exp, Field, Fields, Import, NameMap, Pattern,
    Precedence, Proof, Scope, Syntax, Truth, VisibilityTable,
};
use crate::Expr;

macro_rules! hash_by_fields {
    ($([$($g:ident),*] $ty:ty { $($field:ident),+ }),* $(,)?) => {
        $(
            impl<$($g: Hash),*> Hash for $ty {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    $(self.$field.hash(state);)+
                }
            }
        )*
    };
}

hash_by_fields!(
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

impl<V: Hash> Hash for NameMap<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for (name, value) in self.sorted() {
            name.hash(state);
            value.hash(state);
        }
    }
}

impl<T: Hash> Hash for VisibilityTable<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.buckets().hash(state);
    }
}

impl<E: Hash, R: Hash> Hash for Fields<E, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bindings().hash(state);
        self.order().hash(state);
    }
}

impl<E: Hash, R: Hash> Hash for Pattern<E, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag());
        match self {
            Pattern::Option { alternatives, .. } => alternatives.hash(state),
            Pattern::Deconstruct {
                constructor,
                argument,
                ..
            } => {
                constructor.hash(state);
                argument.hash(state);
            }
            Pattern::Split { fields, strict, .. } => {
                fields.hash(state);
                strict.hash(state);
            }
            Pattern::Typed { pattern, ty, .. } => {
                pattern.hash(state);
                ty.hash(state);
            }
            Pattern::As { name, pattern, .. } => {
                name.hash(state);
                pattern.hash(state);
            }
            Pattern::Name { name, .. } => name.hash(state),
            Pattern::Exact { literal } => literal.hash(state),
        }
    }
}

impl<E: Hash, R: Hash> Hash for Compound<E, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag());
        match self {
            Compound::Exp(exp) => exp.hash(state),
            Compound::Def(def) => def.hash(state),
        }
    }
}

impl<E: Hash, R: Hash> Hash for Exp<E, R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.tag());
        match self {
            Exp::Compound { items, .. } => items.hash(state),
            Exp::Abs { kind, cases, .. } => {
                kind.hash(state);
                cases.hash(state);
            }
            Exp::Match {
                scrutinee, cases, ..
            } => {
                scrutinee.hash(state);
                cases.hash(state);
            }
            Exp::Ascribe { value, ty, .. } => {
                value.hash(state);
                ty.hash(state);
            }
            Exp::Seq { items, .. } | Exp::Tuple { items, .. } => items.hash(state),
            Exp::Record { fields, .. } => fields.hash(state),
            Exp::RecordType { fields, .. } => fields.hash(state),
            Exp::Project { value, path, .. } => {
                value.hash(state);
                path.hash(state);
            }
            Exp::Sym { reference, .. } => reference.hash(state),
            Exp::With {
                function, argument, ..
            } => {
                function.hash(state);
                argument.hash(state);
            }
            Exp::Where {
                value, proposition, ..
            } => {
                value.hash(state);
                proposition.hash(state);
            }
            Exp::Anon {
                kind,
                supers,
                params,
                body,
                ..
            } => {
                kind.hash(state);
                supers.hash(state);
                params.hash(state);
                body.hash(state);
            }
            Exp::Literal(literal) => literal.hash(state),
        }
    }
}

impl<R: Hash> Hash for Expr<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
