//! `Traverse` for every node of the tree family.

use super::{Rewrite, Traverse, Visit};
use crate::ast::{
    Builder, Case, Component, Compound, Def, Entry, Exp, Field, Fields, Import, NameMap, Pattern,
    Precedence, Proof, Scope, Syntax, Truth, VisibilityTable,
};

// Containers

impl<E, R, N: Traverse<E, R>> Traverse<E, R> for Vec<N> {
    type Output<E2, R2> = Vec<<N as Traverse<E, R>>::Output<E2, R2>>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        self.into_iter().map(|item| item.traverse(rw)).collect()
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        for item in self {
            item.visit(visitor);
        }
    }
}

impl<E, R, N: Traverse<E, R>> Traverse<E, R> for Box<N> {
    type Output<E2, R2> = Box<<N as Traverse<E, R>>::Output<E2, R2>>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        (*self).traverse(rw).map(Box::new)
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        (**self).visit(visitor);
    }
}

impl<E, R, N: Traverse<E, R>> Traverse<E, R> for NameMap<N> {
    type Output<E2, R2> = NameMap<<N as Traverse<E, R>>::Output<E2, R2>>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        self.try_map_values(|value| value.traverse(rw))
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        for (_, value) in self.sorted() {
            value.visit(visitor);
        }
    }
}

impl<E, R, N: Traverse<E, R>> Traverse<E, R> for VisibilityTable<N> {
    type Output<E2, R2> = VisibilityTable<<N as Traverse<E, R>>::Output<E2, R2>>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        self.try_map(|_, bucket| bucket.traverse(rw))
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        for (_, bucket) in self.iter() {
            bucket.visit(visitor);
        }
    }
}

// Leaf helpers

fn exps<E, R, T: Rewrite<E, R>>(items: Vec<E>, rw: &mut T) -> Result<Vec<T::Exp>, T::Error> {
    items.into_iter().map(|item| rw.exp(item)).collect()
}

fn opt_exp<E, R, T: Rewrite<E, R>>(
    item: Option<E>,
    rw: &mut T,
) -> Result<Option<T::Exp>, T::Error> {
    item.map(|item| rw.exp(item)).transpose()
}

fn boxed_exp<E, R, T: Rewrite<E, R>>(item: Box<E>, rw: &mut T) -> Result<Box<T::Exp>, T::Error> {
    rw.exp(*item).map(Box::new)
}

// Structural nodes

impl<E, R> Traverse<E, R> for Entry<E, R> {
    type Output<E2, R2> = Entry<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Entry {
            pos: self.pos,
            implicit: self.implicit,
            pattern: self.pattern.traverse(rw)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        self.pattern.visit(visitor);
    }
}

impl<E, R> Traverse<E, R> for Field<E, R> {
    type Output<E2, R2> = Field<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Field {
            pos: self.pos,
            entry: self.entry.traverse(rw)?,
            default: opt_exp(self.default, rw)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        self.entry.visit(visitor);
        if let Some(default) = &self.default {
            visitor.exp(default);
        }
    }
}

impl<E, R> Traverse<E, R> for Fields<E, R> {
    type Output<E2, R2> = Fields<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        let mut bindings = NameMap::new();
        let mut order = Vec::with_capacity(self.len());
        for (name, field) in self.into_ordered() {
            bindings.insert(name, field.traverse(rw)?);
            order.push(name);
        }
        Ok(Fields::from_parts_unchecked(bindings, order))
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        for (_, field) in self.iter() {
            field.visit(visitor);
        }
    }
}

impl<E, R> Traverse<E, R> for Case<E, R> {
    type Output<E2, R2> = Case<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Case {
            pos: self.pos,
            pattern: self.pattern.traverse(rw)?,
            body: rw.exp(self.body)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        self.pattern.visit(visitor);
        visitor.exp(&self.body);
    }
}

impl<E, R> Traverse<E, R> for Def<E, R> {
    type Output<E2, R2> = Def<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Def {
            pos: self.pos,
            pattern: self.pattern.traverse(rw)?,
            init: opt_exp(self.init, rw)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        self.pattern.visit(visitor);
        if let Some(init) = &self.init {
            visitor.exp(init);
        }
    }
}

impl<E, R> Traverse<E, R> for Import<E> {
    type Output<E2, R2> = Import<E2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Import {
            pos: self.pos,
            visibility: self.visibility,
            target: rw.exp(self.target)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        visitor.exp(&self.target);
    }
}

impl<E, R> Traverse<E, R> for Proof<E, R> {
    type Output<E2, R2> = Proof<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Proof {
            pos: self.pos,
            theorem: rw.reference(self.theorem)?,
            body: rw.exp(self.body)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        visitor.reference(&self.theorem);
        visitor.exp(&self.body);
    }
}

impl<E, R> Traverse<E, R> for Truth<E> {
    type Output<E2, R2> = Truth<E2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Truth {
            pos: self.pos,
            kind: self.kind,
            visibility: self.visibility,
            prop: rw.exp(self.prop)?,
            proof: opt_exp(self.proof, rw)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        visitor.exp(&self.prop);
        if let Some(proof) = &self.proof {
            visitor.exp(proof);
        }
    }
}

impl<E, R> Traverse<E, R> for Builder<E, R> {
    type Output<E2, R2> = Builder<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Builder {
            pos: self.pos,
            kind: self.kind,
            visibility: self.visibility,
            params: self.params.traverse(rw)?,
            supers: exps(self.supers, rw)?,
            body: rw.exp(self.body)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        self.params.visit(visitor);
        for sup in &self.supers {
            visitor.exp(sup);
        }
        visitor.exp(&self.body);
    }
}

impl<E, R> Traverse<E, R> for Precedence<E> {
    type Output<E2, R2> = Precedence<E2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Precedence {
            relation: self.relation,
            operator: rw.exp(self.operator)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        visitor.exp(&self.operator);
    }
}

impl<E, R> Traverse<E, R> for Syntax<E> {
    type Output<E2, R2> = Syntax<E2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Syntax {
            pos: self.pos,
            fixity: self.fixity,
            precedence: Traverse::<E, R>::traverse(self.precedence, rw)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        Traverse::<E, R>::visit(&self.precedence, visitor);
    }
}

impl<E, R> Traverse<E, R> for Scope<E, R> {
    type Output<E2, R2> = Scope<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Scope {
            pos: self.pos,
            id: self.id,
            builders: self.builders.traverse(rw)?,
            syntax: Traverse::<E, R>::traverse(self.syntax, rw)?,
            truths: Traverse::<E, R>::traverse(self.truths, rw)?,
            defs: self.defs.traverse(rw)?,
            proofs: self.proofs.traverse(rw)?,
            imports: Traverse::<E, R>::traverse(self.imports, rw)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        self.builders.visit(visitor);
        Traverse::<E, R>::visit(&self.syntax, visitor);
        Traverse::<E, R>::visit(&self.truths, visitor);
        self.defs.visit(visitor);
        self.proofs.visit(visitor);
        Traverse::<E, R>::visit(&self.imports, visitor);
    }
}

impl<E, R> Traverse<E, R> for Component<E, R> {
    type Output<E2, R2> = Component<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(Component {
            expected: self.expected,
            scope: self.scope.traverse(rw)?,
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        self.scope.visit(visitor);
    }
}

// Sum types

impl<E, R> Traverse<E, R> for Pattern<E, R> {
    type Output<E2, R2> = Pattern<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(match self {
            Pattern::Option { pos, alternatives } => Pattern::Option {
                pos,
                alternatives: alternatives.traverse(rw)?,
            },
            Pattern::Deconstruct {
                pos,
                constructor,
                argument,
            } => Pattern::Deconstruct {
                pos,
                constructor: rw.reference(constructor)?,
                argument: argument.traverse(rw)?,
            },
            Pattern::Split {
                pos,
                fields,
                strict,
            } => Pattern::Split {
                pos,
                fields: fields.traverse(rw)?,
                strict,
            },
            // Both halves contribute: the sub-pattern first, then the type.
            Pattern::Typed { pos, pattern, ty } => Pattern::Typed {
                pos,
                pattern: pattern.traverse(rw)?,
                ty: rw.exp(ty)?,
            },
            Pattern::As { pos, name, pattern } => Pattern::As {
                pos,
                name,
                pattern: pattern.traverse(rw)?,
            },
            Pattern::Name { pos, name } => Pattern::Name { pos, name },
            Pattern::Exact { literal } => Pattern::Exact { literal },
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        match self {
            Pattern::Option { alternatives, .. } => alternatives.visit(visitor),
            Pattern::Deconstruct {
                constructor,
                argument,
                ..
            } => {
                visitor.reference(constructor);
                argument.visit(visitor);
            }
            Pattern::Split { fields, .. } => fields.visit(visitor),
            Pattern::Typed { pattern, ty, .. } => {
                pattern.visit(visitor);
                visitor.exp(ty);
            }
            Pattern::As { pattern, .. } => pattern.visit(visitor),
            Pattern::Name { .. } | Pattern::Exact { .. } => {}
        }
    }
}

impl<E, R> Traverse<E, R> for Compound<E, R> {
    type Output<E2, R2> = Compound<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(match self {
            Compound::Exp(exp) => Compound::Exp(rw.exp(exp)?),
            Compound::Def(def) => Compound::Def(def.traverse(rw)?),
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        match self {
            Compound::Exp(exp) => visitor.exp(exp),
            Compound::Def(def) => def.visit(visitor),
        }
    }
}

impl<E, R> Traverse<E, R> for Exp<E, R> {
    type Output<E2, R2> = Exp<E2, R2>;

    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error> {
        Ok(match self {
            Exp::Compound { pos, items } => Exp::Compound {
                pos,
                items: items.traverse(rw)?,
            },
            Exp::Abs { pos, kind, cases } => Exp::Abs {
                pos,
                kind,
                cases: cases.traverse(rw)?,
            },
            Exp::Match {
                pos,
                scrutinee,
                cases,
            } => Exp::Match {
                pos,
                scrutinee: boxed_exp(scrutinee, rw)?,
                cases: cases.traverse(rw)?,
            },
            Exp::Ascribe { pos, value, ty } => Exp::Ascribe {
                pos,
                value: boxed_exp(value, rw)?,
                ty: boxed_exp(ty, rw)?,
            },
            Exp::Seq { pos, items } => Exp::Seq {
                pos,
                items: exps(items, rw)?,
            },
            Exp::Record { pos, fields } => Exp::Record {
                pos,
                fields: fields.try_map_values(|value| rw.exp(value))?,
            },
            Exp::RecordType { pos, fields } => Exp::RecordType {
                pos,
                fields: fields.traverse(rw)?,
            },
            Exp::Tuple { pos, items } => Exp::Tuple {
                pos,
                items: exps(items, rw)?,
            },
            Exp::Project { pos, value, path } => Exp::Project {
                pos,
                value: boxed_exp(value, rw)?,
                path,
            },
            Exp::Sym { pos, reference } => Exp::Sym {
                pos,
                reference: rw.reference(reference)?,
            },
            Exp::With {
                pos,
                function,
                argument,
            } => Exp::With {
                pos,
                function: boxed_exp(function, rw)?,
                argument: boxed_exp(argument, rw)?,
            },
            Exp::Where {
                pos,
                value,
                proposition,
            } => Exp::Where {
                pos,
                value: boxed_exp(value, rw)?,
                proposition: boxed_exp(proposition, rw)?,
            },
            Exp::Anon {
                pos,
                kind,
                supers,
                params,
                body,
            } => Exp::Anon {
                pos,
                kind,
                supers: exps(supers, rw)?,
                params: params.traverse(rw)?,
                body: body.traverse(rw)?,
            },
            Exp::Literal(literal) => Exp::Literal(literal),
        })
    }

    fn visit<V: Visit<E, R>>(&self, visitor: &mut V) {
        match self {
            Exp::Compound { items, .. } => items.visit(visitor),
            Exp::Abs { cases, .. } => cases.visit(visitor),
            Exp::Match {
                scrutinee, cases, ..
            } => {
                visitor.exp(scrutinee);
                cases.visit(visitor);
            }
            Exp::Ascribe { value, ty, .. } => {
                visitor.exp(value);
                visitor.exp(ty);
            }
            Exp::Seq { items, .. } | Exp::Tuple { items, .. } => {
                for item in items {
                    visitor.exp(item);
                }
            }
            Exp::Record { fields, .. } => {
                for (_, value) in fields.sorted() {
                    visitor.exp(value);
                }
            }
            Exp::RecordType { fields, .. } => fields.visit(visitor),
            Exp::Project { value, .. } => visitor.exp(value),
            Exp::Sym { reference, .. } => visitor.reference(reference),
            Exp::With {
                function, argument, ..
            } => {
                visitor.exp(function);
                visitor.exp(argument);
            }
            Exp::Where {
                value, proposition, ..
            } => {
                visitor.exp(value);
                visitor.exp(proposition);
            }
            Exp::Anon {
                supers,
                params,
                body,
                ..
            } => {
                for sup in supers {
                    visitor.exp(sup);
                }
                params.visit(visitor);
                body.visit(visitor);
            }
            Exp::Literal(_) => {}
        }
    }
}
