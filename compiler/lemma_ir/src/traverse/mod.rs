//! Generic traversal over the two open slots of the tree family.
//!
//! Every node implements [`Traverse`], which exposes two primitives:
//!
//! - [`Traverse::traverse`] rebuilds the node, feeding each embedded
//!   expression and reference through a [`Rewrite`]. It stops at the first
//!   leaf that fails.
//! - [`Traverse::visit`] hands each embedded expression and reference to a
//!   [`Visit`] without rebuilding anything.
//!
//! `map`, `try_map`, `fold_map` and `leaves` are derived from those two.
//!
//! # Order
//!
//! Both primitives touch leaves in field-declaration order, depth first. Name
//! mappings are walked in key-sorted order; `Fields` in its declared order.
//! `traverse` and `visit` always agree on the order, so a fold observes the
//! leaves exactly as a traversal would reach them.
//!
//! Traversal is one level deep: an embedded expression is a leaf, whatever
//! it contains. The [`deep`] module builds recursive reference rewriting for
//! phase expressions on top of this.

use std::convert::Infallible;
use std::mem;

pub mod deep;
mod nodes;

/// Fallible rewriting of the two slots.
pub trait Rewrite<E, R> {
    type Exp;
    type Ref;
    type Error;

    fn exp(&mut self, exp: E) -> Result<Self::Exp, Self::Error>;

    fn reference(&mut self, reference: R) -> Result<Self::Ref, Self::Error>;
}

/// Read-only observation of the two slots.
pub trait Visit<E, R> {
    fn exp(&mut self, exp: &E);

    fn reference(&mut self, reference: &R);
}

/// A node whose expression slot `E` and reference slot `R` can be rewritten.
pub trait Traverse<E, R>: Sized {
    /// The same node shape with its slots replaced.
    type Output<E2, R2>;

    /// Rebuild the node through `rw`, short-circuiting on the first error.
    fn traverse<T: Rewrite<E, R>>(
        self,
        rw: &mut T,
    ) -> Result<Self::Output<T::Exp, T::Ref>, T::Error>;

    /// Show every slot value to `visitor`, in traversal order.
    fn visit<V: Visit<E, R>>(&self, visitor: &mut V);

    /// Rewrite every slot with a total function. Shape and positions are kept.
    fn map<E2, R2>(
        self,
        fe: impl FnMut(E) -> E2,
        fr: impl FnMut(R) -> R2,
    ) -> Self::Output<E2, R2> {
        let mut mapper = Mapper { fe, fr };
        match self.traverse(&mut mapper) {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }

    /// Rewrite every slot with a fallible function.
    fn try_map<E2, R2, Err>(
        self,
        fe: impl FnMut(E) -> Result<E2, Err>,
        fr: impl FnMut(R) -> Result<R2, Err>,
    ) -> Result<Self::Output<E2, R2>, Err> {
        self.traverse(&mut TryMapper { fe, fr })
    }

    /// Combine a value computed from every slot, left to right.
    fn fold_map<M: Monoid>(&self, fe: impl FnMut(&E) -> M, fr: impl FnMut(&R) -> M) -> M {
        let mut folder = Folder {
            acc: M::empty(),
            fe,
            fr,
        };
        self.visit(&mut folder);
        folder.acc
    }

    /// Every slot value, in traversal order.
    fn leaves(&self) -> Vec<Leaf<E, R>>
    where
        E: Clone,
        R: Clone,
    {
        self.fold_map(
            |exp| vec![Leaf::Exp(exp.clone())],
            |reference| vec![Leaf::Ref(reference.clone())],
        )
    }
}

/// One slot value seen by a traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Leaf<E, R> {
    Exp(E),
    Ref(R),
}

/// An associative combination with an identity.
pub trait Monoid {
    fn empty() -> Self;

    #[must_use]
    fn combine(self, other: Self) -> Self;
}

impl<T> Monoid for Vec<T> {
    fn empty() -> Self {
        Vec::new()
    }

    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Monoid for String {
    fn empty() -> Self {
        String::new()
    }

    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl Monoid for () {
    fn empty() -> Self {}

    fn combine(self, (): Self) -> Self {}
}

/// Additive counter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count(pub usize);

impl Monoid for Count {
    fn empty() -> Self {
        Count(0)
    }

    fn combine(self, other: Self) -> Self {
        Count(self.0 + other.0)
    }
}

struct Mapper<FE, FR> {
    fe: FE,
    fr: FR,
}

impl<E, R, E2, R2, FE, FR> Rewrite<E, R> for Mapper<FE, FR>
where
    FE: FnMut(E) -> E2,
    FR: FnMut(R) -> R2,
{
    type Exp = E2;
    type Ref = R2;
    type Error = Infallible;

    fn exp(&mut self, exp: E) -> Result<E2, Infallible> {
        Ok((self.fe)(exp))
    }

    fn reference(&mut self, reference: R) -> Result<R2, Infallible> {
        Ok((self.fr)(reference))
    }
}

struct TryMapper<FE, FR> {
    fe: FE,
    fr: FR,
}

impl<E, R, E2, R2, Err, FE, FR> Rewrite<E, R> for TryMapper<FE, FR>
where
    FE: FnMut(E) -> Result<E2, Err>,
    FR: FnMut(R) -> Result<R2, Err>,
{
    type Exp = E2;
    type Ref = R2;
    type Error = Err;

    fn exp(&mut self, exp: E) -> Result<E2, Err> {
        (self.fe)(exp)
    }

    fn reference(&mut self, reference: R) -> Result<R2, Err> {
        (self.fr)(reference)
    }
}

struct Folder<M, FE, FR> {
    acc: M,
    fe: FE,
    fr: FR,
}

impl<M: Monoid, FE, FR> Folder<M, FE, FR> {
    fn push(&mut self, value: M) {
        let acc = mem::replace(&mut self.acc, M::empty());
        self.acc = acc.combine(value);
    }
}

impl<E, R, M, FE, FR> Visit<E, R> for Folder<M, FE, FR>
where
    M: Monoid,
    FE: FnMut(&E) -> M,
    FR: FnMut(&R) -> M,
{
    fn exp(&mut self, exp: &E) {
        let value = (self.fe)(exp);
        self.push(value);
    }

    fn reference(&mut self, reference: &R) {
        let value = (self.fr)(reference);
        self.push(value);
    }
}
