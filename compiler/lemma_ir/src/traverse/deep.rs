//! Recursive reference rewriting for phase expressions.
//!
//! A one-level traversal treats an embedded `Expr<R>` as an opaque leaf.
//! Moving a tree from one phase to the next needs the opposite: every
//! reference, however deeply nested, is rewritten and the expression slot
//! changes from `Expr<R>` to `Expr<R2>` along with it.

use tracing::trace;

use super::{Rewrite, Traverse, Visit};
use crate::Expr;

/// Rewrites references at every depth by recursing through embedded
/// expressions.
pub struct DeepRefs<'f, F> {
    f: &'f mut F,
}

impl<'f, F> DeepRefs<'f, F> {
    pub fn new(f: &'f mut F) -> Self {
        DeepRefs { f }
    }
}

impl<R, R2, Err, F> Rewrite<Expr<R>, R> for DeepRefs<'_, F>
where
    F: FnMut(R) -> Result<R2, Err>,
{
    type Exp = Expr<R2>;
    type Ref = R2;
    type Error = Err;

    fn exp(&mut self, exp: Expr<R>) -> Result<Expr<R2>, Err> {
        exp.0.traverse(self).map(Expr)
    }

    fn reference(&mut self, reference: R) -> Result<R2, Err> {
        (self.f)(reference)
    }
}

struct RefCollector<'a, R> {
    out: &'a mut Vec<R>,
}

impl<R: Clone> Visit<Expr<R>, R> for RefCollector<'_, R> {
    fn exp(&mut self, exp: &Expr<R>) {
        exp.0.visit(self);
    }

    fn reference(&mut self, reference: &R) {
        self.out.push(reference.clone());
    }
}

/// Rewrite every reference in `node`, stopping at the first failure.
pub fn traverse_refs<N, R, R2, Err>(
    node: N,
    mut f: impl FnMut(R) -> Result<R2, Err>,
) -> Result<N::Output<Expr<R2>, R2>, Err>
where
    N: Traverse<Expr<R>, R>,
{
    trace!("rewriting references");
    let out = node.traverse(&mut DeepRefs::new(&mut f));
    if out.is_err() {
        trace!("reference rewrite stopped at the first failure");
    }
    out
}

/// Rewrite every reference in `node` with a total function.
pub fn map_refs<N, R, R2>(node: N, mut f: impl FnMut(R) -> R2) -> N::Output<Expr<R2>, R2>
where
    N: Traverse<Expr<R>, R>,
{
    match traverse_refs(node, |r| Ok::<R2, std::convert::Infallible>(f(r))) {
        Ok(out) => out,
        Err(never) => match never {},
    }
}

/// Every reference in `node`, at any depth, in traversal order.
pub fn collect_refs<N, R>(node: &N) -> Vec<R>
where
    N: Traverse<Expr<R>, R>,
    R: Clone,
{
    let mut out = Vec::new();
    node.visit(&mut RefCollector { out: &mut out });
    trace!(count = out.len(), "collected references");
    out
}

/// Rewrite every reference in `node`, reporting every failure rather than
/// only the first.
///
/// A failed reference is replaced by `recover(&error)` so the walk can
/// continue. If anything failed the rebuilt tree is discarded and all
/// errors are returned in traversal order.
pub fn resolve_collecting<N, R, R2, Err>(
    node: N,
    mut resolve: impl FnMut(R) -> Result<R2, Err>,
    mut recover: impl FnMut(&Err) -> R2,
) -> Result<N::Output<Expr<R2>, R2>, Vec<Err>>
where
    N: Traverse<Expr<R>, R>,
{
    let mut errors = Vec::new();
    let out = map_refs(node, |reference| match resolve(reference) {
        Ok(resolved) => resolved,
        Err(err) => {
            let placeholder = recover(&err);
            errors.push(err);
            placeholder
        }
    });

    if errors.is_empty() {
        Ok(out)
    } else {
        trace!(failures = errors.len(), "reference resolution failed");
        Err(errors)
    }
}

impl<R> Expr<R> {
    /// Rewrite every reference in this expression, stopping at the first
    /// failure.
    pub fn traverse_refs<R2, Err>(
        self,
        mut f: impl FnMut(R) -> Result<R2, Err>,
    ) -> Result<Expr<R2>, Err> {
        trace!(tag = self.node().tag(), "rewriting expression references");
        DeepRefs::new(&mut f).exp(self)
    }

    pub fn map_refs<R2>(self, mut f: impl FnMut(R) -> R2) -> Expr<R2> {
        match self.traverse_refs(|r| Ok::<R2, std::convert::Infallible>(f(r))) {
            Ok(out) => out,
            Err(never) => match never {},
        }
    }

    /// Every reference in this expression, in traversal order.
    pub fn refs(&self) -> Vec<R>
    where
        R: Clone,
    {
        let mut out = Vec::new();
        RefCollector { out: &mut out }.exp(self);
        out
    }
}
