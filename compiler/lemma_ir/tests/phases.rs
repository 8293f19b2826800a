//! Moving a parsed tree to the resolved phase through the traversal API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use lemma_ir::ast::{
    Def, Exp, Pattern, Proof, ScopeBuilder, ScopeId, Truth, TruthKind, Visibility,
};
use lemma_ir::phase::{parsed, resolved};
use lemma_ir::traverse::deep;
use lemma_ir::{Expr, Name, Span, StringInterner, Symbol};
use pretty_assertions::assert_eq;

/// Names bound in the enclosing scope resolve to it; anything else fails.
fn resolver(bound: Vec<Name>, scope: ScopeId) -> impl FnMut(Name) -> Result<Symbol, Name> {
    move |name| {
        if bound.contains(&name) {
            Ok(Symbol::new(scope, name))
        } else {
            Err(name)
        }
    }
}

fn sample(interner: &StringInterner) -> parsed::Scope {
    let id = interner.intern("id");
    let x = interner.intern("x");
    let lemma = interner.intern("id_total");

    let mut builder = ScopeBuilder::new(Span::new(0, 80), ScopeId(1));
    builder.def(
        Visibility::Public,
        Def {
            pos: Span::new(0, 20),
            pattern: Pattern::Name {
                pos: Span::new(4, 6),
                name: id,
            },
            init: Some(Expr::abs(
                Span::new(9, 20),
                lemma_ir::ast::AbsKind::Lambda,
                vec![lemma_ir::ast::Case {
                    pos: Span::new(13, 19),
                    pattern: Pattern::Name {
                        pos: Span::new(13, 14),
                        name: x,
                    },
                    body: Expr::sym(Span::new(18, 19), x),
                }],
            )),
        },
    );
    builder
        .truth(
            lemma,
            Truth {
                pos: Span::new(21, 50),
                kind: TruthKind::Theorem,
                visibility: Visibility::Public,
                prop: Expr::with(
                    Span::new(30, 50),
                    Expr::sym(Span::new(30, 32), id),
                    Expr::sym(Span::new(33, 34), x),
                ),
                proof: None,
            },
        )
        .unwrap();
    builder.proof(Proof {
        pos: Span::new(51, 80),
        theorem: lemma,
        body: Expr::sym(Span::new(70, 72), id),
    });
    builder.finish()
}

#[test]
fn parsed_scope_resolves() {
    let interner = StringInterner::new();
    let scope = sample(&interner);
    let bound = vec![
        interner.intern("id"),
        interner.intern("x"),
        interner.intern("id_total"),
    ];

    let resolved: resolved::Scope =
        deep::traverse_refs(scope.clone(), resolver(bound, ScopeId(1))).unwrap();

    assert_eq!(
        deep::collect_refs(&resolved),
        deep::collect_refs(&scope)
            .into_iter()
            .map(|name| Symbol::new(ScopeId(1), name))
            .collect::<Vec<_>>()
    );
    assert_eq!(resolved.pos, scope.pos);
    assert_eq!(resolved.proofs[0].pos, Span::new(51, 80));
}

#[test]
fn unresolved_name_stops_the_walk() {
    let interner = StringInterner::new();
    let scope = sample(&interner);
    let only_id = vec![interner.intern("id")];

    let result = deep::traverse_refs(scope, resolver(only_id, ScopeId(1)));
    assert_eq!(result.err(), Some(interner.intern("x")));
}

#[test]
fn collecting_reports_every_unresolved_name() {
    let interner = StringInterner::new();
    let scope = sample(&interner);
    let only_id = vec![interner.intern("id")];

    let errors = deep::resolve_collecting(scope, resolver(only_id, ScopeId(1)), |&name| {
        Symbol::new(ScopeId(0), name)
    })
    .err()
    .unwrap_or_default();

    let x = interner.intern("x");
    let lemma = interner.intern("id_total");
    assert_eq!(errors, vec![x, x, lemma]);
}

#[test]
fn one_level_map_keeps_embedded_expressions_opaque() {
    let x = Name::from_raw(3);
    let tree: parsed::Exp = Exp::With {
        pos: Span::DUMMY,
        function: Box::new(Expr::sym(Span::DUMMY, x)),
        argument: Box::new(Expr::int(Span::DUMMY, 1)),
    };

    // Only the embedded expressions are slots here; the `Sym` inside them is
    // untouched unless the caller recurses.
    let sizes: Exp<usize, Name> = lemma_ir::traverse::Traverse::map(
        tree,
        |e: parsed::Expr| e.refs().len(),
        |r| r,
    );
    let Exp::With {
        function, argument, ..
    } = sizes
    else {
        panic!("map changed the variant");
    };
    assert_eq!((*function, *argument), (1, 0));
}
