//! Property tests for canonical identity, traversal and the codec.
//!
//! Trees are generated over a small name alphabet so that equal subtrees,
//! repeated keys and shared references show up often. The generators reach
//! every expression and pattern variant and whole scopes, so the laws below
//! hold for the complete tree family rather than a subset of it.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use lemma_ir::ast::{
    AbsKind, Assoc, Builder, BuilderKind, Case, Component, Compound, Def, Entry, Exp, Field,
    Fields, Fixity, Import, LitValue, Literal, NameMap, Pattern, Precedence, Proof, Relation,
    Scope, ScopeBuilder, ScopeId, Syntax, Truth, TruthKind, Visibility,
};
use lemma_ir::codec::{from_bytes, from_json, to_bytes, to_json};
use lemma_ir::traverse::{deep, Leaf, Traverse};
use lemma_ir::{canonical_hash, Expr, Name, Span};
use proptest::prelude::*;

type E = Expr<Name>;
type Binding = (Name, Field<E, Name>);

// -- Strategies --

fn span_strategy() -> impl Strategy<Value = Span> + Clone {
    (0u32..64, 0u32..8).prop_map(|(start, len)| Span::new(start, start + len))
}

fn name_strategy() -> impl Strategy<Value = Name> {
    (0u32..6).prop_map(Name::from_raw)
}

fn literal_strategy() -> impl Strategy<Value = Literal> {
    let float = prop_oneof![any::<f64>(), Just(f64::NAN), Just(-0.0), Just(f64::INFINITY)];
    let value = prop_oneof![
        (-4i64..4).prop_map(LitValue::Int),
        float.prop_map(LitValue::float),
        name_strategy().prop_map(LitValue::Str),
        any::<char>().prop_map(LitValue::Char),
    ];
    (span_strategy(), value).prop_map(|(pos, value)| Literal::new(pos, value))
}

fn leaf_strategy() -> impl Strategy<Value = E> {
    prop_oneof![
        (span_strategy(), name_strategy()).prop_map(|(pos, name)| Expr::sym(pos, name)),
        literal_strategy().prop_map(Expr::literal),
    ]
}

fn pattern_strategy(exp: BoxedStrategy<E>) -> BoxedStrategy<Pattern<E, Name>> {
    let leaf = prop_oneof![
        (span_strategy(), name_strategy()).prop_map(|(pos, name)| Pattern::Name { pos, name }),
        literal_strategy().prop_map(|literal| Pattern::Exact { literal }),
    ];
    leaf.prop_recursive(2, 8, 3, move |inner| {
        prop_oneof![
            (span_strategy(), prop::collection::vec(inner.clone(), 1..3))
                .prop_map(|(pos, alternatives)| Pattern::Option { pos, alternatives }),
            (span_strategy(), name_strategy(), inner.clone()).prop_map(
                |(pos, constructor, argument)| Pattern::Deconstruct {
                    pos,
                    constructor,
                    argument: Box::new(argument),
                }
            ),
            (
                span_strategy(),
                prop::collection::btree_map(name_strategy(), inner.clone(), 0..3),
                any::<bool>(),
            )
                .prop_map(|(pos, fields, strict)| Pattern::Split {
                    pos,
                    fields: fields.into_iter().collect(),
                    strict,
                }),
            (span_strategy(), inner.clone(), exp.clone()).prop_map(|(pos, pattern, ty)| {
                Pattern::Typed {
                    pos,
                    pattern: Box::new(pattern),
                    ty,
                }
            }),
            (span_strategy(), name_strategy(), inner).prop_map(|(pos, name, pattern)| {
                Pattern::As {
                    pos,
                    name,
                    pattern: Box::new(pattern),
                }
            }),
        ]
    })
    .boxed()
}

fn field_strategy(exp: BoxedStrategy<E>) -> impl Strategy<Value = Field<E, Name>> {
    (
        span_strategy(),
        any::<bool>(),
        pattern_strategy(exp.clone()),
        prop::option::of(exp),
    )
        .prop_map(|(pos, implicit, pattern, default)| Field {
            pos,
            entry: Entry {
                pos,
                implicit,
                pattern,
            },
            default,
        })
}

/// Distinct bindings in key order.
fn bindings_strategy(exp: BoxedStrategy<E>) -> impl Strategy<Value = Vec<Binding>> {
    prop::collection::btree_map(name_strategy(), field_strategy(exp), 0..3)
        .prop_map(|bindings| bindings.into_iter().collect::<Vec<_>>())
}

/// Fields whose declaration order is an arbitrary permutation of the keys.
fn fields_strategy(exp: BoxedStrategy<E>) -> BoxedStrategy<Fields<E, Name>> {
    bindings_strategy(exp)
        .prop_shuffle()
        .prop_map(|ordered| Fields::from_ordered(ordered).expect("keys are distinct"))
        .boxed()
}

fn fixity_strategy() -> impl Strategy<Value = Fixity> {
    prop::sample::select(vec![
        Fixity::Prefix,
        Fixity::Infix(Assoc::Left),
        Fixity::Infix(Assoc::Right),
        Fixity::Infix(Assoc::None),
        Fixity::Postfix,
    ])
}

fn builder_strategy(exp: BoxedStrategy<E>) -> impl Strategy<Value = Builder<E, Name>> {
    (
        span_strategy(),
        prop::sample::select(BuilderKind::ALL),
        prop::sample::select(Visibility::ALL),
        fields_strategy(exp.clone()),
        prop::collection::vec(exp.clone(), 0..2),
        exp,
    )
        .prop_map(|(pos, kind, visibility, params, supers, body)| Builder {
            pos,
            kind,
            visibility,
            params,
            supers,
            body,
        })
}

fn syntax_strategy(exp: BoxedStrategy<E>) -> impl Strategy<Value = Syntax<E>> {
    let precedence = (prop::sample::select(Relation::ALL), exp)
        .prop_map(|(relation, operator)| Precedence { relation, operator });
    (
        span_strategy(),
        fixity_strategy(),
        prop::collection::vec(precedence, 0..3),
    )
        .prop_map(|(pos, fixity, precedence)| Syntax {
            pos,
            fixity,
            precedence,
        })
}

fn truth_strategy(exp: BoxedStrategy<E>) -> impl Strategy<Value = Truth<E>> {
    (
        span_strategy(),
        prop::sample::select(TruthKind::ALL),
        prop::sample::select(Visibility::ALL),
        exp.clone(),
        prop::option::of(exp),
    )
        .prop_map(|(pos, kind, visibility, prop, proof)| Truth {
            pos,
            kind,
            visibility,
            prop,
            proof,
        })
}

fn def_strategy(exp: BoxedStrategy<E>) -> impl Strategy<Value = Def<E, Name>> {
    (
        span_strategy(),
        pattern_strategy(exp.clone()),
        prop::option::of(exp),
    )
        .prop_map(|(pos, pattern, init)| Def { pos, pattern, init })
}

fn scope_strategy(exp: BoxedStrategy<E>) -> BoxedStrategy<Scope<E, Name>> {
    let proof = (span_strategy(), name_strategy(), exp.clone()).prop_map(
        |(pos, theorem, body)| Proof { pos, theorem, body },
    );
    let import = (span_strategy(), prop::sample::select(Visibility::ALL), exp.clone()).prop_map(
        |(pos, visibility, target)| Import {
            pos,
            visibility,
            target,
        },
    );
    (
        span_strategy(),
        0u32..4,
        prop::collection::btree_map(name_strategy(), builder_strategy(exp.clone()), 0..2),
        prop::collection::btree_map(name_strategy(), syntax_strategy(exp.clone()), 0..2),
        prop::collection::btree_map(name_strategy(), truth_strategy(exp.clone()), 0..2),
        prop::collection::vec(
            (prop::sample::select(Visibility::ALL), def_strategy(exp)),
            0..3,
        ),
        prop::collection::vec(proof, 0..2),
        prop::collection::vec(import, 0..2),
    )
        .prop_map(
            |(pos, id, builders, syntax, truths, defs, proofs, imports)| {
                let mut scope = ScopeBuilder::new(pos, ScopeId(id));
                for (name, builder) in builders {
                    scope.builder(name, builder).expect("keys are distinct");
                }
                for (name, syntax) in syntax {
                    scope.syntax(name, syntax).expect("keys are distinct");
                }
                for (name, truth) in truths {
                    scope.truth(name, truth).expect("keys are distinct");
                }
                for (visibility, def) in defs {
                    scope.def(visibility, def);
                }
                for proof in proofs {
                    scope.proof(proof);
                }
                for import in imports {
                    scope.import(import);
                }
                scope.finish()
            },
        )
        .boxed()
}

fn expr_strategy() -> BoxedStrategy<E> {
    leaf_strategy()
        .prop_recursive(3, 32, 3, |inner| {
            let items = prop::collection::vec(inner.clone(), 0..3);
            let case = (
                span_strategy(),
                pattern_strategy(inner.clone()),
                inner.clone(),
            )
                .prop_map(|(pos, pattern, body)| Case { pos, pattern, body });
            let cases = prop::collection::vec(case, 1..3);
            let compound = prop_oneof![
                inner.clone().prop_map(Compound::Exp),
                def_strategy(inner.clone()).prop_map(Compound::Def),
            ];

            let plain = prop_oneof![
                (span_strategy(), items.clone()).prop_map(|(pos, items)| Expr::tuple(pos, items)),
                (span_strategy(), items.clone())
                    .prop_map(|(pos, items)| Expr::new(Exp::Seq { pos, items })),
                (span_strategy(), inner.clone(), inner.clone())
                    .prop_map(|(pos, f, a)| Expr::with(pos, f, a)),
                (
                    span_strategy(),
                    prop::collection::vec((name_strategy(), inner.clone()), 0..3),
                )
                    .prop_map(|(pos, fields)| Expr::record(pos, fields)),
                (
                    span_strategy(),
                    inner.clone(),
                    prop::collection::vec(name_strategy(), 0..3),
                )
                    .prop_map(|(pos, value, path)| Expr::new(Exp::Project {
                        pos,
                        value: Box::new(value),
                        path,
                    })),
                (span_strategy(), prop::collection::vec(compound, 0..3))
                    .prop_map(|(pos, items)| Expr::new(Exp::Compound { pos, items })),
                (span_strategy(), inner.clone(), inner.clone()).prop_map(|(pos, value, ty)| {
                    Expr::new(Exp::Ascribe {
                        pos,
                        value: Box::new(value),
                        ty: Box::new(ty),
                    })
                }),
                (span_strategy(), inner.clone(), inner.clone()).prop_map(
                    |(pos, value, proposition)| Expr::new(Exp::Where {
                        pos,
                        value: Box::new(value),
                        proposition: Box::new(proposition),
                    })
                ),
            ];

            let binding = prop_oneof![
                (span_strategy(), prop::sample::select(AbsKind::ALL), cases.clone())
                    .prop_map(|(pos, kind, cases)| Expr::abs(pos, kind, cases)),
                (span_strategy(), inner.clone(), cases).prop_map(|(pos, scrutinee, cases)| {
                    Expr::new(Exp::Match {
                        pos,
                        scrutinee: Box::new(scrutinee),
                        cases,
                    })
                }),
                (span_strategy(), fields_strategy(inner.clone()))
                    .prop_map(|(pos, fields)| Expr::new(Exp::RecordType { pos, fields })),
                (
                    span_strategy(),
                    prop::sample::select(BuilderKind::ALL),
                    prop::collection::vec(inner.clone(), 0..2),
                    fields_strategy(inner.clone()),
                    scope_strategy(inner),
                )
                    .prop_map(|(pos, kind, supers, params, body)| Expr::new(Exp::Anon {
                        pos,
                        kind,
                        supers,
                        params,
                        body: Box::new(body),
                    })),
            ];

            prop_oneof![2 => plain, 1 => binding]
        })
        .boxed()
}

fn component_strategy() -> impl Strategy<Value = Component<E, Name>> {
    (
        prop::option::of(name_strategy()),
        scope_strategy(expr_strategy()),
    )
        .prop_map(|(expected, scope)| Component { expected, scope })
}

/// One set of distinct bindings, listed twice in independent orders.
fn shuffled_bindings() -> impl Strategy<Value = (Vec<Binding>, Vec<Binding>)> {
    bindings_strategy(expr_strategy())
        .prop_filter("needs a binding", |bindings| !bindings.is_empty())
        .prop_flat_map(|bindings| (Just(bindings.clone()), Just(bindings).prop_shuffle()))
}

fn shift(name: Name) -> Name {
    Name::from_raw(name.raw() + 1)
}

fn double(name: Name) -> Name {
    Name::from_raw(name.raw() * 2)
}

// -- Canonical identity --

proptest! {
    #[test]
    fn record_identity_ignores_insertion_order(
        fields in prop::collection::btree_map(0u32..20, expr_strategy(), 0..6),
    ) {
        let fields: BTreeMap<u32, E> = fields;
        let entries = || fields.iter().map(|(k, v)| (Name::from_raw(*k), v.clone()));
        let forward = Expr::record(Span::DUMMY, entries());
        let backward = Expr::record(Span::DUMMY, entries().rev());

        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(canonical_hash(&forward), canonical_hash(&backward));
    }

    #[test]
    fn fields_identity_ignores_binding_insertion_order(
        (inserted, reinserted) in shuffled_bindings(),
    ) {
        // One fixed declaration order for both, unrelated to either insertion order.
        let order: Vec<Name> = inserted.iter().rev().map(|(name, _)| *name).collect();
        let first: NameMap<_> = inserted.iter().cloned().collect();
        let second: NameMap<_> = reinserted.into_iter().collect();

        let a = Fields::new(first, order.clone()).unwrap();
        let b = Fields::new(second, order).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.cmp(&b), Ordering::Equal);
        prop_assert_eq!(canonical_hash(&a), canonical_hash(&b));

        // The declaration order itself is part of the identity.
        if inserted.len() > 1 {
            let declared = Fields::from_ordered(inserted).unwrap();
            prop_assert!(declared != a);
        }
    }

    #[test]
    fn equal_trees_hash_equal(a in expr_strategy(), b in expr_strategy()) {
        if a == b {
            prop_assert_eq!(canonical_hash(&a), canonical_hash(&b));
        }
        prop_assert_eq!(canonical_hash(&a), canonical_hash(&a.clone()));
    }

    #[test]
    fn order_is_total(a in expr_strategy(), b in expr_strategy(), c in expr_strategy()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        prop_assert_eq!(a.cmp(&a), Ordering::Equal);
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn pattern_order_is_total(
        a in pattern_strategy(expr_strategy()),
        b in pattern_strategy(expr_strategy()),
    ) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        if a == b {
            prop_assert_eq!(canonical_hash(&a), canonical_hash(&b));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn equal_components_hash_equal(a in component_strategy(), b in component_strategy()) {
        if a == b {
            prop_assert_eq!(canonical_hash(&a), canonical_hash(&b));
        }
        prop_assert_eq!(canonical_hash(&a), canonical_hash(&a.clone()));
    }

    #[test]
    fn component_order_is_total(
        a in component_strategy(),
        b in component_strategy(),
        c in component_strategy(),
    ) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a.cmp(&b) == Ordering::Equal, a == b);
        prop_assert_eq!(a.cmp(&a), Ordering::Equal);
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }
}

// -- Traversal laws --

proptest! {
    #[test]
    fn map_identity(tree in expr_strategy()) {
        prop_assert_eq!(tree.clone().map_refs(|r| r), tree.clone());
        let node = tree.clone().into_node();
        prop_assert_eq!(node.clone().map(|e| e, |r| r), node);
    }

    #[test]
    fn map_composition(tree in expr_strategy()) {
        let twice = tree.clone().map_refs(shift).map_refs(double);
        let once = tree.map_refs(|r| double(shift(r)));
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn fold_sees_what_traverse_reaches(tree in expr_strategy()) {
        let node = tree.into_node();
        let folded = node.leaves();

        // Both leaf functions append to one log.
        let reached = RefCell::new(Vec::new());
        let rebuilt = node.clone().try_map(
            |e| {
                reached.borrow_mut().push(Leaf::Exp(e.clone()));
                Ok::<_, ()>(e)
            },
            |r| {
                reached.borrow_mut().push(Leaf::Ref(r));
                Ok(r)
            },
        );
        prop_assert_eq!(rebuilt, Ok(node));
        prop_assert_eq!(folded, reached.into_inner());
    }

    #[test]
    fn deep_refs_follow_the_map(tree in expr_strategy()) {
        let expected: Vec<Name> = tree.refs().into_iter().map(shift).collect();
        prop_assert_eq!(tree.map_refs(shift).refs(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn component_map_identity(component in component_strategy()) {
        prop_assert_eq!(component.clone().map(|e| e, |r| r), component.clone());
        prop_assert_eq!(deep::map_refs(component.clone(), |r| r), component);
    }

    #[test]
    fn component_fold_sees_what_traverse_reaches(component in component_strategy()) {
        let folded = component.leaves();

        let reached = RefCell::new(Vec::new());
        let rebuilt = component.clone().try_map(
            |e| {
                reached.borrow_mut().push(Leaf::Exp(e.clone()));
                Ok::<_, ()>(e)
            },
            |r| {
                reached.borrow_mut().push(Leaf::Ref(r));
                Ok(r)
            },
        );
        prop_assert_eq!(rebuilt, Ok(component));
        prop_assert_eq!(folded, reached.into_inner());
    }

    #[test]
    fn component_deep_refs_follow_the_map(component in component_strategy()) {
        let expected: Vec<Name> = deep::collect_refs(&component).into_iter().map(shift).collect();
        let shifted = deep::map_refs(component, shift);
        prop_assert_eq!(deep::collect_refs(&shifted), expected);
    }
}

// -- Codec --

proptest! {
    #[test]
    fn json_round_trip(tree in expr_strategy()) {
        let text = to_json(&tree).unwrap();
        let back: E = from_json(&text).unwrap();
        prop_assert_eq!(&back, &tree);
        prop_assert_eq!(canonical_hash(&back), canonical_hash(&tree));
    }

    #[test]
    fn bytes_round_trip(tree in expr_strategy()) {
        let bytes = to_bytes(&tree).unwrap();
        let back: E = from_bytes(&bytes).unwrap();
        prop_assert_eq!(back, tree);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn component_json_round_trip(component in component_strategy()) {
        let text = to_json(&component).unwrap();
        let back: Component<E, Name> = from_json(&text).unwrap();
        prop_assert_eq!(&back, &component);
        prop_assert_eq!(canonical_hash(&back), canonical_hash(&component));
    }

    #[test]
    fn component_bytes_round_trip(component in component_strategy()) {
        let bytes = to_bytes(&component).unwrap();
        let back: Component<E, Name> = from_bytes(&bytes).unwrap();
        prop_assert_eq!(back, component);
    }
}
