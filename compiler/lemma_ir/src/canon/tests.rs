use std::cmp::Ordering;
use std::hash::Hasher;

use pretty_assertions::assert_eq;
use rustc_hash::FxHasher;

use super::canonical_hash;
use crate::ast::{
    BuilderKind, Compound, Def, Exp, Fields, Literal, NameMap, Pattern, Scope, ScopeBuilder,
    ScopeId, Truth, TruthKind, Visibility,
};
use crate::{Expr, Name, Span};

type E = Expr<Name>;

fn n(raw: u32) -> Name {
    Name::from_raw(raw)
}

fn at(start: u32) -> Span {
    Span::new(start, start + 1)
}

fn lit(value: i64) -> E {
    Expr::int(Span::DUMMY, value)
}

#[test]
fn record_field_order_is_irrelevant() {
    let ab = Expr::record(Span::DUMMY, [(n(1), lit(1)), (n(2), lit(2))]);
    let ba = Expr::record(Span::DUMMY, [(n(2), lit(2)), (n(1), lit(1))]);

    assert_eq!(ab, ba);
    assert_eq!(ab.cmp(&ba), Ordering::Equal);
    assert_eq!(canonical_hash(&ab), canonical_hash(&ba));
}

#[test]
fn positions_do_not_participate() {
    let here = Expr::with(at(0), Expr::sym(at(1), n(1)), Expr::int(at(2), 7));
    let there = Expr::with(at(40), Expr::sym(at(50), n(1)), Expr::int(at(60), 7));

    assert_eq!(here, there);
    assert_eq!(canonical_hash(&here), canonical_hash(&there));
}

#[test]
fn different_variants_order_by_tag() {
    // Compound (tag 0) sorts before Literal (tag 13) regardless of payload.
    let compound: E = Expr::new(Exp::Compound {
        pos: Span::DUMMY,
        items: vec![Compound::Exp(lit(i64::MAX))],
    });
    let literal = lit(i64::MIN);

    assert_eq!(compound.cmp(&literal), Ordering::Less);
    assert_eq!(literal.cmp(&compound), Ordering::Greater);
    assert!(compound != literal);
}

#[test]
fn same_variant_compares_first_differing_field() {
    let f1 = Expr::with(Span::DUMMY, Expr::sym(Span::DUMMY, n(1)), lit(9));
    let f2 = Expr::with(Span::DUMMY, Expr::sym(Span::DUMMY, n(2)), lit(0));

    // The function differs, so the argument is never consulted.
    assert_eq!(f1.cmp(&f2), Ordering::Less);
}

#[test]
fn tag_is_part_of_the_hash() {
    let seq: E = Expr::new(Exp::Seq {
        pos: Span::DUMMY,
        items: vec![lit(1)],
    });
    let tuple = Expr::tuple(Span::DUMMY, vec![lit(1)]);

    assert!(seq != tuple);
    assert!(canonical_hash(&seq) != canonical_hash(&tuple));
}

// Fx has no per-process seed, so these values hold on every run and every
// 64-bit host. A change here means persisted fingerprints are invalidated.
#[test]
fn hash_values_are_pinned() {
    let sym = Expr::sym(at(3), n(7));
    let pair = Expr::tuple(at(0), vec![Expr::sym(at(1), n(1)), Expr::sym(at(2), n(2))]);
    let record = Expr::record(
        at(0),
        [(n(5), Expr::sym(at(1), n(1))), (n(1), Expr::sym(at(2), n(5)))],
    );

    assert_eq!(canonical_hash(&sym), 17_932_673_506_990_321_603);
    assert_eq!(canonical_hash(&pair), 5_779_831_280_120_333_394);
    assert_eq!(canonical_hash(&record), 2_010_520_550_143_335_314);
}

#[test]
fn hash_feeds_tag_then_fields() {
    let record = Expr::record(
        Span::DUMMY,
        [(n(5), Expr::sym(Span::DUMMY, n(1))), (n(1), Expr::sym(Span::DUMMY, n(5)))],
    );

    // Record tag, entry count, then entries by ascending key.
    let mut expected = FxHasher::default();
    expected.write_u8(5);
    expected.write_usize(2);
    for (key, target) in [(1, 5), (5, 1)] {
        expected.write_u32(key);
        expected.write_u8(9);
        expected.write_u32(target);
    }

    assert_eq!(canonical_hash(&record), expected.finish());
}

fn truth(prop: E) -> Truth<E> {
    Truth {
        pos: Span::DUMMY,
        kind: TruthKind::Theorem,
        visibility: Visibility::Public,
        prop,
        proof: None,
    }
}

fn scope_with_truths(order: &[u32]) -> Scope<E, Name> {
    let mut builder = ScopeBuilder::new(Span::DUMMY, ScopeId(1));
    for &raw in order {
        if builder.truth(n(raw), truth(lit(i64::from(raw)))).is_err() {
            panic!("distinct names rejected");
        }
    }
    builder.finish()
}

#[test]
fn scope_namespaces_ignore_insertion_order() {
    let forward = scope_with_truths(&[1, 2, 3, 4]);
    let backward = scope_with_truths(&[4, 3, 2, 1]);

    assert_eq!(forward, backward);
    assert_eq!(canonical_hash(&forward), canonical_hash(&backward));
}

#[test]
fn def_order_within_a_bucket_matters() {
    let def = |raw| Def::<E, Name> {
        pos: Span::DUMMY,
        pattern: Pattern::Name {
            pos: Span::DUMMY,
            name: n(raw),
        },
        init: None,
    };

    let mut first = Scope::empty(Span::DUMMY, ScopeId(0));
    first.defs[Visibility::Private] = vec![def(1), def(2)];
    let mut second = Scope::empty(Span::DUMMY, ScopeId(0));
    second.defs[Visibility::Private] = vec![def(2), def(1)];

    assert!(first != second);
}

#[test]
fn split_patterns_canonicalize_their_fields() {
    let name = |raw| Pattern::<E, Name>::Name {
        pos: Span::DUMMY,
        name: n(raw),
    };
    let mut left = NameMap::new();
    left.insert(n(1), name(10));
    left.insert(n(2), name(20));
    let right: NameMap<_> = [(n(2), name(20)), (n(1), name(10))].into_iter().collect();

    let a = Pattern::Split {
        pos: at(3),
        fields: left,
        strict: true,
    };
    let b = Pattern::Split {
        pos: at(9),
        fields: right,
        strict: true,
    };
    assert_eq!(a, b);
    assert_eq!(canonical_hash(&a), canonical_hash(&b));
    assert_eq!(a.binders(), vec![n(10), n(20)]);
}

#[test]
fn literal_identity_ignores_position() {
    let a = Literal::int(at(0), 5);
    let b = Literal::int(at(7), 5);
    assert_eq!(a, b);
    assert_eq!(canonical_hash(&a), canonical_hash(&b));
}

fn anon(kind: BuilderKind, scope_id: u32) -> E {
    Expr::new(Exp::Anon {
        pos: Span::DUMMY,
        kind,
        supers: vec![Expr::sym(Span::DUMMY, n(1))],
        params: Fields::empty(),
        body: Box::new(Scope::empty(Span::DUMMY, ScopeId(scope_id))),
    })
}

#[test]
fn same_variant_payloads_are_compared() {
    let where_ = |prop| {
        Expr::new(Exp::Where {
            pos: Span::DUMMY,
            value: Box::new(lit(1)),
            proposition: Box::new(lit(prop)),
        })
    };
    let ascribe = |ty| {
        Expr::new(Exp::Ascribe {
            pos: Span::DUMMY,
            value: Box::new(lit(1)),
            ty: Box::new(Expr::sym(Span::DUMMY, n(ty))),
        })
    };
    let project = |path: Vec<u32>| {
        Expr::new(Exp::Project {
            pos: Span::DUMMY,
            value: Box::new(lit(1)),
            path: path.into_iter().map(n).collect(),
        })
    };

    let pairs: Vec<(E, E)> = vec![
        (where_(1), where_(2)),
        (ascribe(1), ascribe(2)),
        (project(vec![1]), project(vec![1, 2])),
        (anon(BuilderKind::Module, 0), anon(BuilderKind::Class, 0)),
        (anon(BuilderKind::Class, 0), anon(BuilderKind::Class, 1)),
    ];
    for (low, high) in pairs {
        assert_eq!(low.cmp(&high), Ordering::Less);
        assert_eq!(high.cmp(&low), Ordering::Greater);
        assert!(low != high);
    }
}

#[test]
fn compound_items_compare_by_tag_then_payload() {
    let def = |raw| {
        Compound::<E, Name>::Def(Def {
            pos: Span::DUMMY,
            pattern: Pattern::Name {
                pos: Span::DUMMY,
                name: n(raw),
            },
            init: None,
        })
    };

    assert_eq!(def(1).cmp(&def(2)), Ordering::Less);
    assert!(def(1) != def(2));
    assert_eq!(Compound::Exp(lit(9)).cmp(&def(0)), Ordering::Less);
    assert_eq!(def(0).cmp(&Compound::Exp(lit(9))), Ordering::Greater);
}

#[test]
fn pattern_variants_compare_payloads_and_tags() {
    let name = |raw| Pattern::<E, Name>::Name {
        pos: Span::DUMMY,
        name: n(raw),
    };
    let alias = |raw| Pattern::As {
        pos: Span::DUMMY,
        name: n(raw),
        pattern: Box::new(name(0)),
    };
    let typed = |ty| Pattern::Typed {
        pos: Span::DUMMY,
        pattern: Box::new(name(0)),
        ty: lit(ty),
    };
    let option = |raws: &[u32]| Pattern::Option {
        pos: Span::DUMMY,
        alternatives: raws.iter().map(|&raw| name(raw)).collect(),
    };

    assert_eq!(alias(1).cmp(&alias(2)), Ordering::Less);
    assert_eq!(typed(1).cmp(&typed(2)), Ordering::Less);
    assert_eq!(option(&[1]).cmp(&option(&[1, 2])), Ordering::Less);
    assert!(alias(1) != alias(2));

    // Option (tag 0) before As (tag 4), whatever the payload.
    assert_eq!(option(&[9]).cmp(&alias(0)), Ordering::Less);
    assert_eq!(alias(0).cmp(&option(&[9])), Ordering::Greater);
}
