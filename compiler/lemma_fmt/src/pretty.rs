//! `Pretty` for every node of the surface tree.
//!
//! Output is a function of the node and the two lookups in [`FormatCx`]
//! only. Name mappings print from their key-sorted listing, so two nodes
//! that compare equal print identically.

use lemma_ir::ast::{
    AbsKind, Builder, BuilderKind, Case, Component, Compound, Def, Entry, Exp, Field, Fields,
    Fixity, Import, LitValue, Literal, NameMap, Pattern, Precedence, Proof, Relation, Scope,
    Syntax, Truth, TruthKind, Visibility,
};
use lemma_ir::{Expr, Name, PositionLookup, Span, StringLookup, Symbol};

use crate::doc::{bracket, concat, group, hardline, join, line, nest, nil, text, Doc};

/// The external services a document may consult.
#[derive(Clone, Copy)]
pub struct FormatCx<'a> {
    pub symbols: &'a dyn StringLookup,
    pub positions: &'a dyn PositionLookup,
}

impl<'a> FormatCx<'a> {
    pub fn new(symbols: &'a dyn StringLookup, positions: &'a dyn PositionLookup) -> Self {
        FormatCx { symbols, positions }
    }

    pub fn name(&self, name: Name) -> Doc {
        text(self.symbols.lookup(name))
    }

    pub fn position(&self, span: Span) -> String {
        self.positions.describe(span)
    }
}

/// A node that can be turned into a display document.
pub trait Pretty {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc;
}

impl<T: Pretty + ?Sized> Pretty for &T {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        (**self).pretty(cx)
    }
}

impl<T: Pretty + ?Sized> Pretty for Box<T> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        (**self).pretty(cx)
    }
}

fn all<'a, T: Pretty + 'a>(items: impl IntoIterator<Item = &'a T>, cx: &FormatCx<'_>) -> Vec<Doc> {
    items.into_iter().map(|item| item.pretty(cx)).collect()
}

/// `key <sep> value` for every binding, in key order.
fn bindings<V>(
    map: &NameMap<V>,
    sep: &str,
    cx: &FormatCx<'_>,
    value: impl Fn(&V) -> Doc,
) -> Vec<Doc> {
    map.sorted()
        .into_iter()
        .map(|(key, v)| concat([cx.name(key), text(sep), value(v)]))
        .collect()
}

/// `head` followed by a braced, one-item-per-line body.
fn block(head: Doc, items: Vec<Doc>) -> Doc {
    if items.is_empty() {
        return concat([head, text(" {}")]);
    }
    concat([
        head,
        text(" {"),
        nest(concat(items.into_iter().map(|item| concat([hardline(), item, text(";")])))),
        hardline(),
        text("}"),
    ])
}

// Leaves

impl Pretty for Name {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        cx.name(*self)
    }
}

impl Pretty for Symbol {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        concat([cx.name(self.name), text(format!("#{}", self.scope.0))])
    }
}

impl Pretty for Span {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        text(cx.position(*self))
    }
}

impl Pretty for Literal {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        match self.value {
            LitValue::Int(value) => text(value.to_string()),
            LitValue::Float(_) => {
                let value = self.value.as_f64().unwrap_or_default();
                text(format!("{value:?}"))
            }
            LitValue::Str(name) => text(format!("{:?}", cx.symbols.lookup(name))),
            LitValue::Char(c) => text(format!("{c:?}")),
        }
    }
}

macro_rules! keyword_pretty {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Pretty for $ty {
                fn pretty(&self, _cx: &FormatCx<'_>) -> Doc {
                    text(self.as_str())
                }
            }
        )*
    };
}

keyword_pretty!(Visibility, TruthKind, BuilderKind, AbsKind, Fixity, Relation);

// Structural nodes

impl<E: Pretty, R: Pretty> Pretty for Entry<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        if self.implicit {
            concat([text("{"), self.pattern.pretty(cx), text("}")])
        } else {
            self.pattern.pretty(cx)
        }
    }
}

impl<E: Pretty, R: Pretty> Pretty for Field<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        match &self.default {
            Some(default) => concat([self.entry.pretty(cx), text(" = "), default.pretty(cx)]),
            None => self.entry.pretty(cx),
        }
    }
}

impl<E: Pretty, R: Pretty> Pretty for Fields<E, R> {
    /// Declared order, not key order: the order is part of the value.
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        let items = self
            .iter()
            .map(|(name, field)| concat([cx.name(name), text(": "), field.pretty(cx)]))
            .collect();
        bracket("(", items, ",", ")")
    }
}

impl<E: Pretty, R: Pretty> Pretty for Case<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        group(concat([
            self.pattern.pretty(cx),
            text(" =>"),
            nest(concat([line(), self.body.pretty(cx)])),
        ]))
    }
}

impl<E: Pretty, R: Pretty> Pretty for Def<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        let head = concat([text("def "), self.pattern.pretty(cx)]);
        match &self.init {
            Some(init) => group(concat([
                head,
                text(" ="),
                nest(concat([line(), init.pretty(cx)])),
            ])),
            None => head,
        }
    }
}

impl<E: Pretty> Pretty for Import<E> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        concat([
            self.visibility.pretty(cx),
            text(" import "),
            self.target.pretty(cx),
        ])
    }
}

impl<E: Pretty, R: Pretty> Pretty for Proof<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        group(concat([
            text("proof "),
            self.theorem.pretty(cx),
            text(" ="),
            nest(concat([line(), self.body.pretty(cx)])),
        ]))
    }
}

/// A truth prints with the name it is bound under.
fn truth_doc<E: Pretty>(name: Name, truth: &Truth<E>, cx: &FormatCx<'_>) -> Doc {
    let head = concat([
        truth.visibility.pretty(cx),
        text(" "),
        truth.kind.pretty(cx),
        text(" "),
        cx.name(name),
        text(" :"),
        nest(concat([line(), truth.prop.pretty(cx)])),
    ]);
    match &truth.proof {
        Some(proof) => group(concat([
            head,
            nest(concat([line(), text("by "), proof.pretty(cx)])),
        ])),
        None => group(head),
    }
}

fn supers_doc<E: Pretty>(supers: &[E], cx: &FormatCx<'_>) -> Doc {
    if supers.is_empty() {
        nil()
    } else {
        concat([
            text(" extends "),
            join(all(supers, cx), &text(", ")),
        ])
    }
}

/// A builder prints with the name it is bound under.
fn builder_doc<E: Pretty, R: Pretty>(
    name: Name,
    builder: &Builder<E, R>,
    cx: &FormatCx<'_>,
) -> Doc {
    group(concat([
        builder.visibility.pretty(cx),
        text(" "),
        builder.kind.pretty(cx),
        text(" "),
        cx.name(name),
        builder.params.pretty(cx),
        supers_doc(&builder.supers, cx),
        text(" ="),
        nest(concat([line(), builder.body.pretty(cx)])),
    ]))
}

impl<E: Pretty> Pretty for Precedence<E> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        concat([
            self.relation.pretty(cx),
            text("("),
            self.operator.pretty(cx),
            text(")"),
        ])
    }
}

/// Operator metadata prints with the operator it describes.
fn syntax_doc<E: Pretty>(name: Name, syntax: &Syntax<E>, cx: &FormatCx<'_>) -> Doc {
    let mut parts = vec![text("syntax "), cx.name(name), text(" "), syntax.fixity.pretty(cx)];
    for constraint in &syntax.precedence {
        parts.push(text(" "));
        parts.push(constraint.pretty(cx));
    }
    concat(parts)
}

impl<E: Pretty, R: Pretty> Pretty for Scope<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        let mut items = Vec::new();
        items.extend(self.imports.iter().map(|import| import.pretty(cx)));
        items.extend(
            self.syntax
                .sorted()
                .into_iter()
                .map(|(name, syntax)| syntax_doc(name, syntax, cx)),
        );
        items.extend(
            self.builders
                .sorted()
                .into_iter()
                .map(|(name, builder)| builder_doc(name, builder, cx)),
        );
        items.extend(self.all_defs().map(|(visibility, def)| {
            concat([visibility.pretty(cx), text(" "), def.pretty(cx)])
        }));
        items.extend(
            self.truths
                .sorted()
                .into_iter()
                .map(|(name, truth)| truth_doc(name, truth, cx)),
        );
        items.extend(self.proofs.iter().map(|proof| proof.pretty(cx)));
        block(text(format!("scope#{}", self.id.0)), items)
    }
}

impl<E: Pretty, R: Pretty> Pretty for Component<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        let head = match self.expected {
            Some(name) => concat([text("component "), cx.name(name), text(" ")]),
            None => text("component "),
        };
        concat([head, self.scope.pretty(cx)])
    }
}

// Sum types

impl<E: Pretty, R: Pretty> Pretty for Pattern<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        match self {
            Pattern::Option { alternatives, .. } => group(join(
                all(alternatives, cx),
                &concat([line(), text("| ")]),
            )),
            Pattern::Deconstruct {
                constructor,
                argument,
                ..
            } => concat([
                constructor.pretty(cx),
                text(" "),
                atomic_pattern(argument, cx),
            ]),
            Pattern::Split { fields, strict, .. } => {
                let mut items = bindings(fields, " = ", cx, |p| p.pretty(cx));
                if !strict {
                    items.push(text(".."));
                }
                bracket("{", items, ",", "}")
            }
            Pattern::Typed { pattern, ty, .. } => concat([
                atomic_pattern(pattern, cx),
                text(" : "),
                ty.pretty(cx),
            ]),
            Pattern::As { name, pattern, .. } => concat([
                cx.name(*name),
                text(" @ "),
                atomic_pattern(pattern, cx),
            ]),
            Pattern::Name { name, .. } => cx.name(*name),
            Pattern::Exact { literal } => literal.pretty(cx),
        }
    }
}

/// Parenthesize patterns that would otherwise bind looser than their context.
fn atomic_pattern<E: Pretty, R: Pretty>(pattern: &Pattern<E, R>, cx: &FormatCx<'_>) -> Doc {
    match pattern {
        Pattern::Option { .. } | Pattern::Deconstruct { .. } | Pattern::Typed { .. } => {
            concat([text("("), pattern.pretty(cx), text(")")])
        }
        Pattern::Split { .. }
        | Pattern::As { .. }
        | Pattern::Name { .. }
        | Pattern::Exact { .. } => pattern.pretty(cx),
    }
}

impl<E: Pretty, R: Pretty> Pretty for Compound<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        match self {
            Compound::Exp(exp) => exp.pretty(cx),
            Compound::Def(def) => def.pretty(cx),
        }
    }
}

fn cases_doc<E: Pretty, R: Pretty>(head: Doc, cases: &[Case<E, R>], cx: &FormatCx<'_>) -> Doc {
    if cases.is_empty() {
        return concat([head, text(" {}")]);
    }
    group(concat([
        head,
        text(" {"),
        nest(concat([
            line(),
            join(all(cases, cx), &concat([line(), text("| ")])),
        ])),
        line(),
        text("}"),
    ]))
}

impl<E: Pretty, R: Pretty> Pretty for Exp<E, R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        match self {
            Exp::Compound { items, .. } => bracket("{", all(items, cx), ";", "}"),
            Exp::Abs { kind, cases, .. } => cases_doc(kind.pretty(cx), cases, cx),
            Exp::Match {
                scrutinee, cases, ..
            } => cases_doc(
                concat([text("match "), scrutinee.pretty(cx)]),
                cases,
                cx,
            ),
            Exp::Ascribe { value, ty, .. } => group(concat([
                text("("),
                value.pretty(cx),
                text(" :"),
                nest(concat([line(), ty.pretty(cx)])),
                text(")"),
            ])),
            Exp::Seq { items, .. } => bracket("(", all(items, cx), "", ")"),
            Exp::Record { fields, .. } => {
                bracket("{", bindings(fields, " = ", cx, |e| e.pretty(cx)), ",", "}")
            }
            Exp::RecordType { fields, .. } => {
                let items = fields
                    .iter()
                    .map(|(name, field)| concat([cx.name(name), text(" : "), field.pretty(cx)]))
                    .collect();
                bracket("{", items, ",", "}")
            }
            Exp::Tuple { items, .. } => bracket("(", all(items, cx), ",", ")"),
            Exp::Project { value, path, .. } => {
                let mut parts = vec![value.pretty(cx)];
                for field in path {
                    parts.push(text("."));
                    parts.push(cx.name(*field));
                }
                concat(parts)
            }
            Exp::Sym { reference, .. } => reference.pretty(cx),
            Exp::With {
                function, argument, ..
            } => group(concat([
                function.pretty(cx),
                text(" with"),
                nest(concat([line(), argument.pretty(cx)])),
            ])),
            Exp::Where {
                value, proposition, ..
            } => group(concat([
                value.pretty(cx),
                nest(concat([line(), text("where "), proposition.pretty(cx)])),
            ])),
            Exp::Anon {
                kind,
                supers,
                params,
                body,
                ..
            } => concat([
                kind.pretty(cx),
                params.pretty(cx),
                supers_doc(supers, cx),
                text(" "),
                body.pretty(cx),
            ]),
            Exp::Literal(literal) => literal.pretty(cx),
        }
    }
}

impl<R: Pretty> Pretty for Expr<R> {
    fn pretty(&self, cx: &FormatCx<'_>) -> Doc {
        self.node().pretty(cx)
    }
}
