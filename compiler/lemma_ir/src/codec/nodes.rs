//! `Encode`/`Decode` for every node, for spans, names and symbols.

use super::{CodecError, Decode, Element, Encode};
use crate::ast::{
    AbsKind, Builder, BuilderKind, Case, Component, Compound, Def, Entry, Exp, Field, Fields,
    Fixity, Import, LitValue, Literal, NameMap, Pattern, Precedence, Proof, Relation, Scope,
    ScopeId, Syntax, Truth, TruthKind, Visibility, VisibilityTable, COMPOUND_TAGS, EXP_TAGS,
    PATTERN_TAGS,
};
use crate::{Expr, Name, Span, Symbol};

// Field helpers

fn slot(name: &'static str, value: &impl Encode) -> Element {
    Element::new(name).with_child(value.encode())
}

fn list<'a, T: Encode + 'a>(name: &'static str, items: impl IntoIterator<Item = &'a T>) -> Element {
    Element::new(name).with_children(items.into_iter().map(Encode::encode))
}

fn opt_slot<T: Encode>(name: &'static str, value: Option<&T>) -> Option<Element> {
    value.map(|value| slot(name, value))
}

fn map_slot<V: Encode>(name: &'static str, map: &NameMap<V>) -> Element {
    Element::new(name).with_children(map.sorted().into_iter().map(|(key, value)| {
        Element::new("entry")
            .with_attr("key", key.raw())
            .with_child(value.encode())
    }))
}

fn from_slot<T: Decode>(element: &Element, name: &'static str) -> Result<T, CodecError> {
    T::decode(element.child(name)?.only_child()?)
}

fn from_list<T: Decode>(element: &Element, name: &'static str) -> Result<Vec<T>, CodecError> {
    element.child(name)?.children.iter().map(T::decode).collect()
}

fn from_opt_slot<T: Decode>(element: &Element, name: &str) -> Result<Option<T>, CodecError> {
    element
        .find_child(name)
        .map(|wrapper| wrapper.only_child().and_then(T::decode))
        .transpose()
}

fn from_map_slot<V: Decode>(
    element: &Element,
    name: &'static str,
) -> Result<NameMap<V>, CodecError> {
    let mut map = NameMap::new();
    for entry in &element.child(name)?.children {
        entry.check_name("entry")?;
        let key = entry.name_attr("key")?;
        let value = V::decode(entry.only_child()?)?;
        if map.try_insert(key, value).is_err() {
            return Err(CodecError::DuplicateKey(key));
        }
    }
    Ok(map)
}

fn pos_of(element: &Element) -> Result<Span, CodecError> {
    Span::decode(element.child("pos")?)
}

/// Resolve an element name to its variant tag.
fn tag_of(element: &Element, table: &[&str], kind: &'static str) -> Result<u8, CodecError> {
    table
        .iter()
        .position(|name| *name == element.name)
        .and_then(|tag| u8::try_from(tag).ok())
        .ok_or_else(|| CodecError::UnknownElement {
            expected: kind,
            found: element.name.clone(),
        })
}

fn unknown(element: &Element, kind: &'static str) -> CodecError {
    CodecError::UnknownElement {
        expected: kind,
        found: element.name.clone(),
    }
}

// Leaves

impl Encode for Span {
    fn encode(&self) -> Element {
        Element::new("pos")
            .with_attr("start", self.start)
            .with_attr("end", self.end)
    }
}

impl Decode for Span {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("pos")?;
        Ok(Span::new(
            element.parse_attr("start")?,
            element.parse_attr("end")?,
        ))
    }
}

impl Encode for Name {
    fn encode(&self) -> Element {
        Element::new("name").with_attr("id", self.raw())
    }
}

impl Decode for Name {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("name")?;
        element.name_attr("id")
    }
}

impl Encode for Symbol {
    fn encode(&self) -> Element {
        Element::new("symbol")
            .with_attr("scope", self.scope.0)
            .with_attr("name", self.name.raw())
    }
}

impl Decode for Symbol {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("symbol")?;
        Ok(Symbol::new(
            ScopeId(element.parse_attr("scope")?),
            element.name_attr("name")?,
        ))
    }
}

impl Encode for Literal {
    fn encode(&self) -> Element {
        let (kind, value) = match self.value {
            LitValue::Int(value) => ("int", value.to_string()),
            LitValue::Float(bits) => ("float", bits.to_string()),
            LitValue::Str(name) => ("str", name.raw().to_string()),
            LitValue::Char(c) => ("char", u32::from(c).to_string()),
        };
        Element::new("literal")
            .with_attr("kind", kind)
            .with_child(self.pos.encode())
            .with_text(value)
    }
}

impl Decode for Literal {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("literal")?;
        let raw = element.text.as_deref().unwrap_or_default();
        let bad = || element.bad_attr("value", raw);
        let value = match element.attr("kind")? {
            "int" => LitValue::Int(raw.parse().map_err(|_| bad())?),
            "float" => LitValue::Float(raw.parse().map_err(|_| bad())?),
            "str" => LitValue::Str(Name::from_raw(raw.parse().map_err(|_| bad())?)),
            "char" => {
                let code: u32 = raw.parse().map_err(|_| bad())?;
                LitValue::Char(char::from_u32(code).ok_or_else(bad)?)
            }
            other => return Err(element.bad_attr("kind", other)),
        };
        Ok(Literal::new(pos_of(element)?, value))
    }
}

// Structural nodes

impl<E: Encode, R: Encode> Encode for Entry<E, R> {
    fn encode(&self) -> Element {
        Element::new("entry")
            .with_attr("implicit", self.implicit)
            .with_child(self.pos.encode())
            .with_child(slot("pattern", &self.pattern))
    }
}

impl<E: Decode, R: Decode> Decode for Entry<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("entry")?;
        Ok(Entry {
            pos: pos_of(element)?,
            implicit: element.parse_attr("implicit")?,
            pattern: from_slot(element, "pattern")?,
        })
    }
}

impl<E: Encode, R: Encode> Encode for Field<E, R> {
    fn encode(&self) -> Element {
        Element::new("field")
            .with_child(self.pos.encode())
            .with_child(self.entry.encode())
            .with_children(opt_slot("default", self.default.as_ref()))
    }
}

impl<E: Decode, R: Decode> Decode for Field<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("field")?;
        Ok(Field {
            pos: pos_of(element)?,
            entry: Entry::decode(element.child("entry")?)?,
            default: from_opt_slot(element, "default")?,
        })
    }
}

impl<E: Encode, R: Encode> Encode for Fields<E, R> {
    fn encode(&self) -> Element {
        Element::new("fields")
            .with_child(map_slot("bindings", self.bindings()))
            .with_child(Element::new("order").with_children(
                self.order()
                    .iter()
                    .map(|name| Element::new("key").with_attr("id", name.raw())),
            ))
    }
}

impl<E: Decode, R: Decode> Decode for Fields<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("fields")?;
        let bindings = from_map_slot(element, "bindings")?;
        let order = element
            .child("order")?
            .children
            .iter()
            .map(|key| {
                key.check_name("key")?;
                key.name_attr("id")
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Fields::new(bindings, order)?)
    }
}

impl<E: Encode, R: Encode> Encode for Case<E, R> {
    fn encode(&self) -> Element {
        Element::new("case")
            .with_child(self.pos.encode())
            .with_child(slot("pattern", &self.pattern))
            .with_child(slot("body", &self.body))
    }
}

impl<E: Decode, R: Decode> Decode for Case<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("case")?;
        Ok(Case {
            pos: pos_of(element)?,
            pattern: from_slot(element, "pattern")?,
            body: from_slot(element, "body")?,
        })
    }
}

impl<E: Encode, R: Encode> Encode for Def<E, R> {
    fn encode(&self) -> Element {
        Element::new("def")
            .with_child(self.pos.encode())
            .with_child(slot("pattern", &self.pattern))
            .with_children(opt_slot("init", self.init.as_ref()))
    }
}

impl<E: Decode, R: Decode> Decode for Def<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("def")?;
        Ok(Def {
            pos: pos_of(element)?,
            pattern: from_slot(element, "pattern")?,
            init: from_opt_slot(element, "init")?,
        })
    }
}

impl<E: Encode> Encode for Import<E> {
    fn encode(&self) -> Element {
        Element::new("import")
            .with_attr("visibility", self.visibility)
            .with_child(self.pos.encode())
            .with_child(slot("target", &self.target))
    }
}

impl<E: Decode> Decode for Import<E> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("import")?;
        Ok(Import {
            pos: pos_of(element)?,
            visibility: element.keyword_attr("visibility", Visibility::parse)?,
            target: from_slot(element, "target")?,
        })
    }
}

impl<E: Encode, R: Encode> Encode for Proof<E, R> {
    fn encode(&self) -> Element {
        Element::new("proof")
            .with_child(self.pos.encode())
            .with_child(slot("theorem", &self.theorem))
            .with_child(slot("body", &self.body))
    }
}

impl<E: Decode, R: Decode> Decode for Proof<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("proof")?;
        Ok(Proof {
            pos: pos_of(element)?,
            theorem: from_slot(element, "theorem")?,
            body: from_slot(element, "body")?,
        })
    }
}

impl<E: Encode> Encode for Truth<E> {
    fn encode(&self) -> Element {
        Element::new("truth")
            .with_attr("kind", self.kind)
            .with_attr("visibility", self.visibility)
            .with_child(self.pos.encode())
            .with_child(slot("prop", &self.prop))
            .with_children(opt_slot("proof", self.proof.as_ref()))
    }
}

impl<E: Decode> Decode for Truth<E> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("truth")?;
        Ok(Truth {
            pos: pos_of(element)?,
            kind: element.keyword_attr("kind", TruthKind::parse)?,
            visibility: element.keyword_attr("visibility", Visibility::parse)?,
            prop: from_slot(element, "prop")?,
            proof: from_opt_slot(element, "proof")?,
        })
    }
}

impl<E: Encode, R: Encode> Encode for Builder<E, R> {
    fn encode(&self) -> Element {
        Element::new("builder")
            .with_attr("kind", self.kind)
            .with_attr("visibility", self.visibility)
            .with_child(self.pos.encode())
            .with_child(slot("params", &self.params))
            .with_child(list("supers", &self.supers))
            .with_child(slot("body", &self.body))
    }
}

impl<E: Decode, R: Decode> Decode for Builder<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("builder")?;
        Ok(Builder {
            pos: pos_of(element)?,
            kind: element.keyword_attr("kind", BuilderKind::parse)?,
            visibility: element.keyword_attr("visibility", Visibility::parse)?,
            params: from_slot(element, "params")?,
            supers: from_list(element, "supers")?,
            body: from_slot(element, "body")?,
        })
    }
}

impl<E: Encode> Encode for Precedence<E> {
    fn encode(&self) -> Element {
        Element::new("precedence")
            .with_attr("relation", self.relation)
            .with_child(slot("operator", &self.operator))
    }
}

impl<E: Decode> Decode for Precedence<E> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("precedence")?;
        Ok(Precedence {
            relation: element.keyword_attr("relation", Relation::parse)?,
            operator: from_slot(element, "operator")?,
        })
    }
}

impl<E: Encode> Encode for Syntax<E> {
    fn encode(&self) -> Element {
        Element::new("syntax")
            .with_attr("fixity", self.fixity)
            .with_child(self.pos.encode())
            .with_child(list("constraints", &self.precedence))
    }
}

impl<E: Decode> Decode for Syntax<E> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("syntax")?;
        Ok(Syntax {
            pos: pos_of(element)?,
            fixity: element.keyword_attr("fixity", Fixity::parse)?,
            precedence: from_list(element, "constraints")?,
        })
    }
}

impl<E: Encode, R: Encode> Encode for Scope<E, R> {
    fn encode(&self) -> Element {
        let defs = Element::new("defs").with_children(
            self.defs
                .iter()
                .map(|(visibility, defs)| list(visibility.as_str(), defs)),
        );
        Element::new("scope")
            .with_attr("id", self.id.0)
            .with_child(self.pos.encode())
            .with_child(map_slot("builders", &self.builders))
            .with_child(map_slot("syntax", &self.syntax))
            .with_child(map_slot("truths", &self.truths))
            .with_child(defs)
            .with_child(list("proofs", &self.proofs))
            .with_child(list("imports", &self.imports))
    }
}

impl<E: Decode, R: Decode> Decode for Scope<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("scope")?;
        let buckets = element
            .child("defs")?
            .children
            .iter()
            .map(|bucket| -> Result<_, CodecError> {
                let visibility = Visibility::parse(&bucket.name)
                    .ok_or_else(|| unknown(bucket, "a visibility bucket"))?;
                let defs = bucket
                    .children
                    .iter()
                    .map(Def::decode)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((visibility, defs))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Scope {
            pos: pos_of(element)?,
            id: ScopeId(element.parse_attr("id")?),
            builders: from_map_slot(element, "builders")?,
            syntax: from_map_slot(element, "syntax")?,
            truths: from_map_slot(element, "truths")?,
            defs: VisibilityTable::from_entries(buckets)?,
            proofs: from_list(element, "proofs")?,
            imports: from_list(element, "imports")?,
        })
    }
}

impl<E: Encode, R: Encode> Encode for Component<E, R> {
    fn encode(&self) -> Element {
        let component = Element::new("component");
        let component = match self.expected {
            Some(name) => component.with_attr("expected", name.raw()),
            None => component,
        };
        component.with_child(self.scope.encode())
    }
}

impl<E: Decode, R: Decode> Decode for Component<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        element.check_name("component")?;
        let expected = if element.attrs.iter().any(|(key, _)| key == "expected") {
            Some(element.name_attr("expected")?)
        } else {
            None
        };
        Ok(Component {
            expected,
            scope: Scope::decode(element.child("scope")?)?,
        })
    }
}

// Sum types

impl<E: Encode, R: Encode> Encode for Pattern<E, R> {
    fn encode(&self) -> Element {
        let element = Element::new(PATTERN_TAGS[usize::from(self.tag())]);
        match self {
            Pattern::Option { pos, alternatives } => element
                .with_child(pos.encode())
                .with_child(list("alternatives", alternatives)),
            Pattern::Deconstruct {
                pos,
                constructor,
                argument,
            } => element
                .with_child(pos.encode())
                .with_child(slot("constructor", constructor))
                .with_child(slot("argument", argument.as_ref())),
            Pattern::Split {
                pos,
                fields,
                strict,
            } => element
                .with_attr("strict", strict)
                .with_child(pos.encode())
                .with_child(map_slot("fields", fields)),
            Pattern::Typed { pos, pattern, ty } => element
                .with_child(pos.encode())
                .with_child(slot("pattern", pattern.as_ref()))
                .with_child(slot("type", ty)),
            Pattern::As { pos, name, pattern } => element
                .with_attr("name", name.raw())
                .with_child(pos.encode())
                .with_child(slot("pattern", pattern.as_ref())),
            Pattern::Name { pos, name } => element
                .with_attr("name", name.raw())
                .with_child(pos.encode()),
            Pattern::Exact { literal } => element.with_child(literal.encode()),
        }
    }
}

impl<E: Decode, R: Decode> Decode for Pattern<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        let boxed = |name| from_slot(element, name).map(Box::new);
        Ok(match tag_of(element, &PATTERN_TAGS, "a pattern")? {
            0 => Pattern::Option {
                pos: pos_of(element)?,
                alternatives: from_list(element, "alternatives")?,
            },
            1 => Pattern::Deconstruct {
                pos: pos_of(element)?,
                constructor: from_slot(element, "constructor")?,
                argument: boxed("argument")?,
            },
            2 => Pattern::Split {
                pos: pos_of(element)?,
                fields: from_map_slot(element, "fields")?,
                strict: element.parse_attr("strict")?,
            },
            3 => Pattern::Typed {
                pos: pos_of(element)?,
                pattern: boxed("pattern")?,
                ty: from_slot(element, "type")?,
            },
            4 => Pattern::As {
                pos: pos_of(element)?,
                name: element.name_attr("name")?,
                pattern: boxed("pattern")?,
            },
            5 => Pattern::Name {
                pos: pos_of(element)?,
                name: element.name_attr("name")?,
            },
            6 => Pattern::Exact {
                literal: Literal::decode(element.child("literal")?)?,
            },
            _ => return Err(unknown(element, "a pattern")),
        })
    }
}

impl<E: Encode, R: Encode> Encode for Compound<E, R> {
    fn encode(&self) -> Element {
        let element = Element::new(COMPOUND_TAGS[usize::from(self.tag())]);
        match self {
            Compound::Exp(exp) => element.with_child(exp.encode()),
            Compound::Def(def) => element.with_child(def.encode()),
        }
    }
}

impl<E: Decode, R: Decode> Decode for Compound<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        let tag = tag_of(element, &COMPOUND_TAGS, "a compound item")?;
        let payload = element.only_child()?;
        Ok(match tag {
            0 => Compound::Exp(E::decode(payload)?),
            1 => Compound::Def(Def::decode(payload)?),
            _ => return Err(unknown(element, "a compound item")),
        })
    }
}

impl<E: Encode, R: Encode> Encode for Exp<E, R> {
    fn encode(&self) -> Element {
        let element = Element::new(EXP_TAGS[usize::from(self.tag())]);
        match self {
            Exp::Compound { pos, items } => element
                .with_child(pos.encode())
                .with_child(list("items", items)),
            Exp::Abs { pos, kind, cases } => element
                .with_attr("kind", kind)
                .with_child(pos.encode())
                .with_child(list("cases", cases)),
            Exp::Match {
                pos,
                scrutinee,
                cases,
            } => element
                .with_child(pos.encode())
                .with_child(slot("scrutinee", scrutinee.as_ref()))
                .with_child(list("cases", cases)),
            Exp::Ascribe { pos, value, ty } => element
                .with_child(pos.encode())
                .with_child(slot("value", value.as_ref()))
                .with_child(slot("type", ty.as_ref())),
            Exp::Seq { pos, items } | Exp::Tuple { pos, items } => element
                .with_child(pos.encode())
                .with_child(list("items", items)),
            Exp::Record { pos, fields } => element
                .with_child(pos.encode())
                .with_child(map_slot("fields", fields)),
            Exp::RecordType { pos, fields } => element
                .with_child(pos.encode())
                .with_child(fields.encode()),
            Exp::Project { pos, value, path } => element
                .with_child(pos.encode())
                .with_child(slot("value", value.as_ref()))
                .with_child(list("path", path)),
            Exp::Sym { pos, reference } => element
                .with_child(pos.encode())
                .with_child(slot("reference", reference)),
            Exp::With {
                pos,
                function,
                argument,
            } => element
                .with_child(pos.encode())
                .with_child(slot("function", function.as_ref()))
                .with_child(slot("argument", argument.as_ref())),
            Exp::Where {
                pos,
                value,
                proposition,
            } => element
                .with_child(pos.encode())
                .with_child(slot("value", value.as_ref()))
                .with_child(slot("proposition", proposition.as_ref())),
            Exp::Anon {
                pos,
                kind,
                supers,
                params,
                body,
            } => element
                .with_attr("kind", kind)
                .with_child(pos.encode())
                .with_child(list("supers", supers))
                .with_child(slot("params", params))
                .with_child(slot("body", body.as_ref())),
            // The literal element is the variant element.
            Exp::Literal(literal) => literal.encode(),
        }
    }
}

impl<E: Decode, R: Decode> Decode for Exp<E, R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        let boxed = |name| from_slot(element, name).map(Box::new);
        Ok(match tag_of(element, &EXP_TAGS, "an expression")? {
            0 => Exp::Compound {
                pos: pos_of(element)?,
                items: from_list(element, "items")?,
            },
            1 => Exp::Abs {
                pos: pos_of(element)?,
                kind: element.keyword_attr("kind", AbsKind::parse)?,
                cases: from_list(element, "cases")?,
            },
            2 => Exp::Match {
                pos: pos_of(element)?,
                scrutinee: boxed("scrutinee")?,
                cases: from_list(element, "cases")?,
            },
            3 => Exp::Ascribe {
                pos: pos_of(element)?,
                value: boxed("value")?,
                ty: boxed("type")?,
            },
            4 => Exp::Seq {
                pos: pos_of(element)?,
                items: from_list(element, "items")?,
            },
            5 => Exp::Record {
                pos: pos_of(element)?,
                fields: from_map_slot(element, "fields")?,
            },
            6 => Exp::RecordType {
                pos: pos_of(element)?,
                fields: Fields::decode(element.child("fields")?)?,
            },
            7 => Exp::Tuple {
                pos: pos_of(element)?,
                items: from_list(element, "items")?,
            },
            8 => Exp::Project {
                pos: pos_of(element)?,
                value: boxed("value")?,
                path: from_list(element, "path")?,
            },
            9 => Exp::Sym {
                pos: pos_of(element)?,
                reference: from_slot(element, "reference")?,
            },
            10 => Exp::With {
                pos: pos_of(element)?,
                function: boxed("function")?,
                argument: boxed("argument")?,
            },
            11 => Exp::Where {
                pos: pos_of(element)?,
                value: boxed("value")?,
                proposition: boxed("proposition")?,
            },
            12 => Exp::Anon {
                pos: pos_of(element)?,
                kind: element.keyword_attr("kind", BuilderKind::parse)?,
                supers: from_list(element, "supers")?,
                params: from_slot(element, "params")?,
                body: from_slot(element, "body").map(Box::new)?,
            },
            13 => Exp::Literal(Literal::decode(element)?),
            _ => return Err(unknown(element, "an expression")),
        })
    }
}

impl<R: Encode> Encode for Expr<R> {
    fn encode(&self) -> Element {
        self.0.encode()
    }
}

impl<R: Decode> Decode for Expr<R> {
    fn decode(element: &Element) -> Result<Self, CodecError> {
        Exp::decode(element).map(Expr)
    }
}
