//! Declaration-ordered field bindings.

use rustc_hash::FxHashSet;

use super::{Entry, NameMap};
use crate::{Name, Span, StringLookup};

/// One value bound to a positionally ordered field: a bound entry plus an
/// optional default.
#[derive(Clone, Debug)]
pub struct Field<E, R> {
    pub pos: Span,
    pub entry: Entry<E, R>,
    pub default: Option<E>,
}

/// Why an order array is not a bijection onto the binding keys.
///
/// `Display` has no symbol table, so it prints the raw name handle. Use
/// [`FieldsError::describe`] for the identifier text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldsError {
    #[error("field {0:?} is bound but missing from the order array")]
    MissingKey(Name),
    #[error("field {0:?} appears more than once in the order array")]
    DuplicateKey(Name),
    #[error("field {0:?} is ordered but has no binding")]
    UnknownKey(Name),
}

impl FieldsError {
    pub fn name(self) -> Name {
        match self {
            FieldsError::MissingKey(name)
            | FieldsError::DuplicateKey(name)
            | FieldsError::UnknownKey(name) => name,
        }
    }

    /// The message with the field spelled out through `symbols`.
    pub fn describe(&self, symbols: &dyn StringLookup) -> String {
        let name = symbols.lookup(self.name());
        match self {
            FieldsError::MissingKey(_) => {
                format!("field `{name}` is bound but missing from the order array")
            }
            FieldsError::DuplicateKey(_) => {
                format!("field `{name}` appears more than once in the order array")
            }
            FieldsError::UnknownKey(_) => format!("field `{name}` is ordered but has no binding"),
        }
    }
}

/// Named field bindings with their declaration order.
///
/// Invariant: `order` lists every key of `bindings` exactly once. The only
/// public constructors validate it.
#[derive(Clone, Debug)]
pub struct Fields<E, R> {
    bindings: NameMap<Field<E, R>>,
    order: Vec<Name>,
}

impl<E, R> Fields<E, R> {
    pub fn empty() -> Self {
        Fields {
            bindings: NameMap::new(),
            order: Vec::new(),
        }
    }

    /// Pair a mapping with its order array, checking the bijection.
    pub fn new(bindings: NameMap<Field<E, R>>, order: Vec<Name>) -> Result<Self, FieldsError> {
        let mut seen = FxHashSet::default();
        for &name in &order {
            if !bindings.contains_key(name) {
                return Err(FieldsError::UnknownKey(name));
            }
            if !seen.insert(name) {
                return Err(FieldsError::DuplicateKey(name));
            }
        }
        if let Some(missing) = bindings.keys().into_iter().find(|k| !seen.contains(k)) {
            return Err(FieldsError::MissingKey(missing));
        }
        Ok(Fields { bindings, order })
    }

    /// Build from bindings listed in declaration order.
    pub fn from_ordered(
        fields: impl IntoIterator<Item = (Name, Field<E, R>)>,
    ) -> Result<Self, FieldsError> {
        let mut bindings = NameMap::new();
        let mut order = Vec::new();
        for (name, field) in fields {
            if bindings.try_insert(name, field).is_err() {
                return Err(FieldsError::DuplicateKey(name));
            }
            order.push(name);
        }
        Ok(Fields { bindings, order })
    }

    /// Reassemble parts whose keys are known to match `order`.
    pub(crate) fn from_parts_unchecked(bindings: NameMap<Field<E, R>>, order: Vec<Name>) -> Self {
        debug_assert_eq!(bindings.len(), order.len());
        Fields { bindings, order }
    }

    pub fn bindings(&self) -> &NameMap<Field<E, R>> {
        &self.bindings
    }

    pub fn order(&self) -> &[Name] {
        &self.order
    }

    pub fn get(&self, name: Name) -> Option<&Field<E, R>> {
        self.bindings.get(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Name, &Field<E, R>)> {
        self.order
            .iter()
            .filter_map(|&name| self.bindings.get(name).map(|field| (name, field)))
    }

    /// Take the bindings out in declaration order.
    pub fn into_ordered(self) -> Vec<(Name, Field<E, R>)> {
        let Fields {
            mut bindings,
            order,
        } = self;
        order
            .into_iter()
            .filter_map(|name| bindings.remove(name).map(|field| (name, field)))
            .collect()
    }
}

impl<E, R> Default for Fields<E, R> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::Pattern;
    use crate::StringInterner;

    fn n(raw: u32) -> Name {
        Name::from_raw(raw)
    }

    fn field(name: Name) -> Field<(), ()> {
        Field {
            pos: Span::DUMMY,
            entry: Entry {
                pos: Span::DUMMY,
                implicit: false,
                pattern: Pattern::Name {
                    pos: Span::DUMMY,
                    name,
                },
            },
            default: None,
        }
    }

    fn bindings(keys: &[u32]) -> NameMap<Field<(), ()>> {
        keys.iter().map(|&k| (n(k), field(n(k)))).collect()
    }

    #[test]
    fn accepts_a_bijection() {
        let Ok(fields) = Fields::new(bindings(&[1, 2, 3]), vec![n(3), n(1), n(2)]) else {
            panic!("valid order rejected");
        };
        assert_eq!(fields.order(), &[n(3), n(1), n(2)]);
        let names: Vec<Name> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![n(3), n(1), n(2)]);
    }

    #[test]
    fn rejects_omitted_key() {
        let result = Fields::new(bindings(&[1, 2, 3]), vec![n(1), n(3)]);
        assert_eq!(result.err(), Some(FieldsError::MissingKey(n(2))));
    }

    #[test]
    fn rejects_duplicated_key() {
        let result = Fields::new(bindings(&[1, 2]), vec![n(1), n(1), n(2)]);
        assert_eq!(result.err(), Some(FieldsError::DuplicateKey(n(1))));
    }

    #[test]
    fn rejects_unknown_key() {
        let result = Fields::new(bindings(&[1]), vec![n(1), n(7)]);
        assert_eq!(result.err(), Some(FieldsError::UnknownKey(n(7))));
    }

    #[test]
    fn describe_spells_out_the_field() {
        let interner = StringInterner::new();
        let width = interner.intern("width");
        let result = Fields::new(bindings(&[]), vec![width]);

        let Some(err) = result.err() else {
            panic!("unknown key accepted");
        };
        assert_eq!(err.name(), width);
        assert_eq!(err.describe(&interner), "field `width` is ordered but has no binding");
        assert_eq!(
            FieldsError::MissingKey(width).describe(&interner),
            "field `width` is bound but missing from the order array"
        );
    }

    #[test]
    fn from_ordered_rejects_rebinding() {
        let result = Fields::from_ordered([(n(1), field(n(1))), (n(1), field(n(1)))]);
        assert_eq!(result.err(), Some(FieldsError::DuplicateKey(n(1))));
    }

    #[test]
    fn into_ordered_follows_declaration() {
        let Ok(fields) = Fields::from_ordered([(n(5), field(n(5))), (n(2), field(n(2)))]) else {
            panic!("distinct fields rejected");
        };
        let names: Vec<Name> = fields.into_ordered().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec![n(5), n(2)]);
    }
}
