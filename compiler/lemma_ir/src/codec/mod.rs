//! Tagged-element serialization of the tree family.
//!
//! Every node encodes to an [`Element`]: a name, string attributes, child
//! elements and optional text. Elements are plain serde data, so an encoded
//! tree persists as JSON ([`to_json`]) or as compact bytes ([`to_bytes`]).
//!
//! # Layout
//!
//! - One element per variant, named after the variant (`with`, `split`, ...).
//!   Decoding maps the name to the variant's tag and dispatches on the tag.
//! - Scalars (positions aside) are attributes: names as raw ids, tags as
//!   keywords, booleans and numbers in decimal.
//! - Positions are a `<pos start end/>` child.
//! - Sub-structures sit inside a child named after the field, so a
//!   payload from the wrong variant is reported as a missing child.
//! - Mappings are `<entry key=..>` lists, written in key order. The decoder
//!   does not depend on that order; it only rejects a repeated key.
//!
//! Decoding aborts on the first malformed element. A tree that decodes
//! successfully is `==` to the tree that was encoded.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ast::{FieldsError, TableError};
use crate::Name;

mod nodes;

/// One element of an encoded tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl ToString) -> Self {
        self.attrs.push((key.to_owned(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Fail unless this element is named `name`.
    pub fn check_name(&self, name: &'static str) -> Result<(), CodecError> {
        if self.name == name {
            Ok(())
        } else {
            Err(CodecError::UnknownElement {
                expected: name,
                found: self.name.clone(),
            })
        }
    }

    pub fn attr(&self, key: &'static str) -> Result<&str, CodecError> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| CodecError::MissingAttribute {
                element: self.name.clone(),
                attr: key,
            })
    }

    pub fn parse_attr<T: FromStr>(&self, key: &'static str) -> Result<T, CodecError> {
        let raw = self.attr(key)?;
        raw.parse().map_err(|_| self.bad_attr(key, raw))
    }

    /// Parse a keyword attribute with the keyword's own parser.
    pub fn keyword_attr<T>(
        &self,
        key: &'static str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Result<T, CodecError> {
        let raw = self.attr(key)?;
        parse(raw).ok_or_else(|| self.bad_attr(key, raw))
    }

    pub fn name_attr(&self, key: &'static str) -> Result<Name, CodecError> {
        self.parse_attr::<u32>(key).map(Name::from_raw)
    }

    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn child(&self, name: &'static str) -> Result<&Element, CodecError> {
        self.find_child(name).ok_or_else(|| CodecError::MissingChild {
            element: self.name.clone(),
            child: name,
        })
    }

    /// The single element wrapped by a field element.
    pub fn only_child(&self) -> Result<&Element, CodecError> {
        match self.children.as_slice() {
            [only] => Ok(only),
            other => Err(CodecError::ChildCount {
                element: self.name.clone(),
                expected: 1,
                found: other.len(),
            }),
        }
    }

    pub(crate) fn bad_attr(&self, key: &'static str, raw: &str) -> CodecError {
        CodecError::BadAttribute {
            element: self.name.clone(),
            attr: key,
            value: raw.to_owned(),
        }
    }
}

/// Why an element could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("expected {expected}, found `<{found}>`")]
    UnknownElement { expected: &'static str, found: String },

    #[error("`<{element}>` is missing attribute `{attr}`")]
    MissingAttribute { element: String, attr: &'static str },

    #[error("`<{element}>` is missing child `<{child}>`")]
    MissingChild {
        element: String,
        child: &'static str,
    },

    #[error("`<{element}>` has {found} children where {expected} was expected")]
    ChildCount {
        element: String,
        expected: usize,
        found: usize,
    },

    #[error("`<{element}>` has malformed attribute `{attr}` = {value:?}")]
    BadAttribute {
        element: String,
        attr: &'static str,
        value: String,
    },

    #[error("mapping binds {0:?} more than once")]
    DuplicateKey(Name),

    #[error(transparent)]
    Fields(#[from] FieldsError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Conversion of a value into its element form.
pub trait Encode {
    fn encode(&self) -> Element;
}

/// Reconstruction of a value from its element form.
pub trait Decode: Sized {
    fn decode(element: &Element) -> Result<Self, CodecError>;
}

pub fn to_json<T: Encode + ?Sized>(node: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&node.encode())?)
}

pub fn to_json_pretty<T: Encode + ?Sized>(node: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&node.encode())?)
}

pub fn from_json<T: Decode>(text: &str) -> Result<T, CodecError> {
    let element: Element = serde_json::from_str(text)?;
    decode_logged(&element)
}

pub fn to_bytes<T: Encode + ?Sized>(node: &T) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serialize(&node.encode())?)
}

pub fn from_bytes<T: Decode>(bytes: &[u8]) -> Result<T, CodecError> {
    let element: Element = bincode::deserialize(bytes)?;
    decode_logged(&element)
}

fn decode_logged<T: Decode>(element: &Element) -> Result<T, CodecError> {
    T::decode(element).map_err(|err| {
        debug!(root = %element.name, %err, "failed to decode tree");
        err
    })
}
