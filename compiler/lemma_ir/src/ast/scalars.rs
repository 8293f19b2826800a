//! Scalar leaves of the tree family: tag enums, literals and scope ids.
//!
//! Tag enums are plain keywords. Their derived ordering is declaration order,
//! which is also the canonical order used by the canonicalization engine.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::{Name, Span};

/// Declares a fieldless keyword enum with its surface spelling.
macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $kw:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Surface keyword for this variant.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $kw,)+
                }
            }

            /// Parse a surface keyword.
            pub fn parse(keyword: &str) -> Option<Self> {
                match keyword {
                    $($kw => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Exposure class of a definition. Exactly four buckets exist.
    pub enum Visibility {
        Hidden => "hidden",
        Private => "private",
        Protected => "protected",
        Public => "public",
    }
}

impl Visibility {
    /// Index of this bucket in a [`VisibilityTable`](super::VisibilityTable).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

keyword_enum! {
    /// What kind of fact a [`Truth`](super::Truth) states.
    pub enum TruthKind {
        Axiom => "axiom",
        Theorem => "theorem",
        Invariant => "invariant",
    }
}

keyword_enum! {
    /// What kind of entity a [`Builder`](super::Builder) introduces.
    pub enum BuilderKind {
        Module => "module",
        Class => "class",
        Signature => "signature",
    }
}

keyword_enum! {
    /// Binder flavour of an abstraction.
    pub enum AbsKind {
        Lambda => "fun",
        Forall => "forall",
        Exists => "exists",
    }
}

keyword_enum! {
    pub enum Assoc {
        Left => "left",
        Right => "right",
        None => "none",
    }
}

keyword_enum! {
    /// How an operator binds relative to another one.
    pub enum Relation {
        Looser => "looser",
        Equal => "equal",
        Tighter => "tighter",
    }
}

/// Operator fixity.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Fixity {
    Prefix,
    Infix(Assoc),
    Postfix,
}

impl Fixity {
    pub fn as_str(self) -> &'static str {
        match self {
            Fixity::Prefix => "prefix",
            Fixity::Infix(Assoc::Left) => "infix-left",
            Fixity::Infix(Assoc::Right) => "infix-right",
            Fixity::Infix(Assoc::None) => "infix",
            Fixity::Postfix => "postfix",
        }
    }

    pub fn parse(keyword: &str) -> Option<Self> {
        Some(match keyword {
            "prefix" => Fixity::Prefix,
            "infix-left" => Fixity::Infix(Assoc::Left),
            "infix-right" => Fixity::Infix(Assoc::Right),
            "infix" => Fixity::Infix(Assoc::None),
            "postfix" => Fixity::Postfix,
            _ => return None,
        })
    }
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unique identifier of a lexical scope.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct ScopeId(pub u32);

/// Value of a literal leaf.
///
/// Floats are stored as their bit pattern so the value is `Eq + Ord + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum LitValue {
    Int(i64),
    Float(u64),
    Str(Name),
    Char(char),
}

impl LitValue {
    pub fn float(value: f64) -> Self {
        LitValue::Float(value.to_bits())
    }

    pub fn as_f64(self) -> Option<f64> {
        match self {
            LitValue::Float(bits) => Some(f64::from_bits(bits)),
            LitValue::Int(_) | LitValue::Str(_) | LitValue::Char(_) => None,
        }
    }
}

/// A numeric, string or character literal with its own position.
#[derive(Copy, Clone, Debug)]
pub struct Literal {
    pub pos: Span,
    pub value: LitValue,
}

impl Literal {
    pub const fn new(pos: Span, value: LitValue) -> Self {
        Literal { pos, value }
    }

    pub const fn int(pos: Span, value: i64) -> Self {
        Literal::new(pos, LitValue::Int(value))
    }
}

// Position is not part of a literal's identity.
impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
