//! The surface tree family.
//!
//! Every node is generic over two open slots:
//!
//! - `E` - the representation of embedded expressions
//! - `R` - the representation of references
//!
//! The same shapes serve every phase; a phase only changes what occupies the
//! slots (see [`crate::phase`]). Positions are carried in `pos` fields and are
//! never part of a node's identity.

mod collections;
mod decl;
mod exp;
mod fields;
mod pattern;
mod scalars;
mod scope;

pub use collections::{NameMap, TableError, VisibilityTable};
pub use decl::{
    Builder, Case, Compound, Def, Entry, Import, Precedence, Proof, Syntax, Truth, COMPOUND_TAGS,
};
pub use exp::{Exp, EXP_TAGS};
pub use fields::{Field, Fields, FieldsError};
pub use pattern::{Pattern, PATTERN_TAGS};
pub use scalars::{
    AbsKind, Assoc, BuilderKind, Fixity, LitValue, Literal, Relation, ScopeId, TruthKind,
    Visibility,
};
pub use scope::{Component, Namespace, Scope, ScopeBuilder, ScopeError};
