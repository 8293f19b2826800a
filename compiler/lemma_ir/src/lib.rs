//! Lemma IR - surface-syntax intermediate representation
//!
//! This crate holds the tree the parser produces and every later front-end
//! phase consumes:
//! - Spans, interned names and the two lookup services built on them
//! - The phase-generic tree family ([`ast`]) and its phase instantiations ([`phase`])
//! - Canonical equality, ordering and hashing ([`canon`])
//! - Generic map/fold/traverse over the open slots ([`traverse`])
//! - A tagged-element serialization codec ([`codec`])
//!
//! # Design Philosophy
//!
//! - **One tree, many phases**: nodes are generic over the embedded expression
//!   (`E`) and reference (`R`) representation; phases substitute the slots.
//! - **Order-free identity**: unordered mappings are compared, hashed, encoded
//!   and printed through their key-sorted listing.
//! - **Positions are diagnostics only**: they never affect identity.
//!
//! Floats are stored as their bit pattern so every node can be `Eq + Hash`.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod ast;
pub mod canon;
pub mod codec;
mod interner;
mod name;
pub mod phase;
mod position;
mod span;
mod traits;
pub mod traverse;

pub use canon::canonical_hash;
pub use interner::{InternError, SharedInterner, StringInterner, StringLookup};
pub use name::Name;
pub use phase::{Expr, Symbol};
pub use position::{PositionLookup, RawPositions, SourcePositions};
pub use span::{Span, SpanError};
pub use traits::Spanned;
