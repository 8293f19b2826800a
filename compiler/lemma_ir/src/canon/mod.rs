//! Canonical equality, ordering and hashing for the tree family.
//!
//! The three functions agree by construction: `PartialEq` is defined as
//! `cmp == Equal`, and `Hash` feeds exactly the fields `cmp` inspects.
//!
//! # Rules
//!
//! - Different variants of one enum compare by their declaration-order tag,
//!   without looking at payloads.
//! - The same variant compares field by field in declaration order and stops
//!   at the first difference.
//! - Name mappings are compared and hashed through their key-sorted listing,
//!   never through the map's native iteration order.
//! - Positions are ignored everywhere.
//!
//! Hashes are computed with `FxHasher`, which has no per-process seed, so
//! [`canonical_hash`] is reproducible across runs.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

mod hash;
mod order;

/// Stable fingerprint of any node.
pub fn canonical_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests;
