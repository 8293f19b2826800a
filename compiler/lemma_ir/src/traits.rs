//! Cross-cutting node traits.

use crate::Span;

/// Total position accessor.
pub trait Spanned {
    fn span(&self) -> Span;
}

impl<T: Spanned + ?Sized> Spanned for Box<T> {
    fn span(&self) -> Span {
        (**self).span()
    }
}
