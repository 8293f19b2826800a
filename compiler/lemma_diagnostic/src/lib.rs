//! Diagnostics for the Lemma front end.
//!
//! Each diagnostic carries:
//! - an error code for searchability
//! - a message saying what went wrong
//! - labeled spans saying where
//! - notes with the offending trees, rendered through `lemma_fmt`
//!
//! Errors are reported, not thrown: a failed proof check produces a
//! [`ProofError`], which becomes a [`Diagnostic`] in a [`DiagnosticQueue`]
//! while the rest of the tree keeps being processed.

mod diagnostic;
mod error_code;
pub mod errors;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use errors::{ProofError, ResolveError};
pub use queue::{DiagnosticConfig, DiagnosticQueue};
