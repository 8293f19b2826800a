//! Diagnostic-domain errors.
//!
//! These are reported, not propagated: the phase that finds one turns it into
//! a [`Diagnostic`] and carries on with the rest of the tree.

use lemma_fmt::{format_node, FormatConfig, Pretty};
use lemma_ir::phase::resolved;
use lemma_ir::{Name, PositionLookup, Span, Spanned, StringLookup};
use thiserror::Error;

use crate::{Diagnostic, ErrorCode};

/// A failed proof check.
#[derive(Clone, Debug, Error)]
pub enum ProofError {
    #[error("proof of a proposition that is neither a theorem nor an axiom")]
    UndefinedProposition { pos: Span, name: Name },
    #[error("proof does not establish its goal")]
    GoalMismatch {
        pos: Span,
        expected: resolved::Expr,
        found: resolved::Expr,
    },
    #[error("pattern does not fit the proposition")]
    PatternMismatch {
        pos: Span,
        pattern: resolved::Pattern,
        proposition: resolved::Expr,
    },
}

impl Spanned for ProofError {
    fn span(&self) -> Span {
        match self {
            ProofError::UndefinedProposition { pos, .. }
            | ProofError::GoalMismatch { pos, .. }
            | ProofError::PatternMismatch { pos, .. } => *pos,
        }
    }
}

impl ProofError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProofError::UndefinedProposition { .. } => ErrorCode::E4001,
            ProofError::GoalMismatch { .. } => ErrorCode::E4002,
            ProofError::PatternMismatch { .. } => ErrorCode::E4003,
        }
    }

    /// Build the diagnostic, rendering the trees involved.
    pub fn to_diagnostic(
        &self,
        symbols: &dyn StringLookup,
        positions: &dyn PositionLookup,
        config: &FormatConfig,
    ) -> Diagnostic {
        let show = |node: &dyn Pretty| format_node(node, symbols, positions, config);
        let diag = Diagnostic::error(self.code());
        match self {
            ProofError::UndefinedProposition { pos, name } => diag
                .with_message(format!(
                    "`{}` is neither a theorem nor an axiom",
                    symbols.lookup(*name)
                ))
                .with_label(*pos, "proved here"),
            ProofError::GoalMismatch {
                pos,
                expected,
                found,
            } => diag
                .with_message(self.to_string())
                .with_label(*pos, "this proof")
                .with_secondary_label(expected.span(), "goal stated here")
                .with_note(format!("expected: {}", show(expected)))
                .with_note(format!("found: {}", show(found))),
            ProofError::PatternMismatch {
                pos,
                pattern,
                proposition,
            } => diag
                .with_message(self.to_string())
                .with_label(*pos, "this pattern")
                .with_secondary_label(proposition.span(), "proposition stated here")
                .with_note(format!("pattern: {}", show(pattern)))
                .with_note(format!("proposition: {}", show(proposition))),
        }
    }
}

/// A reference slot that could not be resolved.
///
/// Produced by resolvers handed to the reference traversal, which sees only
/// the reference payload and not its position.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unresolved name")]
    Unresolved { name: Name },
}

impl ResolveError {
    pub fn to_diagnostic(&self, symbols: &dyn StringLookup) -> Diagnostic {
        match self {
            ResolveError::Unresolved { name } => Diagnostic::error(ErrorCode::E2001)
                .with_message(format!(
                    "cannot find `{}` in any enclosing scope",
                    symbols.lookup(*name)
                )),
        }
    }
}
