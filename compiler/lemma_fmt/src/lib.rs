//! Lemma Formatter
//!
//! Renders any surface-tree node as text for diagnostics.
//!
//! # Architecture
//!
//! 1. **Document pass**: [`Pretty`] turns a node into a [`Doc`], consulting
//!    the symbol and position services held by a [`FormatCx`].
//! 2. **Render pass**: [`render`] lays the document out, keeping each group
//!    on one line if it fits within [`FormatConfig::max_width`].
//!
//! Neither pass keeps state between calls or touches the node.

pub mod config;
pub mod doc;
pub mod emitter;
mod pretty;

pub use config::{FormatConfig, INDENT_WIDTH, MAX_LINE_WIDTH};
pub use doc::{render, render_to, Doc};
pub use emitter::{Emitter, StringEmitter};
pub use pretty::{FormatCx, Pretty};

use lemma_ir::{PositionLookup, Spanned, StringLookup};

/// Render `node` with the given services.
pub fn format_node<N: Pretty + ?Sized>(
    node: &N,
    symbols: &dyn StringLookup,
    positions: &dyn PositionLookup,
    config: &FormatConfig,
) -> String {
    let cx = FormatCx::new(symbols, positions);
    render(&node.pretty(&cx), config)
}

/// Render `node` prefixed with the description of its position.
pub fn format_located<N: Pretty + Spanned + ?Sized>(
    node: &N,
    symbols: &dyn StringLookup,
    positions: &dyn PositionLookup,
    config: &FormatConfig,
) -> String {
    format!(
        "{}: {}",
        positions.describe(node.span()),
        format_node(node, symbols, positions, config)
    )
}
