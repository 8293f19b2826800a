//! Source-position service.
//!
//! The tree family stores raw [`Span`]s. Turning a span into something a
//! human can read is delegated to a [`PositionLookup`], which the formatter
//! and diagnostics consume.

use crate::Span;

/// Describes source positions for diagnostics.
pub trait PositionLookup {
    /// Human-readable description of where `span` starts, e.g. `lib.lm:3:7`.
    fn describe(&self, span: Span) -> String;
}

/// Position lookup for a single source file.
///
/// Pre-computes the byte offset of each line start so lookups are a binary
/// search instead of a scan.
#[derive(Clone, Debug)]
pub struct SourcePositions {
    path: String,
    source: String,
    /// `line_starts[0] = 0`; `line_starts[i]` is the byte after the i-th `\n`.
    line_starts: Vec<u32>,
}

impl SourcePositions {
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let mut line_starts = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        SourcePositions {
            path: path.into(),
            source,
            line_starts,
        }
    }

    /// 1-based (line, column) for a byte offset. Columns count characters.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_idx).copied().unwrap_or(0) as usize;
        let end = (offset as usize).clamp(line_start, self.source.len());
        let col = self
            .source
            .get(line_start..end)
            .map_or(0, |text| text.chars().count());

        (
            u32::try_from(line_idx + 1).unwrap_or(u32::MAX),
            u32::try_from(col + 1).unwrap_or(u32::MAX),
        )
    }
}

impl PositionLookup for SourcePositions {
    fn describe(&self, span: Span) -> String {
        let (line, col) = self.line_col(span.start);
        format!("{}:{line}:{col}", self.path)
    }
}

/// Position lookup that prints raw byte ranges; used when no source is at hand.
#[derive(Copy, Clone, Debug, Default)]
pub struct RawPositions;

impl PositionLookup for RawPositions {
    fn describe(&self, span: Span) -> String {
        format!("@{span}")
    }
}
