//! Formatter configuration.

/// Default maximum line width before breaking.
pub const MAX_LINE_WIDTH: usize = 100;

/// Spaces per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Controls where rendered documents break and how far they indent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Maximum line width before a group is broken over several lines.
    pub max_width: usize,

    /// Spaces per nesting level.
    pub indent_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_width: MAX_LINE_WIDTH,
            indent_size: INDENT_WIDTH,
        }
    }
}

impl FormatConfig {
    pub fn with_max_width(max_width: usize) -> Self {
        Self {
            max_width,
            ..Default::default()
        }
    }

    pub fn with_indent_size(indent_size: usize) -> Self {
        Self {
            indent_size,
            ..Default::default()
        }
    }
}
