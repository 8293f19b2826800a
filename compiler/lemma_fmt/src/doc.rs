//! Display documents and their width-based renderer.
//!
//! A [`Doc`] describes text with optional break points. Rendering decides,
//! group by group, whether a group fits on the current line: a group that
//! fits is printed flat (its `line`s become spaces), otherwise its own
//! `line`s become newlines at the group's nesting depth. Nested groups
//! decide again for themselves.

use crate::config::FormatConfig;
use crate::emitter::{Emitter, StringEmitter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Doc {
    Nil,
    /// Literal text; never contains a newline.
    Text(String),
    /// A space when flat, a newline when broken.
    Line,
    /// Nothing when flat, a newline when broken.
    SoftLine,
    /// Always a newline; forces every enclosing group to break.
    HardLine,
    Concat(Vec<Doc>),
    /// Indent broken lines inside by this many levels.
    Nest(usize, Box<Doc>),
    Group(Box<Doc>),
}

pub fn nil() -> Doc {
    Doc::Nil
}

pub fn text(s: impl Into<String>) -> Doc {
    Doc::Text(s.into())
}

pub fn line() -> Doc {
    Doc::Line
}

pub fn softline() -> Doc {
    Doc::SoftLine
}

pub fn hardline() -> Doc {
    Doc::HardLine
}

pub fn concat(docs: impl IntoIterator<Item = Doc>) -> Doc {
    Doc::Concat(docs.into_iter().collect())
}

pub fn nest(doc: Doc) -> Doc {
    Doc::Nest(1, Box::new(doc))
}

pub fn group(doc: Doc) -> Doc {
    Doc::Group(Box::new(doc))
}

/// Interleave `docs` with `sep`.
pub fn join(docs: impl IntoIterator<Item = Doc>, sep: &Doc) -> Doc {
    let mut out = Vec::new();
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            out.push(sep.clone());
        }
        out.push(doc);
    }
    Doc::Concat(out)
}

/// `open`, then `items` separated by `sep` + break, then `close`; the items
/// indent one level when the group breaks.
pub fn bracket(open: &str, items: Vec<Doc>, sep: &str, close: &str) -> Doc {
    if items.is_empty() {
        return text(format!("{open}{close}"));
    }
    group(concat([
        text(open),
        nest(concat([softline(), join(items, &concat([text(sep), line()]))])),
        softline(),
        text(close),
    ]))
}

impl Doc {
    /// Width of this document printed entirely flat.
    pub fn flat_width(&self) -> usize {
        match self {
            Doc::Nil | Doc::SoftLine => 0,
            Doc::Text(s) => s.chars().count(),
            Doc::Line => 1,
            Doc::HardLine => usize::MAX,
            Doc::Concat(docs) => docs
                .iter()
                .fold(0, |width, doc| width.saturating_add(doc.flat_width())),
            Doc::Nest(_, doc) | Doc::Group(doc) => doc.flat_width(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

struct Renderer<'a, W: Emitter> {
    config: &'a FormatConfig,
    out: &'a mut W,
    column: usize,
}

impl<W: Emitter> Renderer<'_, W> {
    fn render(&mut self, doc: &Doc, indent: usize, mode: Mode) {
        match doc {
            Doc::Nil => {}
            Doc::Text(s) => {
                self.out.emit(s);
                self.column += s.chars().count();
            }
            Doc::HardLine => self.newline(indent),
            Doc::Line | Doc::SoftLine if mode == Mode::Break => self.newline(indent),
            Doc::Line => {
                self.out.emit(" ");
                self.column += 1;
            }
            Doc::SoftLine => {}
            Doc::Concat(docs) => {
                for doc in docs {
                    self.render(doc, indent, mode);
                }
            }
            Doc::Nest(levels, doc) => {
                self.render(doc, indent + levels * self.config.indent_size, mode);
            }
            Doc::Group(doc) => {
                let fits = self.column.saturating_add(doc.flat_width()) <= self.config.max_width;
                let mode = if fits { Mode::Flat } else { Mode::Break };
                self.render(doc, indent, mode);
            }
        }
    }

    fn newline(&mut self, indent: usize) {
        self.out.emit_newline();
        self.out.emit_indent(indent);
        self.column = indent;
    }
}

/// Render `doc` into `out`.
pub fn render_to<W: Emitter>(doc: &Doc, config: &FormatConfig, out: &mut W) {
    let mut renderer = Renderer {
        config,
        out,
        column: 0,
    };
    renderer.render(doc, 0, Mode::Break);
}

pub fn render(doc: &Doc, config: &FormatConfig) -> String {
    let mut out = StringEmitter::new();
    render_to(doc, config, &mut out);
    out.output()
}
