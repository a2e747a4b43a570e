// SPDX-License-Identifier: AGPL-3.0-or-later
//! Line-oriented Markdown reader
//!
//! The dispatcher walks the lines top to bottom. Each handler receives the
//! index of the line it was dispatched on and returns the index of the first
//! line it did not consume, so every line is consumed exactly once.

pub mod classify;
pub mod table;

use std::borrow::Cow;

use tracing::{debug, trace};

use crate::ast::{Document, ParagraphStyle, Run};
use crate::builder::{BorderLine, DocumentBuilder, ParagraphProps, ShadingColor};
use crate::inline::format_inline;
use crate::traits::{Parser, Result};
use crate::units;

pub use classify::{classify, BlockUnit};
pub use table::{collect_table, TableBlock};

/// State threaded through one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserState {
    /// The previous non-blank line was a list item
    pub in_list: bool,
    /// Indent level of the most recent list item
    pub list_level: u32,
}

/// Walks a line sequence and emits blocks into a builder
pub struct Dispatcher<'b, B: DocumentBuilder + ?Sized> {
    builder: &'b mut B,
    state: ParserState,
}

impl<'b, B: DocumentBuilder + ?Sized> Dispatcher<'b, B> {
    pub fn new(builder: &'b mut B) -> Self {
        Self {
            builder,
            state: ParserState::default(),
        }
    }

    /// Dispatch every line and return the final state
    pub fn run(mut self, lines: &[&str]) -> ParserState {
        let mut index = 0;
        while index < lines.len() {
            index = self.dispatch(lines, index);
        }
        self.state
    }

    /// Handle the block starting at `index`; returns the next unconsumed index
    pub fn dispatch(&mut self, lines: &[&str], index: usize) -> usize {
        let unit = classify(lines[index]);
        trace!(line = index + 1, kind = unit.kind(), "dispatch");

        match unit {
            BlockUnit::Blank => {
                if !self.state.in_list {
                    self.builder
                        .append_paragraph(&[], ParagraphProps::new(ParagraphStyle::Normal));
                }
                index + 1
            }
            BlockUnit::Heading { level, text } => {
                self.end_list();
                self.builder.append_heading(level, text);
                index + 1
            }
            BlockUnit::ListItem {
                ordered,
                indent_level,
                text,
            } => {
                self.list_item(ordered, indent_level, text);
                index + 1
            }
            BlockUnit::Table => {
                self.end_list();
                self.table(lines, index)
            }
            BlockUnit::CodeFence => {
                self.end_list();
                self.code_block(lines, index)
            }
            BlockUnit::Quote(text) => {
                self.end_list();
                self.builder.append_paragraph(
                    &format_inline(text),
                    ParagraphProps::new(ParagraphStyle::Quote),
                );
                index + 1
            }
            BlockUnit::HorizontalRule => {
                self.end_list();
                self.builder
                    .append_paragraph(&[], ParagraphProps::new(ParagraphStyle::Normal));
                self.builder.set_paragraph_bottom_border(BorderLine::default());
                index + 1
            }
            BlockUnit::Paragraph(text) => {
                self.end_list();
                self.builder.append_paragraph(
                    &format_inline(text),
                    ParagraphProps::new(ParagraphStyle::Normal),
                );
                index + 1
            }
        }
    }

    fn end_list(&mut self) {
        self.state.in_list = false;
        self.state.list_level = 0;
    }

    fn list_item(&mut self, ordered: bool, indent_level: u32, text: &str) {
        let style = if ordered {
            ParagraphStyle::ListNumber
        } else {
            ParagraphStyle::ListBullet
        };
        let mut props = ParagraphProps::new(style);
        if indent_level > 0 {
            props = props.with_left_indent(units::list_indent(indent_level));
        }
        self.builder.append_paragraph(&format_inline(text), props);
        self.state.in_list = true;
        self.state.list_level = indent_level;
    }

    fn table(&mut self, lines: &[&str], index: usize) -> usize {
        let TableBlock { rows, next } = collect_table(lines, index);
        match rows {
            Some(rows) => self.builder.append_table(&rows),
            None => debug!(
                first_line = index + 1,
                lines = next - index,
                "dropping table without body rows"
            ),
        }
        next
    }

    /// Everything up to the closing fence is emitted verbatim as one shaded
    /// monospace paragraph. A missing closing fence runs to end of input.
    fn code_block(&mut self, lines: &[&str], index: usize) -> usize {
        let body_start = index + 1;
        let close = lines[body_start..]
            .iter()
            .position(|line| classify::is_fence(line))
            .map(|offset| body_start + offset);

        let body_end = close.unwrap_or(lines.len());
        if close.is_none() {
            debug!(first_line = index + 1, "unterminated code fence runs to end of input");
        }

        let code = lines[body_start..body_end].join("\n");
        self.builder
            .append_paragraph(&[Run::code(code)], ParagraphProps::new(ParagraphStyle::Normal));
        self.builder.set_paragraph_shading(ShadingColor::default());

        (body_end + 1).min(lines.len())
    }
}

/// Normalize `\r\n` and lone `\r` to `\n`
fn normalize_newlines(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

/// Markdown reader producing an in-memory [`Document`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownParser;

impl MarkdownParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse into any builder; each call uses a fresh parser state
    pub fn parse_into<B: DocumentBuilder + ?Sized>(&self, input: &str, builder: &mut B) {
        let normalized = normalize_newlines(input);
        let lines: Vec<&str> = normalized.split('\n').collect();
        let state = Dispatcher::new(builder).run(&lines);
        debug!(lines = lines.len(), ended_in_list = state.in_list, "parsed markdown");
    }
}

impl Parser for MarkdownParser {
    fn parse(&self, input: &str) -> Result<Document> {
        let mut doc = Document::new();
        self.parse_into(input, &mut doc);
        Ok(doc)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::ast::Block;
    use proptest::prelude::*;

    proptest! {
        // Property: one to six hashes make a heading of that level
        #[test]
        fn prop_heading_level_matches_hashes(level in 1usize..=6, text in "[a-zA-Z][a-zA-Z ]{0,20}") {
            let doc = MarkdownParser::new().parse(&format!("{} {}", "#".repeat(level), text)).unwrap();
            prop_assert_eq!(doc.blocks.len(), 1);
            match &doc.blocks[0] {
                Block::Heading { level: l, .. } => prop_assert_eq!(*l as usize, level),
                other => prop_assert!(false, "expected heading, got {:?}", other),
            }
        }

        // Property: every table emitted is rectangular
        #[test]
        fn prop_tables_are_rectangular(rows in prop::collection::vec(prop::collection::vec("[a-z0-9 ]{0,5}", 1..5), 0..6)) {
            let input = rows
                .iter()
                .map(|cells| format!("| {} |", cells.join(" | ")))
                .collect::<Vec<_>>()
                .join("\n");
            let doc = MarkdownParser::new().parse(&input).unwrap();
            for block in &doc.blocks {
                if let Block::Table { rows } = block {
                    let width = rows[0].len();
                    prop_assert!(rows.iter().all(|r| r.len() == width));
                }
            }
        }

        // Property: parsing never panics and always terminates
        #[test]
        fn prop_parse_total(input in "[#>|`*_\\-+ a-z0-9.\n]{0,200}") {
            let _ = MarkdownParser::new().parse(&input).unwrap();
        }
    }
}
