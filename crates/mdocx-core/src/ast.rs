// SPDX-License-Identifier: AGPL-3.0-or-later
//! Output document model
//!
//! The model mirrors what a word processor shows: headings, paragraphs made of
//! styled runs, and plain-text tables. Code blocks and horizontal rules have no
//! node of their own; they are paragraphs carrying a decoration (background
//! shading or a bottom border), which is all the target format offers for them.

use serde::{Deserialize, Serialize};

use crate::builder::{BorderLine, DocumentBuilder, ParagraphProps, ShadingColor};

/// A contiguous span of text sharing one formatting combination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl Run {
    pub fn new(text: impl Into<String>, bold: bool, italic: bool, code: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
            code,
        }
    }

    /// Unstyled text
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false, false, false)
    }

    /// Monospace text
    pub fn code(text: impl Into<String>) -> Self {
        Self::new(text, false, false, true)
    }

    pub fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.code)
    }
}

/// Built-in paragraph styles used for body text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    Normal,
    Quote,
    ListBullet,
    ListNumber,
}

impl ParagraphStyle {
    /// Style identifier as referenced from document XML
    pub const fn style_id(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Quote => "Quote",
            Self::ListBullet => "ListBullet",
            Self::ListNumber => "ListNumber",
        }
    }

    /// Built-in display name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Quote => "Quote",
            Self::ListBullet => "List Bullet",
            Self::ListNumber => "List Number",
        }
    }

    pub const ALL: [Self; 4] = [Self::Normal, Self::Quote, Self::ListBullet, Self::ListNumber];
}

/// Block-level nodes, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Heading with level 1-6, text written verbatim
    Heading { level: u8, text: String },

    /// Paragraph of styled runs
    Paragraph {
        runs: Vec<Run>,
        style: ParagraphStyle,
        /// Left indent in twips, overriding the style's own indent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        left_indent: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        shading: Option<ShadingColor>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bottom_border: Option<BorderLine>,
    },

    /// Rectangular grid of cell text; row 0 is the header
    Table { rows: Vec<Vec<String>> },
}

impl Block {
    pub fn word_count(&self) -> usize {
        match self {
            Block::Heading { text, .. } => text.split_whitespace().count(),
            Block::Paragraph { runs, .. } => runs.iter().map(|r| r.text.split_whitespace().count()).sum(),
            Block::Table { rows } => rows
                .iter()
                .flatten()
                .map(|cell| cell.split_whitespace().count())
                .sum(),
        }
    }

    pub fn char_count(&self) -> usize {
        match self {
            Block::Heading { text, .. } => text.chars().count(),
            Block::Paragraph { runs, .. } => runs.iter().map(|r| r.text.chars().count()).sum(),
            Block::Table { rows } => rows.iter().flatten().map(|cell| cell.chars().count()).sum(),
        }
    }

    /// Concatenated run text of a paragraph, `None` for other blocks
    pub fn paragraph_text(&self) -> Option<String> {
        match self {
            Block::Paragraph { runs, .. } => Some(runs.iter().map(|r| r.text.as_str()).collect()),
            _ => None,
        }
    }
}

/// The root document node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn word_count(&self) -> usize {
        self.blocks.iter().map(Block::word_count).sum()
    }

    pub fn char_count(&self) -> usize {
        self.blocks.iter().map(Block::char_count).sum()
    }

    /// Body-level paragraphs, headings included
    pub fn paragraph_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| !matches!(b, Block::Table { .. }))
            .count()
    }

    pub fn table_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Table { .. }))
            .count()
    }

    /// Replay every block into another builder, in order
    pub fn build_into<B: DocumentBuilder + ?Sized>(&self, builder: &mut B) {
        for block in &self.blocks {
            match block {
                Block::Heading { level, text } => builder.append_heading(*level, text),
                Block::Paragraph {
                    runs,
                    style,
                    left_indent,
                    shading,
                    bottom_border,
                } => {
                    builder.append_paragraph(
                        runs,
                        ParagraphProps {
                            style: *style,
                            left_indent: *left_indent,
                        },
                    );
                    if let Some(fill) = shading {
                        builder.set_paragraph_shading(fill.clone());
                    }
                    if let Some(border) = bottom_border {
                        builder.set_paragraph_bottom_border(*border);
                    }
                }
                Block::Table { rows } => builder.append_table(rows),
            }
        }
    }

    fn last_paragraph_mut(&mut self) -> Option<&mut Block> {
        self.blocks
            .last_mut()
            .filter(|b| matches!(b, Block::Paragraph { .. }))
    }
}

impl DocumentBuilder for Document {
    fn append_heading(&mut self, level: u8, text: &str) {
        self.blocks.push(Block::Heading {
            level,
            text: text.to_string(),
        });
    }

    fn append_paragraph(&mut self, runs: &[Run], props: ParagraphProps) {
        self.blocks.push(Block::Paragraph {
            runs: runs.to_vec(),
            style: props.style,
            left_indent: props.left_indent,
            shading: None,
            bottom_border: None,
        });
    }

    fn append_table(&mut self, rows: &[Vec<String>]) {
        self.blocks.push(Block::Table {
            rows: rows.to_vec(),
        });
    }

    fn set_paragraph_shading(&mut self, fill: ShadingColor) {
        if let Some(Block::Paragraph { shading, .. }) = self.last_paragraph_mut() {
            *shading = Some(fill);
        }
    }

    fn set_paragraph_bottom_border(&mut self, border: BorderLine) {
        if let Some(Block::Paragraph { bottom_border, .. }) = self.last_paragraph_mut() {
            *bottom_border = Some(border);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.append_heading(1, "Hello World");
        doc.append_paragraph(
            &[Run::plain("one "), Run::new("two", true, false, false)],
            ParagraphProps::new(ParagraphStyle::Normal),
        );
        doc.append_table(&[vec!["a".into(), "b".into()], vec!["1".into(), String::new()]]);
        doc
    }

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.blocks.is_empty());
        assert_eq!(doc.word_count(), 0);
    }

    #[test]
    fn test_counts() {
        let doc = sample();
        assert_eq!(doc.word_count(), 2 + 2 + 3);
        assert_eq!(doc.paragraph_count(), 2);
        assert_eq!(doc.table_count(), 1);
    }

    #[test]
    fn test_decorations_target_last_paragraph() {
        let mut doc = Document::new();
        doc.append_paragraph(&[Run::code("x")], ParagraphProps::new(ParagraphStyle::Normal));
        doc.set_paragraph_shading(ShadingColor::new("F0F0F0"));
        assert!(matches!(
            &doc.blocks[0],
            Block::Paragraph { shading: Some(c), .. } if c.as_str() == "F0F0F0"
        ));
    }

    #[test]
    fn test_decoration_without_paragraph_is_ignored() {
        let mut doc = Document::new();
        doc.append_heading(2, "Title");
        doc.set_paragraph_bottom_border(BorderLine::default());
        assert_eq!(doc.blocks, vec![Block::Heading { level: 2, text: "Title".into() }]);
    }

    #[test]
    fn test_build_into_replays_everything() {
        let mut doc = sample();
        doc.append_paragraph(&[], ParagraphProps::new(ParagraphStyle::Normal));
        doc.set_paragraph_bottom_border(BorderLine::default());

        let mut copy = Document::new();
        doc.build_into(&mut copy);
        assert_eq!(copy, doc);
    }

    #[test]
    fn test_serde_roundtrip() {
        let doc = sample();
        let json = serde_json::to_string(&doc).expect("serialize");
        let back: Document = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, doc);
    }

    #[test]
    fn test_style_names_are_builtin() {
        let names: Vec<_> = ParagraphStyle::ALL.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["Normal", "Quote", "List Bullet", "List Number"]);
    }
}
