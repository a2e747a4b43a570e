// SPDX-License-Identifier: AGPL-3.0-or-later
//! Document-builder capability
//!
//! The parser never touches the container format. It appends headings,
//! paragraphs and tables through [`DocumentBuilder`] and asks for the two
//! paragraph decorations the target format needs for code blocks and rules.

use serde::{Deserialize, Serialize};

use crate::ast::{ParagraphStyle, Run};
use crate::units;

/// Paragraph-level properties passed with each appended paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParagraphProps {
    pub style: ParagraphStyle,
    /// Left indent in twips; `None` keeps the style's indent
    pub left_indent: Option<u32>,
}

impl ParagraphProps {
    pub fn new(style: ParagraphStyle) -> Self {
        Self {
            style,
            left_indent: None,
        }
    }

    pub fn with_left_indent(mut self, twips: u32) -> Self {
        self.left_indent = Some(twips);
        self
    }
}

/// Background fill as a six-digit RGB hex string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShadingColor(String);

impl ShadingColor {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ShadingColor {
    fn default() -> Self {
        Self::new(units::CODE_SHADING_FILL)
    }
}

/// A single paragraph border line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderLine {
    /// Width in eighths of a point
    pub size: u32,
    /// Distance from text in points
    pub space: u32,
}

impl Default for BorderLine {
    fn default() -> Self {
        Self {
            size: units::RULE_BORDER_SIZE,
            space: units::RULE_BORDER_SPACE,
        }
    }
}

/// Sink for block-level output
///
/// Decorations apply to the most recently appended paragraph. Implementations
/// ignore them when the last block is not a paragraph.
pub trait DocumentBuilder {
    /// Append a heading using the built-in heading style for `level` (1-6)
    fn append_heading(&mut self, level: u8, text: &str);

    /// Append a paragraph of runs
    fn append_paragraph(&mut self, runs: &[Run], props: ParagraphProps);

    /// Append a table; rows are rectangular and row 0 is the header
    fn append_table(&mut self, rows: &[Vec<String>]);

    /// Shade the background of the last paragraph
    fn set_paragraph_shading(&mut self, fill: ShadingColor);

    /// Draw a border under the last paragraph
    fn set_paragraph_bottom_border(&mut self, border: BorderLine);
}
