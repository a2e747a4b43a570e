// SPDX-License-Identifier: AGPL-3.0-or-later
//! mdocx Core - Markdown to Word conversion using built-in styles only
//!
//! This crate provides:
//! - A line-oriented Markdown reader (headings, lists, tables, fenced code,
//!   quotes, rules and inline emphasis)
//! - A small output document model and the builder capability it is made with
//! - A DOCX writer that references only Word's built-in styles
//! - `convert(source, destination)` for whole-file conversion

pub mod ast;
pub mod builder;
pub mod convert;
pub mod formats;
pub mod inline;
pub mod traits;
pub mod units;

pub use ast::{Block, Document, ParagraphStyle, Run};
pub use builder::{BorderLine, DocumentBuilder, ParagraphProps, ShadingColor};
pub use convert::{
    convert, default_output_path, markdown_to_docx, parse_file, parse_markdown, read_source,
    ConversionReport,
};
pub use inline::format_inline;
pub use traits::{ConversionError, Parser, RenderConfig, Renderer, Result};
