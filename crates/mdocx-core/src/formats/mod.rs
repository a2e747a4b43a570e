// SPDX-License-Identifier: AGPL-3.0-or-later
//! Format handlers: the Markdown reader and the DOCX writer

pub mod docx;
pub mod markdown;

pub use docx::{DocxRenderer, DocxWriter};
pub use markdown::MarkdownParser;
