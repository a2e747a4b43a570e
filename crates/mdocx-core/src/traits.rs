// SPDX-License-Identifier: AGPL-3.0-or-later
//! Parser and Renderer traits, error type and render configuration

use std::path::PathBuf;

use crate::ast::Document;
use crate::units;

/// Error type for conversions
///
/// Only I/O-level problems and container assembly failures are errors.
/// Irregular markup never is.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Source file not found or unreadable: {}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write destination file: {}", path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Conversion failed: {0}")]
    ConversionFailure(String),
}

impl ConversionError {
    pub fn failure(cause: impl std::fmt::Display) -> Self {
        Self::ConversionFailure(cause.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ConversionError>;

/// Fixed rendering knobs; `Default` is the only configuration `convert` uses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Monospace face for code runs
    pub code_font: String,
    /// Code font size in half-points
    pub code_font_half_points: u32,
    /// Usable text width in twips, split evenly across table columns
    pub text_width: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            code_font: units::CODE_FONT.to_string(),
            code_font_half_points: units::CODE_FONT_HALF_POINTS,
            text_width: units::TEXT_WIDTH,
        }
    }
}

/// Parser trait: convert markup text to the document model
pub trait Parser {
    fn parse(&self, input: &str) -> Result<Document>;
}

/// Renderer trait: serialize the document model into a container format
pub trait Renderer {
    /// File extension of the produced container
    fn extension(&self) -> &'static str;

    /// Render a Document to bytes, entirely in memory
    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<Vec<u8>>;
}
