// SPDX-License-Identifier: AGPL-3.0-or-later
//! File-level conversion entry point
//!
//! The source is read completely before anything is produced, the document is
//! built and packaged in memory, and the destination is replaced once at the
//! end. The bytes go to a temporary file beside the destination, which is then
//! renamed over it, so the destination is either the old file or the new one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use serde::Serialize;
use tracing::{debug, info};

use crate::ast::Document;
use crate::formats::{DocxRenderer, MarkdownParser};
use crate::traits::{ConversionError, Parser, RenderConfig, Renderer, Result};

/// Summary of a successful conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub blocks: usize,
    pub paragraphs: usize,
    pub tables: usize,
    pub words: usize,
    pub characters: usize,
    pub bytes_written: usize,
}

impl ConversionReport {
    fn new(doc: &Document, bytes_written: usize) -> Self {
        Self {
            blocks: doc.blocks.len(),
            paragraphs: doc.paragraph_count(),
            tables: doc.table_count(),
            words: doc.word_count(),
            characters: doc.char_count(),
            bytes_written,
        }
    }
}

/// Destination used when none is given: the source path with a `.docx`
/// extension, in the same directory
pub fn default_output_path(source: impl AsRef<Path>) -> PathBuf {
    source.as_ref().with_extension(DocxRenderer::new().extension())
}

/// Read a whole Markdown source file
pub fn read_source(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ConversionError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|err| {
        ConversionError::failure(format!("{} is not valid UTF-8: {err}", path.display()))
    })
}

fn write_destination(path: &Path, bytes: &[u8]) -> Result<()> {
    let unwritable = |source: std::io::Error| ConversionError::DestinationUnwritable {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir).map_err(unwritable)?;
    staged.write_all(bytes).map_err(unwritable)?;
    staged.as_file().sync_all().map_err(unwritable)?;

    // Keep the mode of a file being replaced
    if let Ok(existing) = fs::metadata(path) {
        if existing.is_file() {
            staged
                .as_file()
                .set_permissions(existing.permissions())
                .map_err(unwritable)?;
        }
    }

    staged.persist(path).map_err(|err| unwritable(err.error))?;
    Ok(())
}

/// Parse Markdown text into the document model
pub fn parse_markdown(markdown: &str) -> Result<Document> {
    MarkdownParser::new().parse(markdown)
}

/// Read and parse the Markdown file at `path`
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    parse_markdown(&read_source(path)?)
}

/// Convert Markdown text to DOCX bytes without touching the filesystem
pub fn markdown_to_docx(markdown: &str) -> Result<Vec<u8>> {
    let doc = parse_markdown(markdown)?;
    DocxRenderer::new().render(&doc, &RenderConfig::default())
}

/// Convert the Markdown file at `source` into a DOCX file at `destination`
pub fn convert(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<ConversionReport> {
    let source = source.as_ref();
    let destination = destination.as_ref();

    let input = read_source(source)?;
    debug!(source = %source.display(), bytes = input.len(), "read source");

    let doc = parse_markdown(&input)?;
    let bytes = DocxRenderer::new().render(&doc, &RenderConfig::default())?;
    write_destination(destination, &bytes)?;

    let report = ConversionReport::new(&doc, bytes.len());
    info!(
        source = %source.display(),
        destination = %destination.display(),
        paragraphs = report.paragraphs,
        tables = report.tables,
        bytes = report.bytes_written,
        "conversion complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path("notes/readme.md"),
            PathBuf::from("notes/readme.docx")
        );
        assert_eq!(default_output_path("plain"), PathBuf::from("plain.docx"));
    }

    #[test]
    fn test_write_destination_replaces_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        fs::write(&path, b"old contents").unwrap();

        write_destination(&path, b"new").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "staging file left behind");
    }

    #[test]
    fn test_write_destination_failure_keeps_directory_clean() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("taken");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        let err = write_destination(&target, b"new").unwrap_err();

        assert!(matches!(err, ConversionError::DestinationUnwritable { .. }));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(fs::read(target.join("keep")).unwrap(), b"x");
    }

    #[test]
    fn test_report_counts() {
        let doc = parse_markdown("# Hi there\n| a | b |\n| c |").unwrap();
        let report = ConversionReport::new(&doc, 10);
        assert_eq!(
            report,
            ConversionReport {
                blocks: 2,
                paragraphs: 1,
                tables: 1,
                words: 5,
                characters: 11,
                bytes_written: 10,
            }
        );
    }

    #[test]
    fn test_markdown_to_docx_is_a_zip() {
        let bytes = markdown_to_docx("# Hi").unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
