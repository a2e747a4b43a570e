// SPDX-License-Identifier: AGPL-3.0-or-later
//! Word (DOCX) writer
//!
//! [`DocxWriter`] implements [`DocumentBuilder`] and accumulates
//! `word/document.xml` in memory. The last paragraph is held back until the
//! next block arrives so decorations can still be attached to it. Nothing
//! touches the filesystem; [`DocxWriter::finish`] returns the packaged bytes.

pub mod package;
pub mod styles;
pub mod xml;

use crate::ast::{Document, ParagraphStyle, Run};
use crate::builder::{BorderLine, DocumentBuilder, ParagraphProps, ShadingColor};
use crate::traits::{ConversionError, RenderConfig, Renderer, Result};
use crate::units;

use xml::{XmlOut, NS_MAIN, NS_REL};

#[derive(Debug, Clone)]
struct PendingParagraph {
    runs: Vec<Run>,
    props: ParagraphProps,
    shading: Option<ShadingColor>,
    bottom_border: Option<BorderLine>,
}

/// Streaming builder for one DOCX document
pub struct DocxWriter {
    config: RenderConfig,
    body: XmlOut,
    pending: Option<PendingParagraph>,
    title: Option<String>,
    failure: Option<ConversionError>,
}

impl DocxWriter {
    pub fn new(config: RenderConfig) -> Self {
        let mut writer = Self {
            config,
            body: XmlOut::new(),
            pending: None,
            title: None,
            failure: None,
        };
        let header = writer.write_header();
        writer.record(header);
        writer
    }

    /// Keep the first writer error; builder methods cannot return it
    fn record(&mut self, result: Result<()>) {
        if let Err(err) = result {
            self.failure.get_or_insert(err);
        }
    }

    fn write_header(&mut self) -> Result<()> {
        self.body.declaration()?;
        self.body
            .open("w:document", &[("xmlns:w", NS_MAIN), ("xmlns:r", NS_REL)])?;
        self.body.open("w:body", &[])
    }

    fn write_footer(&mut self) -> Result<()> {
        let width = units::PAGE_WIDTH.to_string();
        let height = units::PAGE_HEIGHT.to_string();
        let margin = units::PAGE_MARGIN.to_string();
        self.body.open("w:sectPr", &[])?;
        self.body
            .empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
        self.body.empty(
            "w:pgMar",
            &[
                ("w:top", margin.as_str()),
                ("w:right", margin.as_str()),
                ("w:bottom", margin.as_str()),
                ("w:left", margin.as_str()),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        )?;
        self.body.close("w:sectPr")?;
        self.body.close("w:body")?;
        self.body.close("w:document")
    }

    fn flush_pending(&mut self) -> Result<()> {
        match self.pending.take() {
            Some(paragraph) => write_paragraph(&mut self.body, &self.config, &paragraph),
            None => Ok(()),
        }
    }

    fn flush(&mut self) {
        let flushed = self.flush_pending();
        self.record(flushed);
    }

    /// Close the body and package every part into a DOCX archive
    pub fn finish(mut self) -> Result<Vec<u8>> {
        self.flush();
        let footer = self.write_footer();
        self.record(footer);
        if let Some(err) = self.failure {
            return Err(err);
        }

        let document = self.body.into_bytes();
        package::zip_parts(&[
            ("[Content_Types].xml", package::content_types_xml()?),
            ("_rels/.rels", package::package_rels_xml()?),
            ("word/document.xml", document),
            ("word/_rels/document.xml.rels", package::document_rels_xml()?),
            ("word/styles.xml", styles::styles_xml()?),
            ("word/numbering.xml", styles::numbering_xml()?),
            ("docProps/core.xml", package::core_xml(self.title.as_deref())?),
            ("docProps/app.xml", package::app_xml()?),
        ])
    }
}

impl DocumentBuilder for DocxWriter {
    fn append_heading(&mut self, level: u8, text: &str) {
        self.flush();
        if self.title.is_none() {
            self.title = Some(text.to_string());
        }
        let written = write_heading(&mut self.body, level, text);
        self.record(written);
    }

    fn append_paragraph(&mut self, runs: &[Run], props: ParagraphProps) {
        self.flush();
        self.pending = Some(PendingParagraph {
            runs: runs.to_vec(),
            props,
            shading: None,
            bottom_border: None,
        });
    }

    fn append_table(&mut self, rows: &[Vec<String>]) {
        self.flush();
        let written = write_table(&mut self.body, &self.config, rows);
        self.record(written);
    }

    fn set_paragraph_shading(&mut self, fill: ShadingColor) {
        if let Some(paragraph) = &mut self.pending {
            paragraph.shading = Some(fill);
        }
    }

    fn set_paragraph_bottom_border(&mut self, border: BorderLine) {
        if let Some(paragraph) = &mut self.pending {
            paragraph.bottom_border = Some(border);
        }
    }
}

/// Run text; newlines become breaks and tabs become tab characters
fn write_text(out: &mut XmlOut, text: &str) -> Result<()> {
    for (line_index, line) in text.split('\n').enumerate() {
        if line_index > 0 {
            out.empty("w:br", &[])?;
        }
        for (piece_index, piece) in line.split('\t').enumerate() {
            if piece_index > 0 {
                out.empty("w:tab", &[])?;
            }
            if !piece.is_empty() {
                out.leaf("w:t", &[("xml:space", "preserve")], piece)?;
            }
        }
    }
    Ok(())
}

fn write_run(out: &mut XmlOut, config: &RenderConfig, run: &Run) -> Result<()> {
    out.open("w:r", &[])?;
    if !run.is_plain() {
        out.open("w:rPr", &[])?;
        if run.code {
            let font = config.code_font.as_str();
            out.empty(
                "w:rFonts",
                &[("w:ascii", font), ("w:hAnsi", font), ("w:cs", font)],
            )?;
        }
        if run.bold {
            out.empty("w:b", &[])?;
        }
        if run.italic {
            out.empty("w:i", &[])?;
        }
        if run.code {
            let size = config.code_font_half_points.to_string();
            out.val("w:sz", &size)?;
            out.val("w:szCs", &size)?;
        }
        out.close("w:rPr")?;
    }
    write_text(out, &run.text)?;
    out.close("w:r")
}

fn write_paragraph(
    out: &mut XmlOut,
    config: &RenderConfig,
    paragraph: &PendingParagraph,
) -> Result<()> {
    let style = paragraph.props.style;
    let has_props = style != ParagraphStyle::Normal
        || paragraph.bottom_border.is_some()
        || paragraph.shading.is_some()
        || paragraph.props.left_indent.is_some();

    out.open("w:p", &[])?;
    if has_props {
        out.open("w:pPr", &[])?;
        if style != ParagraphStyle::Normal {
            out.val("w:pStyle", style.style_id())?;
        }
        if let Some(border) = paragraph.bottom_border {
            let size = border.size.to_string();
            let space = border.space.to_string();
            out.open("w:pBdr", &[])?;
            out.empty(
                "w:bottom",
                &[
                    ("w:val", "single"),
                    ("w:sz", size.as_str()),
                    ("w:space", space.as_str()),
                    ("w:color", "auto"),
                ],
            )?;
            out.close("w:pBdr")?;
        }
        if let Some(fill) = &paragraph.shading {
            out.empty(
                "w:shd",
                &[("w:val", "clear"), ("w:color", "auto"), ("w:fill", fill.as_str())],
            )?;
        }
        if let Some(indent) = paragraph.props.left_indent {
            let left = indent.to_string();
            out.empty("w:ind", &[("w:left", left.as_str())])?;
        }
        out.close("w:pPr")?;
    }
    for run in &paragraph.runs {
        write_run(out, config, run)?;
    }
    out.close("w:p")
}

fn write_heading(out: &mut XmlOut, level: u8, text: &str) -> Result<()> {
    out.open("w:p", &[])?;
    out.open("w:pPr", &[])?;
    out.val("w:pStyle", &styles::heading_style_id(level))?;
    out.close("w:pPr")?;
    out.open("w:r", &[])?;
    write_text(out, text)?;
    out.close("w:r")?;
    out.close("w:p")
}

fn write_table(out: &mut XmlOut, config: &RenderConfig, rows: &[Vec<String>]) -> Result<()> {
    let columns = rows.first().map_or(0, Vec::len);
    if columns == 0 {
        return Ok(());
    }
    let column_width = (config.text_width / columns as u32).to_string();

    out.open("w:tbl", &[])?;
    out.open("w:tblPr", &[])?;
    out.val("w:tblStyle", "TableGrid")?;
    out.empty("w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    out.empty(
        "w:tblLook",
        &[
            ("w:val", "04A0"),
            ("w:firstRow", "1"),
            ("w:lastRow", "0"),
            ("w:firstColumn", "1"),
            ("w:lastColumn", "0"),
            ("w:noHBand", "0"),
            ("w:noVBand", "1"),
        ],
    )?;
    out.close("w:tblPr")?;

    out.open("w:tblGrid", &[])?;
    for _ in 0..columns {
        out.empty("w:gridCol", &[("w:w", column_width.as_str())])?;
    }
    out.close("w:tblGrid")?;

    for (row_index, row) in rows.iter().enumerate() {
        out.open("w:tr", &[])?;
        for cell in row {
            out.open("w:tc", &[])?;
            out.open("w:tcPr", &[])?;
            out.empty("w:tcW", &[("w:w", column_width.as_str()), ("w:type", "dxa")])?;
            out.close("w:tcPr")?;
            out.open("w:p", &[])?;
            if !cell.is_empty() {
                write_run(out, config, &Run::new(cell.as_str(), row_index == 0, false, false))?;
            }
            out.close("w:p")?;
            out.close("w:tc")?;
        }
        out.close("w:tr")?;
    }
    out.close("w:tbl")
}

/// Renders a [`Document`] into DOCX bytes
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxRenderer;

impl DocxRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DocxRenderer {
    fn extension(&self) -> &'static str {
        "docx"
    }

    fn render(&self, doc: &Document, config: &RenderConfig) -> Result<Vec<u8>> {
        let mut writer = DocxWriter::new(config.clone());
        doc.build_into(&mut writer);
        writer.finish()
    }
}
