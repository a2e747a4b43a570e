// SPDX-License-Identifier: AGPL-3.0-or-later
//! OPC packaging: relationship parts, document properties and the zip container

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::traits::{ConversionError, Result};

use super::xml::{XmlOut, NS_CONTENT_TYPES, NS_PACKAGE_REL};

const APPLICATION: &str = "mdocx";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";

/// Part names and content types, in archive order after `[Content_Types].xml`
const OVERRIDES: [(&str, &str); 5] = [
    (
        "/word/document.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    ),
    (
        "/word/styles.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
    ),
    (
        "/word/numbering.xml",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
    ),
    (
        "/docProps/core.xml",
        "application/vnd.openxmlformats-package.core-properties+xml",
    ),
    (
        "/docProps/app.xml",
        "application/vnd.openxmlformats-officedocument.extended-properties+xml",
    ),
];

pub fn content_types_xml() -> Result<Vec<u8>> {
    let mut out = XmlOut::new();
    out.declaration()?;
    out.open("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    out.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    out.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for (part, content_type) in OVERRIDES {
        out.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    out.close("Types")?;
    Ok(out.into_bytes())
}

fn relationships(targets: &[(&str, &str)]) -> Result<Vec<u8>> {
    let mut out = XmlOut::new();
    out.declaration()?;
    out.open("Relationships", &[("xmlns", NS_PACKAGE_REL)])?;
    for (index, (kind, target)) in targets.iter().enumerate() {
        let id = format!("rId{}", index + 1);
        out.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", *kind), ("Target", *target)],
        )?;
    }
    out.close("Relationships")?;
    Ok(out.into_bytes())
}

/// `_rels/.rels`
pub fn package_rels_xml() -> Result<Vec<u8>> {
    relationships(&[
        (REL_OFFICE_DOCUMENT, "word/document.xml"),
        (REL_CORE_PROPERTIES, "docProps/core.xml"),
        (REL_EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

/// `word/_rels/document.xml.rels`
pub fn document_rels_xml() -> Result<Vec<u8>> {
    relationships(&[(REL_STYLES, "styles.xml"), (REL_NUMBERING, "numbering.xml")])
}

/// `docProps/core.xml`; the title is the first heading when there is one
pub fn core_xml(title: Option<&str>) -> Result<Vec<u8>> {
    let mut out = XmlOut::new();
    out.declaration()?;
    out.open(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    if let Some(title) = title {
        out.leaf("dc:title", &[], title)?;
    }
    out.leaf("dc:creator", &[], APPLICATION)?;
    out.close("cp:coreProperties")?;
    Ok(out.into_bytes())
}

/// `docProps/app.xml`
pub fn app_xml() -> Result<Vec<u8>> {
    let mut out = XmlOut::new();
    out.declaration()?;
    out.open(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    out.leaf("Application", &[], APPLICATION)?;
    out.close("Properties")?;
    Ok(out.into_bytes())
}

/// Zip the parts, in the given order, into a single in-memory archive
pub fn zip_parts(parts: &[(&str, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, bytes) in parts {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        archive
            .start_file(*name, options)
            .map_err(ConversionError::failure)?;
        archive.write_all(bytes).map_err(ConversionError::failure)?;
    }
    let cursor = archive.finish().map_err(ConversionError::failure)?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_relationship_ids_are_sequential() {
        let xml = String::from_utf8(document_rels_xml().unwrap()).unwrap();
        assert!(xml.contains(r#"Id="rId1""#));
        assert!(xml.contains(r#"Target="styles.xml""#));
        assert!(xml.contains(r#"Id="rId2""#));
        assert!(xml.contains(r#"Target="numbering.xml""#));
    }

    #[test]
    fn test_core_title_is_escaped() {
        let xml = String::from_utf8(core_xml(Some("R&D <notes")).unwrap()).unwrap();
        assert!(xml.contains("<dc:title>R&amp;D &lt;notes</dc:title>"));
    }

    #[test]
    fn test_zip_parts_roundtrip() {
        let bytes = zip_parts(&[("a.xml", b"<a/>".to_vec()), ("b/c.xml", b"<c/>".to_vec())]).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut content = String::new();
        archive
            .by_name("b/c.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<c/>");
    }
}
