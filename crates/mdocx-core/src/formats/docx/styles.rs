// SPDX-License-Identifier: AGPL-3.0-or-later
//! `styles.xml` and `numbering.xml`
//!
//! Only Word's built-in styles are declared, under their built-in names, so a
//! word processor treats them as its own presets rather than custom styles.

use crate::ast::ParagraphStyle;
use crate::traits::Result;

use super::xml::{XmlOut, NS_MAIN};

/// Numbering instance linked from the List Bullet style
pub const BULLET_NUM_ID: &str = "1";
/// Numbering instance linked from the List Number style
pub const DECIMAL_NUM_ID: &str = "2";

const BODY_FONT: &str = "Calibri";
const HEADING_COLOR: &str = "2F5496";

/// Heading font sizes in half-points, levels 1 to 6
const HEADING_SIZES: [&str; 6] = ["32", "26", "24", "22", "22", "22"];

pub fn heading_style_id(level: u8) -> String {
    format!("Heading{}", level.clamp(1, 6))
}

fn style_header(
    out: &mut XmlOut,
    kind: &str,
    id: &str,
    name: &str,
    based_on: Option<&str>,
    default: bool,
) -> Result<()> {
    if default {
        out.open(
            "w:style",
            &[("w:type", kind), ("w:default", "1"), ("w:styleId", id)],
        )?;
    } else {
        out.open("w:style", &[("w:type", kind), ("w:styleId", id)])?;
    }
    out.val("w:name", name)?;
    if let Some(parent) = based_on {
        out.val("w:basedOn", parent)?;
    }
    Ok(())
}

fn doc_defaults(out: &mut XmlOut) -> Result<()> {
    out.open("w:docDefaults", &[])?;
    out.open("w:rPrDefault", &[])?;
    out.open("w:rPr", &[])?;
    out.empty(
        "w:rFonts",
        &[
            ("w:ascii", BODY_FONT),
            ("w:hAnsi", BODY_FONT),
            ("w:eastAsia", BODY_FONT),
            ("w:cs", BODY_FONT),
        ],
    )?;
    out.val("w:sz", "22")?;
    out.val("w:szCs", "22")?;
    out.empty("w:lang", &[("w:val", "en-US"), ("w:eastAsia", "zh-TW")])?;
    out.close("w:rPr")?;
    out.close("w:rPrDefault")?;
    out.open("w:pPrDefault", &[])?;
    out.open("w:pPr", &[])?;
    out.empty(
        "w:spacing",
        &[("w:after", "160"), ("w:line", "259"), ("w:lineRule", "auto")],
    )?;
    out.close("w:pPr")?;
    out.close("w:pPrDefault")?;
    out.close("w:docDefaults")
}

fn heading_style(out: &mut XmlOut, level: u8) -> Result<()> {
    let id = heading_style_id(level);
    let name = format!("heading {level}");
    let outline = (level - 1).to_string();
    let size = HEADING_SIZES[usize::from(level - 1)];
    let before = if level == 1 { "240" } else { "40" };

    style_header(out, "paragraph", &id, &name, Some("Normal"), false)?;
    out.val("w:next", "Normal")?;
    out.val("w:uiPriority", "9")?;
    out.empty("w:qFormat", &[])?;
    out.open("w:pPr", &[])?;
    out.empty("w:keepNext", &[])?;
    out.empty("w:keepLines", &[])?;
    out.empty("w:spacing", &[("w:before", before), ("w:after", "0")])?;
    out.val("w:outlineLvl", &outline)?;
    out.close("w:pPr")?;
    out.open("w:rPr", &[])?;
    out.empty("w:b", &[])?;
    out.empty("w:bCs", &[])?;
    out.val("w:color", HEADING_COLOR)?;
    out.val("w:sz", size)?;
    out.val("w:szCs", size)?;
    out.close("w:rPr")?;
    out.close("w:style")
}

fn body_style(out: &mut XmlOut, style: ParagraphStyle) -> Result<()> {
    match style {
        ParagraphStyle::Normal => {
            style_header(out, "paragraph", style.style_id(), style.name(), None, true)?;
            out.empty("w:qFormat", &[])?;
        }
        ParagraphStyle::Quote => {
            style_header(out, "paragraph", style.style_id(), style.name(), Some("Normal"), false)?;
            out.val("w:next", "Normal")?;
            out.val("w:uiPriority", "29")?;
            out.empty("w:qFormat", &[])?;
            out.open("w:pPr", &[])?;
            out.empty("w:spacing", &[("w:before", "200")])?;
            out.empty("w:ind", &[("w:left", "864"), ("w:right", "864")])?;
            out.val("w:jc", "center")?;
            out.close("w:pPr")?;
            out.open("w:rPr", &[])?;
            out.empty("w:i", &[])?;
            out.empty("w:iCs", &[])?;
            out.val("w:color", "404040")?;
            out.close("w:rPr")?;
        }
        ParagraphStyle::ListBullet | ParagraphStyle::ListNumber => {
            let num_id = if style == ParagraphStyle::ListBullet {
                BULLET_NUM_ID
            } else {
                DECIMAL_NUM_ID
            };
            style_header(out, "paragraph", style.style_id(), style.name(), Some("Normal"), false)?;
            out.val("w:uiPriority", "99")?;
            out.empty("w:unhideWhenUsed", &[])?;
            out.open("w:pPr", &[])?;
            out.open("w:numPr", &[])?;
            out.val("w:numId", num_id)?;
            out.close("w:numPr")?;
            out.empty("w:contextualSpacing", &[])?;
            out.close("w:pPr")?;
        }
    }
    out.close("w:style")
}

fn table_styles(out: &mut XmlOut) -> Result<()> {
    style_header(out, "table", "TableNormal", "Normal Table", None, true)?;
    out.val("w:uiPriority", "99")?;
    out.empty("w:semiHidden", &[])?;
    out.empty("w:unhideWhenUsed", &[])?;
    out.open("w:tblPr", &[])?;
    out.empty("w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
    out.open("w:tblCellMar", &[])?;
    for (side, width) in [("w:top", "0"), ("w:left", "108"), ("w:bottom", "0"), ("w:right", "108")] {
        out.empty(side, &[("w:w", width), ("w:type", "dxa")])?;
    }
    out.close("w:tblCellMar")?;
    out.close("w:tblPr")?;
    out.close("w:style")?;

    style_header(out, "table", "TableGrid", "Table Grid", Some("TableNormal"), false)?;
    out.val("w:uiPriority", "39")?;
    out.open("w:tblPr", &[])?;
    out.open("w:tblBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        out.empty(
            side,
            &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "auto")],
        )?;
    }
    out.close("w:tblBorders")?;
    out.close("w:tblPr")?;
    out.close("w:style")
}

/// Render `word/styles.xml`
pub fn styles_xml() -> Result<Vec<u8>> {
    let mut out = XmlOut::new();
    out.declaration()?;
    out.open("w:styles", &[("xmlns:w", NS_MAIN)])?;
    doc_defaults(&mut out)?;

    style_header(
        &mut out,
        "character",
        "DefaultParagraphFont",
        "Default Paragraph Font",
        None,
        true,
    )?;
    out.val("w:uiPriority", "1")?;
    out.empty("w:semiHidden", &[])?;
    out.empty("w:unhideWhenUsed", &[])?;
    out.close("w:style")?;

    for style in ParagraphStyle::ALL {
        body_style(&mut out, style)?;
    }
    for level in 1..=6 {
        heading_style(&mut out, level)?;
    }
    table_styles(&mut out)?;

    out.close("w:styles")?;
    Ok(out.into_bytes())
}

fn abstract_num(
    out: &mut XmlOut,
    id: &str,
    format: &str,
    text: &str,
    style: ParagraphStyle,
) -> Result<()> {
    out.open("w:abstractNum", &[("w:abstractNumId", id)])?;
    out.val("w:multiLevelType", "singleLevel")?;
    out.open("w:lvl", &[("w:ilvl", "0")])?;
    out.val("w:start", "1")?;
    out.val("w:numFmt", format)?;
    out.val("w:pStyle", style.style_id())?;
    out.val("w:lvlText", text)?;
    out.val("w:lvlJc", "left")?;
    out.open("w:pPr", &[])?;
    out.empty("w:ind", &[("w:left", "360"), ("w:hanging", "360")])?;
    out.close("w:pPr")?;
    out.close("w:lvl")?;
    out.close("w:abstractNum")
}

/// Render `word/numbering.xml`
pub fn numbering_xml() -> Result<Vec<u8>> {
    let mut out = XmlOut::new();
    out.declaration()?;
    out.open("w:numbering", &[("xmlns:w", NS_MAIN)])?;
    abstract_num(&mut out, "0", "bullet", "\u{2022}", ParagraphStyle::ListBullet)?;
    abstract_num(&mut out, "1", "decimal", "%1.", ParagraphStyle::ListNumber)?;
    for (num_id, abstract_id) in [(BULLET_NUM_ID, "0"), (DECIMAL_NUM_ID, "1")] {
        out.open("w:num", &[("w:numId", num_id)])?;
        out.val("w:abstractNumId", abstract_id)?;
        out.close("w:num")?;
    }
    out.close("w:numbering")?;
    Ok(out.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles() -> String {
        String::from_utf8(styles_xml().unwrap()).unwrap()
    }

    #[test]
    fn test_declares_builtin_names_only() {
        let xml = styles();
        for name in [
            "Normal",
            "Quote",
            "List Bullet",
            "List Number",
            "heading 1",
            "heading 6",
            "Table Grid",
            "Normal Table",
        ] {
            assert!(xml.contains(&format!(r#"<w:name w:val="{name}"/>"#)), "{name}");
        }
    }

    #[test]
    fn test_list_styles_link_numbering() {
        let xml = styles();
        assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
        assert!(xml.contains(r#"<w:numId w:val="2"/>"#));

        let numbering = String::from_utf8(numbering_xml().unwrap()).unwrap();
        assert!(numbering.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert!(numbering.contains(r#"<w:numFmt w:val="decimal"/>"#));
    }

    #[test]
    fn test_heading_style_id_clamps() {
        assert_eq!(heading_style_id(0), "Heading1");
        assert_eq!(heading_style_id(3), "Heading3");
        assert_eq!(heading_style_id(9), "Heading6");
    }
}
