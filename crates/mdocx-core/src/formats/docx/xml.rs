// SPDX-License-Identifier: AGPL-3.0-or-later
//! Small event-writer wrapper for WordprocessingML parts

use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::traits::{ConversionError, Result};

pub const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_PACKAGE_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
pub const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

/// XML 1.0 `Char` production; surrogates cannot occur in a `char`
fn is_xml_char(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Remove characters that may not appear in an XML document at all
fn xml_chars(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|&ch| is_xml_char(ch)).collect())
    }
}

fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for &attr in attrs {
        start.push_attribute(attr);
    }
    start
}

/// In-memory XML writer; every method fails only on writer errors
pub struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer.write_event(event).map_err(ConversionError::failure)
    }

    /// `<?xml version="1.0" encoding="UTF-8" standalone="yes"?>`
    pub fn declaration(&mut self) -> Result<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
    }

    pub fn open(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.event(Event::Start(element(name, attrs)))
    }

    pub fn close(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        self.event(Event::Empty(element(name, attrs)))
    }

    /// Escaped character data; control characters XML cannot carry are dropped
    pub fn text(&mut self, text: &str) -> Result<()> {
        let text = xml_chars(text);
        self.event(Event::Text(BytesText::new(&text)))
    }

    /// `<name attrs>text</name>`
    pub fn leaf(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.open(name, attrs)?;
        self.text(text)?;
        self.close(name)
    }

    /// `<name w:val="value"/>`
    pub fn val(&mut self, name: &str, value: &str) -> Result<()> {
        self.empty(name, &[("w:val", value)])
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

impl Default for XmlOut {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_escaped() {
        let mut out = XmlOut::new();
        out.leaf("w:t", &[], "a < b & c").unwrap();
        let xml = String::from_utf8(out.into_bytes()).unwrap();
        assert_eq!(xml, "<w:t>a &lt; b &amp; c</w:t>");
    }

    #[test]
    fn test_forbidden_control_characters_are_dropped() {
        let mut out = XmlOut::new();
        out.leaf("w:t", &[], "page one\u{000C}page\u{0} two\u{FFFE}").unwrap();
        let xml = String::from_utf8(out.into_bytes()).unwrap();
        assert_eq!(xml, "<w:t>page onepage two</w:t>");
    }

    #[test]
    fn test_allowed_characters_are_borrowed() {
        assert!(matches!(xml_chars("tab\there \u{1F600}"), Cow::Borrowed(_)));
        assert!(!is_xml_char('\u{FFFF}'));
        assert!(is_xml_char('\u{E000}'));
    }

    #[test]
    fn test_val_shorthand() {
        let mut out = XmlOut::new();
        out.val("w:pStyle", "Quote").unwrap();
        let xml = String::from_utf8(out.into_bytes()).unwrap();
        assert_eq!(xml, r#"<w:pStyle w:val="Quote"/>"#);
    }
}
