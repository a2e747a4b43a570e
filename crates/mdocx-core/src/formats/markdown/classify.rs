// SPDX-License-Identifier: AGPL-3.0-or-later
//! Line classification
//!
//! Rules are tried in a fixed order and the first match wins. Tables and
//! fenced code are only recognised by their first line here; their handlers
//! decide how many lines they consume.

use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

static UNORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[*\-+]\s+(.+)$").unwrap());

static ORDERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\d+\.\s+(.+)$").unwrap());

static QUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>\s+(.+)$").unwrap());

static RULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\-*_]{3,}$").unwrap());

/// Opening and closing marker of a fenced code block
pub const FENCE: &str = "```";

/// One classified line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockUnit<'a> {
    Blank,
    Heading { level: u8, text: &'a str },
    ListItem { ordered: bool, indent_level: u32, text: &'a str },
    /// First line of a pipe table
    Table,
    /// Opening fence of a code block
    CodeFence,
    Quote(&'a str),
    HorizontalRule,
    Paragraph(&'a str),
}

impl BlockUnit<'_> {
    /// Short name for log output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Heading { .. } => "heading",
            Self::ListItem { .. } => "list_item",
            Self::Table => "table",
            Self::CodeFence => "code_block",
            Self::Quote(_) => "quote",
            Self::HorizontalRule => "horizontal_rule",
            Self::Paragraph(_) => "paragraph",
        }
    }
}

/// Two columns of leading whitespace make one indent level
fn indent_level(leading: &str) -> u32 {
    u32::try_from(leading.chars().count() / 2).unwrap_or(u32::MAX)
}

fn list_item<'a>(re: &Regex, line: &'a str, ordered: bool) -> Option<BlockUnit<'a>> {
    let caps = re.captures(line)?;
    Some(BlockUnit::ListItem {
        ordered,
        indent_level: indent_level(caps.get(1)?.as_str()),
        text: caps.get(2)?.as_str(),
    })
}

/// True when the line can open a table
pub fn starts_table(line: &str) -> bool {
    line.contains('|') && line.trim().starts_with('|')
}

/// True when the line opens or closes a code fence
pub fn is_fence(line: &str) -> bool {
    line.trim().starts_with(FENCE)
}

pub fn classify(line: &str) -> BlockUnit<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return BlockUnit::Blank;
    }

    if let Some(caps) = HEADING.captures(line) {
        if let (Some(hashes), Some(text)) = (caps.get(1), caps.get(2)) {
            return BlockUnit::Heading {
                level: hashes.as_str().len() as u8,
                text: text.as_str(),
            };
        }
    }

    if let Some(item) = list_item(&UNORDERED_ITEM, line, false) {
        return item;
    }

    if let Some(item) = list_item(&ORDERED_ITEM, line, true) {
        return item;
    }

    if starts_table(line) {
        return BlockUnit::Table;
    }

    if is_fence(line) {
        return BlockUnit::CodeFence;
    }

    if let Some(text) = QUOTE.captures(line).and_then(|caps| caps.get(1)) {
        return BlockUnit::Quote(text.as_str());
    }

    if RULE.is_match(trimmed) {
        return BlockUnit::HorizontalRule;
    }

    BlockUnit::Paragraph(line)
}
