// SPDX-License-Identifier: AGPL-3.0-or-later
//! Fixed layout constants
//!
//! Lengths are in twips (1/1440 inch) unless stated otherwise.

pub const TWIPS_PER_INCH: u32 = 1440;

/// Left indent added per list nesting level (half an inch)
pub const LIST_INDENT_PER_LEVEL: u32 = TWIPS_PER_INCH / 2;

/// Monospace face for inline code and code blocks
pub const CODE_FONT: &str = "Courier New";

/// Code font size in half-points (10 pt)
pub const CODE_FONT_HALF_POINTS: u32 = 20;

/// Neutral light gray behind code blocks
pub const CODE_SHADING_FILL: &str = "F0F0F0";

/// Horizontal rule border width in eighths of a point
pub const RULE_BORDER_SIZE: u32 = 6;

/// Horizontal rule border distance from text in points
pub const RULE_BORDER_SPACE: u32 = 1;

/// Letter page with one-inch margins
pub const PAGE_WIDTH: u32 = 12240;
pub const PAGE_HEIGHT: u32 = 15840;
pub const PAGE_MARGIN: u32 = TWIPS_PER_INCH;

/// Usable text width, split evenly between table columns
pub const TEXT_WIDTH: u32 = PAGE_WIDTH - 2 * PAGE_MARGIN;

/// Convert a list indent level to a physical left indent, saturating at
/// `u32::MAX` for absurd levels
pub const fn list_indent(level: u32) -> u32 {
    level.saturating_mul(LIST_INDENT_PER_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_indent_is_half_inch_per_level() {
        assert_eq!(list_indent(0), 0);
        assert_eq!(list_indent(1), 720);
        assert_eq!(list_indent(2), 1440);
    }

    #[test]
    fn test_list_indent_saturates() {
        assert_eq!(list_indent(u32::MAX), u32::MAX);
        assert_eq!(list_indent(6_000_000), u32::MAX);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(TEXT_WIDTH, 9360);
    }
}
