// SPDX-License-Identifier: AGPL-3.0-or-later
//! Pipe table collection and normalization

use regex::Regex;
use std::sync::LazyLock;

/// Alignment rows such as `| --- | :-: |`
static SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|[\s\-:|]+\|$").unwrap());

/// Fewer data rows than this and the table is dropped
pub const MIN_ROWS: usize = 2;

/// A collected table block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    /// Normalized rows, `None` when the block was dropped
    pub rows: Option<Vec<Vec<String>>>,
    /// Index of the first line after the block
    pub next: usize,
}

/// Cells between the outermost pipes, trimmed; empty when the line has
/// fewer than two pipes
fn split_cells(line: &str) -> Vec<String> {
    let parts: Vec<&str> = line.split('|').collect();
    if parts.len() < 3 {
        return Vec::new();
    }
    parts[1..parts.len() - 1]
        .iter()
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn is_separator(line: &str) -> bool {
    SEPARATOR.is_match(line.trim())
}

/// Pad every row on the right to the widest row
fn normalize(mut rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, String::new());
    }
    rows
}

/// Consume every contiguous `|`-containing line from `start`
pub fn collect_table(lines: &[&str], start: usize) -> TableBlock {
    let end = lines[start..]
        .iter()
        .position(|line| !line.contains('|'))
        .map_or(lines.len(), |offset| start + offset);

    let rows: Vec<Vec<String>> = lines[start..end]
        .iter()
        .filter(|line| !is_separator(line))
        .map(|line| split_cells(line))
        .filter(|cells| !cells.is_empty())
        .collect();

    TableBlock {
        rows: (rows.len() >= MIN_ROWS).then(|| normalize(rows)),
        next: end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_short_row_is_padded() {
        let lines = ["| a | b |", "| - | - |", "| 1 |"];
        let block = collect_table(&lines, 0);
        assert_eq!(block.next, 3);
        assert_eq!(
            block.rows,
            Some(vec![strings(&["a", "b"]), strings(&["1", ""])])
        );
    }

    #[test]
    fn test_header_and_separator_only_is_dropped() {
        let lines = ["| a | b |", "|---|---|", "after"];
        let block = collect_table(&lines, 0);
        assert_eq!(block.rows, None);
        assert_eq!(block.next, 2);
    }

    #[test]
    fn test_single_line_is_dropped() {
        let block = collect_table(&["| lonely |"], 0);
        assert_eq!(block.rows, None);
        assert_eq!(block.next, 1);
    }

    #[test]
    fn test_alignment_separator_variants() {
        assert!(is_separator("| :--- | :---: | ---: |"));
        assert!(is_separator("  |---|  "));
        assert!(!is_separator("| a | - |"));
    }

    #[test]
    fn test_continuation_lines_need_only_a_pipe() {
        let lines = ["| h1 | h2 |", "|----|----|", "| x | y |", "not | quite", "end"];
        let block = collect_table(&lines, 0);
        assert_eq!(block.next, 4);
        // "not | quite" has a single pipe and contributes no cells
        assert_eq!(
            block.rows,
            Some(vec![strings(&["h1", "h2"]), strings(&["x", "y"])])
        );
    }

    #[test]
    fn test_wide_body_row_widens_header() {
        let lines = ["| a |", "| 1 | 2 | 3 |"];
        let block = collect_table(&lines, 0);
        assert_eq!(
            block.rows,
            Some(vec![strings(&["a", "", ""]), strings(&["1", "2", "3"])])
        );
    }

    #[test]
    fn test_starts_mid_document() {
        let lines = ["intro", "| a |", "| b |"];
        let block = collect_table(&lines, 1);
        assert_eq!(block.next, 3);
        assert_eq!(block.rows.map(|r| r.len()), Some(2));
    }
}
