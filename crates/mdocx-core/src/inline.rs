// SPDX-License-Identifier: AGPL-3.0-or-later
//! Inline formatter: splits one line of text into styled runs
//!
//! Spans are found with an ordered set of matchers. At each step the scan
//! takes the earliest position where any matcher succeeds; when several
//! succeed at the same position the first in [`MATCHERS`] wins. Delimiters are
//! removed from the output, everything else is kept in order.

use std::ops::Range;

use crate::ast::Run;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Code,
    BoldItalic,
    Bold,
    Italic,
}

impl SpanKind {
    fn run(self, text: &str) -> Run {
        match self {
            SpanKind::Code => Run::code(text),
            SpanKind::BoldItalic => Run::new(text, true, true, false),
            SpanKind::Bold => Run::new(text, true, false, false),
            SpanKind::Italic => Run::new(text, false, true, false),
        }
    }
}

/// A delimiter pair enclosing at least one character that is not the
/// delimiter's own marker character
struct SpanMatcher {
    delimiter: &'static str,
    marker: char,
    kind: SpanKind,
}

const MATCHERS: [SpanMatcher; 6] = [
    SpanMatcher { delimiter: "`", marker: '`', kind: SpanKind::Code },
    SpanMatcher { delimiter: "***", marker: '*', kind: SpanKind::BoldItalic },
    SpanMatcher { delimiter: "**", marker: '*', kind: SpanKind::Bold },
    SpanMatcher { delimiter: "*", marker: '*', kind: SpanKind::Italic },
    SpanMatcher { delimiter: "__", marker: '_', kind: SpanKind::Bold },
    SpanMatcher { delimiter: "_", marker: '_', kind: SpanKind::Italic },
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    start: usize,
    end: usize,
    content: Range<usize>,
    kind: SpanKind,
}

impl SpanMatcher {
    fn match_at(&self, text: &str, start: usize) -> Option<Span> {
        let after_open = text[start..].strip_prefix(self.delimiter)?;
        // The content cannot contain the marker, so it ends at the next one.
        let content_len = after_open.find(self.marker).unwrap_or(after_open.len());
        if content_len == 0 || !after_open[content_len..].starts_with(self.delimiter) {
            return None;
        }
        let open = start + self.delimiter.len();
        Some(Span {
            start,
            end: open + content_len + self.delimiter.len(),
            content: open..open + content_len,
            kind: self.kind,
        })
    }
}

fn next_span(text: &str, from: usize) -> Option<Span> {
    text[from..]
        .char_indices()
        .filter(|(_, ch)| matches!(ch, '`' | '*' | '_'))
        .find_map(|(offset, _)| {
            MATCHERS
                .iter()
                .find_map(|matcher| matcher.match_at(text, from + offset))
        })
}

/// Split `text` into runs with emphasis and code delimiters removed
///
/// Never returns an empty vector: empty input yields one empty plain run.
/// Unterminated delimiters are kept as plain text.
pub fn format_inline(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut cursor = 0;

    while let Some(span) = next_span(text, cursor) {
        if span.start > cursor {
            runs.push(Run::plain(&text[cursor..span.start]));
        }
        runs.push(span.kind.run(&text[span.content]));
        cursor = span.end;
    }

    if cursor < text.len() {
        runs.push(Run::plain(&text[cursor..]));
    }

    if runs.is_empty() {
        runs.push(Run::plain(text));
    }

    runs
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// True when `output` is `input` with only delimiter characters removed
    fn is_marker_deletion(input: &str, output: &str) -> bool {
        let mut out = output.chars().peekable();
        for ch in input.chars() {
            if out.peek() == Some(&ch) {
                out.next();
            } else if !matches!(ch, '`' | '*' | '_') {
                return false;
            }
        }
        out.next().is_none()
    }

    proptest! {
        // Property: text without markup comes back as one identical plain run
        #[test]
        fn prop_plain_text_identity(text in "[^`*_]{0,80}") {
            let runs = format_inline(&text);
            prop_assert_eq!(runs, vec![Run::plain(text.clone())]);
        }

        // Property: runs reconstruct the input with only delimiters stripped
        #[test]
        fn prop_runs_reconstruct_input(text in "[a-z `*_]{0,60}") {
            let runs = format_inline(&text);
            let joined: String = runs.iter().map(|r| r.text.as_str()).collect();
            prop_assert!(is_marker_deletion(&text, &joined), "{:?} -> {:?}", text, joined);
        }

        // Property: the formatter never returns an empty sequence
        #[test]
        fn prop_never_empty(text in ".{0,40}") {
            prop_assert!(!format_inline(&text).is_empty());
        }

        // Property: styled runs are never empty
        #[test]
        fn prop_styled_runs_have_text(text in "[a-z `*_]{0,60}") {
            for run in format_inline(&text) {
                if !run.is_plain() {
                    prop_assert!(!run.text.is_empty());
                }
            }
        }
    }
}
