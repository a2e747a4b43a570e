// SPDX-License-Identifier: AGPL-3.0-or-later
#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Every input parses; rendering must not panic either
        let doc = mdocx_core::parse_markdown(text).expect("parsing is total");
        let _ = mdocx_core::markdown_to_docx(text);
        assert!(doc.table_count() <= doc.blocks.len());
    }
});
