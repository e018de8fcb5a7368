// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::InlineString;

/// Ellipsis glyph used when text is clipped to fit a display width.
pub const ELLIPSIS: &str = "…";

/// Returns the display width of `text` in terminal columns (grapheme aware, so wide
/// glyphs count as 2).
#[must_use]
pub fn display_width_of(text: &str) -> usize { UnicodeWidthStr::width(text) }

/// Clips `text` so that it occupies at most `max_width` terminal columns. If the text
/// has to be clipped, the last column is used for [`ELLIPSIS`]. This is what keeps an
/// overwritten-in-place line from wrapping (a wrapped line can't be erased with a
/// single carriage return).
#[must_use]
pub fn clip_text_to_width(text: &str, max_width: usize) -> InlineString {
    if display_width_of(text) <= max_width {
        return InlineString::from(text);
    }

    // Reserve the last column for the ellipsis glyph (1 column wide).
    let budget = max_width.saturating_sub(1);
    let mut acc = InlineString::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let grapheme_width = UnicodeWidthStr::width(grapheme);
        if used + grapheme_width > budget {
            break;
        }
        acc.push_str(grapheme);
        used += grapheme_width;
    }
    acc.push_str(ELLIPSIS);
    acc
}
