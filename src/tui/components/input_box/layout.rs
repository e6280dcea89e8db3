//! Visual line layout for the InputBox.
//!
//! The buffer is hard-wrapped by display width (no word wrapping), so the
//! layout of any prefix agrees with the layout of the whole buffer and the
//! cursor can be placed by looking up a single byte offset. Rendering and
//! cursor math both go through [`visual_lines`].

use std::ops::Range;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Maximum visible content lines before internal scrolling kicks in
pub(super) const MAX_VISIBLE_LINES: u16 = 6;
/// Offset from the area's left edge to the first content column (border + padding)
pub(super) const CONTENT_OFFSET_X: u16 = 2;
/// Offset from the area's top edge to the first content row (border)
pub(super) const CONTENT_OFFSET_Y: u16 = 1;

/// Inner content width after subtracting border/padding overhead.
pub(super) fn inner_width(area_width: u16) -> u16 {
    area_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Byte ranges of every visual line of `buffer` when wrapped at `width` columns.
///
/// Newlines end a line and are not part of any range. Always returns at
/// least one (possibly empty) line.
pub(super) fn visual_lines(buffer: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut logical_start = 0;

    for logical in buffer.split('\n') {
        let mut start = logical_start;
        let mut used = 0;
        for (i, c) in logical.char_indices() {
            let w = c.width().unwrap_or(0);
            if used > 0 && used + w > width {
                lines.push(start..logical_start + i);
                start = logical_start + i;
                used = 0;
            }
            used += w;
        }
        lines.push(start..logical_start + logical.len());
        logical_start += logical.len() + 1;
    }

    lines
}

/// Visual (line, column) of byte offset `pos`.
///
/// At a soft-wrap boundary the offset belongs to the start of the next line.
pub(super) fn locate(buffer: &str, lines: &[Range<usize>], pos: usize) -> (usize, u16) {
    let line = lines.iter().rposition(|r| r.start <= pos).unwrap_or(0);
    let start = lines.get(line).map_or(0, |r| r.start);
    let col = buffer[start..pos].width() as u16;
    (line, col)
}

/// Byte offset within visual line `line` whose column is closest to `col`
/// without passing it.
pub(super) fn offset_in_line(buffer: &str, lines: &[Range<usize>], line: usize, col: u16) -> usize {
    let range = lines[line].clone();
    // A soft-wrapped line's end is the next line's start; stop one char short.
    let soft_wrapped = lines.get(line + 1).is_some_and(|next| next.start == range.end);

    let mut pos = range.start;
    let mut used = 0u16;
    for (i, c) in buffer[range.clone()].char_indices() {
        let w = c.width().unwrap_or(0) as u16;
        if used + w > col {
            return range.start + i;
        }
        used += w;
        pos = range.start + i + c.len_utf8();
    }

    if soft_wrapped && pos == range.end {
        prev_char_boundary(buffer, pos)
    } else {
        pos
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(text.len())
}
