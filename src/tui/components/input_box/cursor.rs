//! Cursor position tracking and navigation for the InputBox.
//!
//! `CursorState` owns the cursor byte offset, scroll offset, and cached width.
//! All methods take `buffer: &str` explicitly; the text itself is owned by
//! `InputBox`.

use super::layout::{
    CONTENT_OFFSET_X, CONTENT_OFFSET_Y, MAX_VISIBLE_LINES, inner_width, locate, offset_in_line,
    visual_lines,
};
use ratatui::layout::Rect;

/// Cursor and scroll state, separated from the text buffer.
pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// First visible visual line (0 when content fits in the viewport)
    pub scroll_offset: u16,
    /// Area width from the last render (used for vertical movement)
    pub last_area_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_area_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Move to the same column one visual line up (`-1`) or down (`1`).
    ///
    /// Returns `true` if the cursor moved, `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, area_width: u16) -> bool {
        let lines = visual_lines(buffer, inner_width(area_width));
        let (line, col) = locate(buffer, &lines, self.pos);

        let target = if direction < 0 {
            match line.checked_sub(1) {
                Some(t) => t,
                None => return false,
            }
        } else {
            if line + 1 >= lines.len() {
                return false;
            }
            line + 1
        };

        self.pos = offset_in_line(buffer, &lines, target, col);
        true
    }

    /// Keep the cursor's visual line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, area_width: u16) {
        let lines = visual_lines(buffer, inner_width(area_width));
        let total = lines.len() as u16;

        if total <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let (line, _) = locate(buffer, &lines, self.pos);
        let line = line as u16;
        if line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = line + 1 - MAX_VISIBLE_LINES;
        }
        self.scroll_offset = self.scroll_offset.min(total - MAX_VISIBLE_LINES);
    }

    /// Screen (column, row) of the cursor inside `area`.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let lines = visual_lines(buffer, inner_width(area.width));
        let (line, col) = locate(buffer, &lines, self.pos);
        let visible_line = (line as u16).saturating_sub(self.scroll_offset);

        let max_x = area.right().saturating_sub(1);
        (
            (area.x + CONTENT_OFFSET_X + col).min(max_x),
            area.y + CONTENT_OFFSET_Y + visible_line,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_down_keeps_column() {
        let buf = "SUM(a)\nMAX(b)";
        let mut cursor = CursorState::new();
        cursor.pos = 4;
        assert!(cursor.move_vertically(buf, 1, 40));
        assert_eq!(cursor.pos, 7 + 4);
    }

    #[test]
    fn move_up_clamps_to_shorter_line() {
        let buf = "ab\nCALCULATE";
        let mut cursor = CursorState::new();
        cursor.pos = buf.len();
        assert!(cursor.move_vertically(buf, -1, 40));
        assert_eq!(cursor.pos, 2);
    }

    #[test]
    fn move_at_boundaries_returns_false() {
        let buf = "one line";
        let mut cursor = CursorState::new();
        cursor.pos = 3;
        assert!(!cursor.move_vertically(buf, -1, 40));
        assert!(!cursor.move_vertically(buf, 1, 40));
        assert_eq!(cursor.pos, 3);
    }

    #[test]
    fn move_across_soft_wrap() {
        // inner width = 8 - 4 = 4 → "abcd" / "efgh"
        let buf = "abcdefgh";
        let mut cursor = CursorState::new();
        cursor.pos = 1;
        assert!(cursor.move_vertically(buf, 1, 8));
        assert_eq!(cursor.pos, 5);
    }

    #[test]
    fn scroll_follows_cursor_to_bottom() {
        let buf = "1\n2\n3\n4\n5\n6\n7\n8";
        let mut cursor = CursorState::new();
        cursor.pos = buf.len();
        cursor.update_scroll_offset(buf, 40);
        assert_eq!(cursor.scroll_offset, 8 - MAX_VISIBLE_LINES);

        cursor.pos = 0;
        cursor.update_scroll_offset(buf, 40);
        assert_eq!(cursor.scroll_offset, 0);
    }

    #[test]
    fn screen_pos_accounts_for_border_and_padding() {
        let buf = "SUM(x)";
        let mut cursor = CursorState::new();
        cursor.pos = 3;
        let area = Rect::new(10, 5, 40, 3);
        assert_eq!(cursor.screen_pos(buf, area), (10 + 2 + 3, 5 + 1));
    }

    #[test]
    fn screen_pos_after_trailing_newline() {
        let buf = "SUM(x)\n";
        let mut cursor = CursorState::new();
        cursor.pos = buf.len();
        let area = Rect::new(0, 0, 40, 4);
        assert_eq!(cursor.screen_pos(buf, area), (2, 2));
    }
}
