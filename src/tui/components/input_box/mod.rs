//! # InputBox Component
//!
//! The textbox holding the DAX expression.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Emit `Submit` on Enter when there is something to submit
//! - Display the buffer (or a placeholder) with internal scrolling
//!
//! The buffer is internal state and is **not** cleared on submit: the
//! expression stays in place so it can be tweaked and re-validated.

mod cursor;
mod layout;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use layout::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, next_char_boundary, prev_char_boundary,
    visual_lines,
};

pub const PLACEHOLDER: &str = "Enter DAX expression...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed with a non-blank buffer
    Submit,
    /// Buffer text changed; parent should sync it into core state
    ContentChanged,
    /// Only the cursor moved
    CursorMoved,
}

/// Text input component.
///
/// # State
///
/// - `buffer`: Current expression text
/// - `cursor`: Cursor position, scroll offset, and cached width (see `CursorState`)
pub struct InputBox {
    pub buffer: String,
    cursor: CursorState,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: CursorState::new(),
        }
    }

    /// Required height for the current buffer, clamped to viewport limits.
    /// Returns a value in `[1 + VERTICAL_OVERHEAD, MAX_VISIBLE_LINES + VERTICAL_OVERHEAD]`.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let lines = visual_lines(&self.buffer, inner_width(area_width)).len() as u16;
        lines.clamp(1, MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn visible_lines(&self, area_width: u16) -> Vec<Line<'_>> {
        let start = usize::from(self.cursor.scroll_offset);
        visual_lines(&self.buffer, inner_width(area_width))
            .into_iter()
            .skip(start)
            .take(usize::from(MAX_VISIBLE_LINES))
            .map(|range| Line::raw(&self.buffer[range]))
            .collect()
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        // Normalize CRLF from pasted text
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        self.buffer.insert_str(self.cursor.pos, &text);
        self.cursor.pos += text.len();
        Some(InputEvent::ContentChanged)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (pos != self.cursor.pos).then(|| {
            self.cursor.pos = pos;
            InputEvent::CursorMoved
        })
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.cursor.last_area_width = area.width;
        self.cursor.update_scroll_offset(&self.buffer, area.width);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title("DAX expression");

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.visible_lines(area.width)).style(Style::default().fg(Color::Green))
        };
        frame.render_widget(paragraph.block(block), area);

        let (cursor_x, cursor_y) = self.cursor.screen_pos(&self.buffer, area);
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(text),
            TuiEvent::Backspace => {
                if self.cursor.pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Delete => {
                if self.cursor.pos >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => self.move_to(prev_char_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::CursorRight => self.move_to(next_char_boundary(&self.buffer, self.cursor.pos)),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map_or(0, |i| i + 1);
                self.move_to(line_start)
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map_or(self.buffer.len(), |i| self.cursor.pos + i);
                self.move_to(line_end)
            }
            TuiEvent::CursorUp => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_area_width)
                .then_some(InputEvent::CursorMoved),
            TuiEvent::CursorDown => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_area_width)
                .then_some(InputEvent::CursorMoved),
            TuiEvent::Submit => (!self.buffer.trim().is_empty()).then_some(InputEvent::Submit),
            _ => None,
        }
    }
}
