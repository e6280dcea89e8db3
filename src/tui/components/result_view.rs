//! # ResultView Component
//!
//! The display area under the button. Exactly one of:
//!
//! - **Failed**: `⚠️ Error: <message>` in red
//! - **Succeeded**: the response pretty-printed and highlighted, scrollable
//! - **Loading**: a waiting line naming the endpoint
//! - **Idle**: a short usage hint
//!
//! `ResultView` is rebuilt each frame from props and wraps the persistent
//! `ResultViewState` (scroll position), mirroring Ratatui's
//! `StatefulWidget` split.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Text;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use serde_json::Value;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::state::Phase;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::highlight;
use crate::validation::pretty;

pub const ERROR_PREFIX: &str = "⚠️ Error: ";

#[derive(Default)]
pub struct ResultViewState {
    pub scroll_state: ScrollViewState,
}

impl ResultViewState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for ResultViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

pub struct ResultView<'a> {
    pub phase: Phase,
    pub result: Option<&'a Value>,
    pub error: Option<&'a str>,
    pub endpoint: &'a str,
    pub state: &'a mut ResultViewState,
}

impl ResultView<'_> {
    fn render_scrollable(&mut self, frame: &mut Frame, inner: Rect, text: Text<'static>) {
        let content_width = inner.width.saturating_sub(1); // scrollbar column
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let height = paragraph.line_count(content_width) as u16;

        // Clamp after a shrink (e.g. resize) so we never scroll past the end
        let max_y = height.saturating_sub(inner.height);
        let mut offset = self.state.scroll_state.offset();
        if offset.y > max_y {
            offset.y = max_y;
            self.state.scroll_state.set_offset(offset);
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}

impl Component for ResultView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .padding(Padding::horizontal(1))
            .title("Result")
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(error) = self.error {
            let paragraph = Paragraph::new(format!("{ERROR_PREFIX}{error}"))
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, inner);
            return;
        }

        if let Some(value) = self.result {
            let text = highlight::json(&pretty(value));
            self.render_scrollable(frame, inner, text);
            return;
        }

        let hint = match self.phase {
            Phase::Loading => format!("Waiting for {} ...", self.endpoint),
            _ => "Type a DAX expression above, then press Enter or click Validate.".to_string(),
        };
        let paragraph = Paragraph::new(hint)
            .style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    fn render(phase: Phase, result: Option<&Value>, error: Option<&str>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let mut state = ResultViewState::new();
        terminal
            .draw(|f| {
                let mut view = ResultView {
                    phase,
                    result,
                    error,
                    endpoint: "http://127.0.0.1:8000/validate",
                    state: &mut state,
                };
                view.render(f, f.area());
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_pretty_json() {
        let value = json!({"valid": true});
        let text = render(Phase::Succeeded, Some(&value), None);
        assert!(text.contains("{"));
        assert!(text.contains("  \"valid\": true"));
        assert!(!text.contains("Error"));
    }

    #[test]
    fn test_renders_error_with_prefix() {
        let text = render(Phase::Failed, None, Some("HTTP error 500"));
        assert!(text.contains("Error: HTTP error 500"));
    }

    #[test]
    fn test_renders_loading_hint() {
        let text = render(Phase::Loading, None, None);
        assert!(text.contains("Waiting for"));
    }

    #[test]
    fn test_renders_idle_hint() {
        let text = render(Phase::Idle, None, None);
        assert!(text.contains("Type a DAX expression"));
    }

    #[test]
    fn test_scroll_events_move_offset() {
        let mut state = ResultViewState::new();
        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.scroll_state.offset().y, 1);
        state.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(state.scroll_state.offset().y, 0);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }
}
