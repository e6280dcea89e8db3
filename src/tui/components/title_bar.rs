//! # TitleBar Component
//!
//! Single-line status bar: endpoint, status message, and the verdict of
//! the last successful response.
//!
//! ```text
//! DAX Validator (endpoint: http://127.0.0.1:8000/validate) | Validated at 14:03:22 (41 ms) | ✔ valid
//! ```
//!
//! Stateless: everything is a prop supplied by the parent each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::validation::Verdict;

pub struct TitleBar {
    pub endpoint: String,
    pub status_message: String,
    pub verdict: Option<Verdict>,
}

impl TitleBar {
    pub fn new(endpoint: String, status_message: String, verdict: Option<Verdict>) -> Self {
        Self {
            endpoint,
            status_message,
            verdict,
        }
    }

    fn line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            format!("DAX Validator (endpoint: {})", self.endpoint),
            Style::default().add_modifier(Modifier::BOLD),
        )];

        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        if let Some(verdict) = &self.verdict {
            let label = verdict.label();
            if !label.is_empty() {
                let color = match verdict {
                    Verdict::Valid => Color::Green,
                    _ => Color::Red,
                };
                spans.push(Span::raw(" | "));
                spans.push(Span::styled(label, Style::default().fg(color)));
            }
        }

        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut title_bar: TitleBar) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 1)).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_title_bar_idle() {
        let text = rendered(TitleBar::new(
            "http://127.0.0.1:8000/validate".to_string(),
            String::new(),
            None,
        ));
        assert!(text.contains("DAX Validator"));
        assert!(text.contains("http://127.0.0.1:8000/validate"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_with_status_and_valid_verdict() {
        let text = rendered(TitleBar::new(
            "http://x/validate".to_string(),
            "Validated at 10:00:00 (5 ms)".to_string(),
            Some(Verdict::Valid),
        ));
        assert!(text.contains("Validated at 10:00:00 (5 ms)"));
        assert!(text.contains("valid"));
    }

    #[test]
    fn test_title_bar_invalid_reason() {
        let text = rendered(TitleBar::new(
            "http://x/validate".to_string(),
            String::new(),
            Some(Verdict::Invalid(Some("Unbalanced brackets".to_string()))),
        ));
        assert!(text.contains("invalid: Unbalanced brackets"));
    }

    #[test]
    fn test_title_bar_unknown_verdict_adds_nothing() {
        let text = rendered(TitleBar::new(
            "http://x/validate".to_string(),
            String::new(),
            Some(Verdict::Unknown),
        ));
        assert!(!text.contains('|'));
    }
}
