//! # ValidateButton Component
//!
//! The submit trigger. Shows a spinner and `Validating...` while a request
//! is outstanding and is dimmed (and inert) while loading or while the
//! input is blank. Inertness itself is enforced by the reducer; this only
//! renders it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::tui::component::Component;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct ValidateButton {
    pub loading: bool,
    pub enabled: bool,
    pub spinner_frame: usize,
}

impl ValidateButton {
    pub fn new(loading: bool, enabled: bool, spinner_frame: usize) -> Self {
        Self {
            loading,
            enabled,
            spinner_frame,
        }
    }

    pub fn label(&self) -> String {
        if self.loading {
            let frame = SPINNER[self.spinner_frame % SPINNER.len()];
            format!("[ {frame} Validating... ]")
        } else {
            "[ Validate ]".to_string()
        }
    }

    /// Screen area the button occupies when rendered at the left of `row`.
    pub fn area(&self, row: Rect) -> Rect {
        let width = (self.label().chars().count() as u16).min(row.width);
        Rect::new(row.x, row.y, width, row.height.min(1))
    }

    fn style(&self) -> Style {
        if self.loading {
            Style::default().fg(Color::Yellow)
        } else if self.enabled {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        }
    }
}

impl Component for ValidateButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let button_area = self.area(area);
        frame.render_widget(Span::styled(self.label(), self.style()), button_area);
    }
}
