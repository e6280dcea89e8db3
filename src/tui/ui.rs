use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ResultView, TitleBar, ValidateButton};
use crate::validation::Finding;
use crate::validation::sanity::OK_MESSAGE;

const KEY_HELP: &str = "Enter validate · Ctrl+J newline · PgUp/PgDn scroll · Esc quit";

/// Screen regions, top to bottom.
pub struct Areas {
    pub title: Rect,
    pub input: Rect,
    pub button_row: Rect,
    pub hint: Rect,
    pub result: Rect,
}

pub fn layout(area: Rect, input_height: u16) -> Areas {
    use Constraint::{Length, Min};
    let [title, input, button_row, hint, result] =
        Layout::vertical([Length(1), Length(input_height), Length(1), Length(1), Min(0)])
            .areas(area);
    Areas {
        title,
        input,
        button_row,
        hint,
        result,
    }
}

fn button(app: &App, spinner_frame: usize) -> ValidateButton {
    ValidateButton::new(app.is_loading, app.can_submit(), spinner_frame)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let areas = layout(frame.area(), input_height);

    TitleBar::new(
        app.endpoint.clone(),
        app.status_message.clone(),
        app.verdict(),
    )
    .render(frame, areas.title);

    tui.input_box.render(frame, areas.input);

    let mut validate = button(app, spinner_frame);
    let button_area = validate.area(areas.button_row);
    validate.render(frame, areas.button_row);
    draw_key_help(frame, areas.button_row, button_area.width);

    draw_hint(frame, areas.hint, app.hint.as_ref());

    ResultView {
        phase: app.phase(),
        result: app.result.as_ref(),
        error: app.error.as_deref(),
        endpoint: &app.endpoint,
        state: &mut tui.result_view,
    }
    .render(frame, areas.result);
}

fn draw_key_help(frame: &mut Frame, row: Rect, button_width: u16) {
    let gap = button_width + 2;
    if row.width <= gap {
        return;
    }
    let area = Rect::new(row.x + gap, row.y, row.width - gap, row.height);
    let help = Paragraph::new(KEY_HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right);
    frame.render_widget(help, area);
}

fn draw_hint(frame: &mut Frame, area: Rect, hint: Option<&Result<(), Finding>>) {
    let line = match hint {
        Some(Ok(())) => Line::from(Span::styled(
            format!("✓ {OK_MESSAGE}"),
            Style::default().fg(Color::Green),
        )),
        Some(Err(finding)) => Line::from(Span::styled(
            format!("△ {finding}"),
            Style::default().fg(Color::Yellow),
        )),
        None => return,
    };
    frame.render_widget(line, area);
}

/// Whether a click at (col, row) lands on the Validate button.
pub fn hit_test_button(col: u16, row: u16, frame_area: Rect, app: &App, input_height: u16) -> bool {
    let areas = layout(frame_area, input_height);
    button(app, 0)
        .area(areas.button_row)
        .contains(Position::new(col, row))
}
