//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the button spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events, settlements,
//!   or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.
//!
//! ## Requests
//!
//! Each accepted submit spawns one tokio task that awaits the validator and
//! sends `Action::Settled` back over an mpsc channel. The loop drains the
//! channel between frames. If the UI is gone by then, the send fails and the
//! outcome is dropped.

mod component;
mod components;
mod event;
mod highlight;
mod ui;

pub use components::result_view::ERROR_PREFIX;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, ResultViewState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::validation::{HttpValidator, ValidationRequest, Validator};

/// TUI-specific presentation state (not part of core state)
pub struct TuiState {
    pub input_box: InputBox,
    pub result_view: ResultViewState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(),
            result_view: ResultViewState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets us tell Shift+Enter from Enter; terminals
        // without it ignore the sequence
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let validator: Arc<dyn Validator> = Arc::new(HttpValidator::new(config.endpoint.clone()));
    let mut app = App::from_config(validator, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::try_init()?;
    let _terminal_mode_guard = match TerminalModeGuard::new() {
        Ok(guard) => Some(guard),
        Err(e) => {
            warn!("Failed to enable terminal modes: {}", e);
            None
        }
    };

    // Settlements from request tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'event_loop: loop {
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain all pending events before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    if update(&mut app, Action::Quit) == Effect::Quit {
                        break 'event_loop;
                    }
                }
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown => {
                    tui.result_view.handle_event(&event);
                }
                TuiEvent::MouseClick(col, row) => {
                    let frame_area = terminal.get_frame().area();
                    let input_height = tui.input_box.calculate_height(frame_area.width);
                    if ui::hit_test_button(col, row, frame_area, &app, input_height) {
                        press(&mut app, &mut tui, &tx);
                    }
                }
                _ => match tui.input_box.handle_event(&event) {
                    Some(InputEvent::Submit) => press(&mut app, &mut tui, &tx),
                    Some(InputEvent::ContentChanged) => {
                        update(&mut app, Action::InputChanged(tui.input_box.buffer.clone()));
                    }
                    Some(InputEvent::CursorMoved) | None => {}
                },
            }
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if apply_background(&mut app, &mut tui, action) == Effect::Quit {
                break 'event_loop;
            }
        }
    }

    ratatui::restore();
    info!("daxval shutting down");
    Ok(())
}

/// Apply an action from a request task. The result view scrolls back to
/// the top only when the reducer accepted a settlement.
fn apply_background(app: &mut App, tui: &mut TuiState, action: Action) -> Effect {
    let was_loading = app.is_loading;
    let effect = update(app, action);
    if was_loading && !app.is_loading {
        tui.result_view = ResultViewState::new();
    }
    effect
}

/// Validate trigger: run the submit through the reducer and spawn the request it asks for.
fn press(app: &mut App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) {
    if let Effect::SpawnRequest { request_id, dax } = update(app, Action::Submit) {
        tui.result_view = ResultViewState::new();
        spawn_request(app.validator.clone(), request_id, dax, tx.clone());
    }
}

fn spawn_request(
    validator: Arc<dyn Validator>,
    request_id: u64,
    dax: String,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning request {} ({} bytes)", request_id, dax.len());
    tokio::spawn(async move {
        let started = Instant::now();
        let outcome = validator.validate(ValidationRequest::new(&dax)).await;
        let duration_ms = started.elapsed().as_millis() as u64;
        debug!("Request {} finished in {}ms", request_id, duration_ms);

        if tx
            .send(Action::Settled {
                request_id,
                outcome,
                duration_ms,
            })
            .is_err()
        {
            warn!("Dropping outcome of request {}: receiver dropped", request_id);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedValidator, test_app};
    use ratatui::layout::Position;
    use serde_json::json;

    #[tokio::test]
    async fn test_press_spawns_one_request_and_settles() {
        let validator = Arc::new(ScriptedValidator::new(Ok(json!({"valid": true}))));
        let mut app = App::new(validator.clone(), "http://x/validate".to_string());
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();

        update(&mut app, Action::InputChanged("SUM(Sales[Amount])".to_string()));
        press(&mut app, &mut tui, &tx);
        // Second press while loading is ignored
        press(&mut app, &mut tui, &tx);
        assert!(app.is_loading);

        let action = tokio::task::spawn_blocking(move || rx.recv())
            .await
            .unwrap()
            .unwrap();
        apply_background(&mut app, &mut tui, action);

        assert!(!app.is_loading);
        assert_eq!(app.result, Some(json!({"valid": true})));
        assert_eq!(validator.requests(), vec!["SUM(Sales[Amount])".to_string()]);
    }

    fn settled(request_id: u64) -> Action {
        Action::Settled {
            request_id,
            outcome: Ok(json!({"valid": true})),
            duration_ms: 1,
        }
    }

    #[test]
    fn test_stale_settlement_keeps_scroll_position() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::InputChanged("SUM(x)".to_string()));
        update(&mut app, Action::Submit);
        tui.result_view.scroll_state.set_offset(Position::new(0, 5));

        apply_background(&mut app, &mut tui, settled(99));
        assert!(app.is_loading);
        assert_eq!(tui.result_view.scroll_state.offset().y, 5);

        let current = app.request_id;
        apply_background(&mut app, &mut tui, settled(current));
        assert!(!app.is_loading);
        assert_eq!(tui.result_view.scroll_state.offset().y, 0);
    }

    #[test]
    fn test_settlement_while_idle_keeps_scroll_position() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.result_view.scroll_state.set_offset(Position::new(0, 3));

        apply_background(&mut app, &mut tui, settled(0));
        assert_eq!(app.result, None);
        assert_eq!(tui.result_view.scroll_state.offset().y, 3);
    }

    #[tokio::test]
    async fn test_press_with_blank_input_does_nothing() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();

        press(&mut app, &mut tui, &tx);
        assert!(!app.is_loading);
        drop(tx);
        assert!(rx.recv().is_err());
    }

    #[tokio::test]
    async fn test_settlement_after_receiver_dropped_is_discarded() {
        let validator = Arc::new(ScriptedValidator::new(Ok(json!({}))));
        let (tx, rx) = mpsc::channel();
        drop(rx);
        spawn_request(validator.clone(), 1, "SUM(x)".to_string(), tx);

        for _ in 0..100 {
            if !validator.requests().is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        // The request still ran; only its outcome had nowhere to go
        assert_eq!(validator.requests(), vec!["SUM(x)".to_string()]);
    }
}
