//! # Actions
//!
//! Everything that can happen to the submitter becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! Server responds? That's `Action::Settled { .. }`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing the I/O the adapter must perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use chrono::Local;
use log::{debug, info, warn};
use serde_json::Value;

use crate::core::state::App;
use crate::validation::ValidationError;

#[derive(Debug)]
pub enum Action {
    /// The input text was edited.
    InputChanged(String),
    /// The Validate trigger was pressed.
    Submit,
    /// A request finished, successfully or not.
    Settled {
        request_id: u64,
        outcome: Result<Value, ValidationError>,
        duration_ms: u64,
    },
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Issue exactly one validation request for `dax`.
    SpawnRequest { request_id: u64, dax: String },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::InputChanged(text) => {
            app.hint = match &app.quick_check {
                Some(check) if !text.trim().is_empty() => Some(check.check(&text)),
                _ => None,
            };
            app.dax = text;
            Effect::None
        }
        Action::Submit => {
            if app.dax.trim().is_empty() {
                debug!("Submit ignored: input is blank");
                return Effect::None;
            }
            if app.is_loading {
                debug!("Submit ignored: request {} still outstanding", app.request_id);
                return Effect::None;
            }

            app.result = None;
            app.error = None;
            app.is_loading = true;
            app.request_id += 1;
            app.status_message = String::from("Validating...");
            info!("Submitting request {} via {}", app.request_id, app.validator.name());

            Effect::SpawnRequest {
                request_id: app.request_id,
                dax: app.dax.clone(),
            }
        }
        Action::Settled {
            request_id,
            outcome,
            duration_ms,
        } => {
            if !app.is_loading || request_id != app.request_id {
                warn!(
                    "Discarding stale settlement for request {} (current {}, loading={})",
                    request_id, app.request_id, app.is_loading
                );
                return Effect::None;
            }

            let finished_at = Local::now().format("%H:%M:%S");
            match outcome {
                Ok(value) => {
                    info!("Request {} succeeded in {}ms", request_id, duration_ms);
                    app.result = Some(value);
                    app.status_message =
                        format!("Validated at {finished_at} ({duration_ms} ms)");
                }
                Err(e) => {
                    info!("Request {} failed in {}ms: {}", request_id, duration_ms, e);
                    app.error = Some(e.to_string());
                    app.status_message = format!("Failed at {finished_at}");
                }
            }
            app.last_duration_ms = Some(duration_ms);
            app.is_loading = false;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
