//! # Headless Adapter
//!
//! One-shot runs for the `validate` and `check` subcommands. `validate`
//! drives the same reducer as the TUI for a single submission; `check`
//! only runs the offline quick check. Both return an [`Outcome`] that the
//! binary prints and turns into an exit code.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use log::info;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::tui::ERROR_PREFIX;
use crate::validation::{HttpValidator, QuickCheck, ValidationRequest, Validator, pretty, sanity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Printed on stdout, exit 0.
    Success(String),
    /// Printed on stderr, exit 1.
    Failure(String),
    /// Nothing was done. Printed on stderr, exit 0.
    Skipped(String),
}

impl Outcome {
    pub fn code(&self) -> u8 {
        match self {
            Outcome::Success(_) | Outcome::Skipped(_) => 0,
            Outcome::Failure(_) => 1,
        }
    }

    /// Print to the matching stream and return the process exit code.
    pub fn emit(&self) -> ExitCode {
        match self {
            Outcome::Success(text) => println!("{text}"),
            Outcome::Failure(text) | Outcome::Skipped(text) => eprintln!("{text}"),
        }
        ExitCode::from(self.code())
    }
}

/// Submit `expr` once to the configured endpoint.
pub async fn validate(config: &ResolvedConfig, expr: String) -> Outcome {
    let validator: Arc<dyn Validator> = Arc::new(HttpValidator::new(config.endpoint.clone()));
    let mut app = App::from_config(validator.clone(), config);

    update(&mut app, Action::InputChanged(expr));
    let Effect::SpawnRequest { request_id, dax } = update(&mut app, Action::Submit) else {
        return Outcome::Skipped("Nothing to validate: the expression is empty".to_string());
    };

    let started = Instant::now();
    let outcome = validator.validate(ValidationRequest::new(&dax)).await;
    update(
        &mut app,
        Action::Settled {
            request_id,
            outcome,
            duration_ms: started.elapsed().as_millis() as u64,
        },
    );
    info!("Headless run finished: {}", app.status_message);

    match (app.result, app.error) {
        (Some(value), _) => Outcome::Success(pretty(&value)),
        (None, Some(error)) => Outcome::Failure(format!("{ERROR_PREFIX}{error}")),
        (None, None) => Outcome::Failure(format!("{ERROR_PREFIX}request did not settle")),
    }
}

/// Run only the offline quick check.
pub fn check(config: &ResolvedConfig, expr: &str) -> Outcome {
    let quick_check = QuickCheck::with_extra(&config.extra_functions);
    match quick_check.check(expr) {
        Ok(()) => Outcome::Success(sanity::OK_MESSAGE.to_string()),
        Err(finding) => Outcome::Failure(finding.to_string()),
    }
}
