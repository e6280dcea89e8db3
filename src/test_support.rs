//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::validation::{ValidationError, ValidationRequest, Validator};

/// A validator for tests that don't need real HTTP calls. Always answers `{}`.
pub struct NoopValidator;

#[async_trait]
impl Validator for NoopValidator {
    fn name(&self) -> &str {
        "noop"
    }

    async fn validate(&self, _request: ValidationRequest<'_>) -> Result<Value, ValidationError> {
        Ok(json!({}))
    }
}

/// Answers every request with a fixed outcome and records the submitted text.
pub struct ScriptedValidator {
    outcome: Result<Value, ValidationError>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedValidator {
    pub fn new(outcome: Result<Value, ValidationError>) -> Self {
        Self {
            outcome,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Validator for ScriptedValidator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn validate(&self, request: ValidationRequest<'_>) -> Result<Value, ValidationError> {
        self.requests.lock().unwrap().push(request.dax.to_string());
        self.outcome.clone()
    }
}

/// Creates a test App with a NoopValidator.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(
        Arc::new(NoopValidator),
        "http://127.0.0.1:8000/validate".to_string(),
    )
}
