//! # Application State
//!
//! Core submitter state. Presentation state (cursor, scroll offsets) lives
//! in the `tui` module.
//!
//! ```text
//! App
//! ├── validator: Arc<dyn Validator>   // network seam
//! ├── endpoint: String                // shown in the title bar
//! ├── dax: String                     // input text, never reset
//! ├── result: Option<Value>           // last successful response
//! ├── error: Option<String>           // last failure message
//! ├── is_loading: bool                // request outstanding
//! ├── request_id: u64                 // id of the newest submission
//! ├── status_message: String          // status bar text
//! ├── last_duration_ms: Option<u64>   // round trip of last settlement
//! ├── quick_check: Option<QuickCheck> // None = hints disabled
//! └── hint: Option<Result<(), Finding>>
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! `result` and `error` are never both `Some`.

use std::sync::Arc;

use serde_json::Value;

use crate::core::config::ResolvedConfig;
use crate::validation::{Finding, QuickCheck, Validator, Verdict};

/// Request lifecycle, derived from the state fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Succeeded,
    Failed,
}

pub struct App {
    pub validator: Arc<dyn Validator>,
    pub endpoint: String,
    pub dax: String,
    pub result: Option<Value>,
    pub error: Option<String>,
    pub is_loading: bool,
    pub request_id: u64,
    pub status_message: String,
    pub last_duration_ms: Option<u64>,
    pub quick_check: Option<QuickCheck>,
    /// Quick-check outcome for the current input (None while blank or disabled).
    pub hint: Option<Result<(), Finding>>,
}

impl App {
    pub fn new(validator: Arc<dyn Validator>, endpoint: String) -> Self {
        Self {
            validator,
            endpoint,
            dax: String::new(),
            result: None,
            error: None,
            is_loading: false,
            request_id: 0,
            status_message: String::from("Enter a DAX expression and press Enter to validate"),
            last_duration_ms: None,
            quick_check: None,
            hint: None,
        }
    }

    pub fn from_config(validator: Arc<dyn Validator>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(validator, config.endpoint.clone());
        if config.quick_check_enabled {
            app.quick_check = Some(QuickCheck::with_extra(&config.extra_functions));
        }
        app
    }

    pub fn phase(&self) -> Phase {
        if self.is_loading {
            Phase::Loading
        } else if self.result.is_some() {
            Phase::Succeeded
        } else if self.error.is_some() {
            Phase::Failed
        } else {
            Phase::Idle
        }
    }

    /// Whether a submit would currently be accepted (the button's enabled state).
    pub fn can_submit(&self) -> bool {
        !self.is_loading && !self.dax.trim().is_empty()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.result.as_ref().map(Verdict::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use serde_json::json;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.dax.is_empty());
        assert!(app.result.is_none());
        assert!(app.error.is_none());
        assert!(!app.is_loading);
        assert_eq!(app.request_id, 0);
        assert_eq!(app.phase(), Phase::Idle);
    }

    #[test]
    fn test_phase_follows_fields() {
        let mut app = test_app();
        app.is_loading = true;
        assert_eq!(app.phase(), Phase::Loading);

        app.is_loading = false;
        app.error = Some("HTTP error 500".to_string());
        assert_eq!(app.phase(), Phase::Failed);

        app.error = None;
        app.result = Some(json!({"valid": true}));
        assert_eq!(app.phase(), Phase::Succeeded);
        assert_eq!(app.verdict(), Some(Verdict::Valid));
    }

    #[test]
    fn test_can_submit_requires_text_and_idle() {
        let mut app = test_app();
        assert!(!app.can_submit());

        app.dax = "   \n\t".to_string();
        assert!(!app.can_submit());

        app.dax = "SUM(Sales[Amount])".to_string();
        assert!(app.can_submit());

        app.is_loading = true;
        assert!(!app.can_submit());
    }

    #[test]
    fn test_from_config_enables_quick_check() {
        let config = ResolvedConfig {
            endpoint: "http://localhost:9000/validate".to_string(),
            quick_check_enabled: true,
            extra_functions: vec!["DIVIDE".to_string()],
        };
        let app = App::from_config(Arc::new(crate::test_support::NoopValidator), &config);
        assert_eq!(app.endpoint, "http://localhost:9000/validate");
        let check = app.quick_check.expect("quick check enabled");
        assert!(check.is_known("DIVIDE"));
    }

    #[test]
    fn test_from_config_quick_check_disabled() {
        let config = ResolvedConfig {
            endpoint: "http://localhost:9000/validate".to_string(),
            quick_check_enabled: false,
            extra_functions: Vec::new(),
        };
        let app = App::from_config(Arc::new(crate::test_support::NoopValidator), &config);
        assert!(app.quick_check.is_none());
    }
}
