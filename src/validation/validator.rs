use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::types::ValidationRequest;

/// Errors that can occur while validating an expression.
///
/// `Display` is the exact text shown to the user after the warning prefix.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Transport failure (DNS, connection refused, reset). Carries the underlying message.
    Network(String),
    /// Server answered with a non-2xx status. The body is not read.
    Http { status: u16 },
    /// The 2xx body was not valid JSON.
    Parse(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Network(msg) => write!(f, "{msg}"),
            ValidationError::Http { status } => write!(f, "HTTP error {status}"),
            ValidationError::Parse(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[async_trait]
pub trait Validator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Submits one expression and returns the server's JSON verbatim.
    async fn validate(&self, request: ValidationRequest<'_>) -> Result<Value, ValidationError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedValidator;
    use serde_json::json;

    #[test]
    fn test_http_error_display() {
        let err = ValidationError::Http { status: 500 };
        assert_eq!(err.to_string(), "HTTP error 500");
    }

    #[test]
    fn test_network_and_parse_display_are_verbatim() {
        let net = ValidationError::Network("connection refused".to_string());
        assert_eq!(net.to_string(), "connection refused");

        let parse = ValidationError::Parse("expected value at line 1 column 1".to_string());
        assert_eq!(parse.to_string(), "expected value at line 1 column 1");
    }

    #[test]
    fn test_scripted_validator_records_requests() {
        let validator = ScriptedValidator::new(Ok(json!({"valid": true})));
        let outcome = tokio_test::block_on(
            validator.validate(ValidationRequest::new("SUM(Sales[Amount])")),
        );

        assert_eq!(outcome, Ok(json!({"valid": true})));
        assert_eq!(validator.requests(), vec!["SUM(Sales[Amount])".to_string()]);
    }
}
