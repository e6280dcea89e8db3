//! HTTP validator: one JSON `POST` per submission, no retries, no timeout.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;

use crate::validation::{ValidationError, ValidationRequest, Validator};

pub struct HttpValidator {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpValidator {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Flattens an error and its sources into one line.
///
/// reqwest's own `Display` stops at "error sending request for url (...)",
/// which hides the actual cause (e.g. connection refused).
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[async_trait]
impl Validator for HttpValidator {
    fn name(&self) -> &str {
        "http"
    }

    async fn validate(&self, request: ValidationRequest<'_>) -> Result<Value, ValidationError> {
        info!(
            "POST {} (dax length={})",
            self.endpoint,
            request.dax.len()
        );

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ValidationError::Network(error_chain(&e)))?;

        let status = response.status();
        debug!("Validation response status: {}", status);

        if !status.is_success() {
            warn!("Validation endpoint returned HTTP {}", status.as_u16());
            return Err(ValidationError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ValidationError::Network(error_chain(&e)))?;
        debug!("Validation response body: {} bytes", body.len());

        serde_json::from_str(&body).map_err(|e| {
            warn!("Validation response is not JSON: {}", e);
            ValidationError::Parse(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl std::error::Error for Layer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.1.as_deref().map(|e| e as &(dyn std::error::Error + 'static))
        }
    }

    #[test]
    fn test_error_chain_joins_sources() {
        let err = Layer(
            "error sending request",
            Some(Box::new(Layer("Connection refused", None))),
        );
        assert_eq!(error_chain(&err), "error sending request: Connection refused");
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let err = Layer(
            "tcp connect error: Connection refused",
            Some(Box::new(Layer("Connection refused", None))),
        );
        assert_eq!(error_chain(&err), "tcp connect error: Connection refused");
    }

    #[test]
    fn test_endpoint_accessor() {
        let v = HttpValidator::new("http://127.0.0.1:8000/validate".to_string());
        assert_eq!(v.endpoint(), "http://127.0.0.1:8000/validate");
        assert_eq!(v.name(), "http");
    }
}
