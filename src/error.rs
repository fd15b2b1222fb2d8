//! Error types for the Glownet client.
//!
//! This module defines `GlownetError`, the unified error type used throughout
//! the crate for consistent error handling and propagation.
//!
//! # Security
//!
//! The event and company tokens must never appear in logs or error messages.
//! Use `sanitize_message()` when constructing error messages from external
//! sources such as HTTP response bodies.

use std::time::Duration;
use thiserror::Error;

/// Unified error type for all Glownet operations.
///
/// Each variant provides specific context about the failure, enabling
/// meaningful error messages without leaking the authentication tokens.
#[derive(Error, Debug)]
pub enum GlownetError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// Authentication failed - likely invalid event or company tokens.
    #[error("authentication failed - check the event and company tokens")]
    Authentication,

    /// Requested resource was not found.
    #[error("resource not found: {resource}")]
    NotFound {
        /// Description of the resource that was not found.
        resource: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input validation failed before any network call was made.
    ///
    /// The message enumerates every missing field, not just the first.
    #[error("validation error: {0}")]
    Validation(String),

    /// Connection test failed.
    #[error("connection test failed: {message}")]
    ConnectionTest {
        /// Details about why the connection test failed.
        message: String,
    },
}

impl GlownetError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        GlownetError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        GlownetError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        GlownetError::Validation(message.into())
    }

    /// Creates a validation error enumerating every missing field.
    ///
    /// The message lists all offending fields so the caller can fix them in
    /// one pass rather than discovering them one at a time.
    pub fn missing_fields(fields: &[String]) -> Self {
        GlownetError::Validation(format!("missing field(s): {}", fields.join(", ")))
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>) -> Self {
        GlownetError::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        GlownetError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a connection test error.
    pub fn connection_test(message: impl Into<String>) -> Self {
        GlownetError::ConnectionTest {
            message: message.into(),
        }
    }

    /// Returns true if this error was raised before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, GlownetError::Validation(_))
    }

    /// Sanitizes an error message to remove any occurrence of a token.
    ///
    /// This is critical for security - the event and company tokens must
    /// never appear in logs, error messages, or responses to users.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `token` - The token to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the token replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, token: &str) -> String {
        if token.is_empty() {
            return message.to_string();
        }
        message.replace(token, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    ///
    /// Strips every supplied token from the message. Use this when error
    /// details end up in logs or user-facing output.
    #[must_use]
    pub fn sanitized_display(&self, tokens: &[&str]) -> String {
        let mut message = self.to_string();
        for token in tokens {
            message = Self::sanitize_message(&message, token);
        }
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_error() {
        let err = GlownetError::missing_env("GLOWNET_EVENT_TOKEN");
        assert!(err.to_string().contains("GLOWNET_EVENT_TOKEN"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_validation_error() {
        let err = GlownetError::validation("name is required");
        assert_eq!(err.to_string(), "validation error: name is required");
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_fields_enumerates_all() {
        let err = GlownetError::missing_fields(&[
            "name".to_string(),
            "ticket_type_ref".to_string(),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("missing field(s)"));
        assert!(msg.contains("name"));
        assert!(msg.contains("ticket_type_ref"));
    }

    #[test]
    fn test_not_found_error() {
        let err = GlownetError::not_found("ticket type 42");
        assert_eq!(err.to_string(), "resource not found: ticket type 42");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_timeout_error() {
        let err = GlownetError::timeout(Duration::from_secs(30), "fetch_ticket_types");
        let msg = err.to_string();
        assert!(msg.contains("timed out"));
        assert!(msg.contains("30s"));
    }

    #[test]
    fn test_sanitize_message_removes_token() {
        let token = "super_secret_event_token";
        let message = format!("Error connecting with token {} to server", token);
        let sanitized = GlownetError::sanitize_message(&message, token);
        assert!(!sanitized.contains(token));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_empty_token() {
        let message = "Some error message";
        let sanitized = GlownetError::sanitize_message(message, "");
        assert_eq!(sanitized, message);
    }

    #[test]
    fn test_sanitized_display_strips_both_tokens() {
        let err = GlownetError::validation("event_tok and company_tok leaked");
        let sanitized = err.sanitized_display(&["event_tok", "company_tok"]);
        assert!(!sanitized.contains("event_tok"));
        assert!(!sanitized.contains("company_tok"));
    }

    #[test]
    fn test_connection_test_error() {
        let err = GlownetError::connection_test("could not reach server");
        let msg = err.to_string();
        assert!(msg.contains("connection test failed"));
        assert!(msg.contains("could not reach server"));
    }
}
