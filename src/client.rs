//! HTTP client for the Glownet API.
//!
//! This module provides the `GlownetClient` struct for making authenticated
//! requests to the Glownet REST API. It is the concrete implementation of
//! [`TicketTypeApi`] used in production.
//!
//! # Security
//!
//! The event and company tokens are never logged. All error messages are
//! sanitized before logging.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};

use crate::api::TicketTypeApi;
use crate::config::Config;
use crate::error::GlownetError;
use crate::models::{Ticket, TicketType, TicketTypeList, UploadResult};

/// Default request timeout in seconds.
///
/// Timeouts are part of the client's configuration, not the reconciler's.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path prefix shared by all company API endpoints.
const API_PREFIX: &str = "/companies/api/v1";

/// Maximum length for HTTP error response bodies to avoid leaking verbose
/// remote internals.
const MAX_ERROR_BODY_LEN: usize = 500;

/// HTTP client for the Glownet API.
///
/// Handles authentication, request formatting, and response parsing for
/// all Glownet operations. The client holds only fixed connection and
/// auth configuration, immutable after construction.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = GlownetClient::new(&config)?;
///
/// let types = client.fetch_ticket_types().await?;
/// ```
#[derive(Clone)]
pub struct GlownetClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Host for the Glownet API (e.g., `https://sandbox.glownet.com`).
    host: String,

    /// Event token, sent as the Basic-Auth username.
    /// SECURITY: Never log this value!
    event_token: String,

    /// Company token, sent as the Basic-Auth password.
    /// SECURITY: Never log this value!
    company_token: String,
}

impl GlownetClient {
    /// Creates a new Glownet client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `GlownetError::HttpClient` if the HTTP client fails to
    /// initialize.
    pub fn new(config: &Config) -> Result<Self, GlownetError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(GlownetError::HttpClient)?;

        Ok(Self {
            http,
            host: config.host.clone(),
            event_token: config.event_token.clone(),
            company_token: config.company_token.clone(),
        })
    }

    /// Returns the tokens used to sanitize outgoing log and error messages.
    ///
    /// This should ONLY be used for sanitizing, never for logging.
    fn tokens_for_sanitization(&self) -> [&str; 2] {
        [&self.event_token, &self.company_token]
    }

    /// Collects the missing mandatory fields for a ticket type payload.
    ///
    /// An empty value counts as missing, mirroring the remote system's
    /// treatment of blank fields.
    fn missing_ticket_type_fields(name: &str, ticket_type_ref: &str) -> Vec<String> {
        let mut missing = Vec::new();
        if name.is_empty() {
            missing.push("name".to_string());
        }
        if ticket_type_ref.is_empty() {
            missing.push("ticket_type_ref".to_string());
        }
        missing
    }

    /// Validates a ticket type payload, naming every missing field.
    fn validate_ticket_type(name: &str, ticket_type_ref: &str) -> Result<(), GlownetError> {
        let missing = Self::missing_ticket_type_fields(name, ticket_type_ref);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GlownetError::missing_fields(&missing))
        }
    }

    /// Validates a bulk upload batch, naming every missing field with its
    /// ticket index.
    ///
    /// A zero `ticket_type_id` counts as missing, like an empty reference.
    fn validate_tickets(tickets: &[Ticket]) -> Result<(), GlownetError> {
        let mut missing = Vec::new();
        for (index, ticket) in tickets.iter().enumerate() {
            if ticket.ticket_reference.is_empty() {
                missing.push(format!("Ticket.{}.ticket_reference", index));
            }
            if ticket.ticket_type_id == 0 {
                missing.push(format!("Ticket.{}.ticket_type_id", index));
            }
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(GlownetError::missing_fields(&missing))
        }
    }

    /// Tests connectivity to the Glownet server.
    ///
    /// Makes a simple API call to verify the server is reachable and
    /// authentication is working.
    ///
    /// # Errors
    ///
    /// Returns `GlownetError::ConnectionTest` if the connection fails,
    /// with details about the failure reason.
    pub async fn test_connection(&self) -> Result<(), GlownetError> {
        tracing::debug!("Testing connection to Glownet server");

        match self.fetch_ticket_types().await {
            Ok(_) => {
                tracing::info!("Connection test successful");
                Ok(())
            }
            Err(GlownetError::Authentication) => Err(GlownetError::connection_test(
                "authentication failed - verify GLOWNET_EVENT_TOKEN and GLOWNET_COMPANY_TOKEN",
            )),
            Err(GlownetError::Timeout { duration, .. }) => {
                Err(GlownetError::connection_test(format!(
                    "connection timed out after {:?} - verify GLOWNET_HOST is correct and the server is reachable",
                    duration
                )))
            }
            Err(e) => {
                let message = e.sanitized_display(&self.tokens_for_sanitization());
                Err(GlownetError::connection_test(message))
            }
        }
    }

    /// Makes a request to the Glownet API.
    ///
    /// Handles authentication, the `cache-control: no-cache` header, JSON
    /// body formatting, and response parsing.
    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, GlownetError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}{}", self.host, API_PREFIX, path);

        tracing::debug!(
            method = %method,
            path = %path,
            "Making Glownet API request"
        );

        let mut req = self
            .http
            .request(method.clone(), &url)
            .basic_auth(&self.event_token, Some(&self.company_token))
            .header("cache-control", "no-cache");

        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                let err = GlownetError::timeout(
                    Duration::from_secs(DEFAULT_TIMEOUT_SECS),
                    format!("{} {}", method, path),
                );
                tracing::error!(
                    operation = %format!("{} {}", method, path),
                    "Glownet request timed out"
                );
                return err;
            }
            tracing::error!(
                operation = %format!("{} {}", method, path),
                error = %GlownetError::sanitize_message(&e.to_string(), &self.event_token),
                "Glownet request failed"
            );
            GlownetError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.handle_http_error(status, response, path).await);
        }

        let body = response.text().await.map_err(GlownetError::Http)?;

        tracing::trace!(body = %body, "Glownet API response");

        serde_json::from_str(&body).map_err(GlownetError::Serialization)
    }

    /// Truncates an error body, keeping the cut on a char boundary.
    ///
    /// The remote controls this body, so it may hold multi-byte UTF-8
    /// right at the length limit; slicing at a fixed byte offset would
    /// panic there.
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_LEN {
            return body;
        }
        let mut end = MAX_ERROR_BODY_LEN;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }

    /// Handles HTTP-level errors and converts to GlownetError.
    async fn handle_http_error(
        &self,
        status: StatusCode,
        response: reqwest::Response,
        path: &str,
    ) -> GlownetError {
        let body = response.text().await.unwrap_or_default();
        // Sanitize the body to ensure no token leakage
        let mut body = body;
        for token in self.tokens_for_sanitization() {
            body = GlownetError::sanitize_message(&body, token);
        }
        // Truncate to avoid leaking verbose remote internals
        let body = Self::truncate_error_body(body);

        tracing::warn!(status = %status, "Glownet API returned error status");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GlownetError::Authentication,
            StatusCode::NOT_FOUND => GlownetError::not_found(path),
            _ => GlownetError::HttpStatus { status, body },
        }
    }

    /// Makes a GET request to the Glownet API.
    async fn get<T>(&self, path: &str) -> Result<T, GlownetError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request::<T>(Method::GET, path, None).await
    }

    /// Makes a POST request to the Glownet API.
    async fn post<T>(&self, path: &str, body: serde_json::Value) -> Result<T, GlownetError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request::<T>(Method::POST, path, Some(body)).await
    }

    /// Makes a PATCH request to the Glownet API.
    async fn patch<T>(&self, path: &str, body: serde_json::Value) -> Result<T, GlownetError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request::<T>(Method::PATCH, path, Some(body)).await
    }
}

#[async_trait]
impl TicketTypeApi for GlownetClient {
    async fn fetch_ticket_types(&self) -> Result<Vec<TicketType>, GlownetError> {
        let response: TicketTypeList = self.get("/ticket_types").await?;
        Ok(response.ticket_types)
    }

    async fn create_ticket_type(
        &self,
        name: &str,
        ticket_type_ref: &str,
    ) -> Result<TicketType, GlownetError> {
        Self::validate_ticket_type(name, ticket_type_ref)?;

        let body = serde_json::json!({
            "ticket_type": {
                "name": name,
                "ticket_type_ref": ticket_type_ref,
            }
        });

        self.post("/ticket_types", body).await
    }

    async fn update_ticket_type(
        &self,
        id: u64,
        name: &str,
        ticket_type_ref: &str,
    ) -> Result<TicketType, GlownetError> {
        Self::validate_ticket_type(name, ticket_type_ref)?;

        let body = serde_json::json!({
            "ticket_type": {
                "name": name,
                "ticket_type_ref": ticket_type_ref,
            }
        });

        let path = format!("/ticket_types/{}", id);
        self.patch(&path, body).await
    }

    async fn bulk_upload_tickets(&self, tickets: &[Ticket]) -> Result<UploadResult, GlownetError> {
        Self::validate_tickets(tickets)?;

        // Serializing `Ticket` keeps only the recognized fields, so unknown
        // caller data never reaches the wire.
        let body = serde_json::json!({ "tickets": tickets });

        self.post("/tickets/bulk_upload", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ticket_type_accepts_complete_payload() {
        assert!(GlownetClient::validate_ticket_type("VIP", "vip").is_ok());
    }

    #[test]
    fn test_validate_ticket_type_names_missing_ref() {
        let err = GlownetClient::validate_ticket_type("VIP", "").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ticket_type_ref"));
        assert!(!msg.contains("name"));
    }

    #[test]
    fn test_validate_ticket_type_names_both_missing_fields() {
        let err = GlownetClient::validate_ticket_type("", "").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("name"));
        assert!(msg.contains("ticket_type_ref"));
    }

    #[test]
    fn test_validate_tickets_accepts_complete_batch() {
        let tickets = vec![Ticket::new("t-001", 1), Ticket::new("t-002", 2)];
        assert!(GlownetClient::validate_tickets(&tickets).is_ok());
    }

    #[test]
    fn test_validate_tickets_identifies_offending_index() {
        let tickets = vec![
            Ticket::new("t-001", 1),
            Ticket::new("t-002", 0),
            Ticket::new("t-003", 3),
        ];
        let err = GlownetClient::validate_tickets(&tickets).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Ticket.1.ticket_type_id"));
        assert!(!msg.contains("Ticket.0"));
        assert!(!msg.contains("Ticket.2"));
    }

    #[test]
    fn test_truncate_error_body_keeps_short_bodies() {
        let body = "short error".to_string();
        assert_eq!(GlownetClient::truncate_error_body(body.clone()), body);
    }

    #[test]
    fn test_truncate_error_body_marks_long_bodies() {
        let body = "x".repeat(MAX_ERROR_BODY_LEN + 100);
        let truncated = GlownetClient::truncate_error_body(body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LEN)));
    }

    #[test]
    fn test_truncate_error_body_respects_char_boundaries() {
        // A multi-byte char straddling the length limit must not panic.
        let mut body = "a".repeat(MAX_ERROR_BODY_LEN - 1);
        body.push('é');
        body.push_str("tail");
        let truncated = GlownetClient::truncate_error_body(body);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(!truncated.contains('é'));
    }

    #[test]
    fn test_truncate_error_body_keeps_char_ending_on_boundary() {
        // 498 ASCII bytes + a 2-byte char ends exactly at the limit.
        let mut body = "a".repeat(MAX_ERROR_BODY_LEN - 2);
        body.push('é');
        body.push_str("tail");
        let truncated = GlownetClient::truncate_error_body(body);
        assert!(truncated.contains('é'));
        assert!(truncated.ends_with("...[truncated]"));
    }

    #[test]
    fn test_validate_tickets_names_every_missing_field() {
        let tickets = vec![Ticket::new("", 0)];
        let err = GlownetClient::validate_tickets(&tickets).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Ticket.0.ticket_reference"));
        assert!(msg.contains("Ticket.0.ticket_type_id"));
    }
}
