//! Configuration for connecting to the Glownet API.
//!
//! This module handles building configuration directly or loading it from
//! environment variables, with validation to ensure all required values are
//! present.

use crate::error::GlownetError;
use std::env;
use url::Url;

/// The sandbox host used when no host override is given.
pub const SANDBOX_HOST: &str = "https://sandbox.glownet.com";

/// Configuration for connecting to Glownet.
///
/// The event and company tokens are stored but never logged or exposed
/// in error messages.
#[derive(Clone)]
pub struct Config {
    /// Event token, sent as the Basic-Auth username.
    /// This value must never be logged or included in error messages.
    pub event_token: String,

    /// Company token, sent as the Basic-Auth password.
    /// This value must never be logged or included in error messages.
    pub company_token: String,

    /// Host for the Glownet API (e.g., `https://sandbox.glownet.com`).
    pub host: String,
}

impl Config {
    /// Creates a configuration targeting the sandbox host.
    ///
    /// # Errors
    ///
    /// Returns `GlownetError::Config` if either token is empty or looks
    /// like a placeholder value.
    pub fn new(
        event_token: impl Into<String>,
        company_token: impl Into<String>,
    ) -> Result<Self, GlownetError> {
        let event_token = event_token.into();
        let company_token = company_token.into();

        Self::validate_token(&event_token, "event token")?;
        Self::validate_token(&company_token, "company token")?;

        Ok(Config {
            event_token,
            company_token,
            host: SANDBOX_HOST.to_string(),
        })
    }

    /// Overrides the host, e.g. to target a production instance.
    ///
    /// # Errors
    ///
    /// Returns `GlownetError::Config` if the host is not a valid
    /// http/https URL.
    pub fn with_host(mut self, host: impl Into<String>) -> Result<Self, GlownetError> {
        self.host = Self::validate_host(host.into())?;
        Ok(self)
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `GLOWNET_EVENT_TOKEN`: The event token (Basic-Auth username)
    /// - `GLOWNET_COMPANY_TOKEN`: The company token (Basic-Auth password)
    ///
    /// # Optional Environment Variables
    ///
    /// - `GLOWNET_HOST`: Host override (defaults to the sandbox host)
    ///
    /// # Errors
    ///
    /// Returns `GlownetError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, GlownetError> {
        let event_token = Self::get_required_env("GLOWNET_EVENT_TOKEN")?;
        let company_token = Self::get_required_env("GLOWNET_COMPANY_TOKEN")?;

        let config = Config::new(event_token, company_token)?;

        match env::var("GLOWNET_HOST") {
            Ok(host) if !host.trim().is_empty() => config.with_host(host),
            _ => Ok(config),
        }
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, GlownetError> {
        env::var(name)
            .map_err(|_| GlownetError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(GlownetError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the host URL.
    fn validate_host(host: String) -> Result<String, GlownetError> {
        let host = host.trim().trim_end_matches('/').to_string();

        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(GlownetError::invalid_config(
                "host must start with http:// or https://",
            ));
        }

        // Reject hosts that would break URL construction later
        Url::parse(&host)
            .map_err(|e| GlownetError::invalid_config(format!("invalid host URL: {}", e)))?;

        Ok(host)
    }

    /// Validates a token is present and not a placeholder value.
    fn validate_token(token: &str, label: &str) -> Result<(), GlownetError> {
        if token.trim().is_empty() {
            return Err(GlownetError::invalid_config(format!(
                "{} must not be empty",
                label
            )));
        }

        let token_lower = token.to_lowercase();
        let placeholder_patterns = ["your_token", "placeholder", "xxx", "changeme"];

        for pattern in placeholder_patterns {
            if token_lower.contains(pattern) {
                return Err(GlownetError::invalid_config(format!(
                    "{} appears to be a placeholder value",
                    label
                )));
            }
        }

        Ok(())
    }
}
