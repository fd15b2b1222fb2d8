//! # Glownet
//!
//! Glownet is a Rust client SDK for the Glownet event ticketing REST API.
//!
//! It fetches, creates, and updates ticket type resources, bulk-uploads
//! tickets, and reconciles a caller-supplied list of desired ticket types
//! against the remote system's current state.
//!
//! ## Features
//!
//! - **Ticket types**: Fetch, create, and update ticket types
//! - **Reconciliation**: Key-based diff that creates missing types and
//!   renames changed ones, leaving orphaned remote types untouched
//! - **Bulk upload**: Register many tickets against existing ticket types
//!   in one request
//! - **Validation**: Required fields are checked before any network call,
//!   and every missing field is named in the error
//! - **Security**: Authentication tokens are never logged or exposed in
//!   error messages
//!
//! ## Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`] - Connection configuration, built directly or from
//!   environment variables
//! - [`error`] - Error types with security-conscious message sanitization
//! - [`models`] - Data models for API requests and responses
//! - [`api`] - The [`TicketTypeApi`](api::TicketTypeApi) trait the
//!   reconciler is written against
//! - [`client`] - HTTP client implementing the trait against the real API
//! - [`sync`] - The ticket type reconciler
//!
//! ## Example
//!
//! ```ignore
//! use glownet::client::GlownetClient;
//! use glownet::config::Config;
//! use glownet::models::DesiredTicketType;
//! use glownet::sync::Reconciler;
//!
//! async fn example() -> Result<(), glownet::error::GlownetError> {
//!     let config = Config::new("event-token", "company-token")?;
//!     let client = GlownetClient::new(&config)?;
//!
//!     let desired = vec![
//!         DesiredTicketType::new("VIP Gold", "vip"),
//!         DesiredTicketType::new("General Admission", "ga"),
//!     ];
//!
//!     let created = Reconciler::new(&client).reconcile(&desired).await?;
//!     println!("created {} new ticket types", created);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! [`Config::from_env`](config::Config::from_env) reads:
//!
//! - `GLOWNET_EVENT_TOKEN`: Event token (Basic-Auth username)
//! - `GLOWNET_COMPANY_TOKEN`: Company token (Basic-Auth password)
//! - `GLOWNET_HOST`: Optional host override (defaults to the sandbox)
//!
//! ## Failure semantics
//!
//! Reconciliation dispatches its create and update calls concurrently and
//! fails fast on the first error without rolling back calls that already
//! succeeded. A failed reconcile means "state possibly partially applied";
//! re-running it is safe because the key-based diff skips everything that
//! already matches.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod sync;
