//! The ticket type API surface the reconciler depends on.
//!
//! [`Reconciler`](crate::sync::Reconciler) is written against this trait
//! rather than the concrete HTTP client, so reconciliation logic can be
//! exercised against in-memory fakes in tests.

use async_trait::async_trait;

use crate::error::GlownetError;
use crate::models::{Ticket, TicketType, UploadResult};

/// Operations the Glownet ticket type API exposes.
///
/// Implementations validate required fields before issuing the network
/// call and fail fast with a [`GlownetError::Validation`] naming every
/// missing field.
#[async_trait]
pub trait TicketTypeApi: Send + Sync {
    /// Fetches the ticket types currently registered with the event.
    async fn fetch_ticket_types(&self) -> Result<Vec<TicketType>, GlownetError>;

    /// Creates a ticket type and returns it with its remote-assigned id.
    ///
    /// Both `name` and `ticket_type_ref` are mandatory; an empty value
    /// counts as missing.
    async fn create_ticket_type(
        &self,
        name: &str,
        ticket_type_ref: &str,
    ) -> Result<TicketType, GlownetError>;

    /// Updates an existing ticket type identified by its remote id.
    ///
    /// Both `name` and `ticket_type_ref` are mandatory; an empty value
    /// counts as missing.
    async fn update_ticket_type(
        &self,
        id: u64,
        name: &str,
        ticket_type_ref: &str,
    ) -> Result<TicketType, GlownetError>;

    /// Registers a batch of tickets in a single request.
    ///
    /// Every ticket must carry a non-empty `ticket_reference` and a
    /// non-zero `ticket_type_id`; a validation failure for any ticket
    /// aborts the entire call before any network request is made, with
    /// the error naming each offending `Ticket.{index}.{field}`.
    async fn bulk_upload_tickets(&self, tickets: &[Ticket]) -> Result<UploadResult, GlownetError>;
}
