//! Ticket models for bulk upload.

use serde::{Deserialize, Serialize};

/// A single ticket for bulk upload.
///
/// `ticket_reference` and `ticket_type_id` are mandatory; an empty
/// reference or a zero type id is treated as missing by validation.
/// Only these fields plus `purchaser_attributes` are ever sent on the
/// wire, so unknown caller data is stripped by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Caller-defined reference identifying the ticket.
    pub ticket_reference: String,

    /// Remote id of the ticket type this ticket belongs to.
    pub ticket_type_id: u64,

    /// Optional purchaser details, passed through opaquely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchaser_attributes: Option<serde_json::Value>,
}

impl Ticket {
    /// Creates a ticket with the two mandatory fields.
    pub fn new(ticket_reference: impl Into<String>, ticket_type_id: u64) -> Self {
        Self {
            ticket_reference: ticket_reference.into(),
            ticket_type_id,
            purchaser_attributes: None,
        }
    }

    /// Attaches purchaser details to the ticket.
    pub fn with_purchaser_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.purchaser_attributes = Some(attributes);
        self
    }
}

/// Response body of the bulk upload endpoint.
///
/// The remote contract for this body is not pinned down, so it is kept
/// as an opaque JSON map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadResult {
    /// Raw response fields returned by the endpoint.
    #[serde(flatten)]
    pub body: serde_json::Map<String, serde_json::Value>,
}
