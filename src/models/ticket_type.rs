//! Ticket type models.
//!
//! A ticket type is a category of ticket (e.g., "VIP", "General Admission")
//! registered with Glownet. The remote system assigns each one a numeric
//! `id`; callers identify them across systems via the stable
//! `ticket_type_ref` key.

use serde::{Deserialize, Serialize};

/// A ticket type as known to the remote system.
///
/// The `id` is assigned by Glownet and is authoritative. The
/// `ticket_type_ref` is the caller-defined stable key used for matching
/// across syncs; `name` is mutable display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketType {
    /// Remote-assigned numeric identifier.
    pub id: u64,

    /// Display name, mutable across syncs.
    pub name: String,

    /// Caller-defined stable external key.
    pub ticket_type_ref: String,
}

/// A ticket type as the caller wants it to exist remotely.
///
/// Has no `id`; one is assigned by the remote system when the type is
/// created during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredTicketType {
    /// Display name the remote entry should carry.
    pub name: String,

    /// Stable external key used for matching against remote entries.
    pub ticket_type_ref: String,
}

impl DesiredTicketType {
    /// Creates a desired ticket type.
    pub fn new(name: impl Into<String>, ticket_type_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticket_type_ref: ticket_type_ref.into(),
        }
    }
}

/// Response wrapper for the ticket type list endpoint.
///
/// The API returns `{ "ticket_types": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketTypeList {
    /// The ticket types currently registered with the event.
    pub ticket_types: Vec<TicketType>,
}
