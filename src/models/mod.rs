//! Data models for the Glownet API.
//!
//! This module contains type definitions for ticket types, tickets, and
//! the response wrappers used by the API endpoints.

mod ticket;
mod ticket_type;

pub use ticket::*;
pub use ticket_type::*;
