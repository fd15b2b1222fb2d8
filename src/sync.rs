//! Ticket type reconciliation.
//!
//! This module brings the remote set of ticket types into alignment with a
//! caller-supplied desired set, using `ticket_type_ref` as the matching key.
//! The diff is computed over two snapshots (the desired list and one fetch
//! of remote state); each reconciliation is a stateless, single-pass
//! operation with no shared state across calls.
//!
//! Deletion is intentionally disabled: a remote ticket type absent from the
//! desired list is left untouched. Re-running a reconcile after a successful
//! run therefore issues no calls, which makes retrying after a partial
//! failure safe.

use std::collections::HashMap;

use futures::future::{try_join, try_join_all};

use crate::api::TicketTypeApi;
use crate::error::GlownetError;
use crate::models::{DesiredTicketType, TicketType};

/// Which caller properties hold the ref and receive the created id when
/// reconciling raw JSON records.
///
/// This is a field-name indirection only; the wire protocol always uses
/// `ticket_type_ref`.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    /// Record property holding the stable `ticket_type_ref` key.
    pub ref_field: String,

    /// Record property that receives the remote-assigned id for newly
    /// created ticket types.
    pub id_field: String,
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self {
            ref_field: "ticket_type_ref".to_string(),
            id_field: "glownet_id".to_string(),
        }
    }
}

/// The create and update calls applied by one reconciliation.
#[derive(Debug, Clone, Default)]
pub struct SyncOutcome {
    /// Ticket types created remotely, carrying their new ids.
    pub created: Vec<TicketType>,

    /// Ticket types whose names were updated remotely.
    pub updated: Vec<TicketType>,
}

/// Reconciles desired ticket types against remote state.
///
/// Generic over [`TicketTypeApi`] so the diff logic can be exercised
/// against in-memory fakes in tests.
pub struct Reconciler<'a, A: TicketTypeApi> {
    api: &'a A,
}

impl<'a, A: TicketTypeApi> Reconciler<'a, A> {
    /// Creates a reconciler borrowing the given API client.
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Aligns remote ticket types with `desired` and returns the applied calls.
    ///
    /// The algorithm:
    ///
    /// 1. Fetch the current remote list, surfacing the client's error
    ///    immediately if this fails.
    /// 2. Index the desired entries by `ticket_type_ref`. Duplicate refs
    ///    follow a last-entry-wins policy.
    /// 3. For each remote ticket type: if its ref is absent from the index
    ///    it is orphaned and left alone (deletion is intentionally
    ///    disabled); if present with a differing name an update is
    ///    scheduled; a present ref is removed from the index either way.
    /// 4. Every entry still in the index is new and gets a create call.
    /// 5. All scheduled calls are dispatched concurrently and joined with
    ///    fail-fast semantics: the first error fails the whole operation,
    ///    and already-applied calls are not rolled back. Callers should
    ///    treat a failed sync as "state possibly partially applied" and
    ///    simply re-run it; the key-based diff makes that idempotent for
    ///    anything already applied.
    pub async fn sync(&self, desired: &[DesiredTicketType]) -> Result<SyncOutcome, GlownetError> {
        let remote = self.api.fetch_ticket_types().await?;

        // Last entry wins for duplicate refs.
        let mut pending: HashMap<&str, &DesiredTicketType> = desired
            .iter()
            .map(|d| (d.ticket_type_ref.as_str(), d))
            .collect();

        let mut updates = Vec::new();
        for remote_type in &remote {
            match pending.remove(remote_type.ticket_type_ref.as_str()) {
                // Orphaned remotely: deletion is disabled, leave it alone.
                None => {
                    tracing::debug!(
                        ticket_type_ref = %remote_type.ticket_type_ref,
                        "Remote ticket type not in desired list, leaving untouched"
                    );
                }
                Some(desired_type) => {
                    if desired_type.name != remote_type.name {
                        updates.push(self.api.update_ticket_type(
                            remote_type.id,
                            &desired_type.name,
                            &remote_type.ticket_type_ref,
                        ));
                    }
                }
            }
        }

        let creates: Vec<_> = pending
            .values()
            .map(|d| self.api.create_ticket_type(&d.name, &d.ticket_type_ref))
            .collect();

        tracing::debug!(
            updates = updates.len(),
            creates = creates.len(),
            "Applying ticket type diff"
        );

        let (updated, created) = try_join(try_join_all(updates), try_join_all(creates)).await?;

        Ok(SyncOutcome { created, updated })
    }

    /// Aligns remote ticket types with `desired` and returns how many new
    /// ticket types were created.
    ///
    /// See [`sync`](Self::sync) for the algorithm and failure semantics.
    pub async fn reconcile(&self, desired: &[DesiredTicketType]) -> Result<usize, GlownetError> {
        Ok(self.sync(desired).await?.created.len())
    }

    /// Reconciles raw JSON records using configurable field names.
    ///
    /// Reads each record's `name` and the property named by
    /// `mapping.ref_field`, runs the same reconciliation as
    /// [`sync`](Self::sync), and writes the remote-assigned id of every
    /// newly created ticket type back into the matching records under
    /// `mapping.id_field`. Returns the number of newly created types.
    ///
    /// # Errors
    ///
    /// Returns `GlownetError::Validation` naming every record field that
    /// is missing or empty, as `Record.{index}.{field}`, before any
    /// network call is made.
    pub async fn reconcile_records(
        &self,
        records: &mut [serde_json::Value],
        mapping: &FieldMapping,
    ) -> Result<usize, GlownetError> {
        let desired = Self::desired_from_records(records, mapping)?;
        let outcome = self.sync(&desired).await?;

        let created_ids: HashMap<&str, u64> = outcome
            .created
            .iter()
            .map(|t| (t.ticket_type_ref.as_str(), t.id))
            .collect();

        for record in records.iter_mut() {
            let Some(ref_value) = record
                .get(&mapping.ref_field)
                .and_then(|v| v.as_str())
                .map(str::to_string)
            else {
                continue;
            };
            if let Some(&id) = created_ids.get(ref_value.as_str()) {
                if let Some(object) = record.as_object_mut() {
                    object.insert(mapping.id_field.clone(), serde_json::json!(id));
                }
            }
        }

        Ok(outcome.created.len())
    }

    /// Extracts desired ticket types from raw records, collecting every
    /// missing field across the whole batch before failing.
    fn desired_from_records(
        records: &[serde_json::Value],
        mapping: &FieldMapping,
    ) -> Result<Vec<DesiredTicketType>, GlownetError> {
        let mut missing = Vec::new();
        let mut desired = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let name = record.get("name").and_then(|v| v.as_str()).unwrap_or("");
            let ticket_type_ref = record
                .get(&mapping.ref_field)
                .and_then(|v| v.as_str())
                .unwrap_or("");

            if name.is_empty() {
                missing.push(format!("Record.{}.name", index));
            }
            if ticket_type_ref.is_empty() {
                missing.push(format!("Record.{}.{}", index, mapping.ref_field));
            }

            desired.push(DesiredTicketType::new(name, ticket_type_ref));
        }

        if missing.is_empty() {
            Ok(desired)
        } else {
            Err(GlownetError::missing_fields(&missing))
        }
    }
}
