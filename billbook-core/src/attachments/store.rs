use std::sync::Arc;

use tracing::{info, warn};

use crate::attachments::set::AttachmentSet;
use crate::error::{BillingError, TransportError};
use crate::transport::client::BillingApi;
use crate::transport::types::DeleteAck;

/// Outcome of a single-entry removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalStatus {
    Removed,
    /// Index out of range; the set is unchanged.
    NotFound,
}

/// Backend-coordinated attachment operations.
///
/// Pending entries are purely local; persisted entries are only removed
/// after the backend confirms the delete. A failed or rejected delete
/// leaves the set exactly as it was.
pub struct AttachmentStore {
    api: Arc<dyn BillingApi>,
}

impl AttachmentStore {
    pub fn new(api: Arc<dyn BillingApi>) -> Self {
        Self { api }
    }

    /// Removes one entry.
    ///
    /// Pending entries are dropped locally with no backend call.
    /// Persisted entries are deleted server-side first and removed
    /// locally only on the confirmation sentinel.
    pub async fn remove_one(
        &self,
        set: &mut AttachmentSet,
        bill_no: &str,
        index: usize,
    ) -> Result<RemovalStatus, BillingError> {
        let Some(entry) = set.get(index) else {
            return Ok(RemovalStatus::NotFound);
        };

        let Some(payload) = entry.delete_payload(bill_no) else {
            set.remove_local(index);
            return Ok(RemovalStatus::Removed);
        };

        if let DeleteAck::Rejected(body) = self.api.delete_invoice(&payload).await? {
            warn!(
                "backend refused to delete invoice {} of bill {}",
                payload.invoice_id, bill_no
            );
            return Err(TransportError::Rejected {
                operation: "delete_invoice",
                body,
            }
            .into());
        }

        set.remove_local(index);
        set.confirm_deleted(payload.invoice_id);
        info!(
            "deleted invoice {} of bill {}",
            payload.invoice_id, bill_no
        );
        Ok(RemovalStatus::Removed)
    }

    /// Removes every entry.
    ///
    /// With persisted entries present, one batched delete covers exactly
    /// those entries; the whole set and the pending-deletion queue are
    /// cleared only on confirmed success. With none, the clear is purely
    /// local.
    pub async fn remove_all(
        &self,
        set: &mut AttachmentSet,
        bill_no: &str,
    ) -> Result<(), BillingError> {
        let payloads = set.persisted_delete_payloads(bill_no);
        if payloads.is_empty() {
            set.clear_local();
            return Ok(());
        }

        if let DeleteAck::Rejected(body) = self.api.delete_all_invoices(&payloads).await? {
            warn!(
                "backend refused batched delete of {} invoices for bill {}",
                payloads.len(),
                bill_no
            );
            return Err(TransportError::Rejected {
                operation: "delete_all_invoices",
                body,
            }
            .into());
        }

        info!(
            "deleted {} stored invoices for bill {}",
            payloads.len(),
            bill_no
        );
        set.clear_local();
        Ok(())
    }
}
