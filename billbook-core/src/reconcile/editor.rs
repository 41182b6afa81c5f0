use std::sync::Arc;

use tracing::{error, info};

use crate::attachments::set::AttachmentSet;
use crate::attachments::store::{AttachmentStore, RemovalStatus};
use crate::directory::BillDirectory;
use crate::error::{BillingError, EditStateError, TransportError};
use crate::models::attachment::InvoiceKind;
use crate::models::bill::{Bill, BillDraft};
use crate::reconcile::payload::build_save_payload;
use crate::reconcile::state::{EditEvent, EditGuard, EditState, Transition};
use crate::transport::client::BillingApi;
use crate::transport::types::DeleteAck;

/// Edit surface for one bill.
///
/// Owns the draft, the attachment set and the lifecycle guard, and runs
/// the save flow: queued deletions first, then the bill payload, then
/// the merge of the authoritative response. Taking `&mut self` on every
/// backend operation serializes attachment deletes against saves for
/// the same bill; dropping an unfinished `save()` future leaves the
/// directory untouched.
pub struct BillEditor {
    api: Arc<dyn BillingApi>,
    store: AttachmentStore,
    draft: BillDraft,
    attachments: AttachmentSet,
    state: EditState,
}

impl BillEditor {
    /// Opens a blank edit surface for a new bill.
    pub fn open_new(api: Arc<dyn BillingApi>) -> Self {
        Self::with_parts(api, BillDraft::new(), AttachmentSet::new())
    }

    /// Opens an edit surface seeded from an existing bill.
    pub fn open(api: Arc<dyn BillingApi>, bill: &Bill) -> Self {
        Self::with_parts(api, bill.draft(), bill.attachments.clone())
    }

    fn with_parts(api: Arc<dyn BillingApi>, draft: BillDraft, attachments: AttachmentSet) -> Self {
        let state = EditGuard::transition(EditGuard::initial_state(), EditEvent::Open)
            .unwrap_or(EditState::Editing);
        Self {
            store: AttachmentStore::new(api.clone()),
            api,
            draft,
            attachments,
            state,
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn draft(&self) -> &BillDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BillDraft {
        &mut self.draft
    }

    pub fn attachments(&self) -> &AttachmentSet {
        &self.attachments
    }

    fn ensure_editing(&self) -> Result<(), EditStateError> {
        match self.state {
            EditState::Editing => Ok(()),
            EditState::Saving => Err(EditStateError::SaveInFlight),
            EditState::Idle => Err(EditStateError::NotEditing),
        }
    }

    fn bill_no(&self) -> String {
        self.draft.bill_no.trim().to_string()
    }

    /// Adds a locally selected file as a pending attachment.
    pub fn add_attachment(
        &mut self,
        display_name: impl Into<String>,
        source_file_name: impl Into<String>,
        kind: InvoiceKind,
        bytes: Vec<u8>,
    ) -> Result<(), BillingError> {
        self.ensure_editing()?;
        self.attachments
            .add(display_name, source_file_name, kind, bytes);
        Ok(())
    }

    /// Relabels an attachment. The active preview selection is keyed by
    /// source file name, so callers do not re-resolve after this.
    pub fn rename_attachment(
        &mut self,
        index: usize,
        new_display_name: impl Into<String>,
    ) -> Result<bool, BillingError> {
        self.ensure_editing()?;
        Ok(self.attachments.rename(index, new_display_name))
    }

    /// Replaces an attachment's file with freshly selected bytes.
    pub fn replace_attachment_file(
        &mut self,
        index: usize,
        new_bytes: Vec<u8>,
        new_source_file_name: impl Into<String>,
    ) -> Result<bool, BillingError> {
        self.ensure_editing()?;
        Ok(self
            .attachments
            .replace_file(index, new_bytes, new_source_file_name))
    }

    /// Removes one attachment, confirming with the backend when the
    /// entry is persisted.
    pub async fn remove_attachment(&mut self, index: usize) -> Result<RemovalStatus, BillingError> {
        self.ensure_editing()?;
        let bill_no = self.bill_no();
        self.store
            .remove_one(&mut self.attachments, &bill_no, index)
            .await
    }

    /// Removes every attachment, batching the backend delete for the
    /// persisted ones.
    pub async fn remove_all_attachments(&mut self) -> Result<(), BillingError> {
        self.ensure_editing()?;
        let bill_no = self.bill_no();
        self.store
            .remove_all(&mut self.attachments, &bill_no)
            .await
    }

    /// Saves the bill: validates the draft, flushes queued deletions,
    /// submits the payload and merges the authoritative response into
    /// the directory.
    ///
    /// Only invokable from Editing; a save in flight rejects further
    /// triggers. Success closes the surface (Idle); any failure returns
    /// it to Editing with local state unchanged.
    pub async fn save(&mut self, directory: &mut BillDirectory) -> Result<Bill, BillingError> {
        self.state = EditGuard::transition(self.state, EditEvent::SaveRequested)?;

        let payload = match build_save_payload(&self.draft, &self.attachments) {
            Ok(payload) => payload,
            Err(err) => {
                self.state = EditGuard::transition(self.state, EditEvent::SaveFailed)?;
                return Err(err.into());
            }
        };

        if !payload.to_delete_ids.is_empty() {
            if let Err(err) = self.flush_queued_deletes(&payload.to_delete_ids).await {
                self.state = EditGuard::transition(self.state, EditEvent::SaveFailed)?;
                return Err(err);
            }
        }

        match self.api.save_bill(&payload.bill).await {
            Ok(server) => {
                self.state = EditGuard::transition(self.state, EditEvent::SaveSucceeded)?;
                let merged = directory.absorb_save(&server);
                self.draft = merged.draft();
                self.attachments = merged.attachments.clone();
                info!(
                    "saved bill {} with {} stored invoice(s)",
                    merged.bill_no,
                    merged.attachments.len()
                );
                Ok(merged)
            }
            Err(err) => {
                error!("save of bill {} failed: {}", payload.bill.bill_no, err);
                self.state = EditGuard::transition(self.state, EditEvent::SaveFailed)?;
                Err(err.into())
            }
        }
    }

    async fn flush_queued_deletes(&mut self, ids: &[i64]) -> Result<(), BillingError> {
        let bill_no = self.bill_no();
        let payloads = self.attachments.queued_delete_payloads(&bill_no);
        match self.api.delete_all_invoices(&payloads).await? {
            DeleteAck::Confirmed => {
                for id in ids {
                    self.attachments.confirm_deleted(*id);
                }
                Ok(())
            }
            DeleteAck::Rejected(body) => Err(TransportError::Rejected {
                operation: "delete_all_invoices",
                body,
            }
            .into()),
        }
    }

    /// Closes the edit surface, discarding unsaved local state.
    pub fn close(&mut self) {
        if let Ok(next) = EditGuard::transition(self.state, EditEvent::Close) {
            self.state = next;
        }
        self.draft = BillDraft::new();
        self.attachments = AttachmentSet::new();
    }
}
