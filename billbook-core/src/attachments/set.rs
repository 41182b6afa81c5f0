use std::collections::HashMap;

use crate::models::attachment::{Attachment, AttachmentContent, InvoiceKind};
use crate::transport::types::{BillRef, InvoiceDeleteDto};

/// Ordered collection of attachments for exactly one bill.
///
/// Insertion order is display order. Duplicate source file names may
/// coexist until a merge/view step deduplicates them last-wins. The set
/// also carries the pending-deletion queue: server ids the user has
/// orphaned this edit session (by replacing a stored file) that must be
/// deleted when the bill is saved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentSet {
    entries: Vec<Attachment>,
    queued_deletes: Vec<QueuedDelete>,
}

/// A stored invoice the user orphaned this edit session. Enough of the
/// old entry is kept to build its delete payload at save time.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueuedDelete {
    server_id: i64,
    file_name: String,
    extension: String,
    kind: InvoiceKind,
}

/// Attachment additions and pending deletions to transmit on save.
#[derive(Debug, Clone)]
pub struct SaveDiff<'a> {
    /// Every entry currently carrying raw bytes, to be re-encoded and
    /// submitted.
    pub to_submit: Vec<&'a Attachment>,

    /// Server ids marked for deletion but not yet confirmed deleted.
    pub to_delete_ids: Vec<i64>,
}

impl AttachmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a set from already persisted attachments.
    pub fn from_persisted(entries: Vec<Attachment>) -> Self {
        Self {
            entries,
            queued_deletes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Attachment> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.entries.iter()
    }

    /// Server ids queued for deletion at the next save.
    pub fn pending_delete_ids(&self) -> Vec<i64> {
        self.queued_deletes.iter().map(|q| q.server_id).collect()
    }

    /// Delete payloads for the queued deletions.
    pub fn queued_delete_payloads(&self, bill_no: &str) -> Vec<InvoiceDeleteDto> {
        self.queued_deletes
            .iter()
            .map(|queued| InvoiceDeleteDto {
                invoice_id: queued.server_id,
                invoice_type: queued.kind.wire_code().to_string(),
                invoice_file_name: queued.file_name.clone(),
                invoice_file_type: queued.extension.clone(),
                bill: Some(BillRef {
                    bill_no: bill_no.to_string(),
                }),
            })
            .collect()
    }

    /// Appends a pending attachment. No uniqueness check: duplicates by
    /// name coexist until a merge/view step deduplicates them.
    pub fn add(
        &mut self,
        display_name: impl Into<String>,
        source_file_name: impl Into<String>,
        kind: InvoiceKind,
        bytes: Vec<u8>,
    ) {
        self.entries
            .push(Attachment::pending(display_name, source_file_name, kind, bytes));
    }

    /// Changes the user-facing label only. Returns false when the index
    /// is out of range.
    pub fn rename(&mut self, index: usize, new_display_name: impl Into<String>) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.display_name = new_display_name.into();
                true
            }
            None => false,
        }
    }

    /// Overwrites an entry's content with freshly selected file bytes.
    ///
    /// The entry becomes Pending; replacing a stored file queues its old
    /// server id for deletion at save time. An empty display name
    /// defaults to the new source file name. Returns false when the
    /// index is out of range.
    pub fn replace_file(
        &mut self,
        index: usize,
        new_bytes: Vec<u8>,
        new_source_file_name: impl Into<String>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        if let Some(old_id) = entry.server_id() {
            self.queued_deletes.push(QueuedDelete {
                server_id: old_id,
                file_name: entry.source_file_name.clone(),
                extension: entry.extension(),
                kind: entry.kind,
            });
        }
        entry.source_file_name = new_source_file_name.into();
        if entry.display_name.trim().is_empty() {
            entry.display_name = entry.source_file_name.clone();
        }
        entry.content = AttachmentContent::Pending { bytes: new_bytes };
        true
    }

    /// Removes an entry locally. Callers must only use this for pending
    /// entries or after the backend confirmed the delete; see
    /// `AttachmentStore` for the confirmed path.
    pub fn remove_local(&mut self, index: usize) -> Option<Attachment> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    /// Clears every entry and the pending-deletion queue.
    pub fn clear_local(&mut self) {
        self.entries.clear();
        self.queued_deletes.clear();
    }

    /// Entries confirmed stored server-side.
    pub fn persisted(&self) -> Vec<&Attachment> {
        self.entries.iter().filter(|a| a.is_persisted()).collect()
    }

    /// Delete payloads for every persisted entry, for the batched
    /// delete-all call.
    pub fn persisted_delete_payloads(&self, bill_no: &str) -> Vec<InvoiceDeleteDto> {
        self.entries
            .iter()
            .filter_map(|a| a.delete_payload(bill_no))
            .collect()
    }

    /// Display view deduplicated by source file name, last-wins: a later
    /// entry shadows an earlier one with the same name.
    pub fn merged_view(&self) -> Vec<&Attachment> {
        let mut winner: HashMap<&str, usize> = HashMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            winner.insert(entry.source_file_name.as_str(), index);
        }
        self.entries
            .iter()
            .enumerate()
            .filter(|(index, entry)| winner[entry.source_file_name.as_str()] == *index)
            .map(|(_, entry)| entry)
            .collect()
    }

    /// Computes what a save must transmit: every entry still carrying
    /// raw bytes, plus the server ids queued for deletion.
    pub fn diff_for_save(&self) -> SaveDiff<'_> {
        SaveDiff {
            to_submit: self.entries.iter().filter(|a| a.is_pending()).collect(),
            to_delete_ids: self.pending_delete_ids(),
        }
    }

    /// Drops a confirmed-deleted id from the queue.
    pub(crate) fn confirm_deleted(&mut self, server_id: i64) {
        self.queued_deletes.retain(|q| q.server_id != server_id);
    }
}
