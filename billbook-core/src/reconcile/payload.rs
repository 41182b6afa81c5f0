use crate::attachments::set::AttachmentSet;
use crate::error::ValidationError;
use crate::filter;
use crate::models::bill::BillDraft;
use crate::transport::types::{BillRef, SaveBillDto, SaveInvoiceDto};

/// Everything a save must transmit: the bill payload with its submit
/// list, plus the server ids queued for deletion this edit session.
#[derive(Debug, Clone)]
pub struct SavePayload {
    pub bill: SaveBillDto,
    pub to_delete_ids: Vec<i64>,
}

/// Assembles the transport payload for saving a bill.
///
/// All scalar fields are trimmed first; any empty one aborts the save
/// with a `ValidationError` naming it, before any transport call. The
/// submit list comes from the attachment diff, each entry re-encoded to
/// a base64 body without data-URI prefix.
pub fn build_save_payload(
    draft: &BillDraft,
    attachments: &AttachmentSet,
) -> Result<SavePayload, ValidationError> {
    let bill_no = draft.bill_no.trim();
    let party_name = draft.party_name.trim();
    let date = draft.date.trim();
    let tax = draft.tax.trim();
    let amount = draft.amount.trim();

    let mut missing = Vec::new();
    if bill_no.is_empty() {
        missing.push("billNo".to_string());
    }
    if party_name.is_empty() {
        missing.push("partyName".to_string());
    }
    if date.is_empty() {
        missing.push("date".to_string());
    }
    if tax.is_empty() {
        missing.push("tax".to_string());
    }
    if amount.is_empty() {
        missing.push("amount".to_string());
    }
    if !missing.is_empty() {
        return Err(ValidationError::new(missing));
    }

    let diff = attachments.diff_for_save();
    let invoice = diff
        .to_submit
        .iter()
        .map(|attachment| SaveInvoiceDto {
            invoice_id: None,
            bill: BillRef {
                bill_no: bill_no.to_string(),
            },
            invoice_name: attachment.display_name.trim().to_string(),
            invoice_file_name: attachment.source_file_name.trim().to_string(),
            invoice_file_type: attachment.extension(),
            invoice_file: attachment.encoded_body(),
            invoice_type: attachment.kind.wire_code().to_string(),
        })
        .collect();

    Ok(SavePayload {
        bill: SaveBillDto {
            bill_no: bill_no.to_string(),
            bill_date: filter::normalize_bill_date(date).unwrap_or_else(|| date.to_string()),
            party_name: party_name.to_string(),
            invoice,
            tax: tax.to_string(),
            amount: amount.to_string(),
        },
        to_delete_ids: diff.to_delete_ids,
    })
}
