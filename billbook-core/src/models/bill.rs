use tracing::warn;

use crate::attachments::set::AttachmentSet;
use crate::filter;
use crate::models::attachment::Attachment;
use crate::transport::types::BillDto;

/// The primary business record being managed.
///
/// `bill_no` is the unique business key, immutable once persisted, and
/// the sole merge key against the remote store. The client never invents
/// its own row identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bill {
    pub bill_no: String,
    pub party_name: String,
    /// Canonical display format, `YYYY-MM-DD`.
    pub date: String,
    pub tax: String,
    pub amount: String,
    pub attachments: AttachmentSet,
}

impl Bill {
    /// Rebuilds a bill from its wire representation.
    ///
    /// Older backend builds report the date under `date` instead of
    /// `billDate`; both are accepted and normalized. Invoice records
    /// without a server id are skipped: the backend contract requires an
    /// authoritative id on every stored invoice.
    pub fn from_wire(dto: &BillDto) -> Self {
        let raw_date = dto
            .bill_date
            .as_deref()
            .or(dto.date.as_deref())
            .unwrap_or_default();
        let date = filter::normalize_bill_date(raw_date)
            .unwrap_or_else(|| raw_date.trim().to_string());

        let mut attachments = Vec::new();
        for (position, invoice) in dto.invoice.iter().enumerate() {
            match Attachment::from_wire(&dto.bill_no, position, invoice) {
                Some(attachment) => attachments.push(attachment),
                None => warn!(
                    "bill {} invoice at position {} has no server id, skipping",
                    dto.bill_no, position
                ),
            }
        }

        Self {
            bill_no: dto.bill_no.clone(),
            party_name: dto.party_name.clone(),
            date,
            tax: dto.tax.clone(),
            amount: dto.amount.clone(),
            attachments: AttachmentSet::from_persisted(attachments),
        }
    }

    /// Editable copy of the scalar fields.
    pub fn draft(&self) -> BillDraft {
        BillDraft {
            bill_no: self.bill_no.clone(),
            party_name: self.party_name.clone(),
            date: self.date.clone(),
            tax: self.tax.clone(),
            amount: self.amount.clone(),
        }
    }
}

/// Locally edited scalar fields of a bill, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillDraft {
    pub bill_no: String,
    pub party_name: String,
    pub date: String,
    pub tax: String,
    pub amount: String,
}

impl BillDraft {
    /// Blank draft for a newly added bill.
    pub fn new() -> Self {
        Self::default()
    }
}
