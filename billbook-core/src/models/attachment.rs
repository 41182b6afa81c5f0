use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mime::{self, MimeKind};
use crate::transport::types::{BillRef, InvoiceDeleteDto, InvoiceDto};

/// Invoice category.
///
/// Travels as a one-letter wire code; unknown codes fall back to Sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceKind {
    Sales,
    Voucher,
}

impl InvoiceKind {
    pub fn wire_code(&self) -> &'static str {
        match self {
            InvoiceKind::Sales => "S",
            InvoiceKind::Voucher => "V",
        }
    }

    pub fn from_wire_code(code: Option<&str>) -> Self {
        match code {
            Some("V") => InvoiceKind::Voucher,
            _ => InvoiceKind::Sales,
        }
    }
}

impl fmt::Display for InvoiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceKind::Sales => write!(f, "sales"),
            InvoiceKind::Voucher => write!(f, "voucher"),
        }
    }
}

/// Where an attachment's content currently lives.
///
/// An attachment is either Pending or Persisted, never both. The
/// Pending to Persisted transition happens only when a successful save
/// response replaces the pending entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentContent {
    /// Raw file bytes known only to the client, not yet stored.
    Pending { bytes: Vec<u8> },

    /// Confirmed stored server-side under a server-assigned id. The
    /// payload is the base64 body as the backend returned it.
    Persisted { server_id: i64, payload: String },
}

/// One document linked to a bill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// User-facing label, independent of the underlying file name.
    pub display_name: String,

    /// Original file name, used to derive the extension.
    pub source_file_name: String,

    pub kind: InvoiceKind,

    pub content: AttachmentContent,
}

impl Attachment {
    /// A locally selected file that has not been sent to the backend.
    ///
    /// An empty display name defaults to the source file name.
    pub fn pending(
        display_name: impl Into<String>,
        source_file_name: impl Into<String>,
        kind: InvoiceKind,
        bytes: Vec<u8>,
    ) -> Self {
        let source_file_name = source_file_name.into();
        let display_name = display_name.into();
        let display_name = if display_name.trim().is_empty() {
            source_file_name.clone()
        } else {
            display_name
        };
        Self {
            display_name,
            source_file_name,
            kind,
            content: AttachmentContent::Pending { bytes },
        }
    }

    /// An attachment confirmed stored by the backend.
    pub fn persisted(
        display_name: impl Into<String>,
        source_file_name: impl Into<String>,
        kind: InvoiceKind,
        server_id: i64,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            source_file_name: source_file_name.into(),
            kind,
            content: AttachmentContent::Persisted {
                server_id,
                payload: mime::strip_data_uri(&payload.into()).to_string(),
            },
        }
    }

    /// Rebuilds a persisted attachment from a stored invoice record.
    ///
    /// Returns None when the record carries no server id; `position` is
    /// used for the fallback file name of legacy rows stored without one.
    pub fn from_wire(bill_no: &str, position: usize, dto: &InvoiceDto) -> Option<Self> {
        let server_id = dto.invoice_id?;
        let file_name = if dto.invoice_file_name.is_empty() {
            format!("Invoice-{}-{}.pdf", bill_no, position + 1)
        } else {
            dto.invoice_file_name.clone()
        };
        let display_name = if dto.invoice_name.is_empty() {
            file_name.clone()
        } else {
            dto.invoice_name.clone()
        };
        Some(Self::persisted(
            display_name,
            file_name,
            InvoiceKind::from_wire_code(dto.invoice_type.as_deref()),
            server_id,
            dto.invoice_file.clone(),
        ))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.content, AttachmentContent::Pending { .. })
    }

    pub fn is_persisted(&self) -> bool {
        !self.is_pending()
    }

    /// Server-assigned id, None while pending.
    pub fn server_id(&self) -> Option<i64> {
        match &self.content {
            AttachmentContent::Pending { .. } => None,
            AttachmentContent::Persisted { server_id, .. } => Some(*server_id),
        }
    }

    /// Base64 body without data-URI prefix, encoding pending bytes on
    /// demand.
    pub fn encoded_body(&self) -> String {
        match &self.content {
            AttachmentContent::Pending { bytes } => mime::encode_bytes(bytes),
            AttachmentContent::Persisted { payload, .. } => {
                mime::strip_data_uri(payload).to_string()
            }
        }
    }

    /// Extension in `".ext"` form, derived from the final dot-segment of
    /// the source file name.
    pub fn extension(&self) -> String {
        let name = self.source_file_name.trim();
        if name.is_empty() {
            return String::new();
        }
        match name.rsplit('.').next() {
            Some(segment) => format!(".{}", segment),
            None => String::new(),
        }
    }

    /// Content classification via the sniffer.
    pub fn classify(&self) -> MimeKind {
        mime::classify(&self.encoded_body())
    }

    /// Delete payload for this attachment, None while pending (pending
    /// entries are removed locally, never over the wire).
    pub fn delete_payload(&self, bill_no: &str) -> Option<InvoiceDeleteDto> {
        let server_id = self.server_id()?;
        Some(InvoiceDeleteDto {
            invoice_id: server_id,
            invoice_type: self.kind.wire_code().to_string(),
            invoice_file_name: self.source_file_name.clone(),
            invoice_file_type: self.extension(),
            bill: Some(BillRef {
                bill_no: bill_no.to_string(),
            }),
        })
    }
}
