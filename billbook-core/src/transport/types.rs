use serde::{Deserialize, Serialize};

/// Response body the backend sends when an invoice delete succeeded.
pub const DELETE_CONFIRMED_BODY: &str = "1";

/// Bill record as the backend returns it from list and save calls.
///
/// Scalar fields travel as strings. Older backend builds report the bill
/// date under `date` instead of `billDate`, so both are accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDto {
    #[serde(default)]
    pub bill_no: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default)]
    pub party_name: String,

    #[serde(default)]
    pub tax: String,

    #[serde(default)]
    pub amount: String,

    /// Invoice attachments stored for this bill.
    #[serde(default)]
    pub invoice: Vec<InvoiceDto>,
}

/// One stored invoice attachment as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    /// Server-assigned identifier. Always present for stored invoices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,

    /// User-facing label, independent of the file name.
    #[serde(default)]
    pub invoice_name: String,

    #[serde(default)]
    pub invoice_file_name: String,

    /// Extension in `".ext"` form.
    #[serde(default)]
    pub invoice_file_type: String,

    /// Base64 body. May or may not carry a data-URI prefix depending on
    /// the backend build; callers strip before use.
    #[serde(default)]
    pub invoice_file: String,

    /// Category wire code, `"S"` for sales or `"V"` for voucher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<String>,
}

/// Back-reference to the owning bill carried inside invoice payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRef {
    pub bill_no: String,
}

/// Bill payload for the create-or-update and delete-bill endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBillDto {
    pub bill_no: String,
    pub bill_date: String,
    pub party_name: String,
    pub invoice: Vec<SaveInvoiceDto>,
    pub tax: String,
    pub amount: String,
}

/// One invoice attachment inside a save or delete-bill payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveInvoiceDto {
    /// Absent on submission; set when a delete-bill payload echoes
    /// stored invoices back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<i64>,

    pub bill: BillRef,
    pub invoice_name: String,
    pub invoice_file_name: String,
    pub invoice_file_type: String,
    /// Base64 body without data-URI prefix.
    pub invoice_file: String,
    pub invoice_type: String,
}

/// Payload for the single and batched invoice delete endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDeleteDto {
    pub invoice_id: i64,
    pub invoice_type: String,
    pub invoice_file_name: String,
    pub invoice_file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill: Option<BillRef>,
}

/// Outcome of an invoice delete call, decided by the response body.
///
/// Anything other than the confirmation sentinel leaves local state
/// unchanged: removal is never optimistic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteAck {
    Confirmed,
    Rejected(String),
}

impl DeleteAck {
    /// Interprets a raw response body.
    pub fn from_body(body: &str) -> Self {
        if body.trim() == DELETE_CONFIRMED_BODY {
            DeleteAck::Confirmed
        } else {
            DeleteAck::Rejected(body.to_string())
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, DeleteAck::Confirmed)
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub user_password: String,
}

/// Login outcome decoded from the backend's integer reply.
///
/// The wire signal is tri-state on failure: `-1` bad username, `-2` bad
/// password, `-3` server error. Any other value means success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    BadUsername,
    BadPassword,
    ServerError,
}

impl LoginOutcome {
    pub fn from_reply(code: i64) -> Self {
        match code {
            -1 => LoginOutcome::BadUsername,
            -2 => LoginOutcome::BadPassword,
            -3 => LoginOutcome::ServerError,
            _ => LoginOutcome::Success,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::Success)
    }
}
