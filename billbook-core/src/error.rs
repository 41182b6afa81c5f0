use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BillingError>;

/// Top-level error taxonomy for the billing console core.
///
/// `Validation` is recovered locally (inline field errors, save aborted),
/// `Transport` aborts the operation and leaves local state unchanged,
/// `Decode` degrades a single view rather than failing the whole surface,
/// and `State` rejects an operation fired from the wrong editor state.
#[derive(Debug, Error)]
pub enum BillingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    State(#[from] EditStateError),
}

/// A save was attempted with one or more required bill fields empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required fields: {}", .missing_fields.join(", "))]
pub struct ValidationError {
    /// Wire-level names of the empty fields, e.g. `billNo`, `amount`.
    pub missing_fields: Vec<String>,
}

impl ValidationError {
    pub fn new(missing_fields: Vec<String>) -> Self {
        Self { missing_fields }
    }

    /// True when `field` is one of the reported empty fields.
    pub fn names(&self, field: &str) -> bool {
        self.missing_fields.iter().any(|f| f == field)
    }
}

/// Network failure or non-success response from the backend.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {status} from {operation}")]
    Status { operation: &'static str, status: u16 },

    #[error("backend rejected {operation}: {body:?}")]
    Rejected { operation: &'static str, body: String },
}

/// Malformed base64 or binary payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// An editor operation was fired from a state that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditStateError {
    #[error("a save is already in flight for this bill")]
    SaveInFlight,

    #[error("operation requires an open edit surface")]
    NotEditing,
}
