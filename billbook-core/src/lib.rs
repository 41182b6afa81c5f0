//! Core client library for a billing administration console.
//!
//! The console manages bills and their invoice documents against a REST
//! backend. This crate holds the backend-agnostic heart of that client:
//! the attachment set that keeps locally selected, stored and
//! in-flight-deleted documents consistent, the content sniffer that
//! classifies opaque base64 payloads, the reconciler that turns an
//! edited draft into a save payload and folds the authoritative
//! response back in, and the transport trait the whole thing talks
//! through. UI rendering and routing live elsewhere and consume these
//! types.

pub mod attachments;
pub mod config;
pub mod directory;
pub mod error;
pub mod filter;
pub mod mime;
pub mod models;
pub mod reconcile;
pub mod session;
pub mod transport;

pub use attachments::{AttachmentSet, AttachmentStore, RemovalStatus, ResolvedView};
pub use config::ApiConfig;
pub use directory::BillDirectory;
pub use error::{BillingError, DecodeError, Result, TransportError, ValidationError};
pub use filter::DateRange;
pub use mime::MimeKind;
pub use models::{Attachment, AttachmentContent, Bill, BillDraft, InvoiceKind};
pub use reconcile::{BillEditor, EditState};
pub use session::{SessionContext, SessionState};
pub use transport::{BillingApi, HttpBillingApi, LoginOutcome};
