pub mod attachment;
pub mod bill;

pub use attachment::{Attachment, AttachmentContent, InvoiceKind};
pub use bill::{Bill, BillDraft};
