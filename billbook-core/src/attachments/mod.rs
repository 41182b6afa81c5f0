pub mod set;
pub mod store;
pub mod view;

pub use set::{AttachmentSet, SaveDiff};
pub use store::{AttachmentStore, RemovalStatus};
pub use view::{resolve, select_default, ResolvedView};
