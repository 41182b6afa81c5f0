use crate::attachments::set::AttachmentSet;
use crate::mime::{self, MimeKind};
use crate::models::attachment::Attachment;

/// An attachment resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedView {
    pub display_name: String,
    pub source_file_name: String,
    pub kind: MimeKind,
    pub is_previewable: bool,
    /// Fully-prefixed data URI, present only when the content renders
    /// directly in-browser.
    pub data_uri: Option<String>,
}

impl ResolvedView {
    fn from_attachment(attachment: &Attachment) -> Self {
        let body = attachment.encoded_body();
        let kind = mime::classify(&body);
        let is_previewable = kind.is_previewable();
        let data_uri = is_previewable.then(|| mime::ensure_data_uri(&body));
        Self {
            display_name: attachment.display_name.clone(),
            source_file_name: attachment.source_file_name.clone(),
            kind,
            is_previewable,
            data_uri,
        }
    }
}

/// Default active entry: the first previewable attachment, else the
/// first attachment, else none. Operates on the merged (deduplicated)
/// view of the set.
pub fn select_default(set: &AttachmentSet) -> Option<&Attachment> {
    let view = set.merged_view();
    view.iter()
        .find(|a| a.classify().is_previewable())
        .copied()
        .or_else(|| view.first().copied())
}

/// Resolves the active entry for preview.
///
/// A previously chosen entry stays active while it still exists, keyed
/// by source file name so a rename does not change the selection.
/// Otherwise the default rule applies. Callers re-resolve after every
/// membership change (add/remove), not after rename.
pub fn resolve(set: &AttachmentSet, chosen: Option<&str>) -> Option<ResolvedView> {
    let view = set.merged_view();
    let kept = chosen.and_then(|name| {
        view.iter()
            .find(|a| a.source_file_name == name)
            .copied()
    });
    kept.or_else(|| select_default(set))
        .map(ResolvedView::from_attachment)
}
