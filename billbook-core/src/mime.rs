use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Classified content type of a binary payload.
///
/// Derived from the leading characters of the base64 text, never from a
/// stored content-type. `Unknown` is a first-class outcome: such payloads
/// are download-only, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeKind {
    Pdf,
    Png,
    Jpeg,
    Docx,
    Unknown,
}

/// Fixed-prefix signatures, checked in priority order. The longest
/// signature is five characters, so only the leading bytes matter.
const SIGNATURES: &[(&str, MimeKind)] = &[
    ("JVBER", MimeKind::Pdf),
    ("iVBOR", MimeKind::Png),
    ("/9j/", MimeKind::Jpeg),
    ("UEsDB", MimeKind::Docx),
];

/// Classifies a base64 payload by magic-number prefix.
///
/// Empty or unrecognized input yields `Unknown` without failing.
pub fn classify(payload: &str) -> MimeKind {
    for (signature, kind) in SIGNATURES {
        if payload.starts_with(signature) {
            return *kind;
        }
    }
    MimeKind::Unknown
}

impl MimeKind {
    /// MIME string used when building a data URI for this kind.
    pub fn content_type(&self) -> &'static str {
        match self {
            MimeKind::Pdf => "application/pdf",
            MimeKind::Png => "image/png",
            MimeKind::Jpeg => "image/jpeg",
            MimeKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            MimeKind::Unknown => "application/octet-stream",
        }
    }

    /// `data:<mime>;base64,` prefix for this kind.
    pub fn data_uri_prefix(&self) -> String {
        format!("data:{};base64,", self.content_type())
    }

    /// Only PDF, PNG and JPEG render directly in-browser. DOCX requires a
    /// separate render step and Unknown payloads are download-only.
    pub fn is_previewable(&self) -> bool {
        matches!(self, MimeKind::Pdf | MimeKind::Png | MimeKind::Jpeg)
    }
}

impl fmt::Display for MimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MimeKind::Pdf => write!(f, "pdf"),
            MimeKind::Png => write!(f, "png"),
            MimeKind::Jpeg => write!(f, "jpeg"),
            MimeKind::Docx => write!(f, "docx"),
            MimeKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Returns the base64 body of a payload, dropping any `data:` URI prefix.
///
/// A prefixed payload without a comma separator is returned whole.
pub fn strip_data_uri(payload: &str) -> &str {
    if payload.starts_with("data:") {
        match payload.split_once(',') {
            Some((_, body)) => body,
            None => payload,
        }
    } else {
        payload
    }
}

/// Returns a fully-prefixed data URI for a payload, deriving the prefix by
/// classification when the payload does not already carry one.
pub fn ensure_data_uri(payload: &str) -> String {
    if payload.starts_with("data:") {
        payload.to_string()
    } else {
        format!("{}{}", classify(payload).data_uri_prefix(), payload)
    }
}

/// Encodes raw file bytes as a base64 body, no data-URI prefix.
pub fn encode_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes a base64 payload (with or without data-URI prefix) to raw bytes.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(STANDARD.decode(strip_data_uri(payload))?)
}
