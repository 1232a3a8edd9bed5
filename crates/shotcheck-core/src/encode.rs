//! Screenshot encoding for the Messages API.
//!
//! Turns a file on disk into a base64 payload plus a media type label
//! derived from the file extension.

use crate::error::ReviewError;
use base64::Engine;
use std::path::Path;

/// Base64-encoded screenshot ready to send to the API.
#[derive(Debug, Clone)]
pub struct EncodedScreenshot {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/png", "image/jpeg")
    pub media_type: String,
}

impl EncodedScreenshot {
    /// Read and encode a screenshot from disk.
    ///
    /// Filesystem errors (not found, permission denied) propagate to the
    /// caller; there is no retry.
    pub fn from_path(path: &Path) -> Result<Self, ReviewError> {
        let bytes = std::fs::read(path).map_err(|e| ReviewError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Self::from_bytes(&bytes, media_type_for(path)))
    }

    /// Create an `EncodedScreenshot` from raw bytes and a media type.
    pub fn from_bytes(bytes: &[u8], media_type: &str) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }
}

/// Map a file extension (case-insensitive) to its MIME type.
///
/// Unrecognized or missing extensions fall back to "image/png".
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}
