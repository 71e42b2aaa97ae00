//! Signature download: file naming and payload extraction.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use crate::codec::{self, CodecError};
use crate::consts::DOWNLOAD_PREFIX;

/// A file the host can offer for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// `signature-<YYYY-MM-DD>.<ext>`.
    pub filename: String,
    /// The encoding exactly as cached by the widget.
    pub data_url: String,
}

impl Download {
    /// Build a download for `data_url` stamped with the date part of `iso_timestamp`.
    #[must_use]
    pub fn new(data_url: &str, iso_timestamp: &str) -> Self {
        let mime = codec::parse_data_url(data_url)
            .map(|url| url.mime)
            .unwrap_or_default();
        Self {
            filename: file_name(iso_timestamp, &mime),
            data_url: data_url.to_string(),
        }
    }

    /// The decoded file contents.
    ///
    /// # Errors
    ///
    /// Returns the [`CodecError`] if the cached encoding is not a base64 data URL.
    pub fn bytes(&self) -> Result<Vec<u8>, CodecError> {
        codec::parse_data_url(&self.data_url).map(|url| url.bytes)
    }
}

/// The `YYYY-MM-DD` prefix of an ISO-8601 timestamp (the whole input if shorter).
#[must_use]
pub fn date_stamp(iso_timestamp: &str) -> &str {
    iso_timestamp.get(..10).unwrap_or(iso_timestamp)
}

/// File extension for a mime type; `png` when unknown.
#[must_use]
pub fn extension_for(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

/// `signature-<date>.<ext>` for the given timestamp and mime type.
#[must_use]
pub fn file_name(iso_timestamp: &str, mime: &str) -> String {
    format!("{DOWNLOAD_PREFIX}-{}.{}", date_stamp(iso_timestamp), extension_for(mime))
}
