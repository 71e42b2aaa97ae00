//! Signature codec: PNG data URLs.
//!
//! An encoded signature is a `data:image/png;base64,<payload>` string holding
//! the full physical buffer. Encoding is deterministic for a given buffer and
//! lossless, so decoding and redrawing at the same size reproduces every pixel.
//!
//! Decoding accepts any PNG (grey, RGB, palette, with or without alpha), a
//! case-insensitive `data:` scheme and mime, extra media-type parameters, and
//! whitespace inside the payload.
//!
//! "No signature" is the empty string. It is never produced by [`encode`]; the
//! widget controller emits it directly.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tiny_skia::Pixmap;

use crate::consts::PNG_MIME;

/// Error returned by [`decode`] and [`encode`].
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input is empty or whitespace; this is the "no signature" value.
    #[error("no signature")]
    Empty,
    /// The input is not a `data:` URL.
    #[error("not a data URL")]
    NotDataUrl,
    /// The data URL carries a mime type this codec does not decode.
    #[error("unsupported mime type `{0}`")]
    UnsupportedMime(String),
    /// The data URL payload is not base64 encoded.
    #[error("data URL payload is not base64")]
    NotBase64,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to decode png: {0}")]
    DecodePng(String),
    #[error("failed to encode png: {0}")]
    EncodePng(String),
}

/// A parsed data URL: its lowercase mime type and raw payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    /// Render back to `data:<mime>;base64,<payload>`.
    #[must_use]
    pub fn to_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

/// Split a base64 data URL into mime type and payload bytes.
///
/// # Errors
///
/// [`CodecError::Empty`] for blank input, [`CodecError::NotDataUrl`] when the
/// scheme or comma is missing, [`CodecError::NotBase64`] when the `;base64`
/// marker is absent, and [`CodecError::Base64`] for a corrupt payload.
pub fn parse_data_url(encoded: &str) -> Result<DataUrl, CodecError> {
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Err(CodecError::Empty);
    }
    let Some(scheme) = encoded.get(..5) else {
        return Err(CodecError::NotDataUrl);
    };
    if !scheme.eq_ignore_ascii_case("data:") {
        return Err(CodecError::NotDataUrl);
    }
    let (header, payload) = encoded[5..].split_once(',').ok_or(CodecError::NotDataUrl)?;

    let mut params = header.split(';').map(str::trim);
    let mime = params.next().unwrap_or_default().to_ascii_lowercase();
    if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(CodecError::NotBase64);
    }

    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(DataUrl { mime, bytes })
}

/// Encode a buffer as a PNG data URL.
///
/// # Errors
///
/// Returns [`CodecError::EncodePng`] if the PNG encoder fails.
pub fn encode(pixmap: &Pixmap) -> Result<String, CodecError> {
    let png = pixmap.encode_png().map_err(|e| CodecError::EncodePng(e.to_string()))?;
    Ok(DataUrl { mime: PNG_MIME.to_string(), bytes: png }.to_url())
}

/// Decode a PNG data URL into a premultiplied buffer at the image's own size.
///
/// # Errors
///
/// Any [`parse_data_url`] error, [`CodecError::UnsupportedMime`] for a non-PNG
/// data URL, or [`CodecError::DecodePng`] when the payload is not a valid PNG.
pub fn decode(encoded: &str) -> Result<Pixmap, CodecError> {
    let url = parse_data_url(encoded)?;
    if url.mime != PNG_MIME {
        return Err(CodecError::UnsupportedMime(url.mime));
    }
    Pixmap::decode_png(&url.bytes).map_err(|e| CodecError::DecodePng(e.to_string()))
}
