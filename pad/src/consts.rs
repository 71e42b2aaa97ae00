//! Shared constants for the signature pad.

// ── Surface ─────────────────────────────────────────────────────

/// Default logical width of the drawing area, in CSS pixels.
pub const DEFAULT_WIDTH: f64 = 400.0;

/// Default logical height of the drawing area, in CSS pixels.
pub const DEFAULT_HEIGHT: f64 = 200.0;

/// Device pixel ratio used when the host does not supply a usable one.
pub const DEFAULT_DPR: f64 = 1.0;

// ── Ink ─────────────────────────────────────────────────────────

/// Stroke colour `#1e293b` as RGBA.
pub const INK_RGBA: [u8; 4] = [0x1e, 0x29, 0x3b, 0xff];

/// Stroke width in logical pixels.
pub const INK_WIDTH: f32 = 2.5;

/// Shadow colour `rgba(0, 0, 0, 0.1)`.
pub const SHADOW_RGBA: [u8; 4] = [0, 0, 0, 26];

/// Shadow blur radius in logical pixels.
pub const SHADOW_BLUR: f32 = 2.0;

// ── Encoding ────────────────────────────────────────────────────

/// Mime type of every encoding this crate produces.
pub const PNG_MIME: &str = "image/png";

/// File name prefix for downloaded signatures.
pub const DOWNLOAD_PREFIX: &str = "signature";

// ── Cursors ─────────────────────────────────────────────────────

/// CSS cursor while the pad accepts ink.
pub const CURSOR_ENABLED: &str = "crosshair";

/// CSS cursor while the pad is read-only.
pub const CURSOR_DISABLED: &str = "not-allowed";
