//! Signature pad: handwritten signature capture for the browser.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It turns raw
//! mouse and touch events into ink on a device-pixel-ratio-correct raster, keeps
//! track of whether a signature is present, and persists the result as a PNG
//! data URL. The host page only wires DOM events to the widget and stores the
//! encoded strings it receives; it knows nothing about pixels.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser `Widget` and testable [`engine::WidgetCore`] state machine |
//! | [`input`] | Raw events, normalized contacts, stroke state |
//! | [`geom`] | Logical points and client → canvas mapping |
//! | [`stroke`] | Ink style and polyline painting |
//! | [`surface`] | Physical pixel buffer with logical coordinates |
//! | [`codec`] | PNG data URL encode/decode |
//! | [`config`] | Mount options |
//! | [`export`] | Download naming and payload |
//! | [`dom`] | `web_sys` glue |
//! | [`consts`] | Style, size and cursor constants |

pub mod codec;
pub mod config;
pub mod consts;
pub mod dom;
pub mod engine;
pub mod export;
pub mod geom;
pub mod input;
pub mod stroke;
pub mod surface;

pub use config::WidgetConfig;
pub use engine::{Action, Widget, WidgetCore, WidgetState};
