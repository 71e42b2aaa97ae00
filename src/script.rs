//! Event scripts: recorded input replayed through a headless widget.
//!
//! A script is a JSON object with the mount options, the origin of the canvas
//! bounding rectangle the events were captured against, and the raw events in
//! delivery order:
//!
//! ```json
//! {
//!   "config": { "width": 400, "height": 200 },
//!   "rect": { "left": 0, "top": 0 },
//!   "events": [
//!     { "type": "mouse_down", "client_x": 10, "client_y": 10 },
//!     { "type": "mouse_move", "client_x": 50, "client_y": 50 },
//!     { "type": "mouse_up", "client_x": 50, "client_y": 50 }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use pad::geom::ClientRect;
use pad::input::RawEvent;
use pad::surface::SurfaceError;
use pad::{Action, WidgetConfig, WidgetCore};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: WidgetConfig,
    /// Defaults to the client origin.
    #[serde(default)]
    pub rect: ClientRect,
    pub events: Vec<RawEvent>,
}

impl Script {
    /// Parse a script from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Outcome of a replay: every change notification in order, and the widget.
#[derive(Debug)]
pub struct Replay {
    pub changes: Vec<String>,
    pub core: WidgetCore,
}

/// Mount a widget from the script's config and feed it every event.
///
/// # Errors
///
/// Returns [`SurfaceError`] if the configured size cannot be allocated.
pub fn replay(script: &Script) -> Result<Replay, SurfaceError> {
    let mut core = WidgetCore::new(&script.config)?;
    let rect = script.rect;
    let mut changes = Vec::new();

    for (i, event) in script.events.iter().enumerate() {
        for action in core.on_event(event, &rect) {
            if let Action::SignatureChanged(encoded) = action {
                tracing::debug!(event = i, bytes = encoded.len(), "signature changed");
                changes.push(encoded);
            }
        }
    }

    tracing::info!(events = script.events.len(), changes = changes.len(), empty = core.is_empty(), "replay finished");
    Ok(Replay { changes, core })
}
