use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

use wasm_bindgen::JsValue;

use crate::config::WidgetConfig;
use crate::consts::{CURSOR_DISABLED, CURSOR_ENABLED};
use crate::dom;
use crate::export::Download;
use crate::geom::{ClientRect, PixelRect};
use crate::input::{self, Contact, ContactPhase, RawEvent};
use crate::stroke::{StrokeRenderer, StrokeStyle};
use crate::surface::{Surface, SurfaceError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from widget handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The committed signature changed. Empty string means "no signature".
    SignatureChanged(String),
    /// The CSS cursor for the canvas changed.
    SetCursor(&'static str),
    /// The surface pixels changed and should be presented.
    RenderNeeded,
}

/// Observable widget state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetState {
    /// No ink committed since construction or the last clear.
    pub is_empty: bool,
    /// A stroke is open.
    pub is_drawing_active: bool,
    /// Last committed encoding; empty exactly when `is_empty`.
    pub current_encoded: String,
}

/// Core widget state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Widget` so it can be tested without WASM/browser dependencies.
#[derive(Debug)]
pub struct WidgetCore {
    surface: Surface,
    renderer: StrokeRenderer,
    disabled: bool,
    is_empty: bool,
    current_encoded: String,
}

impl WidgetCore {
    /// Build the surface from `config` and preload `config.initial_value`.
    ///
    /// A preload that fails to decode leaves the widget blank. Preloading never
    /// produces a [`Action::SignatureChanged`].
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the configured size cannot be allocated.
    pub fn new(config: &WidgetConfig) -> Result<Self, SurfaceError> {
        let config = config.clone().sanitized();
        let surface = Surface::new(config.width, config.height, config.device_pixel_ratio, StrokeStyle::default())?;
        let mut core = Self {
            surface,
            renderer: StrokeRenderer::new(),
            disabled: config.disabled,
            is_empty: true,
            current_encoded: String::new(),
        };
        core.preload(&config.initial_value);
        Ok(core)
    }

    fn preload(&mut self, encoded: &str) {
        if self.surface.restore(encoded) {
            self.is_empty = false;
            self.current_encoded = encoded.to_string();
            log::debug!("preloaded stored signature");
        }
    }

    // --- Input ---

    /// Normalize a raw event against the canvas rect and handle it.
    pub fn on_event(&mut self, event: &RawEvent, rect: &ClientRect) -> Vec<Action> {
        match input::normalize(event, rect, &self.renderer.state()) {
            Some(contact) => self.on_contact(&contact),
            None => Vec::new(),
        }
    }

    /// Handle one normalized contact.
    pub fn on_contact(&mut self, contact: &Contact) -> Vec<Action> {
        if self.disabled {
            return Vec::new();
        }
        match contact.phase {
            ContactPhase::Start => {
                if self.renderer.begin(&mut self.surface, contact) {
                    self.is_empty = false;
                    log::debug!("stroke started at ({}, {})", contact.point.x, contact.point.y);
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            ContactPhase::Move => {
                if self.renderer.extend(&mut self.surface, contact) {
                    vec![Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            ContactPhase::End => {
                if self.renderer.end(&mut self.surface, contact) {
                    self.commit()
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Snapshot the surface after a stroke and report the new encoding.
    fn commit(&mut self) -> Vec<Action> {
        match self.surface.snapshot() {
            Ok(encoded) => {
                log::debug!("stroke committed ({} bytes encoded)", encoded.len());
                self.current_encoded.clone_from(&encoded);
                vec![Action::SignatureChanged(encoded)]
            }
            Err(e) => {
                log::error!("failed to encode signature: {e}");
                Vec::new()
            }
        }
    }

    /// Close an open stroke, committing it.
    fn finish_stroke(&mut self) -> Vec<Action> {
        if self.renderer.finish(&mut self.surface) {
            self.commit()
        } else {
            Vec::new()
        }
    }

    // --- Commands ---

    /// Wipe the signature. Always reports an empty encoding.
    pub fn clear(&mut self) -> Vec<Action> {
        self.renderer.reset();
        self.surface.clear();
        self.is_empty = true;
        self.current_encoded.clear();
        log::debug!("signature cleared");
        vec![Action::SignatureChanged(String::new()), Action::RenderNeeded]
    }

    /// Replace the displayed signature with a host-supplied encoding.
    ///
    /// Does not notify. Echoing back the current encoding is a no-op; an empty
    /// or undecodable value leaves the widget blank.
    pub fn set_value(&mut self, encoded: &str) -> Vec<Action> {
        if encoded == self.current_encoded && !self.renderer.is_drawing() {
            return Vec::new();
        }
        self.renderer.reset();
        self.surface.clear();
        self.is_empty = true;
        self.current_encoded.clear();
        self.preload(encoded);
        vec![Action::RenderNeeded]
    }

    /// Change the logical size. An open stroke is committed first, then the
    /// surface is rebuilt and the current signature redrawn to fill it.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the new size cannot be allocated; the widget
    /// keeps its old surface in that case.
    pub fn set_size(&mut self, width: f64, height: f64) -> Result<Vec<Action>, SurfaceError> {
        let (w, h) = self.surface.logical_size();
        if (w - width).abs() < f64::EPSILON && (h - height).abs() < f64::EPSILON {
            return Ok(Vec::new());
        }
        let surface = Surface::new(width, height, self.surface.dpr(), *self.surface.style())?;
        let mut actions = self.finish_stroke();
        self.surface = surface;
        if !self.is_empty && !self.surface.restore(&self.current_encoded) {
            log::warn!("could not redraw signature after resize");
        }
        actions.push(Action::RenderNeeded);
        Ok(actions)
    }

    /// Toggle read-only mode. Disabling commits an open stroke.
    pub fn set_disabled(&mut self, disabled: bool) -> Vec<Action> {
        if disabled == self.disabled {
            return Vec::new();
        }
        let mut actions = if disabled { self.finish_stroke() } else { Vec::new() };
        self.disabled = disabled;
        actions.push(Action::SetCursor(self.cursor()));
        actions
    }

    /// The current signature as a download, or `None` when there is none.
    #[must_use]
    pub fn download(&self, iso_timestamp: &str) -> Option<Download> {
        if self.is_empty || self.current_encoded.is_empty() {
            return None;
        }
        Some(Download::new(&self.current_encoded, iso_timestamp))
    }

    // --- Queries ---

    #[must_use]
    pub fn state(&self) -> WidgetState {
        WidgetState {
            is_empty: self.is_empty,
            is_drawing_active: self.renderer.is_drawing(),
            current_encoded: self.current_encoded.clone(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.renderer.is_drawing()
    }

    /// The last committed encoding; empty when there is no signature.
    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.current_encoded
    }

    /// A signature is present and may be submitted.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_empty
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn can_clear(&self) -> bool {
        !self.disabled && !self.is_empty
    }

    #[must_use]
    pub fn can_download(&self) -> bool {
        !self.disabled && !self.is_empty
    }

    #[must_use]
    pub fn cursor(&self) -> &'static str {
        if self.disabled { CURSOR_DISABLED } else { CURSOR_ENABLED }
    }

    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Physical pixels changed since the last call, for partial presentation.
    pub fn take_dirty(&mut self) -> Option<PixelRect> {
        self.surface.take_dirty()
    }
}

/// Host callback invoked with every new encoding.
pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// The browser widget. Wraps `WidgetCore` and owns the canvas element.
///
/// The host wires DOM events on the canvas to the `on_*` methods; the widget
/// presents pixels, updates the cursor and forwards changes to the callback.
pub struct Widget {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pub core: WidgetCore,
    on_change: Option<ChangeCallback>,
}

impl Widget {
    /// Mount on `canvas`. The device pixel ratio is read from the window here
    /// and nowhere else.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the window or 2D context is unavailable or the
    /// configured size cannot be allocated.
    pub fn new(canvas: HtmlCanvasElement, config: &WidgetConfig) -> Result<Self, JsValue> {
        let config = config.clone().with_dpr(dom::device_pixel_ratio()?);
        let core = WidgetCore::new(&config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let ctx = dom::context_2d(&canvas)?;
        let mut widget = Self { canvas, ctx, core, on_change: None };
        dom::apply_layout(&widget.canvas, widget.core.surface())?;
        dom::set_cursor(&widget.canvas, widget.core.cursor())?;
        widget.present()?;
        Ok(widget)
    }

    /// Register the host's change callback.
    pub fn set_on_change(&mut self, callback: ChangeCallback) {
        self.on_change = Some(callback);
    }

    // --- Input events ---

    pub fn on_mouse_down(&mut self, ev: &MouseEvent) -> Result<(), JsValue> {
        self.handle_mouse(ev, dom::MouseKind::Down)
    }

    pub fn on_mouse_move(&mut self, ev: &MouseEvent) -> Result<(), JsValue> {
        self.handle_mouse(ev, dom::MouseKind::Move)
    }

    pub fn on_mouse_up(&mut self, ev: &MouseEvent) -> Result<(), JsValue> {
        self.handle_mouse(ev, dom::MouseKind::Up)
    }

    pub fn on_mouse_leave(&mut self, ev: &MouseEvent) -> Result<(), JsValue> {
        self.handle_mouse(ev, dom::MouseKind::Leave)
    }

    pub fn on_touch_start(&mut self, ev: &TouchEvent) -> Result<(), JsValue> {
        self.handle_touch(ev, dom::TouchKind::Start)
    }

    pub fn on_touch_move(&mut self, ev: &TouchEvent) -> Result<(), JsValue> {
        self.handle_touch(ev, dom::TouchKind::Move)
    }

    pub fn on_touch_end(&mut self, ev: &TouchEvent) -> Result<(), JsValue> {
        self.handle_touch(ev, dom::TouchKind::End)
    }

    pub fn on_touch_cancel(&mut self, ev: &TouchEvent) -> Result<(), JsValue> {
        self.handle_touch(ev, dom::TouchKind::Cancel)
    }

    fn handle_mouse(&mut self, ev: &MouseEvent, kind: dom::MouseKind) -> Result<(), JsValue> {
        let raw = dom::mouse_event(ev, kind);
        let rect = dom::client_rect(&self.canvas);
        let actions = self.core.on_event(&raw, &rect);
        if !actions.is_empty() {
            ev.prevent_default();
        }
        self.dispatch(actions)
    }

    fn handle_touch(&mut self, ev: &TouchEvent, kind: dom::TouchKind) -> Result<(), JsValue> {
        let raw = dom::touch_event(ev, kind);
        let rect = dom::client_rect(&self.canvas);
        let actions = self.core.on_event(&raw, &rect);
        if !self.core.is_disabled() {
            ev.prevent_default();
        }
        self.dispatch(actions)
    }

    // --- Commands ---

    pub fn clear(&mut self) -> Result<(), JsValue> {
        let actions = self.core.clear();
        self.dispatch(actions)
    }

    pub fn set_value(&mut self, encoded: &str) -> Result<(), JsValue> {
        let actions = self.core.set_value(encoded);
        self.dispatch(actions)
    }

    pub fn set_size(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        let actions = self
            .core
            .set_size(width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        dom::apply_layout(&self.canvas, self.core.surface())?;
        self.dispatch(actions)
    }

    pub fn set_disabled(&mut self, disabled: bool) -> Result<(), JsValue> {
        let actions = self.core.set_disabled(disabled);
        self.dispatch(actions)
    }

    /// Trigger a browser download of the current signature. No-op when empty.
    pub fn download(&self) -> Result<(), JsValue> {
        match self.core.download(&dom::iso_now()) {
            Some(download) => dom::trigger_download(&download),
            None => Ok(()),
        }
    }

    // --- Output ---

    fn dispatch(&mut self, actions: Vec<Action>) -> Result<(), JsValue> {
        for action in actions {
            match action {
                Action::SignatureChanged(encoded) => {
                    if let Some(callback) = self.on_change.as_mut() {
                        callback(&encoded);
                    }
                }
                Action::SetCursor(cursor) => dom::set_cursor(&self.canvas, cursor)?,
                Action::RenderNeeded => self.present()?,
            }
        }
        Ok(())
    }

    /// Copy the changed surface pixels to the canvas.
    pub fn present(&mut self) -> Result<(), JsValue> {
        match self.core.take_dirty() {
            Some(rect) => dom::put_pixels(&self.ctx, self.core.surface(), rect),
            None => Ok(()),
        }
    }
}
