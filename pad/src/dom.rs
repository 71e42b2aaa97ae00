//! Browser glue: reading DOM input events, sizing the canvas, presenting pixels.
//!
//! This module is the only place that touches `web_sys` besides the `Widget`
//! wrapper. Everything here is a thin conversion; behaviour lives in
//! [`crate::engine::WidgetCore`].

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{
    CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, ImageData, MouseEvent, TouchEvent, TouchList,
};

use crate::export::Download;
use crate::geom::{ClientRect, PixelRect};
use crate::input::{RawEvent, RawTouch};
use crate::surface::Surface;

/// Which mouse handler an event came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseKind {
    Down,
    Move,
    Up,
    Leave,
}

/// Which touch handler an event came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchKind {
    Start,
    Move,
    End,
    Cancel,
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Current `window.devicePixelRatio`.
pub fn device_pixel_ratio() -> Result<f64, JsValue> {
    Ok(window()?.device_pixel_ratio())
}

/// Current time as an ISO-8601 string.
#[must_use]
pub fn iso_now() -> String {
    js_sys::Date::new_0().to_iso_string().into()
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| JsValue::from_str("2d context has unexpected type"))
}

/// Size the backing store to the physical buffer and the CSS box to the logical size.
pub fn apply_layout(canvas: &HtmlCanvasElement, surface: &Surface) -> Result<(), JsValue> {
    let (pw, ph) = surface.physical_size();
    let (w, h) = surface.logical_size();
    canvas.set_width(pw);
    canvas.set_height(ph);
    let style = canvas.style();
    style.set_property("width", &format!("{w}px"))?;
    style.set_property("height", &format!("{h}px"))?;
    Ok(())
}

pub fn set_cursor(canvas: &HtmlCanvasElement, cursor: &str) -> Result<(), JsValue> {
    canvas.style().set_property("cursor", cursor)
}

/// The canvas bounding rectangle origin right now.
#[must_use]
pub fn client_rect(canvas: &HtmlCanvasElement) -> ClientRect {
    let r = canvas.get_bounding_client_rect();
    ClientRect::new(r.left(), r.top())
}

#[must_use]
pub fn mouse_event(ev: &MouseEvent, kind: MouseKind) -> RawEvent {
    let client_x = f64::from(ev.client_x());
    let client_y = f64::from(ev.client_y());
    match kind {
        MouseKind::Down => RawEvent::MouseDown { client_x, client_y },
        MouseKind::Move => RawEvent::MouseMove { client_x, client_y },
        MouseKind::Up => RawEvent::MouseUp { client_x, client_y },
        MouseKind::Leave => RawEvent::MouseLeave { client_x, client_y },
    }
}

fn raw_touches(list: &TouchList) -> Vec<RawTouch> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| RawTouch {
            identifier: t.identifier(),
            client_x: f64::from(t.client_x()),
            client_y: f64::from(t.client_y()),
        })
        .collect()
}

/// Convert a touch event. Starts read `changedTouches` (the new fingers),
/// moves read `touches`, ends and cancels read both.
#[must_use]
pub fn touch_event(ev: &TouchEvent, kind: TouchKind) -> RawEvent {
    match kind {
        TouchKind::Start => RawEvent::TouchStart { changed: raw_touches(&ev.changed_touches()) },
        TouchKind::Move => RawEvent::TouchMove { touches: raw_touches(&ev.touches()) },
        TouchKind::End => RawEvent::TouchEnd {
            changed: raw_touches(&ev.changed_touches()),
            touches: raw_touches(&ev.touches()),
        },
        TouchKind::Cancel => RawEvent::TouchCancel {
            changed: raw_touches(&ev.changed_touches()),
            touches: raw_touches(&ev.touches()),
        },
    }
}

/// Blit `rect` of the surface's physical buffer onto the same place on the canvas.
pub fn put_pixels(ctx: &CanvasRenderingContext2d, surface: &Surface, rect: PixelRect) -> Result<(), JsValue> {
    let rgba = surface.rgba_region(rect);
    let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(rgba.as_slice()), rect.width, rect.height)?;
    ctx.put_image_data(&image, f64::from(rect.x), f64::from(rect.y))
}

/// Click a temporary anchor that downloads the signature.
pub fn trigger_download(download: &Download) -> Result<(), JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor = document
        .create_element("a")?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|_| JsValue::from_str("anchor has unexpected type"))?;
    anchor.set_download(&download.filename);
    anchor.set_href(&download.data_url);
    anchor.click();
    Ok(())
}
