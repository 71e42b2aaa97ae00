//! Stroke rendering: ink style, polyline painting, and the per-contact stroke tracker.
//!
//! A stroke is painted as one connected polyline with round caps and joins, so
//! sparse move events on fast gestures still produce a continuous line. A stroke
//! that never moves is painted as a round dot of the stroke width.
//!
//! Each paint runs two passes: a wider, faint shadow pass and the ink pass on top.

#[cfg(test)]
#[path = "stroke_test.rs"]
mod stroke_test;

use tiny_skia::{FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

use crate::consts::{INK_RGBA, INK_WIDTH, SHADOW_BLUR, SHADOW_RGBA};
use crate::geom::Point;
use crate::input::{Contact, InputState};
use crate::surface::Surface;

/// Fixed ink style for one widget instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Ink colour as straight RGBA.
    pub color: [u8; 4],
    /// Line width in logical pixels.
    pub width: f32,
    /// Shadow colour as straight RGBA.
    pub shadow_color: [u8; 4],
    /// Shadow spread in logical pixels on each side of the line. Zero disables the shadow.
    pub shadow_blur: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: INK_RGBA,
            width: INK_WIDTH,
            shadow_color: SHADOW_RGBA,
            shadow_blur: SHADOW_BLUR,
        }
    }
}

impl StrokeStyle {
    fn has_shadow(&self) -> bool {
        self.shadow_blur > 0.0 && self.shadow_color[3] > 0
    }
}

fn solid(rgba: [u8; 4]) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgba[0], rgba[1], rgba[2], rgba[3]);
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

#[allow(clippy::cast_possible_truncation)]
fn polyline_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.finish()
}

#[allow(clippy::cast_possible_truncation)]
fn paint_dot(pixmap: &mut Pixmap, at: Point, style: &StrokeStyle, transform: Transform) {
    let radius = style.width / 2.0;
    if style.has_shadow() {
        if let Some(shadow) = PathBuilder::from_circle(at.x as f32, at.y as f32, radius + style.shadow_blur) {
            pixmap.fill_path(&shadow, &solid(style.shadow_color), FillRule::Winding, transform, None);
        }
    }
    if let Some(ink) = PathBuilder::from_circle(at.x as f32, at.y as f32, radius) {
        pixmap.fill_path(&ink, &solid(style.color), FillRule::Winding, transform, None);
    }
}

/// Paint `points` as one connected stroke onto `pixmap`.
///
/// `points` are in logical coordinates; `transform` maps them to the pixmap.
/// An empty slice paints nothing.
pub fn paint_polyline(pixmap: &mut Pixmap, points: &[Point], style: &StrokeStyle, transform: Transform) {
    let Some(first) = points.first().copied() else {
        return;
    };
    if points.iter().all(|p| *p == first) {
        paint_dot(pixmap, first, style, transform);
        return;
    }
    let Some(path) = polyline_path(points) else {
        return;
    };

    if style.has_shadow() {
        let shadow = round_stroke(style.width + 2.0 * style.shadow_blur);
        pixmap.stroke_path(&path, &solid(style.shadow_color), &shadow, transform, None);
    }
    pixmap.stroke_path(&path, &solid(style.color), &round_stroke(style.width), transform, None);
}

/// Feeds normalized contacts into a [`Surface`], one stroke at a time.
///
/// Every method returns `true` when the contact changed the surface or the
/// stroke state, and `false` when it was ignored (stray move, foreign contact,
/// second start while drawing).
#[derive(Debug, Default)]
pub struct StrokeRenderer {
    state: InputState,
}

impl StrokeRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.state.is_drawing()
    }

    /// Open a stroke at the contact point.
    pub fn begin(&mut self, surface: &mut Surface, contact: &Contact) -> bool {
        if self.state.is_drawing() {
            return false;
        }
        surface.begin_path(contact.point);
        self.state = InputState::Drawing { id: contact.id, last: contact.point };
        true
    }

    /// Extend the open stroke to the contact point.
    pub fn extend(&mut self, surface: &mut Surface, contact: &Contact) -> bool {
        let InputState::Drawing { id, last } = self.state else {
            return false;
        };
        if id != contact.id || last == contact.point {
            return false;
        }
        surface.line_to(contact.point);
        self.state = InputState::Drawing { id, last: contact.point };
        true
    }

    /// Close the open stroke if `contact` belongs to it.
    pub fn end(&mut self, surface: &mut Surface, contact: &Contact) -> bool {
        match self.state {
            InputState::Drawing { id, .. } if id == contact.id => self.finish(surface),
            _ => false,
        }
    }

    /// Close the open stroke whichever contact owns it.
    pub fn finish(&mut self, surface: &mut Surface) -> bool {
        if !self.state.is_drawing() {
            return false;
        }
        surface.end_path();
        self.state = InputState::Idle;
        true
    }

    /// Forget the open stroke without touching any surface.
    pub fn reset(&mut self) {
        self.state = InputState::Idle;
    }
}
