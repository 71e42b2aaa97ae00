//! Raster surface: the physical pixel buffer behind the signature pad.
//!
//! The surface has two sizes. The logical size `(W, H)` is what the host
//! configures and what every drawing call is expressed in. The physical size
//! `(W·d, H·d)` is the buffer actually allocated, where `d` is the device pixel
//! ratio captured once in [`Surface::new`] and never re-read.
//!
//! The open path is re-painted on every `line_to` over a copy of the buffer
//! taken at `begin_path`, so joins stay clean and translucent edges do not
//! accumulate. Only the path's padded bounding box is restored from the copy,
//! and only that box is marked dirty for presentation. The copy and the path
//! points are dropped at `end_path`.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use std::fmt;

use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::codec::{self, CodecError};
use crate::geom::{PixelRect, Point};
use crate::stroke::{self, StrokeStyle};

/// Error returned by [`Surface::new`].
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The requested size does not give at least one physical pixel per axis,
    /// or is too large to allocate.
    #[error("cannot allocate a {width}x{height} surface at pixel ratio {dpr}")]
    InvalidSize { width: f64, height: f64, dpr: f64 },
}

/// Owned raster buffer with a logical coordinate system scaled by the pixel ratio.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
    /// Buffer contents before the open path; `Some` only while a path is open.
    committed: Option<Pixmap>,
    path: Vec<Point>,
    /// Pixels changed since the last [`Surface::take_dirty`].
    dirty: Option<PixelRect>,
    width: f64,
    height: f64,
    dpr: f64,
    style: StrokeStyle,
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dpr", &self.dpr)
            .field("physical", &(self.pixmap.width(), self.pixmap.height()))
            .field("path_len", &self.path.len())
            .finish_non_exhaustive()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn physical_extent(logical: f64, dpr: f64) -> Option<u32> {
    let physical = (logical * dpr).floor();
    if physical.is_finite() && physical >= 1.0 && physical <= f64::from(u32::MAX) {
        Some(physical as u32)
    } else {
        None
    }
}

impl Surface {
    /// Allocate a blank surface of logical size `width`×`height` at pixel ratio `dpr`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InvalidSize`] if the physical buffer would be
    /// empty or cannot be allocated.
    pub fn new(width: f64, height: f64, dpr: f64, style: StrokeStyle) -> Result<Self, SurfaceError> {
        let invalid = || SurfaceError::InvalidSize { width, height, dpr };
        let pw = physical_extent(width, dpr).ok_or_else(invalid)?;
        let ph = physical_extent(height, dpr).ok_or_else(invalid)?;
        let pixmap = Pixmap::new(pw, ph).ok_or_else(invalid)?;
        log::debug!("surface ready: {width}x{height} logical, {pw}x{ph} physical, dpr {dpr}");
        Ok(Self {
            pixmap,
            committed: None,
            path: Vec::new(),
            dirty: Some(PixelRect::new(0, 0, pw, ph)),
            width,
            height,
            dpr,
            style,
        })
    }

    // --- Geometry ---

    /// Logical size in CSS pixels.
    #[must_use]
    pub fn logical_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Physical buffer size in device pixels.
    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    /// The device pixel ratio captured at construction.
    #[must_use]
    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    #[must_use]
    pub fn style(&self) -> &StrokeStyle {
        &self.style
    }

    /// Logical → physical transform applied to every drawing call.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn transform(&self) -> Transform {
        Transform::from_scale(self.dpr as f32, self.dpr as f32)
    }

    // --- Drawing ---

    /// Open a new path at `p`. An already open path is committed first.
    pub fn begin_path(&mut self, p: Point) {
        self.end_path();
        self.committed = Some(self.pixmap.clone());
        self.path.push(p);
        self.repaint();
    }

    /// Extend the open path to `p`. With no open path this behaves like `begin_path`.
    pub fn line_to(&mut self, p: Point) {
        if self.path.is_empty() {
            self.begin_path(p);
            return;
        }
        self.path.push(p);
        self.repaint();
    }

    /// Commit the open path into the buffer and forget its points.
    pub fn end_path(&mut self) {
        self.committed = None;
        self.path.clear();
    }

    #[must_use]
    pub fn is_path_open(&self) -> bool {
        !self.path.is_empty()
    }

    fn repaint(&mut self) {
        // The path only grows, so its box covers everything painted before.
        let bounds = self.path_bounds();
        if let (Some(base), Some(rect)) = (self.committed.as_ref(), bounds) {
            copy_region(&mut self.pixmap, base, rect);
        }
        let transform = self.transform();
        stroke::paint_polyline(&mut self.pixmap, &self.path, &self.style, transform);
        if let Some(rect) = bounds {
            self.mark_dirty(rect);
        }
    }

    /// Physical pixels the open path can touch: its bounding box padded by the
    /// stroke and shadow half-width plus an anti-aliasing margin, clipped to the buffer.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn path_bounds(&self) -> Option<PixelRect> {
        let (first, rest) = self.path.split_first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in rest {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        let pad = f64::from(self.style.width / 2.0 + self.style.shadow_blur) * self.dpr + 2.0;
        let (pw, ph) = self.physical_size();
        let clip = |v: f64, max: u32| v.clamp(0.0, f64::from(max)) as u32;
        let left = clip((x0 * self.dpr - pad).floor(), pw);
        let top = clip((y0 * self.dpr - pad).floor(), ph);
        let right = clip((x1 * self.dpr + pad).ceil(), pw);
        let bottom = clip((y1 * self.dpr + pad).ceil(), ph);
        (right > left && bottom > top).then(|| PixelRect::new(left, top, right - left, bottom - top))
    }

    fn full_rect(&self) -> PixelRect {
        let (pw, ph) = self.physical_size();
        PixelRect::new(0, 0, pw, ph)
    }

    fn mark_dirty(&mut self, rect: PixelRect) {
        self.dirty = Some(match self.dirty {
            Some(dirty) => dirty.union(rect),
            None => rect,
        });
    }

    /// Pixels changed since the previous call, then forget them.
    pub fn take_dirty(&mut self) -> Option<PixelRect> {
        self.dirty.take()
    }

    /// Wipe every pixel and drop any open path.
    pub fn clear(&mut self) {
        self.end_path();
        self.pixmap.fill(Color::TRANSPARENT);
        self.mark_dirty(self.full_rect());
    }

    // --- Encoding ---

    /// Encode the buffer as it is right now.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::EncodePng`] if the PNG encoder fails.
    pub fn snapshot(&self) -> Result<String, CodecError> {
        codec::encode(&self.pixmap)
    }

    /// Replace the buffer with a decoded signature stretched to the logical size.
    ///
    /// Malformed or empty input leaves the surface untouched and returns `false`.
    pub fn restore(&mut self, encoded: &str) -> bool {
        match codec::decode(encoded) {
            Ok(image) => {
                self.draw_image(&image);
                true
            }
            Err(CodecError::Empty) => false,
            Err(e) => {
                log::warn!("ignoring stored signature: {e}");
                false
            }
        }
    }

    /// Replace the buffer with `image`, stretched to fill the whole surface.
    #[allow(clippy::cast_precision_loss)]
    pub fn draw_image(&mut self, image: &Pixmap) {
        self.clear();
        if image.width() == self.pixmap.width() && image.height() == self.pixmap.height() {
            self.pixmap.data_mut().copy_from_slice(image.data());
            return;
        }
        let sx = self.pixmap.width() as f32 / image.width() as f32;
        let sy = self.pixmap.height() as f32 / image.height() as f32;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, Transform::from_scale(sx, sy), None);
    }

    // --- Pixel access ---

    /// The physical buffer (premultiplied RGBA).
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Number of physical pixels with any coverage.
    #[must_use]
    pub fn inked_pixels(&self) -> usize {
        self.pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    #[must_use]
    pub fn has_ink(&self) -> bool {
        self.pixmap.pixels().iter().any(|p| p.alpha() > 0)
    }

    /// Pixels of `rect` as straight (non-premultiplied) RGBA bytes, row-major,
    /// ready for `ImageData`. `rect` is clipped to the buffer.
    #[must_use]
    pub fn rgba_region(&self, rect: PixelRect) -> Vec<u8> {
        let (pw, ph) = self.physical_size();
        let (x0, x1) = (rect.x.min(pw) as usize, rect.right().min(pw) as usize);
        let (y0, y1) = (rect.y.min(ph) as usize, rect.bottom().min(ph) as usize);
        let stride = pw as usize;
        let pixels = self.pixmap.pixels();
        let mut out = Vec::with_capacity((x1 - x0) * (y1 - y0) * 4);
        for row in y0..y1 {
            for px in &pixels[row * stride + x0..row * stride + x1] {
                let c = px.demultiply();
                out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
            }
        }
        out
    }

    /// The whole buffer as straight RGBA bytes.
    #[must_use]
    pub fn to_rgba(&self) -> Vec<u8> {
        self.rgba_region(self.full_rect())
    }
}

/// Copy the pixels of `rect` from `src` into `dst`. Both share one size.
fn copy_region(dst: &mut Pixmap, src: &Pixmap, rect: PixelRect) {
    let stride = dst.width() as usize * 4;
    let (x0, x1) = (rect.x as usize * 4, rect.right() as usize * 4);
    let dst = dst.data_mut();
    let src = src.data();
    for row in rect.y as usize..rect.bottom() as usize {
        let span = row * stride + x0..row * stride + x1;
        dst[span.clone()].copy_from_slice(&src[span]);
    }
}
