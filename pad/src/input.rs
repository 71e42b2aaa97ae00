//! Input model: raw pointer events, normalized contacts, and the stroke state.
//!
//! Browser input arrives as heterogeneous mouse and touch events. [`normalize`]
//! folds both into a single [`Contact`] carrying a logical-space point, a
//! [`ContactPhase`] and the identity of the device contact that produced it.
//! Touch contacts keep the identifier of the finger that started them.
//! Leaving the canvas while the mouse is pressed is reported as an `End`, so
//! a stroke is never left open.
//!
//! `InputState` is the gesture being tracked between contact start and end.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::geom::{ClientRect, Point};

/// One touch point as reported by a `TouchList`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawTouch {
    /// Browser-assigned identifier, stable for the lifetime of the touch.
    pub identifier: i32,
    pub client_x: f64,
    pub client_y: f64,
}

/// A raw input event in client coordinates, before normalization.
///
/// Touch starts carry the event's `changedTouches`, the fingers that just went
/// down. Touch moves carry `touches`. Touch ends and cancels carry both the
/// lifted fingers (`changed`) and the fingers still down (`touches`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawEvent {
    MouseDown { client_x: f64, client_y: f64 },
    MouseMove { client_x: f64, client_y: f64 },
    MouseUp { client_x: f64, client_y: f64 },
    /// The pointer left the canvas. Ends a stroke if one is open.
    MouseLeave { client_x: f64, client_y: f64 },
    TouchStart { changed: Vec<RawTouch> },
    TouchMove { touches: Vec<RawTouch> },
    TouchEnd {
        changed: Vec<RawTouch>,
        #[serde(default)]
        touches: Vec<RawTouch>,
    },
    TouchCancel {
        changed: Vec<RawTouch>,
        #[serde(default)]
        touches: Vec<RawTouch>,
    },
}

/// Which device contact produced a [`Contact`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactId {
    Mouse,
    Touch(i32),
}

/// Stroke-boundary marker for a normalized contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Start,
    Move,
    End,
}

/// A normalized input sample in logical canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub phase: ContactPhase,
    pub id: ContactId,
    pub point: Point,
}

impl Contact {
    #[must_use]
    pub fn new(phase: ContactPhase, id: ContactId, point: Point) -> Self {
        Self { phase, id, point }
    }

    #[must_use]
    pub fn start(x: f64, y: f64) -> Self {
        Self::new(ContactPhase::Start, ContactId::Mouse, Point::new(x, y))
    }

    #[must_use]
    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(ContactPhase::Move, ContactId::Mouse, Point::new(x, y))
    }

    #[must_use]
    pub fn end(x: f64, y: f64) -> Self {
        Self::new(ContactPhase::End, ContactId::Mouse, Point::new(x, y))
    }
}

/// The touch with identifier `id` in `list`, or the first one when no touch
/// stroke is open.
fn tracked(list: &[RawTouch], id: Option<i32>) -> Option<&RawTouch> {
    match id {
        Some(id) => list.iter().find(|t| t.identifier == id),
        None => list.first(),
    }
}

/// Convert a raw event to a contact relative to `rect`.
///
/// `state` is the stroke currently open. While a touch stroke is open, moves
/// and ends are matched to its finger wherever it sits in the touch list, and
/// other fingers are ignored. A touch end or cancel that leaves the drawing
/// finger out of the remaining `touches` ends the stroke at its last point,
/// so a stroke is never left open by a lost or unordered lift.
///
/// Otherwise only the first touch is used. Returns `None` when there is
/// nothing to report.
#[must_use]
pub fn normalize(event: &RawEvent, rect: &ClientRect, state: &InputState) -> Option<Contact> {
    let mouse = |phase, x: f64, y: f64| Contact::new(phase, ContactId::Mouse, rect.to_local(x, y));
    let touch = |phase, t: &RawTouch| {
        Contact::new(phase, ContactId::Touch(t.identifier), rect.to_local(t.client_x, t.client_y))
    };
    let drawing = match *state {
        InputState::Drawing { id: ContactId::Touch(id), last } => Some((id, last)),
        _ => None,
    };
    let drawing_id = drawing.map(|(id, _)| id);

    match event {
        RawEvent::MouseDown { client_x, client_y } => Some(mouse(ContactPhase::Start, *client_x, *client_y)),
        RawEvent::MouseMove { client_x, client_y } => Some(mouse(ContactPhase::Move, *client_x, *client_y)),
        RawEvent::MouseUp { client_x, client_y } | RawEvent::MouseLeave { client_x, client_y } => {
            Some(mouse(ContactPhase::End, *client_x, *client_y))
        }
        RawEvent::TouchStart { changed } => changed.first().map(|t| touch(ContactPhase::Start, t)),
        RawEvent::TouchMove { touches } => tracked(touches, drawing_id).map(|t| touch(ContactPhase::Move, t)),
        RawEvent::TouchEnd { changed, touches } | RawEvent::TouchCancel { changed, touches } => {
            let Some((id, last)) = drawing else {
                return changed.first().map(|t| touch(ContactPhase::End, t));
            };
            if let Some(t) = tracked(changed, Some(id)) {
                Some(touch(ContactPhase::End, t))
            } else if tracked(touches, Some(id)).is_some() {
                None
            } else {
                Some(Contact::new(ContactPhase::End, ContactId::Touch(id), last))
            }
        }
    }
}

/// Gesture state between contact start and contact end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No stroke in progress.
    #[default]
    Idle,
    /// A stroke is open for the given contact.
    Drawing {
        /// The contact that owns the stroke; samples from other contacts are ignored.
        id: ContactId,
        /// Last point appended to the stroke.
        last: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }
}
