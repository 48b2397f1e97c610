//! Manipulation handles for selected elements.
//!
//! Handles live in world coordinates; tolerances and offsets are divided
//! by the camera scale so they track screen size.

use crate::elements::{Element, rotate_about};
use kurbo::Point;

/// Screen-space handle hit tolerance in pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;
/// Screen-space distance from the shape's top edge to the rotation handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 24.0;

/// A scale handle, named after the compass edge/corner it sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleHandle {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl ScaleHandle {
    /// Whether dragging this handle moves the top edge (y and height).
    pub fn moves_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    /// Whether dragging this handle moves the bottom edge (height).
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    /// Whether dragging this handle moves the left edge (x and width).
    pub fn moves_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    /// Whether dragging this handle moves the right edge (width).
    pub fn moves_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Offset from the bounds center in the unrotated frame, as a fraction
    /// of the half extents (-1, 0 or 1 per axis).
    fn unit_offset(self) -> (f64, f64) {
        match self {
            Self::N => (0.0, -1.0),
            Self::S => (0.0, 1.0),
            Self::E => (1.0, 0.0),
            Self::W => (-1.0, 0.0),
            Self::Ne => (1.0, -1.0),
            Self::Nw => (-1.0, -1.0),
            Self::Se => (1.0, 1.0),
            Self::Sw => (-1.0, 1.0),
        }
    }
}

/// Which scale handles a kind exposes.
///
/// Rectangles scale on every edge and corner; text scales font size from
/// its right-side handles. Lines, doors and circles have no scale handles.
fn handle_set(element: &Element) -> &'static [ScaleHandle] {
    match element {
        Element::Rectangle(_) => &[
            ScaleHandle::N,
            ScaleHandle::S,
            ScaleHandle::E,
            ScaleHandle::W,
            ScaleHandle::Ne,
            ScaleHandle::Nw,
            ScaleHandle::Se,
            ScaleHandle::Sw,
        ],
        Element::Text(_) => &[ScaleHandle::E, ScaleHandle::Ne, ScaleHandle::Se],
        _ => &[],
    }
}

/// World positions of the scale handles for a selected element, rotated
/// with the element.
pub fn scale_handles(element: &Element) -> Vec<(ScaleHandle, Point)> {
    let bounds = element.bounds();
    let center = bounds.center();
    let rotation = element.rotation();
    handle_set(element)
        .iter()
        .map(|&handle| {
            let (ux, uy) = handle.unit_offset();
            let local = Point::new(
                center.x + ux * bounds.width() / 2.0,
                center.y + uy * bounds.height() / 2.0,
            );
            (handle, rotate_about(local, center, rotation))
        })
        .collect()
}

/// World position of the rotation handle, floating above the rotated
/// top-center. `None` for kinds that cannot be rotated by handle.
pub fn rotation_handle(element: &Element, scale: f64) -> Option<Point> {
    let bounds = element.bounds();
    let center = bounds.center();
    let lift = ROTATE_HANDLE_OFFSET / scale;
    match element {
        Element::Rectangle(_) | Element::Circle(_) | Element::Text(_) => {
            let local = Point::new(center.x, bounds.y0 - lift);
            Some(rotate_about(local, center, element.rotation()))
        }
        // Door bounds already account for rotation.
        Element::Door(_) => Some(Point::new(center.x, bounds.y0 - lift)),
        Element::Line(_) => None,
    }
}

fn within(point: Point, target: Point, tolerance: f64) -> bool {
    (point - target).hypot2() <= tolerance * tolerance
}

/// Which scale handle (if any) a world point lands on.
pub fn hit_scale_handle(element: &Element, point: Point, scale: f64) -> Option<ScaleHandle> {
    let tolerance = HANDLE_HIT_TOLERANCE / scale;
    scale_handles(element)
        .into_iter()
        .find(|(_, pos)| within(point, *pos, tolerance))
        .map(|(handle, _)| handle)
}

/// Whether a world point lands on the rotation handle.
pub fn hit_rotation_handle(element: &Element, point: Point, scale: f64) -> bool {
    let tolerance = HANDLE_HIT_TOLERANCE / scale;
    rotation_handle(element, scale).is_some_and(|pos| within(point, pos, tolerance))
}
