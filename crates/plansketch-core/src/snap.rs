//! Wall snapping for door placement.
//!
//! Doors attach to line segments and rectangle sides. The snap search walks
//! every candidate segment and keeps the closest one inside the threshold;
//! dragging an already-attached door instead projects onto its own wall.

use crate::elements::{
    DoorAttachment, Element, closest_point_on_segment,
};
use crate::hit::find_element;
use kurbo::Point;

/// Screen-space snap threshold in pixels; divided by the camera scale so
/// the feel is zoom-independent.
pub const SNAP_THRESHOLD: f64 = 30.0;

/// Attachment pose produced by the snap search.
///
/// Doubles as the hover ghost while the door tool previews placement and
/// as the committed pose on click or drag release.
#[derive(Debug, Clone, Copy)]
pub struct SnapPose {
    /// Snapped point on the wall, or the input point when unsnapped.
    pub point: Point,
    /// Wall direction angle in radians (0 when unsnapped).
    pub rotation: f64,
    /// Distance from the query point to the wall (infinite when unsnapped).
    pub distance: f64,
    /// Weak reference to the wall, if any.
    pub attachment: Option<DoorAttachment>,
}

impl SnapPose {
    /// Unsnapped fallback: the input point, no rotation, no attachment.
    pub fn unsnapped(point: Point) -> Self {
        Self {
            point,
            rotation: 0.0,
            distance: f64::INFINITY,
            attachment: None,
        }
    }

    /// Whether the pose is attached to a wall.
    pub fn is_snapped(&self) -> bool {
        self.attachment.is_some()
    }
}

fn segment_angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x)
}

/// Find the nearest attachable wall segment to a world point.
///
/// Scans every line and every rectangle side; the closest candidate within
/// `SNAP_THRESHOLD / scale` wins. Returns the unsnapped input point when
/// nothing is in range.
pub fn find_nearest_attachable(point: Point, elements: &[Element], scale: f64) -> SnapPose {
    let threshold = SNAP_THRESHOLD / scale;
    let mut best = SnapPose::unsnapped(point);

    let mut consider = |a: Point, b: Point, attachment: DoorAttachment| {
        let (closest, dist, _) = closest_point_on_segment(point, a, b);
        if dist <= threshold && dist < best.distance {
            best = SnapPose {
                point: closest,
                rotation: segment_angle(a, b),
                distance: dist,
                attachment: Some(attachment),
            };
        }
    };

    for element in elements {
        match element {
            Element::Line(line) => {
                consider(
                    line.start,
                    line.end,
                    DoorAttachment::Line { line_id: line.id },
                );
            }
            Element::Rectangle(rect) => {
                for (side, a, b) in rect.sides() {
                    consider(
                        a,
                        b,
                        DoorAttachment::RectangleSide {
                            rect_id: rect.id,
                            side,
                        },
                    );
                }
            }
            _ => {}
        }
    }
    best
}

/// Project a pointer onto the segment an attachment references, clamped to
/// the segment's finite extent.
///
/// Used while dragging an attached door so it slides along its own wall
/// instead of re-searching for the nearest one. Returns `None` when the
/// referenced element no longer exists (dangling reference).
pub fn project_onto_attachment(
    point: Point,
    attachment: DoorAttachment,
    elements: &[Element],
) -> Option<SnapPose> {
    let (a, b) = attachment_segment(attachment, elements)?;
    let (closest, dist, _) = closest_point_on_segment(point, a, b);
    Some(SnapPose {
        point: closest,
        rotation: segment_angle(a, b),
        distance: dist,
        attachment: Some(attachment),
    })
}

/// Resolve an attachment reference to its current world-space segment.
pub fn attachment_segment(
    attachment: DoorAttachment,
    elements: &[Element],
) -> Option<(Point, Point)> {
    match attachment {
        DoorAttachment::Line { line_id } => match find_element(elements, line_id)? {
            Element::Line(line) => Some((line.start, line.end)),
            _ => None,
        },
        DoorAttachment::RectangleSide { rect_id, side } => {
            match find_element(elements, rect_id)? {
                Element::Rectangle(rect) => rect
                    .sides()
                    .into_iter()
                    .find(|(s, _, _)| *s == side)
                    .map(|(_, a, b)| (a, b)),
                _ => None,
            }
        }
    }
}
