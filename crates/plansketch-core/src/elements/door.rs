//! Door symbol element.
//!
//! A door is drawn as its opening (hinge to latch along the wall) plus the
//! leaf swung open at a fixed angle. It can attach to a line or to one side
//! of a rectangle; the attachment is a weak reference by id.

use super::{ElementId, ElementStyle, closest_point_on_segment, rotate_about};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed leaf opening angle used for geometry and rendering (30°).
pub const LEAF_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Named side of a rectangle, in the rectangle's unrotated frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// Weak reference from a door to the wall segment it sits on.
///
/// The target may be deleted out from under the door; lookups degrade to
/// "unattached" instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorAttachment {
    Line { line_id: ElementId },
    RectangleSide { rect_id: ElementId, side: RectSide },
}

/// A door symbol anchored at its hinge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    pub id: ElementId,
    /// Hinge anchor position.
    pub position: Point,
    /// Opening size in pixels; also the leaf length.
    pub width: f64,
    /// Rotation angle in radians (around the hinge anchor). Follows the
    /// attached wall's direction when snapped.
    #[serde(default)]
    pub rotation: f64,
    /// Wall the door is attached to, if any.
    #[serde(default)]
    pub attached_to: Option<DoorAttachment>,
    /// Optional free-text label.
    #[serde(default)]
    pub label: Option<String>,
    /// Locked elements are selectable but not editable.
    #[serde(default)]
    pub locked: bool,
    /// Style properties.
    pub style: ElementStyle,
}

impl Door {
    /// Default opening size for new doors.
    pub const DEFAULT_WIDTH: f64 = 80.0;

    /// Create a new unattached door.
    pub fn new(position: Point, width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            rotation: 0.0,
            attached_to: None,
            label: None,
            locked: false,
            style: ElementStyle::default(),
        }
    }

    /// Hinge point (the anchor).
    pub fn hinge(&self) -> Point {
        self.position
    }

    /// Latch-side end of the opening, along the wall direction.
    pub fn latch(&self) -> Point {
        rotate_about(
            self.position + Vec2::new(self.width, 0.0),
            self.position,
            self.rotation,
        )
    }

    /// End of the leaf swung open by the fixed leaf angle.
    pub fn arc_end(&self) -> Point {
        rotate_about(
            self.position + Vec2::new(self.width, 0.0),
            self.position,
            self.rotation - LEAF_ANGLE,
        )
    }

    /// Axis-aligned box of the three rotated corner points
    /// (hinge, latch end, arc end).
    pub fn bounds(&self) -> Rect {
        let pts = [self.hinge(), self.latch(), self.arc_end()];
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for p in pts {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Hit when the point is within `tolerance` of the opening segment or
    /// of the swung-open leaf segment.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let reach = tolerance + self.style.stroke_width / 2.0;
        let (_, sill_dist, _) = closest_point_on_segment(point, self.hinge(), self.latch());
        if sill_dist <= reach {
            return true;
        }
        let (_, leaf_dist, _) = closest_point_on_segment(point, self.hinge(), self.arc_end());
        leaf_dist <= reach
    }

    /// Included in a box-selection when the hinge or the latch endpoint
    /// lies inside.
    pub fn box_hit(&self, rect: Rect) -> bool {
        rect.contains(self.hinge()) || rect.contains(self.latch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrotated_geometry() {
        let door = Door::new(Point::new(10.0, 20.0), 80.0);
        assert_eq!(door.hinge(), Point::new(10.0, 20.0));
        let latch = door.latch();
        assert!((latch.x - 90.0).abs() < 1e-9);
        assert!((latch.y - 20.0).abs() < 1e-9);
        // Leaf swings upward (negative y) by 30°.
        let arc = door.arc_end();
        assert!((arc.x - (10.0 + 80.0 * LEAF_ANGLE.cos())).abs() < 1e-9);
        assert!((arc.y - (20.0 - 80.0 * LEAF_ANGLE.sin())).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_pivots_on_hinge() {
        let mut door = Door::new(Point::new(10.0, 20.0), 80.0);
        door.rotation = std::f64::consts::FRAC_PI_2;
        assert_eq!(door.hinge(), Point::new(10.0, 20.0));
        let latch = door.latch();
        assert!((latch.x - 10.0).abs() < 1e-9);
        assert!((latch.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_covers_all_three_points() {
        let door = Door::new(Point::ZERO, 100.0);
        let bounds = door.bounds();
        assert!((bounds.x0 - 0.0).abs() < 1e-9);
        assert!((bounds.x1 - 100.0).abs() < 1e-9);
        // The leaf swings upward, so the box extends to the arc end's y.
        assert!((bounds.y0 + 100.0 * LEAF_ANGLE.sin()).abs() < 1e-9);
        assert!((bounds.y1 - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_on_sill_and_leaf() {
        let door = Door::new(Point::ZERO, 80.0);
        assert!(door.hit_test(Point::new(40.0, 2.0), 5.0));
        let mid_leaf = Point::new(
            40.0 * LEAF_ANGLE.cos(),
            -40.0 * LEAF_ANGLE.sin(),
        );
        assert!(door.hit_test(mid_leaf, 5.0));
        assert!(!door.hit_test(Point::new(40.0, 40.0), 5.0));
    }

    #[test]
    fn test_box_hit_hinge_or_latch() {
        let door = Door::new(Point::ZERO, 80.0);
        assert!(door.box_hit(Rect::new(-5.0, -5.0, 5.0, 5.0)));
        assert!(door.box_hit(Rect::new(75.0, -5.0, 85.0, 5.0)));
        assert!(!door.box_hit(Rect::new(30.0, 10.0, 50.0, 20.0)));
    }
}
