//! Rectangle element (rooms and boxes).

use super::{ElementId, ElementStyle, RectSide, rotated_corners, to_local_frame};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An axis-aligned rectangle, optionally rotated around its center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: ElementId,
    /// Top-left corner position (unrotated frame).
    pub position: Point,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Width in centimeters, derived from pixel geometry.
    pub width_cm: f64,
    /// Height in centimeters, derived from pixel geometry.
    pub height_cm: f64,
    /// Rotation angle in radians (around center).
    #[serde(default)]
    pub rotation: f64,
    /// Optional free-text label.
    #[serde(default)]
    pub label: Option<String>,
    /// Locked elements are selectable but not editable.
    #[serde(default)]
    pub locked: bool,
    /// Style properties.
    pub style: ElementStyle,
}

impl Rectangle {
    /// Create a new rectangle. The cm fields start at zero until the
    /// caller refreshes measurements.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            width_cm: 0.0,
            height_cm: 0.0,
            rotation: 0.0,
            label: None,
            locked: false,
            style: ElementStyle::default(),
        }
    }

    /// Create a rectangle from two corner points (normalized top-left).
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        Self::new(
            Point::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            (p2.x - p1.x).abs(),
            (p2.y - p1.y).abs(),
        )
    }

    /// Unrotated bounds as a kurbo Rect.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.width,
            self.position.y + self.height,
        )
    }

    /// The four corners rotated around the center.
    /// Order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        rotated_corners(self.bounds(), self.rotation)
    }

    /// The four sides as rotated world-space segments, named in the
    /// unrotated frame. Door symbols attach to these.
    pub fn sides(&self) -> [(RectSide, Point, Point); 4] {
        let [tl, tr, br, bl] = self.corners();
        [
            (RectSide::Top, tl, tr),
            (RectSide::Right, tr, br),
            (RectSide::Bottom, br, bl),
            (RectSide::Left, bl, tl),
        ]
    }

    /// Hit by mapping the point into the unrotated local frame and testing
    /// axis-aligned containment.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let bounds = self.bounds();
        let local = to_local_frame(point, bounds.center(), self.rotation);
        bounds.inflate(tolerance, tolerance).contains(local)
    }

    /// Included in a box-selection when any rotated corner lies inside.
    pub fn box_hit(&self, rect: Rect) -> bool {
        self.corners().iter().any(|c| rect.contains(*c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let rect = Rectangle::from_corners(Point::new(100.0, 100.0), Point::new(50.0, 60.0));
        assert_eq!(rect.position, Point::new(50.0, 60.0));
        assert!((rect.width - 50.0).abs() < f64::EPSILON);
        assert!((rect.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_unrotated() {
        let rect = Rectangle::new(Point::ZERO, 100.0, 50.0);
        assert!(rect.hit_test(Point::new(50.0, 25.0), 0.0));
        assert!(!rect.hit_test(Point::new(150.0, 25.0), 0.0));
        assert!(rect.hit_test(Point::new(104.0, 25.0), 5.0));
    }

    #[test]
    fn test_hit_survives_rotation() {
        // The center stays a hit under any rotation.
        let mut rect = Rectangle::new(Point::ZERO, 100.0, 50.0);
        for i in 0..12 {
            rect.rotation = i as f64 * std::f64::consts::PI / 6.0;
            assert!(rect.hit_test(Point::new(50.0, 25.0), 0.0), "rotation {i}");
        }
    }

    #[test]
    fn test_rotated_corner_moves_out_of_unrotated_box() {
        let mut rect = Rectangle::new(Point::ZERO, 10.0, 10.0);
        rect.rotation = std::f64::consts::FRAC_PI_4;
        // Under 45° the corners swing outside the (0,0)-(5,5) quadrant.
        assert!(!rect.box_hit(Rect::new(0.0, 0.0, 5.0, 5.0)));
        // A box around the whole rotated footprint catches a corner.
        assert!(rect.box_hit(Rect::new(-3.0, -3.0, 13.0, 13.0)));
    }

    #[test]
    fn test_sides_trace_the_outline() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), 30.0, 40.0);
        let sides = rect.sides();
        assert_eq!(sides[0].1, Point::new(10.0, 20.0));
        assert_eq!(sides[0].2, Point::new(40.0, 20.0));
        assert_eq!(sides[2].1, Point::new(40.0, 60.0));
        assert_eq!(sides[2].2, Point::new(10.0, 60.0));
    }
}
