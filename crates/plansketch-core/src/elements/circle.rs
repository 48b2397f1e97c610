//! Circle element.

use super::{ElementId, ElementStyle};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A circle defined by center and radius.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    pub id: ElementId,
    /// Center point.
    pub center: Point,
    /// Radius in pixels.
    pub radius: f64,
    /// Radius in centimeters, derived from pixel geometry.
    pub radius_cm: f64,
    /// Rotation angle in radians. Geometrically a no-op for circles but
    /// kept so the attribute round-trips like every other kind.
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

impl Circle {
    /// Create a new circle. `radius_cm` starts at zero until the caller
    /// refreshes measurements.
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            center,
            radius,
            radius_cm: 0.0,
            rotation: 0.0,
            label: None,
            locked: false,
            style: ElementStyle::default(),
        }
    }

    /// The square enclosing the circle.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    /// Hit when the distance to the center is at most the radius.
    pub fn hit_test(&self, point: Point) -> bool {
        (point - self.center).hypot() <= self.radius
    }

    /// Included in a box-selection when the bounding square intersects.
    pub fn box_hit(&self, rect: Rect) -> bool {
        rect.intersect(self.bounds()).area() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_is_enclosing_square() {
        let circle = Circle::new(Point::new(10.0, 20.0), 5.0);
        assert_eq!(circle.bounds(), Rect::new(5.0, 15.0, 15.0, 25.0));
    }

    #[test]
    fn test_hit_inside_and_on_rim() {
        let circle = Circle::new(Point::ZERO, 10.0);
        assert!(circle.hit_test(Point::new(3.0, 4.0)));
        assert!(circle.hit_test(Point::new(10.0, 0.0)));
        assert!(!circle.hit_test(Point::new(10.1, 0.0)));
    }

    #[test]
    fn test_zero_radius_is_permitted() {
        let circle = Circle::new(Point::new(1.0, 1.0), 0.0);
        assert!(circle.hit_test(Point::new(1.0, 1.0)));
        assert!(circle.bounds().is_zero_area());
    }

    #[test]
    fn test_box_hit_uses_bounding_square() {
        let circle = Circle::new(Point::ZERO, 10.0);
        // Overlaps only the square's corner region, not the disc itself.
        assert!(circle.box_hit(Rect::new(8.0, 8.0, 20.0, 20.0)));
        assert!(!circle.box_hit(Rect::new(11.0, 11.0, 20.0, 20.0)));
    }
}
