//! Point-to-element hit resolution.

use crate::elements::{Element, ElementId};
use kurbo::Point;

/// Screen-space hit tolerance in pixels; divided by the camera scale so it
/// stays constant regardless of zoom.
pub const HIT_TOLERANCE: f64 = 10.0;

/// Find the topmost element at a world point.
///
/// Elements are scanned in reverse order (render order = list order, so
/// the last element is topmost). Locked elements are excluded from the
/// primary match but the topmost locked hit is kept as a fallback, so a
/// user can still select a locked shape to unlock it.
pub fn find_element_at(point: Point, elements: &[Element], scale: f64) -> Option<&Element> {
    let tolerance = HIT_TOLERANCE / scale;
    let mut locked_fallback: Option<&Element> = None;

    for element in elements.iter().rev() {
        if !element.hit_test(point, tolerance) {
            continue;
        }
        if element.locked() {
            if locked_fallback.is_none() {
                locked_fallback = Some(element);
            }
        } else {
            return Some(element);
        }
    }
    locked_fallback
}

/// Convenience lookup by id over the host's ordered element slice.
pub fn find_element(elements: &[Element], id: ElementId) -> Option<&Element> {
    elements.iter().find(|e| e.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Circle, Line, Rectangle};

    fn rect_at(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::Rectangle(Rectangle::new(Point::new(x, y), w, h))
    }

    #[test]
    fn test_topmost_wins() {
        let bottom = rect_at(0.0, 0.0, 100.0, 100.0);
        let top = rect_at(50.0, 50.0, 100.0, 100.0);
        let top_id = top.id();
        let elements = vec![bottom, top];

        let hit = find_element_at(Point::new(75.0, 75.0), &elements, 1.0);
        assert_eq!(hit.map(Element::id), Some(top_id));
    }

    #[test]
    fn test_miss_returns_none() {
        let elements = vec![rect_at(0.0, 0.0, 10.0, 10.0)];
        assert!(find_element_at(Point::new(500.0, 500.0), &elements, 1.0).is_none());
    }

    #[test]
    fn test_locked_fallback() {
        let mut locked = rect_at(0.0, 0.0, 100.0, 100.0);
        locked.set_locked(true);
        let locked_id = locked.id();
        let unlocked = rect_at(0.0, 0.0, 100.0, 100.0);
        let unlocked_id = unlocked.id();

        // Locked on top: the unlocked one below still wins.
        let elements = vec![unlocked, locked];
        let hit = find_element_at(Point::new(50.0, 50.0), &elements, 1.0);
        assert_eq!(hit.map(Element::id), Some(unlocked_id));

        // Only locked elements under the point: topmost locked is returned.
        let mut solo = rect_at(0.0, 0.0, 100.0, 100.0);
        solo.set_locked(true);
        let solo_id = solo.id();
        let solo_elements = [solo];
        let hit = find_element_at(Point::new(50.0, 50.0), &solo_elements, 1.0);
        assert_eq!(hit.map(Element::id), Some(solo_id));
        let _ = locked_id;
    }

    #[test]
    fn test_tolerance_scales_with_zoom() {
        let line = Element::Line(Line::new(Point::ZERO, Point::new(100.0, 0.0)));
        let elements = vec![line];
        // 8px away in world space: a hit at scale 1 (tolerance 10)...
        assert!(find_element_at(Point::new(50.0, 8.0), &elements, 1.0).is_some());
        // ...but a miss zoomed in at scale 2 (tolerance 5).
        assert!(find_element_at(Point::new(50.0, 8.0), &elements, 2.0).is_none());
    }

    #[test]
    fn test_circle_hit_is_exact_radius() {
        let circle = Element::Circle(Circle::new(Point::ZERO, 10.0));
        let elements = vec![circle];
        assert!(find_element_at(Point::new(9.0, 0.0), &elements, 1.0).is_some());
        // No tolerance inflation for circles.
        assert!(find_element_at(Point::new(10.5, 0.0), &elements, 1.0).is_none());
    }
}
