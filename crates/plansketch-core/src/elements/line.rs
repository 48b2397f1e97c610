//! Line element (walls and plain segments).

use super::{ElementId, ElementStyle, closest_point_on_segment};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A straight line segment. In a floor plan these are usually walls, so
/// lines double as attachment targets for door symbols.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub id: ElementId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Segment length in centimeters, derived from pixel geometry.
    pub length_cm: f64,
    /// Rotation angle in radians.
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

impl Line {
    /// Create a new line. `length_cm` starts at zero until the caller
    /// refreshes measurements with the project's pixels-per-unit ratio.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            length_cm: 0.0,
            rotation: 0.0,
            label: None,
            locked: false,
            style: ElementStyle::default(),
        }
    }

    /// Pixel length of the segment.
    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    /// Midpoint of the segment.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Segment angle in radians (`atan2(dy, dx)`).
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    /// Axis-aligned box of the two endpoints.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    /// Hit when the point is within `tolerance` of the segment.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let (_, dist, _) = closest_point_on_segment(point, self.start, self.end);
        dist <= tolerance + self.style.stroke_width / 2.0
    }

    /// Included in a box-selection when either endpoint lies inside.
    pub fn box_hit(&self, rect: Rect) -> bool {
        rect.contains(self.start) || rect.contains(self.end)
    }
}
