//! Element definitions for the floor plan.

mod circle;
mod door;
mod line;
mod rectangle;
mod text;

pub use circle::Circle;
pub use door::{Door, DoorAttachment, LEAF_ANGLE, RectSide};
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

fn default_opacity() -> f64 {
    1.0
}

/// Paint properties shared by every element kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    /// Only meaningful when a fill is present.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Stroke width in world pixels.
    pub stroke_width: f64,
}

impl ElementStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Get the fill color with opacity applied.
    pub fn fill_with_opacity(&self) -> Option<Color> {
        self.fill_color.map(|c| {
            let color: Color = c.into();
            let rgba = color.to_rgba8();
            let alpha = (rgba.a as f64 * self.opacity) as u8;
            Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
        })
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            fill_color: None,
            opacity: 1.0,
            stroke_width: 2.0,
        }
    }
}

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    closest_point_on_segment(point, a, b).1
}

/// Closest point on a segment (a→b) to `point`, via clamped projection.
///
/// Returns `(closest, distance, t)` where `t` is the clamped projection
/// parameter in [0, 1].
pub fn closest_point_on_segment(point: Point, a: Point, b: Point) -> (Point, f64, f64) {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return (a, pv.hypot(), 0.0);
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (proj, (point - proj).hypot(), t)
}

/// Rotate `point` around `center` by `angle` radians.
pub fn rotate_about(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(
        center.x + dx * cos - dy * sin,
        center.y + dx * sin + dy * cos,
    )
}

/// Map a world point into an element's unrotated local frame.
///
/// Every rotation-aware test (hit, handle, box-select corner) rotates the
/// query point by the inverse of the element's rotation, then tests against
/// unrotated geometry.
pub fn to_local_frame(point: Point, center: Point, rotation: f64) -> Point {
    rotate_about(point, center, -rotation)
}

/// Rotated corners of an axis-aligned rect, spun around its center.
/// Order: top-left, top-right, bottom-right, bottom-left.
pub fn rotated_corners(bounds: Rect, rotation: f64) -> [Point; 4] {
    let center = bounds.center();
    [
        rotate_about(Point::new(bounds.x0, bounds.y0), center, rotation),
        rotate_about(Point::new(bounds.x1, bounds.y0), center, rotation),
        rotate_about(Point::new(bounds.x1, bounds.y1), center, rotation),
        rotate_about(Point::new(bounds.x0, bounds.y1), center, rotation),
    ]
}

/// Enum wrapper for all element kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Element {
    Line(Line),
    Rectangle(Rectangle),
    Circle(Circle),
    Text(Text),
    Door(Door),
}

impl Element {
    pub fn id(&self) -> ElementId {
        match self {
            Element::Line(e) => e.id,
            Element::Rectangle(e) => e.id,
            Element::Circle(e) => e.id,
            Element::Text(e) => e.id,
            Element::Door(e) => e.id,
        }
    }

    /// Bounding box in unrotated local space.
    pub fn bounds(&self) -> Rect {
        match self {
            Element::Line(e) => e.bounds(),
            Element::Rectangle(e) => e.bounds(),
            Element::Circle(e) => e.bounds(),
            Element::Text(e) => e.bounds(),
            Element::Door(e) => e.bounds(),
        }
    }

    /// Center of the unrotated bounds (rotation pivot).
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Check if a world point hits this element.
    ///
    /// `tolerance` is a world-space distance; callers scale it by `1/scale`
    /// so the screen-space tolerance stays constant across zoom levels.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Element::Line(e) => e.hit_test(point, tolerance),
            Element::Rectangle(e) => e.hit_test(point, tolerance),
            Element::Circle(e) => e.hit_test(point),
            Element::Text(e) => e.hit_test(point, tolerance),
            Element::Door(e) => e.hit_test(point, tolerance),
        }
    }

    /// Box-selection inclusion test against a world-space rect.
    pub fn box_hit(&self, rect: Rect) -> bool {
        match self {
            Element::Line(e) => e.box_hit(rect),
            Element::Rectangle(e) => e.box_hit(rect),
            Element::Circle(e) => e.box_hit(rect),
            Element::Text(e) => e.box_hit(rect),
            Element::Door(e) => e.box_hit(rect),
        }
    }

    pub fn rotation(&self) -> f64 {
        match self {
            Element::Line(e) => e.rotation,
            Element::Rectangle(e) => e.rotation,
            Element::Circle(e) => e.rotation,
            Element::Text(e) => e.rotation,
            Element::Door(e) => e.rotation,
        }
    }

    pub fn set_rotation(&mut self, rotation: f64) {
        match self {
            Element::Line(e) => e.rotation = rotation,
            Element::Rectangle(e) => e.rotation = rotation,
            Element::Circle(e) => e.rotation = rotation,
            Element::Text(e) => e.rotation = rotation,
            Element::Door(e) => e.rotation = rotation,
        }
    }

    pub fn locked(&self) -> bool {
        match self {
            Element::Line(e) => e.locked,
            Element::Rectangle(e) => e.locked,
            Element::Circle(e) => e.locked,
            Element::Text(e) => e.locked,
            Element::Door(e) => e.locked,
        }
    }

    pub fn set_locked(&mut self, locked: bool) {
        match self {
            Element::Line(e) => e.locked = locked,
            Element::Rectangle(e) => e.locked = locked,
            Element::Circle(e) => e.locked = locked,
            Element::Text(e) => e.locked = locked,
            Element::Door(e) => e.locked = locked,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Element::Line(e) => e.label.as_deref(),
            Element::Rectangle(e) => e.label.as_deref(),
            Element::Circle(e) => e.label.as_deref(),
            Element::Text(e) => e.label.as_deref(),
            Element::Door(e) => e.label.as_deref(),
        }
    }

    pub fn set_label(&mut self, label: Option<String>) {
        match self {
            Element::Line(e) => e.label = label,
            Element::Rectangle(e) => e.label = label,
            Element::Circle(e) => e.label = label,
            Element::Text(e) => e.label = label,
            Element::Door(e) => e.label = label,
        }
    }

    pub fn style(&self) -> &ElementStyle {
        match self {
            Element::Line(e) => &e.style,
            Element::Rectangle(e) => &e.style,
            Element::Circle(e) => &e.style,
            Element::Text(e) => &e.style,
            Element::Door(e) => &e.style,
        }
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        match self {
            Element::Line(e) => &mut e.style,
            Element::Rectangle(e) => &mut e.style,
            Element::Circle(e) => &mut e.style,
            Element::Text(e) => &mut e.style,
            Element::Door(e) => &mut e.style,
        }
    }

    /// Anchor position (start point, top-left, center, baseline or hinge
    /// depending on kind).
    pub fn position(&self) -> Point {
        match self {
            Element::Line(e) => e.start,
            Element::Rectangle(e) => e.position,
            Element::Circle(e) => e.center,
            Element::Text(e) => e.position,
            Element::Door(e) => e.position,
        }
    }

    /// Move the anchor position. For a Line this moves only the start
    /// point; whole-element moves go through [`Element::translate`].
    pub fn set_position(&mut self, position: Point) {
        match self {
            Element::Line(e) => e.start = position,
            Element::Rectangle(e) => e.position = position,
            Element::Circle(e) => e.center = position,
            Element::Text(e) => e.position = position,
            Element::Door(e) => e.position = position,
        }
    }

    /// Translate the whole element by a world-space delta.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            Element::Line(e) => {
                e.start += delta;
                e.end += delta;
            }
            Element::Rectangle(e) => e.position += delta,
            Element::Circle(e) => e.center += delta,
            Element::Text(e) => e.position += delta,
            Element::Door(e) => e.position += delta,
        }
    }

    /// Recompute the derived centimeter fields from pixel geometry.
    ///
    /// Must be called whenever pixel geometry changes; the cm fields are
    /// never authored independently.
    pub fn refresh_measurements(&mut self, pixels_per_unit: f64) {
        match self {
            Element::Line(e) => e.length_cm = e.length() / pixels_per_unit,
            Element::Rectangle(e) => {
                e.width_cm = e.width / pixels_per_unit;
                e.height_cm = e.height / pixels_per_unit;
            }
            Element::Circle(e) => e.radius_cm = e.radius / pixels_per_unit,
            Element::Text(_) | Element::Door(_) => {}
        }
    }

    /// Assign a fresh unique id. Used when duplicating or pasting.
    pub fn regenerate_id(&mut self) {
        let new_id = Uuid::new_v4();
        match self {
            Element::Line(e) => e.id = new_id,
            Element::Rectangle(e) => e.id = new_id,
            Element::Circle(e) => e.id = new_id,
            Element::Text(e) => e.id = new_id,
            Element::Door(e) => e.id = new_id,
        }
    }
}
