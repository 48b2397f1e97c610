//! Text element.

use super::{ElementId, ElementStyle, rotated_corners, to_local_frame};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Average glyph width as a fraction of the font size. Real metrics belong
/// to the renderer; this estimate only feeds hit-testing and handles.
const GLYPH_WIDTH_RATIO: f64 = 0.6;

fn default_font_family() -> String {
    "sans-serif".to_string()
}

/// A text label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub id: ElementId,
    /// Baseline-left anchor position.
    pub position: Point,
    /// The text content.
    pub content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family name, as understood by the renderer.
    #[serde(default = "default_font_family")]
    pub font_family: String,
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

impl Text {
    /// Default font size for new text elements.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    /// Create a new text element.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: default_font_family(),
            rotation: 0.0,
            label: None,
            locked: false,
            style: ElementStyle::default(),
        }
    }

    /// Estimated width from content length and font size.
    fn estimated_width(&self) -> f64 {
        self.content.chars().count() as f64 * self.font_size * GLYPH_WIDTH_RATIO
    }

    /// Estimated bounds, anchored at the baseline: the box extends upward
    /// from the anchor by one font size.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y - self.font_size,
            self.position.x + self.estimated_width(),
            self.position.y,
        )
    }

    /// The four bounds corners rotated around the center.
    pub fn corners(&self) -> [Point; 4] {
        rotated_corners(self.bounds(), self.rotation)
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
