//! The mutation-intent boundary between the engine and its host.
//!
//! The controller never owns the element collection; it emits intents
//! through [`CanvasHost`] and the host applies them (and decides how to
//! record history). Per-move updates carry full new values, so replaying
//! only the latest intent is safe if the host coalesces renders.

use crate::elements::{DoorAttachment, Element, ElementId, SerializableColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The tools the host toolbar can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Line,
    Rectangle,
    Circle,
    Text,
    Door,
}

/// Host-supplied engine configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// World pixels per real-world centimeter. Positive.
    pub pixels_per_unit: f64,
    /// Font size used for measurement labels.
    pub label_font_size: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 10.0,
            label_font_size: 12.0,
        }
    }
}

/// A partial element update. Every present field carries the full new
/// value for that attribute (idempotent overwrite, never a delta).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementPatch {
    pub position: Option<Point>,
    /// Line end point.
    pub end: Option<Point>,
    /// Rectangle width or door opening size.
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius: Option<f64>,
    pub rotation: Option<f64>,
    pub font_size: Option<f64>,
    pub length_cm: Option<f64>,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub radius_cm: Option<f64>,
    /// `Some(None)` detaches; `Some(Some(..))` re-attaches.
    pub attached_to: Option<Option<DoorAttachment>>,
    pub stroke_color: Option<SerializableColor>,
    pub fill_color: Option<Option<SerializableColor>>,
    pub opacity: Option<f64>,
    pub stroke_width: Option<f64>,
    pub label: Option<Option<String>>,
    pub locked: Option<bool>,
}

impl ElementPatch {
    /// Apply every present field to the element. Fields that do not exist
    /// on the element's kind are ignored.
    pub fn apply_to(&self, element: &mut Element) {
        if let Some(position) = self.position {
            element.set_position(position);
        }
        if let Some(rotation) = self.rotation {
            element.set_rotation(rotation);
        }
        if let Some(locked) = self.locked {
            element.set_locked(locked);
        }
        if let Some(label) = &self.label {
            element.set_label(label.clone());
        }
        if let Some(color) = self.stroke_color {
            element.style_mut().stroke_color = color;
        }
        if let Some(fill) = self.fill_color {
            element.style_mut().fill_color = fill;
        }
        if let Some(opacity) = self.opacity {
            element.style_mut().opacity = opacity;
        }
        if let Some(stroke_width) = self.stroke_width {
            element.style_mut().stroke_width = stroke_width;
        }

        match element {
            Element::Line(line) => {
                if let Some(end) = self.end {
                    line.end = end;
                }
                if let Some(length_cm) = self.length_cm {
                    line.length_cm = length_cm;
                }
            }
            Element::Rectangle(rect) => {
                if let Some(width) = self.width {
                    rect.width = width;
                }
                if let Some(height) = self.height {
                    rect.height = height;
                }
                if let Some(width_cm) = self.width_cm {
                    rect.width_cm = width_cm;
                }
                if let Some(height_cm) = self.height_cm {
                    rect.height_cm = height_cm;
                }
            }
            Element::Circle(circle) => {
                if let Some(radius) = self.radius {
                    circle.radius = radius;
                }
                if let Some(radius_cm) = self.radius_cm {
                    circle.radius_cm = radius_cm;
                }
            }
            Element::Text(text) => {
                if let Some(font_size) = self.font_size {
                    text.font_size = font_size;
                }
            }
            Element::Door(door) => {
                if let Some(width) = self.width {
                    door.width = width;
                }
                if let Some(attached_to) = self.attached_to {
                    door.attached_to = attached_to;
                }
            }
        }
    }
}

/// Callbacks the engine emits mutation intents through.
///
/// `skip_history` marks the continuous per-move updates of a gesture; the
/// host should not checkpoint those. One `save_history_checkpoint` fires
/// per committed gesture or action.
pub trait CanvasHost {
    fn add_element(&mut self, element: Element);
    fn add_elements(&mut self, elements: Vec<Element>);
    fn update_element(&mut self, id: ElementId, patch: ElementPatch, skip_history: bool);
    fn update_elements(&mut self, ids: &[ElementId], patch: ElementPatch);
    fn delete_element(&mut self, id: ElementId);
    fn delete_elements(&mut self, ids: &[ElementId]);
    fn set_selection(&mut self, ids: Vec<ElementId>);
    fn set_tool(&mut self, tool: ToolKind);
    fn save_history_checkpoint(&mut self);
}
