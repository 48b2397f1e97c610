//! Sketch document: the element collection a host owns.
//!
//! The engine never requires this type — any host implementing
//! [`CanvasHost`] works — but it is the shape the storage collaborator
//! exchanges, and a convenient direct-application host for tests and
//! simple embedders. History is deliberately not managed here; the
//! checkpoint callback only logs.

use crate::camera::Camera;
use crate::elements::{Element, ElementId};
use crate::host::{CanvasHost, ElementPatch, ToolKind};
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Document encode/decode errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn default_pixels_per_unit() -> f64 {
    10.0
}

/// A sketch document: ordered elements (render/z-order = list order) plus
/// the view transform and the project's measurement scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SketchDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// Elements in render order (last = topmost).
    pub elements: Vec<Element>,
    /// The project's view transform.
    pub view: Camera,
    /// World pixels per centimeter.
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f64,
}

impl Default for SketchDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SketchDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            elements: Vec::new(),
            view: Camera::new(),
            pixels_per_unit: default_pixels_per_unit(),
        }
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Get a mutable element by id.
    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Remove an element by id.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id() == id)?;
        Some(self.elements.remove(index))
    }

    /// Move an element to the top of the render order.
    pub fn bring_to_front(&mut self, id: ElementId) {
        if let Some(element) = self.remove(id) {
            self.elements.push(element);
        }
    }

    /// Move an element to the bottom of the render order.
    pub fn send_to_back(&mut self, id: ElementId) {
        if let Some(element) = self.remove(id) {
            self.elements.insert(0, element);
        }
    }

    /// Bounding box of all elements.
    pub fn bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for element in &self.elements {
            let bounds = element.bounds();
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl CanvasHost for SketchDocument {
    fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    fn add_elements(&mut self, elements: Vec<Element>) {
        self.elements.extend(elements);
    }

    fn update_element(&mut self, id: ElementId, patch: ElementPatch, _skip_history: bool) {
        if let Some(element) = self.get_mut(id) {
            patch.apply_to(element);
        }
    }

    fn update_elements(&mut self, ids: &[ElementId], patch: ElementPatch) {
        for id in ids {
            if let Some(element) = self.get_mut(*id) {
                patch.apply_to(element);
            }
        }
    }

    fn delete_element(&mut self, id: ElementId) {
        self.remove(id);
    }

    fn delete_elements(&mut self, ids: &[ElementId]) {
        self.elements.retain(|e| !ids.contains(&e.id()));
    }

    fn set_selection(&mut self, _ids: Vec<ElementId>) {
        // Selection lives in the controller; real hosts mirror it for
        // rendering. Nothing to store here.
    }

    fn set_tool(&mut self, _tool: ToolKind) {}

    fn save_history_checkpoint(&mut self) {
        log::debug!("history checkpoint requested for document {}", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{
        Circle, Door, DoorAttachment, Line, RectSide, Rectangle, SerializableColor, Text,
    };
    use kurbo::Point;

    fn populated() -> SketchDocument {
        let mut doc = SketchDocument::new();
        let wall = Line::new(Point::ZERO, Point::new(100.0, 0.0));
        let wall_id = wall.id;
        let mut line = Element::Line(wall);
        line.refresh_measurements(doc.pixels_per_unit);
        doc.add_element(line);

        let mut rect = Rectangle::new(Point::new(10.0, 10.0), 200.0, 150.0);
        rect.rotation = 0.3;
        rect.label = Some("kitchen".to_string());
        rect.style.fill_color = Some(SerializableColor::new(200, 180, 40, 255));
        rect.style.opacity = 0.5;
        let mut rect = Element::Rectangle(rect);
        rect.refresh_measurements(doc.pixels_per_unit);
        doc.add_element(rect);

        let mut circle = Circle::new(Point::new(50.0, 60.0), 25.0);
        circle.locked = true;
        let mut circle = Element::Circle(circle);
        circle.refresh_measurements(doc.pixels_per_unit);
        doc.add_element(circle);

        doc.add_element(Element::Text(Text::new(
            Point::new(20.0, 30.0),
            "Entrance".to_string(),
        )));

        let mut door = Door::new(Point::new(40.0, 0.0), 80.0);
        door.attached_to = Some(DoorAttachment::Line { line_id: wall_id });
        doc.add_element(Element::Door(door));

        let mut side_door = Door::new(Point::new(10.0, 10.0), 60.0);
        side_door.attached_to = Some(DoorAttachment::RectangleSide {
            rect_id: doc.elements[1].id(),
            side: RectSide::Left,
        });
        doc.add_element(Element::Door(side_door));

        doc
    }

    #[test]
    fn test_json_round_trip_preserves_every_field() {
        let doc = populated();
        let json = doc.to_json().expect("encodes");
        let restored = SketchDocument::from_json(&json).expect("decodes");

        assert_eq!(restored.len(), doc.len());
        assert!((restored.pixels_per_unit - doc.pixels_per_unit).abs() < f64::EPSILON);

        for (original, restored) in doc.elements.iter().zip(&restored.elements) {
            assert_eq!(original.id(), restored.id());
            assert_eq!(original.rotation(), restored.rotation());
            assert_eq!(original.locked(), restored.locked());
            assert_eq!(original.label(), restored.label());
            assert_eq!(
                original.style().stroke_color,
                restored.style().stroke_color
            );
            assert_eq!(original.style().fill_color, restored.style().fill_color);
        }

        // Derived cm fields survive without recomputation.
        let Element::Line(line) = &restored.elements[0] else {
            panic!("expected Line");
        };
        assert!((line.length_cm - 10.0).abs() < f64::EPSILON);
        let Element::Rectangle(rect) = &restored.elements[1] else {
            panic!("expected Rectangle");
        };
        assert!((rect.width_cm - 20.0).abs() < f64::EPSILON);
        assert!((rect.height_cm - 15.0).abs() < f64::EPSILON);
        assert!((rect.style.opacity - 0.5).abs() < f64::EPSILON);

        // Attachments survive, both flavors.
        let Element::Door(door) = &restored.elements[4] else {
            panic!("expected Door");
        };
        assert!(matches!(
            door.attached_to,
            Some(DoorAttachment::Line { .. })
        ));
        let Element::Door(side_door) = &restored.elements[5] else {
            panic!("expected Door");
        };
        assert_eq!(
            side_door.attached_to,
            Some(DoorAttachment::RectangleSide {
                rect_id: doc.elements[1].id(),
                side: RectSide::Left,
            })
        );
    }

    #[test]
    fn test_view_transform_round_trips() {
        let mut doc = SketchDocument::new();
        doc.view.scale = 2.5;
        doc.view.offset = kurbo::Vec2::new(-40.0, 12.5);
        let restored = SketchDocument::from_json(&doc.to_json().expect("encodes")).expect("decodes");
        assert!((restored.view.scale - 2.5).abs() < f64::EPSILON);
        assert!((restored.view.offset.x + 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        // Older documents without rotation/label/locked still load.
        let json = r#"{
            "id": "doc-1",
            "name": "Legacy",
            "elements": [
                {"Line": {
                    "id": "7f2c1b34-1111-2222-3333-444455556666",
                    "start": {"x": 0.0, "y": 0.0},
                    "end": {"x": 10.0, "y": 0.0},
                    "length_cm": 1.0,
                    "style": {
                        "stroke_color": {"r": 0, "g": 0, "b": 0, "a": 255},
                        "fill_color": null,
                        "stroke_width": 2.0
                    }
                }}
            ],
            "view": {"offset": {"x": 0.0, "y": 0.0}, "scale": 1.0}
        }"#;
        let doc = SketchDocument::from_json(json).expect("decodes");
        let Element::Line(line) = &doc.elements[0] else {
            panic!("expected Line");
        };
        assert!(line.rotation.abs() < f64::EPSILON);
        assert!(!line.locked);
        assert!(line.label.is_none());
        assert!((line.style.opacity - 1.0).abs() < f64::EPSILON);
        assert!((doc.pixels_per_unit - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(SketchDocument::from_json("not json").is_err());
    }

    #[test]
    fn test_z_order_ops() {
        let mut doc = SketchDocument::new();
        let a = Element::Circle(Circle::new(Point::ZERO, 5.0));
        let b = Element::Circle(Circle::new(Point::new(10.0, 0.0), 5.0));
        let a_id = a.id();
        let b_id = b.id();
        doc.add_element(a);
        doc.add_element(b);

        doc.bring_to_front(a_id);
        assert_eq!(doc.elements.last().map(Element::id), Some(a_id));
        doc.send_to_back(a_id);
        assert_eq!(doc.elements.first().map(Element::id), Some(a_id));
        let _ = b_id;
    }

    #[test]
    fn test_bounds_union() {
        let mut doc = SketchDocument::new();
        assert!(doc.bounds().is_none());
        doc.add_element(Element::Circle(Circle::new(Point::ZERO, 10.0)));
        doc.add_element(Element::Circle(Circle::new(Point::new(100.0, 0.0), 10.0)));
        let bounds = doc.bounds().expect("has bounds");
        assert_eq!(bounds, Rect::new(-10.0, -10.0, 110.0, 10.0));
    }

    #[test]
    fn test_host_impl_applies_patches() {
        let mut doc = SketchDocument::new();
        let circle = Circle::new(Point::ZERO, 10.0);
        let id = circle.id;
        doc.add_element(Element::Circle(circle));

        doc.update_element(
            id,
            ElementPatch {
                radius: Some(20.0),
                radius_cm: Some(2.0),
                ..Default::default()
            },
            false,
        );
        let Some(Element::Circle(circle)) = doc.get(id) else {
            panic!("expected Circle");
        };
        assert!((circle.radius - 20.0).abs() < f64::EPSILON);
        assert!((circle.radius_cm - 2.0).abs() < f64::EPSILON);

        doc.delete_elements(&[id]);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_bulk_style_update() {
        let mut doc = SketchDocument::new();
        let a = Element::Circle(Circle::new(Point::ZERO, 10.0));
        let b = Element::Circle(Circle::new(Point::new(50.0, 0.0), 10.0));
        let ids = [a.id(), b.id()];
        doc.add_element(a);
        doc.add_element(b);

        doc.update_elements(
            &ids,
            ElementPatch {
                stroke_width: Some(4.0),
                locked: Some(true),
                ..Default::default()
            },
        );
        for element in &doc.elements {
            assert!((element.style().stroke_width - 4.0).abs() < f64::EPSILON);
            assert!(element.locked());
        }
    }
}
