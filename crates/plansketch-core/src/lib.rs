//! PlanSketch Core Library
//!
//! Platform-agnostic geometry and interaction engine for the PlanSketch
//! floor-plan editor: coordinate transforms, shape geometry, hit-testing,
//! wall snapping and the pointer-gesture state machine. Rendering and
//! persistence live in host crates.

pub mod camera;
pub mod controller;
pub mod document;
pub mod elements;
pub mod handles;
pub mod hit;
pub mod host;
pub mod input;
pub mod snap;
pub mod units;

pub use camera::Camera;
pub use controller::{Controller, Mode};
pub use document::{DocumentError, SketchDocument};
pub use elements::{
    Circle, Door, DoorAttachment, Element, ElementId, ElementStyle, Line, RectSide, Rectangle,
    SerializableColor, Text,
};
pub use handles::ScaleHandle;
pub use hit::find_element_at;
pub use host::{CanvasHost, ElementPatch, EngineConfig, ToolKind};
pub use input::{Key, Modifiers, MouseButton};
pub use snap::{SnapPose, find_nearest_attachable, project_onto_attachment};
pub use units::{MeasurementLabel, line_measurement_label, parse_numeric_field};
