//! The pointer-gesture state machine.
//!
//! All interaction flows through here: the controller owns the transient
//! gesture session and the selection, reads the host's element list each
//! event, and emits mutation intents back through [`CanvasHost`]. Gestures
//! begin on pointer-down, update on pointer-move and commit on pointer-up
//! (pointer-leave behaves like release). Per-move updates carry
//! `skip_history`; one checkpoint fires per committed gesture.

use crate::camera::Camera;
use crate::elements::{Circle, Door, Element, ElementId, Line, Rectangle, Text};
use crate::handles::{self, ScaleHandle};
use crate::hit::{self, find_element};
use crate::host::{CanvasHost, ElementPatch, EngineConfig, ToolKind};
use crate::input::{Key, Modifiers, MouseButton};
use crate::snap::{self, SnapPose};
use kurbo::{Point, Rect, Vec2};
use std::collections::HashMap;

/// Screen-space drag distance before an empty-space press becomes a
/// box-selection.
const BOX_SELECT_DRAG_THRESHOLD: f64 = 5.0;
/// Rectangles refuse to scale below this edge length (prevents inversion).
const MIN_RECT_SIZE: f64 = 10.0;
/// Floor for text scaling.
const MIN_FONT_SIZE: f64 = 8.0;
/// World-space offset applied to pasted elements.
const PASTE_OFFSET: f64 = 16.0;
/// Default content for text elements created by the text tool.
const DEFAULT_TEXT_CONTENT: &str = "Text";

/// Observable gesture mode, for cursor-shape feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Panning,
    Drawing,
    Dragging,
    Rotating,
    Scaling,
    PotentialSelect,
    BoxSelecting,
}

/// Transient state of the active gesture. Created on pointer-down,
/// destroyed (reset to Idle) on release or Escape.
#[derive(Debug, Clone)]
enum Session {
    Idle,
    Panning {
        last_screen: Point,
    },
    Drawing {
        origin: Point,
        preview: Element,
    },
    Dragging {
        origin: Point,
        /// Start state of every element being moved, so deltas stay
        /// consistent regardless of intermediate renders.
        snapshots: HashMap<ElementId, Element>,
        /// First-clicked element; the reference for snap computations.
        reference: ElementId,
        /// Door rotation before the drag began (sole-door drags only).
        door_rotation_before: Option<f64>,
    },
    Rotating {
        id: ElementId,
        prev_angle: f64,
    },
    Scaling {
        id: ElementId,
        handle: ScaleHandle,
        origin: Point,
        snapshot: Element,
    },
    PotentialSelect {
        origin_screen: Point,
        origin_world: Point,
    },
    BoxSelecting {
        origin: Point,
        current: Point,
        base_selection: Vec<ElementId>,
    },
}

fn dedupe(ids: Vec<ElementId>) -> Vec<ElementId> {
    let mut out: Vec<ElementId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

/// The manipulation controller.
pub struct Controller {
    tool: ToolKind,
    selection: Vec<ElementId>,
    session: Session,
    config: EngineConfig,
    clipboard: Vec<Element>,
    door_preview: Option<SnapPose>,
}

impl Controller {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            tool: ToolKind::default(),
            selection: Vec::new(),
            session: Session::Idle,
            config,
            clipboard: Vec::new(),
            door_preview: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Change the active tool (host toolbar). Aborts any pending gesture.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        self.session = Session::Idle;
        self.door_preview = None;
    }

    pub fn selection(&self) -> &[ElementId] {
        &self.selection
    }

    /// Programmatic selection change from the host (already applied there).
    pub fn set_selection(&mut self, ids: Vec<ElementId>) {
        self.selection = dedupe(ids);
    }

    /// Current gesture mode, for cursor feedback.
    pub fn mode(&self) -> Mode {
        match self.session {
            Session::Idle => Mode::Idle,
            Session::Panning { .. } => Mode::Panning,
            Session::Drawing { .. } => Mode::Drawing,
            Session::Dragging { .. } => Mode::Dragging,
            Session::Rotating { .. } => Mode::Rotating,
            Session::Scaling { .. } => Mode::Scaling,
            Session::PotentialSelect { .. } => Mode::PotentialSelect,
            Session::BoxSelecting { .. } => Mode::BoxSelecting,
        }
    }

    /// Live preview element while a draw gesture is in flight.
    pub fn drawing_preview(&self) -> Option<&Element> {
        match &self.session {
            Session::Drawing { preview, .. } => Some(preview),
            _ => None,
        }
    }

    /// Snap ghost pose while the door tool hovers.
    pub fn door_preview(&self) -> Option<&SnapPose> {
        self.door_preview.as_ref()
    }

    /// Box-selection rectangle while one is being dragged out.
    pub fn box_selection_rect(&self) -> Option<Rect> {
        match &self.session {
            Session::BoxSelecting {
                origin, current, ..
            } => Some(Rect::from_points(*origin, *current)),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    pub fn on_pointer_down(
        &mut self,
        screen: Point,
        button: MouseButton,
        mods: Modifiers,
        camera: &mut Camera,
        elements: &[Element],
        host: &mut dyn CanvasHost,
    ) {
        let world = camera.screen_to_world(screen);

        // (a) middle/right button or left with the command modifier pans.
        if button == MouseButton::Middle
            || button == MouseButton::Right
            || (button == MouseButton::Left && mods.command())
        {
            self.session = Session::Panning {
                last_screen: screen,
            };
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        match self.tool {
            ToolKind::Select => self.pointer_down_select(screen, world, mods, camera, elements, host),
            ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle => {
                let mut preview = match self.tool {
                    ToolKind::Line => Element::Line(Line::new(world, world)),
                    ToolKind::Rectangle => {
                        Element::Rectangle(Rectangle::from_corners(world, world))
                    }
                    _ => Element::Circle(Circle::new(world, 0.0)),
                };
                preview.refresh_measurements(self.config.pixels_per_unit);
                log::debug!("draw gesture begin: {:?}", self.tool);
                self.session = Session::Drawing {
                    origin: world,
                    preview,
                };
            }
            ToolKind::Text => {
                // (g) text is created synchronously at the click point.
                let text = Text::new(world, DEFAULT_TEXT_CONTENT.to_string());
                let id = text.id;
                host.save_history_checkpoint();
                host.add_element(Element::Text(text));
                self.replace_selection(vec![id], host);
                self.reset_tool(host);
            }
            ToolKind::Door => {
                // (h) door placement commits the hover snap pose.
                let pose = snap::find_nearest_attachable(world, elements, camera.scale);
                let mut door = Door::new(pose.point, Door::DEFAULT_WIDTH);
                door.rotation = pose.rotation;
                door.attached_to = pose.attachment;
                let id = door.id;
                host.save_history_checkpoint();
                host.add_element(Element::Door(door));
                self.door_preview = None;
                self.replace_selection(vec![id], host);
                self.reset_tool(host);
            }
        }
    }

    fn pointer_down_select(
        &mut self,
        screen: Point,
        world: Point,
        mods: Modifiers,
        camera: &Camera,
        elements: &[Element],
        host: &mut dyn CanvasHost,
    ) {
        // (b)/(c) handles require exactly one selected, unlocked element.
        if self.selection.len() == 1 {
            if let Some(element) = find_element(elements, self.selection[0]) {
                if !element.locked() {
                    if handles::hit_rotation_handle(element, world, camera.scale) {
                        let center = element.center();
                        let prev_angle = (world.y - center.y).atan2(world.x - center.x);
                        self.session = Session::Rotating {
                            id: element.id(),
                            prev_angle,
                        };
                        return;
                    }
                    if let Some(handle) = handles::hit_scale_handle(element, world, camera.scale) {
                        self.session = Session::Scaling {
                            id: element.id(),
                            handle,
                            origin: world,
                            snapshot: element.clone(),
                        };
                        return;
                    }
                }
            }
        }

        // (d) element hit: select, maybe start dragging.
        if let Some(hit_element) = hit::find_element_at(world, elements, camera.scale) {
            let id = hit_element.id();
            let locked = hit_element.locked();
            if mods.shift {
                self.toggle_selection(id, host);
            } else if !self.selection.contains(&id) {
                self.replace_selection(vec![id], host);
            }

            if !locked && self.selection.contains(&id) {
                let mut snapshots = HashMap::new();
                for sel_id in &self.selection {
                    if let Some(element) = find_element(elements, *sel_id) {
                        if !element.locked() {
                            snapshots.insert(*sel_id, element.clone());
                        }
                    }
                }
                let door_rotation_before = match snapshots.get(&id) {
                    Some(Element::Door(door)) if snapshots.len() == 1 => Some(door.rotation),
                    _ => None,
                };
                self.session = Session::Dragging {
                    origin: world,
                    snapshots,
                    reference: id,
                    door_rotation_before,
                };
            }
            return;
        }

        // (e) empty space: clear (unless shift) and arm box-selection.
        if !mods.shift {
            self.replace_selection(Vec::new(), host);
        }
        self.session = Session::PotentialSelect {
            origin_screen: screen,
            origin_world: world,
        };
    }

    pub fn on_pointer_move(
        &mut self,
        screen: Point,
        camera: &mut Camera,
        elements: &[Element],
        host: &mut dyn CanvasHost,
    ) {
        let world = camera.screen_to_world(screen);
        let mut session = std::mem::replace(&mut self.session, Session::Idle);

        match &mut session {
            Session::Idle => {
                if self.tool == ToolKind::Door {
                    self.door_preview =
                        Some(snap::find_nearest_attachable(world, elements, camera.scale));
                }
            }
            Session::Panning { last_screen } => {
                camera.pan(screen - *last_screen);
                *last_screen = screen;
            }
            Session::Drawing { origin, preview } => {
                Self::update_preview(preview, *origin, world, self.config.pixels_per_unit);
            }
            Session::PotentialSelect {
                origin_screen,
                origin_world,
            } => {
                let (origin_screen, origin_world) = (*origin_screen, *origin_world);
                if (screen - origin_screen).hypot() > BOX_SELECT_DRAG_THRESHOLD {
                    session = Session::BoxSelecting {
                        origin: origin_world,
                        current: world,
                        base_selection: self.selection.clone(),
                    };
                }
            }
            Session::BoxSelecting { current, .. } => {
                *current = world;
            }
            Session::Dragging {
                origin,
                snapshots,
                reference,
                door_rotation_before,
            } => {
                self.drag_move(
                    world,
                    *origin,
                    snapshots,
                    *reference,
                    *door_rotation_before,
                    camera.scale,
                    elements,
                    host,
                );
            }
            Session::Rotating { id, prev_angle } => {
                if let Some(element) = find_element(elements, *id) {
                    let center = element.center();
                    let angle = (world.y - center.y).atan2(world.x - center.x);
                    // Accumulated per move, not recomputed from scratch,
                    // to avoid discontinuities.
                    let rotation = element.rotation() + (angle - *prev_angle);
                    *prev_angle = angle;
                    host.update_element(
                        *id,
                        ElementPatch {
                            rotation: Some(rotation),
                            ..Default::default()
                        },
                        true,
                    );
                }
            }
            Session::Scaling {
                id,
                handle,
                origin,
                snapshot,
            } => {
                let delta = world - *origin;
                if let Some(patch) = self.scale_patch(snapshot, *handle, delta) {
                    host.update_element(*id, patch, true);
                }
            }
        }

        self.session = session;
    }

    pub fn on_pointer_up(
        &mut self,
        screen: Point,
        camera: &Camera,
        elements: &[Element],
        host: &mut dyn CanvasHost,
    ) {
        let world = camera.screen_to_world(screen);
        let mode = self.mode();
        let session = std::mem::replace(&mut self.session, Session::Idle);

        match session {
            Session::Idle | Session::Panning { .. } | Session::PotentialSelect { .. } => {}
            Session::Drawing {
                origin,
                mut preview,
            } => {
                Self::update_preview(&mut preview, origin, world, self.config.pixels_per_unit);
                let id = preview.id();
                log::debug!("draw gesture commit: {:?}", self.tool);
                host.save_history_checkpoint();
                host.add_element(preview);
                self.replace_selection(vec![id], host);
                self.reset_tool(host);
            }
            Session::Dragging { .. } | Session::Rotating { .. } | Session::Scaling { .. } => {
                // Modal gestures commit on release; history records once.
                log::debug!("gesture commit: {mode:?}");
                host.save_history_checkpoint();
            }
            Session::BoxSelecting {
                origin,
                current: _,
                base_selection,
            } => {
                let rect = Rect::from_points(origin, world);
                let mut result = base_selection;
                for element in elements {
                    let id = element.id();
                    if element.box_hit(rect) && !result.contains(&id) {
                        result.push(id);
                    }
                }
                self.replace_selection(result, host);
            }
        }
    }

    /// Pointer-leave is treated identically to pointer-up.
    pub fn on_pointer_leave(
        &mut self,
        screen: Point,
        camera: &Camera,
        elements: &[Element],
        host: &mut dyn CanvasHost,
    ) {
        self.on_pointer_up(screen, camera, elements, host);
    }

    pub fn on_wheel(&mut self, screen: Point, wheel_delta: f64, camera: &mut Camera) {
        camera.wheel_zoom(screen, wheel_delta);
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    pub fn on_key(
        &mut self,
        key: Key,
        mods: Modifiers,
        input_focused: bool,
        elements: &[Element],
        host: &mut dyn CanvasHost,
    ) {
        // Shortcuts are disabled while a text-input-like widget has focus.
        if input_focused {
            return;
        }

        match key {
            Key::Escape => {
                self.session = Session::Idle;
                self.door_preview = None;
                self.replace_selection(Vec::new(), host);
                self.reset_tool(host);
            }
            Key::Delete | Key::Backspace => self.delete_selected(elements, host),
            Key::ArrowUp => self.nudge_selected(Vec2::new(0.0, -1.0), mods, elements, host),
            Key::ArrowDown => self.nudge_selected(Vec2::new(0.0, 1.0), mods, elements, host),
            Key::ArrowLeft => self.nudge_selected(Vec2::new(-1.0, 0.0), mods, elements, host),
            Key::ArrowRight => self.nudge_selected(Vec2::new(1.0, 0.0), mods, elements, host),
            Key::Character(c) if mods.command() => match c {
                'a' => {
                    let all: Vec<ElementId> = elements.iter().map(Element::id).collect();
                    self.replace_selection(all, host);
                }
                'c' => self.copy_selected(elements),
                'v' => self.paste(host),
                'd' => {
                    self.copy_selected(elements);
                    self.paste(host);
                }
                _ => {}
            },
            Key::Character(_) => {}
        }
    }

    fn delete_selected(&mut self, elements: &[Element], host: &mut dyn CanvasHost) {
        let doomed: Vec<ElementId> = self
            .selection
            .iter()
            .copied()
            .filter(|id| {
                find_element(elements, *id).is_some_and(|element| !element.locked())
            })
            .collect();
        if doomed.is_empty() {
            return;
        }
        host.save_history_checkpoint();
        host.delete_elements(&doomed);
        let remaining: Vec<ElementId> = self
            .selection
            .iter()
            .copied()
            .filter(|id| !doomed.contains(id))
            .collect();
        self.replace_selection(remaining, host);
    }

    fn nudge_selected(
        &mut self,
        direction: Vec2,
        mods: Modifiers,
        elements: &[Element],
        host: &mut dyn CanvasHost,
    ) {
        let step = if mods.shift { 10.0 } else { 1.0 };
        let delta = direction * step;
        let movable: Vec<&Element> = self
            .selection
            .iter()
            .filter_map(|id| find_element(elements, *id))
            .filter(|element| !element.locked())
            .collect();
        if movable.is_empty() {
            return;
        }
        host.save_history_checkpoint();
        for element in movable {
            let patch = self.translate_patch(element, delta);
            host.update_element(element.id(), patch, true);
        }
    }

    fn copy_selected(&mut self, elements: &[Element]) {
        self.clipboard = self
            .selection
            .iter()
            .filter_map(|id| find_element(elements, *id))
            .cloned()
            .collect();
    }

    fn paste(&mut self, host: &mut dyn CanvasHost) {
        if self.clipboard.is_empty() {
            return;
        }
        let mut pasted = self.clipboard.clone();
        let mut ids = Vec::with_capacity(pasted.len());
        for element in &mut pasted {
            element.regenerate_id();
            element.translate(Vec2::new(PASTE_OFFSET, PASTE_OFFSET));
            ids.push(element.id());
        }
        host.save_history_checkpoint();
        host.add_elements(pasted);
        self.replace_selection(ids, host);
    }

    // ------------------------------------------------------------------
    // Gesture helpers
    // ------------------------------------------------------------------

    #[allow(clippy::too_many_arguments)]
    fn drag_move(
        &self,
        world: Point,
        origin: Point,
        snapshots: &HashMap<ElementId, Element>,
        reference: ElementId,
        door_rotation_before: Option<f64>,
        scale: f64,
        elements: &[Element],
        host: &mut dyn CanvasHost,
    ) {
        let delta = world - origin;
        let sole_door =
            snapshots.len() == 1 && matches!(snapshots.get(&reference), Some(Element::Door(_)));

        for (id, snapshot) in snapshots {
            if sole_door {
                if let Element::Door(door) = snapshot {
                    self.drag_door(world, delta, door, door_rotation_before, scale, elements, host);
                    continue;
                }
            }
            // Doors dragged as part of a multi-selection move by the raw
            // delta like everything else; their attachment is ignored.
            let patch = self.translate_patch(snapshot, delta);
            host.update_element(*id, patch, true);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn drag_door(
        &self,
        pointer: Point,
        delta: Vec2,
        snapshot: &Door,
        rotation_before: Option<f64>,
        scale: f64,
        elements: &[Element],
        host: &mut dyn CanvasHost,
    ) {
        if let Some(attachment) = snapshot.attached_to {
            // Attached doors slide along their own wall.
            if let Some(pose) = snap::project_onto_attachment(pointer, attachment, elements) {
                host.update_element(
                    snapshot.id,
                    ElementPatch {
                        position: Some(pose.point),
                        rotation: Some(pose.rotation),
                        attached_to: Some(Some(attachment)),
                        ..Default::default()
                    },
                    true,
                );
                return;
            }
            log::warn!(
                "door {} references a deleted wall; falling back to free positioning",
                snapshot.id
            );
        }

        // Unattached (or dangling): re-run the nearest-wall search.
        let pose = snap::find_nearest_attachable(pointer, elements, scale);
        let patch = if pose.is_snapped() {
            ElementPatch {
                position: Some(pose.point),
                rotation: Some(pose.rotation),
                attached_to: Some(pose.attachment),
                ..Default::default()
            }
        } else {
            // Outside the threshold the door keeps free-form positioning
            // and reverts to its pre-drag rotation.
            ElementPatch {
                position: Some(snapshot.position + delta),
                rotation: Some(rotation_before.unwrap_or(snapshot.rotation)),
                attached_to: Some(None),
                ..Default::default()
            }
        };
        host.update_element(snapshot.id, patch, true);
    }

    /// Full-value translation patch for a snapshot, cm fields included.
    fn translate_patch(&self, snapshot: &Element, delta: Vec2) -> ElementPatch {
        let ppu = self.config.pixels_per_unit;
        match snapshot {
            Element::Line(line) => ElementPatch {
                position: Some(line.start + delta),
                end: Some(line.end + delta),
                length_cm: Some(line.length() / ppu),
                ..Default::default()
            },
            Element::Rectangle(rect) => ElementPatch {
                position: Some(rect.position + delta),
                ..Default::default()
            },
            Element::Circle(circle) => ElementPatch {
                position: Some(circle.center + delta),
                ..Default::default()
            },
            Element::Text(text) => ElementPatch {
                position: Some(text.position + delta),
                ..Default::default()
            },
            Element::Door(door) => ElementPatch {
                position: Some(door.position + delta),
                ..Default::default()
            },
        }
    }

    /// Scale patch for the active handle, or `None` when the update is
    /// rejected (below the minimum size).
    fn scale_patch(
        &self,
        snapshot: &Element,
        handle: ScaleHandle,
        delta: Vec2,
    ) -> Option<ElementPatch> {
        let ppu = self.config.pixels_per_unit;
        match snapshot {
            Element::Rectangle(rect) => {
                let bounds = rect.bounds();
                let mut x0 = bounds.x0;
                let mut y0 = bounds.y0;
                let mut x1 = bounds.x1;
                let mut y1 = bounds.y1;
                if handle.moves_left() {
                    x0 += delta.x;
                }
                if handle.moves_right() {
                    x1 += delta.x;
                }
                if handle.moves_top() {
                    y0 += delta.y;
                }
                if handle.moves_bottom() {
                    y1 += delta.y;
                }
                let width = x1 - x0;
                let height = y1 - y0;
                if width < MIN_RECT_SIZE || height < MIN_RECT_SIZE {
                    return None;
                }
                Some(ElementPatch {
                    position: Some(Point::new(x0, y0)),
                    width: Some(width),
                    height: Some(height),
                    width_cm: Some(width / ppu),
                    height_cm: Some(height / ppu),
                    ..Default::default()
                })
            }
            Element::Text(text) => {
                let diagonal = (delta.x + delta.y) / 2.0;
                Some(ElementPatch {
                    font_size: Some((text.font_size + diagonal).max(MIN_FONT_SIZE)),
                    ..Default::default()
                })
            }
            // Scaling is undefined for lines, circles and doors.
            _ => None,
        }
    }

    /// Recompute the preview geometry from the fixed origin and the
    /// current point; the element id stays stable across moves.
    fn update_preview(preview: &mut Element, origin: Point, current: Point, ppu: f64) {
        match preview {
            Element::Line(line) => {
                line.start = origin;
                line.end = current;
            }
            Element::Rectangle(rect) => {
                rect.position = Point::new(origin.x.min(current.x), origin.y.min(current.y));
                rect.width = (current.x - origin.x).abs();
                rect.height = (current.y - origin.y).abs();
            }
            Element::Circle(circle) => {
                circle.center = origin;
                circle.radius = (current - origin).hypot();
            }
            Element::Text(_) | Element::Door(_) => {}
        }
        preview.refresh_measurements(ppu);
    }

    // ------------------------------------------------------------------
    // Selection plumbing
    // ------------------------------------------------------------------

    fn replace_selection(&mut self, ids: Vec<ElementId>, host: &mut dyn CanvasHost) {
        self.selection = dedupe(ids);
        host.set_selection(self.selection.clone());
    }

    fn toggle_selection(&mut self, id: ElementId, host: &mut dyn CanvasHost) {
        if self.selection.contains(&id) {
            self.selection.retain(|other| *other != id);
        } else {
            self.selection.push(id);
        }
        host.set_selection(self.selection.clone());
    }

    fn reset_tool(&mut self, host: &mut dyn CanvasHost) {
        self.tool = ToolKind::Select;
        self.door_preview = None;
        host.set_tool(ToolKind::Select);
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
