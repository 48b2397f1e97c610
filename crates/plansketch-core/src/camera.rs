//! Camera module for pan/zoom view transforms.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum allowed zoom scale.
pub const MIN_SCALE: f64 = 0.1;
/// Maximum allowed zoom scale.
pub const MAX_SCALE: f64 = 5.0;

/// Wheel-zoom step factors (zoom out / zoom in per wheel notch).
const ZOOM_OUT_FACTOR: f64 = 0.9;
const ZOOM_IN_FACTOR: f64 = 1.1;

/// Camera manages the view transform for the canvas.
///
/// Screen coordinates relate to world coordinates by
/// `screen = world * scale + offset`. The viewport never rotates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan) in screen pixels.
    pub offset: Vec2,
    /// Current zoom scale.
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Camera {
    /// Create a new camera at identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        Point::new(
            (screen_point.x - self.offset.x) / self.scale,
            (screen_point.y - self.offset.y) / self.scale,
        )
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        Point::new(
            world_point.x * self.scale + self.offset.x,
            world_point.y * self.scale + self.offset.y,
        )
    }

    /// Pan the camera by a delta in screen coordinates (scale-independent).
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Apply one wheel notch of zoom, keeping the world point under the
    /// cursor fixed on screen.
    ///
    /// A positive `wheel_delta` zooms out, a negative one zooms in.
    pub fn wheel_zoom(&mut self, cursor_screen: Point, wheel_delta: f64) {
        let factor = if wheel_delta > 0.0 {
            ZOOM_OUT_FACTOR
        } else {
            ZOOM_IN_FACTOR
        };
        let new_scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        // Rescale the offset so the cursor's world point stays put:
        // new_offset = cursor - (cursor - offset) * (new_scale / scale)
        let ratio = new_scale / self.scale;
        self.offset = Vec2::new(
            cursor_screen.x - (cursor_screen.x - self.offset.x) * ratio,
            cursor_screen.y - (cursor_screen.y - self.offset.y) * ratio,
        );
        self.scale = new_scale;
    }

    /// Reset camera to default position and scale.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0;
    }

    /// Fit the camera to show the given world bounds inside the viewport.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }

        let padded = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );

        let scale_x = padded.width / bounds.width();
        let scale_y = padded.height / bounds.height();
        self.scale = scale_x.min(scale_y).clamp(MIN_SCALE, MAX_SCALE);

        let bounds_center = bounds.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.offset = Vec2::new(
            viewport_center.x - bounds_center.x * self.scale,
            viewport_center.y - bounds_center.y * self.scale,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_mapping() {
        let camera = Camera::new();
        let screen = Point::new(100.0, 200.0);
        let world = camera.screen_to_world(screen);
        assert!((world.x - screen.x).abs() < f64::EPSILON);
        assert!((world.y - screen.y).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_offset() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(50.0, 100.0);
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_scale() {
        let mut camera = Camera::new();
        camera.scale = 2.0;
        let world = camera.screen_to_world(Point::new(100.0, 200.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(30.0, -20.0);
        camera.scale = 1.5;

        let original = Point::new(123.0, 456.0);
        let back = camera.world_to_screen(camera.screen_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_wheel_zoom_anchors_cursor() {
        let mut camera = Camera::new();
        camera.offset = Vec2::new(40.0, -10.0);
        camera.scale = 1.3;

        let cursor = Point::new(320.0, 240.0);
        let before = camera.screen_to_world(cursor);
        camera.wheel_zoom(cursor, -1.0);
        let after = camera.screen_to_world(cursor);

        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_zoom_steps() {
        let mut camera = Camera::new();
        camera.wheel_zoom(Point::ZERO, -1.0);
        assert!((camera.scale - 1.1).abs() < 1e-12);
        camera.wheel_zoom(Point::ZERO, 1.0);
        assert!((camera.scale - 0.99).abs() < 1e-12);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.wheel_zoom(Point::ZERO, 1.0);
        }
        assert!((camera.scale - MIN_SCALE).abs() < f64::EPSILON);

        for _ in 0..100 {
            camera.wheel_zoom(Point::ZERO, -1.0);
        }
        assert!((camera.scale - MAX_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pan_is_scale_independent() {
        let mut camera = Camera::new();
        camera.scale = 3.0;
        camera.pan(Vec2::new(10.0, 20.0));
        assert!((camera.offset.x - 10.0).abs() < f64::EPSILON);
        assert!((camera.offset.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_to_bounds() {
        let mut camera = Camera::new();
        camera.fit_to_bounds(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Size::new(800.0, 600.0),
            50.0,
        );
        // Limited by viewport height: (600 - 100) / 100 = 5.0
        assert!((camera.scale - 5.0).abs() < 1e-9);
    }
}
