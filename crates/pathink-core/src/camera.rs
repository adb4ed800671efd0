//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Camera manages the view transform for the canvas.
///
/// It handles panning (translation) and zooming (scaling), converting
/// between screen coordinates and world coordinates. Hit tolerances are
/// specified in screen pixels and divided by the zoom to stay a constant
/// apparent size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan).
    pub offset: Vec2,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 10.0,
        }
    }
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the affine transform converting world to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Get the inverse transform for input handling.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan the camera by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Scale a screen-pixel tolerance into world units.
    pub fn world_tolerance(&self, screen_tolerance: f64) -> f64 {
        screen_tolerance / self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_world_round_trip() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(40.0, -10.0));
        camera.set_zoom(2.0);

        let world = Point::new(123.0, -45.0);
        let screen = camera.world_to_screen(world);
        let back = camera.screen_to_world(screen);

        assert!((back.x - world.x).abs() < 1e-9);
        assert!((back.y - world.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = Camera::new();
        camera.set_zoom(100.0);
        assert_eq!(camera.zoom, camera.max_zoom);
        camera.set_zoom(0.0);
        assert_eq!(camera.zoom, camera.min_zoom);
    }

    #[test]
    fn test_tolerance_scales_inversely_with_zoom() {
        let mut camera = Camera::new();
        camera.set_zoom(3.0);
        assert!((camera.world_tolerance(3.0) - 1.0).abs() < 1e-12);
    }
}
