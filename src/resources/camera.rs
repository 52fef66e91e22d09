//! Shared 2D camera resource.
//!
//! Replaces a global "current game" object: the camera position, zoom and
//! viewport size live here and every system that needs them reads the
//! resource. [`Camera::visible_rect`] gives the world rectangle used for
//! culling by the rendering systems.

use bevy_ecs::prelude::Resource;
use glam::{Vec2, Vec3};

pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 2.5;

/// Axis-aligned world rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle of `size` centered on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap: touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// `x`/`y` are the look-at point; `z` is the far plane for depth culling.
    pub position: Vec3,
    pub zoom: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            zoom: 0.01,
            viewport_width: 1280.0,
            viewport_height: 960.0,
        }
    }
}

impl Camera {
    pub fn new(viewport_width: f32, viewport_height: f32, zoom: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            zoom,
            ..Self::default()
        }
    }

    pub fn target(&self) -> Vec2 {
        self.position.truncate()
    }

    /// World rectangle considered visible. Extends `viewport * zoom` on each
    /// side of the camera, which leaves a margin around the drawn area.
    pub fn visible_rect(&self) -> Rect {
        let extent = Vec2::new(
            self.viewport_width * self.zoom,
            self.viewport_height * self.zoom,
        );
        let center = self.target();
        Rect {
            min: center - extent,
            max: center + extent,
        }
    }

    /// Sprites at or behind the far plane are culled.
    pub fn in_front(&self, z: f32) -> bool {
        z < self.position.z
    }

    /// Change zoom by `amount`, ignoring steps whose result falls outside
    /// `(MIN_ZOOM, MAX_ZOOM)`.
    pub fn zoom_by(&mut self, amount: f32) -> bool {
        let zoom = self.zoom + amount;
        if zoom > MIN_ZOOM && zoom < MAX_ZOOM {
            self.zoom = zoom;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_rect_uses_zoom() {
        let mut cam = Camera::new(100.0, 50.0, 0.5);
        cam.position = Vec3::new(10.0, 0.0, 1.0);
        let rect = cam.visible_rect();
        assert_eq!(rect.min, Vec2::new(-40.0, -25.0));
        assert_eq!(rect.max, Vec2::new(60.0, 25.0));
    }

    #[test]
    fn test_rect_intersects_is_strict() {
        let a = Rect::from_center(Vec2::ZERO, Vec2::new(2.0, 2.0));
        let b = Rect::from_center(Vec2::new(2.0, 0.0), Vec2::new(2.0, 2.0));
        let c = Rect::from_center(Vec2::new(1.5, 0.5), Vec2::new(2.0, 2.0));
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_in_front() {
        let cam = Camera::default();
        assert!(cam.in_front(0.0));
        assert!(!cam.in_front(1.0));
    }

    #[test]
    fn test_zoom_by_respects_limits() {
        let mut cam = Camera::new(100.0, 100.0, 1.0);
        assert!(cam.zoom_by(1.0));
        assert!((cam.zoom - 2.0).abs() < 1e-6);
        assert!(!cam.zoom_by(1.0));
        assert!((cam.zoom - 2.0).abs() < 1e-6);
        assert!(!cam.zoom_by(-1.95));
    }
}
