//! Oriented rectangular collider.
//!
//! A [`BoxCollider`] is a rectangle centered at `offset` (local space) that
//! turns with its entity's [`Position`]. World-space geometry is produced on
//! demand by [`BoxCollider::corners`] and [`BoxCollider::center`]; the
//! collider system never caches it between pairs.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Component, Serialize, Deserialize)]
pub struct BoxCollider {
    /// Full width and height.
    pub size: Vec2,
    /// Local offset of the rectangle center from the entity pivot.
    #[serde(default)]
    pub offset: Vec2,
    #[serde(default = "default_mass")]
    pub mass: f32,
    /// Restitution applied to the normal component of the velocity.
    #[serde(default)]
    pub bounce: f32,
    /// Only used when the friction hook is enabled in the config.
    #[serde(default)]
    pub friction: f32,
    /// One-way collider: blocks bodies coming from above only.
    #[serde(default)]
    pub platform: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_mass() -> f32 {
    1.0
}

fn default_active() -> bool {
    true
}

impl BoxCollider {
    /// Create a BoxCollider with given size, unit mass and no bounce.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
            mass: 1.0,
            bounce: 0.0,
            friction: 0.0,
            platform: false,
            active: true,
        }
    }

    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_bounce(mut self, bounce: f32) -> Self {
        self.bounce = bounce;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn as_platform(mut self) -> Self {
        self.platform = true;
        self
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Length of the rectangle's diagonal, used as a bounding radius.
    pub fn diagonal(&self) -> f32 {
        self.size.length()
    }

    /// World-space center of the rectangle.
    pub fn center(&self, position: &Position) -> Vec2 {
        position.to_world(self.offset)
    }

    /// World-space corners in winding order: top-left, top-right,
    /// bottom-right, bottom-left. Edge `i` runs from corner `i` to `i + 1`.
    pub fn corners(&self, position: &Position) -> [Vec2; 4] {
        let h = self.half_extents();
        let o = self.offset;
        [
            position.to_world(Vec2::new(o.x - h.x, o.y + h.y)),
            position.to_world(Vec2::new(o.x + h.x, o.y + h.y)),
            position.to_world(Vec2::new(o.x + h.x, o.y - h.y)),
            position.to_world(Vec2::new(o.x - h.x, o.y - h.y)),
        ]
    }

    /// Unrotated bottom edge height in world space.
    pub fn bottom(&self, position: &Position) -> f32 {
        position.pos.y - self.size.y * 0.5 + self.offset.y
    }

    /// Unrotated top edge height in world space.
    pub fn top(&self, position: &Position) -> f32 {
        position.pos.y + self.size.y * 0.5 + self.offset.y
    }
}
