//! World-space placement of an entity.
//!
//! [`Position`] carries the pivot of the entity, a depth value used only for
//! visibility culling, the rotation in radians and the `is_static` flag that
//! marks immovable bodies. Every oriented-geometry computation goes through
//! [`Position::rotate`] and [`Position::to_world`].

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub pos: Vec2,
    /// Depth. Sprites are only drawn while `z` is in front of the camera.
    #[serde(default)]
    pub z: f32,
    /// Rotation in radians, counter-clockwise.
    #[serde(default)]
    pub rotation: f32,
    /// Immovable body: physics zeroes its velocity and collisions never push it.
    #[serde(default, rename = "static")]
    pub is_static: bool,
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            z: 0.0,
            rotation: 0.0,
            is_static: false,
        }
    }

    /// Same as [`Position::new`] but immovable.
    pub fn fixed(x: f32, y: f32) -> Self {
        Self {
            is_static: true,
            ..Self::new(x, y)
        }
    }

    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    /// Rotate a local offset by this position's rotation.
    pub fn rotate(&self, local: Vec2) -> Vec2 {
        let (sin, cos) = self.rotation.sin_cos();
        Vec2::new(cos * local.x - sin * local.y, sin * local.x + cos * local.y)
    }

    /// Local offset to world coordinates: rotate, then translate.
    pub fn to_world(&self, local: Vec2) -> Vec2 {
        self.pos + self.rotate(local)
    }
}
