//! Kinematic body component.
//!
//! The [`RigidBody`] component stores linear and angular velocity plus the
//! per-body gravity and drag coefficients consumed by
//! [`physics_system`](crate::systems::physics::physics_system). Whether the
//! body can move at all is decided by the sibling
//! [`Position`](super::position::Position)'s `is_static` flag: static bodies
//! keep a zero velocity no matter what is written here.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Velocity and integration parameters of a body.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `rot_velocity` - Angular velocity in radians per second
/// - `gravity_mod` - Downward acceleration applied every frame (world units/s²)
/// - `drag` - Linear deceleration toward zero, applied per axis (units/s²)
/// - `active` - When false, the physics system leaves the body untouched
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_physics(9.8, 0.5);
/// rb.velocity = Vec2::new(3.0, 0.0);
/// ```
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    #[serde(default)]
    pub velocity: Vec2,
    #[serde(default)]
    pub rot_velocity: f32,
    #[serde(default)]
    pub gravity_mod: f32,
    #[serde(default)]
    pub drag: f32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a RigidBody at rest with no gravity and no drag.
    pub fn new() -> Self {
        Self {
            velocity: Vec2::ZERO,
            rot_velocity: 0.0,
            gravity_mod: 0.0,
            drag: 0.0,
            active: true,
        }
    }

    /// Create a RigidBody with gravity and drag configured.
    pub fn with_physics(gravity_mod: f32, drag: f32) -> Self {
        Self {
            gravity_mod,
            drag,
            ..Self::new()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Zero linear and angular velocity.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.rot_velocity = 0.0;
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity == Vec2::ZERO && self.rot_velocity == 0.0
    }
}
