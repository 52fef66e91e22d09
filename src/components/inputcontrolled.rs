//! Input-controlled movement component.
//!
//! [`InputControlled`] marks an entity whose sibling
//! [`RigidBody`](super::rigidbody::RigidBody) is steered by the four logical
//! directions of [`InputState`](crate::resources::input::InputState). The
//! [`movement_system`](crate::systems::movement::movement_system) reads it
//! every frame.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Acceleration-based steering.
///
/// While a direction is held, velocity on that axis grows by
/// `acceleration * dt` until it reaches `max_speed`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputControlled {
    /// Velocity gained per second while a direction is held.
    pub acceleration: f32,
    /// Per-axis speed limit for input-driven acceleration.
    pub max_speed: f32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl InputControlled {
    pub fn new(acceleration: f32, max_speed: f32) -> Self {
        Self {
            acceleration,
            max_speed,
            active: true,
        }
    }
}
