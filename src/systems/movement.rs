//! Input-driven steering.
//!
//! For each entity with [`InputControlled`] and a [`RigidBody`], a held
//! direction adds `acceleration * dt` to the velocity on its axis as long as
//! the speed on that axis is below `max_speed`; the result is clamped to
//! `±max_speed`. Up wins over down and right wins over left when both are
//! held. Axes with no direction held are left to physics.
use bevy_ecs::prelude::*;

use crate::components::inputcontrolled::InputControlled;
use crate::components::position::Position;
use crate::components::rigidbody::RigidBody;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Push `value` toward `sign * max_speed` by `step`, clamped to the limit.
fn steer(value: f32, sign: f32, step: f32, max_speed: f32) -> f32 {
    let value = if value * sign < max_speed {
        value + sign * step
    } else {
        value
    };
    value.clamp(-max_speed, max_speed)
}

pub fn movement_system(
    mut query: Query<(&InputControlled, &mut RigidBody), With<Position>>,
    input: Res<InputState>,
    time: Res<WorldTime>,
) {
    let vertical = if input.up.active {
        Some(1.0)
    } else if input.down.active {
        Some(-1.0)
    } else {
        None
    };
    let horizontal = if input.right.active {
        Some(1.0)
    } else if input.left.active {
        Some(-1.0)
    } else {
        None
    };
    if vertical.is_none() && horizontal.is_none() {
        return;
    }

    for (controlled, mut rigidbody) in query.iter_mut() {
        if !controlled.active {
            continue;
        }
        let step = controlled.acceleration * time.delta;
        let max_speed = controlled.max_speed.abs();
        if let Some(sign) = horizontal {
            rigidbody.velocity.x = steer(rigidbody.velocity.x, sign, step, max_speed);
        }
        if let Some(sign) = vertical {
            rigidbody.velocity.y = steer(rigidbody.velocity.y, sign, step, max_speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steer_accelerates_and_clamps() {
        assert_eq!(steer(0.0, 1.0, 2.0, 5.0), 2.0);
        assert_eq!(steer(4.0, 1.0, 2.0, 5.0), 5.0);
        assert_eq!(steer(5.0, 1.0, 2.0, 5.0), 5.0);
        assert_eq!(steer(0.0, -1.0, 2.0, 5.0), -2.0);
    }

    #[test]
    fn test_steer_clamps_external_speed() {
        // Knocked back faster than the limit: input clamps it.
        assert_eq!(steer(-9.0, 1.0, 1.0, 5.0), -5.0);
    }
}
