//! Velocity integration.
//!
//! Per active, non-static body and frame: gravity lowers the vertical
//! velocity, drag moves every velocity component toward zero without crossing
//! it, then position and rotation advance by velocity times `dt`. Static
//! bodies have their velocities zeroed every frame.
use bevy_ecs::prelude::*;

use crate::components::position::Position;
use crate::components::rigidbody::RigidBody;
use crate::geometry::approach_zero;
use crate::resources::worldtime::WorldTime;

pub fn physics_system(mut query: Query<(&mut Position, &mut RigidBody)>, time: Res<WorldTime>) {
    let dt = time.delta;
    for (mut position, mut rigidbody) in query.iter_mut() {
        if position.is_static {
            if !rigidbody.is_at_rest() {
                rigidbody.stop();
            }
            continue;
        }
        if !rigidbody.active {
            continue;
        }

        rigidbody.velocity.y -= rigidbody.gravity_mod * dt;

        let drag = rigidbody.drag * dt;
        rigidbody.velocity.x = approach_zero(rigidbody.velocity.x, drag);
        rigidbody.velocity.y = approach_zero(rigidbody.velocity.y, drag);
        rigidbody.rot_velocity = approach_zero(rigidbody.rot_velocity, drag);

        let velocity = rigidbody.velocity;
        let rot_velocity = rigidbody.rot_velocity;
        position.pos += velocity * dt;
        position.rotation += rot_velocity * dt;
    }
}
