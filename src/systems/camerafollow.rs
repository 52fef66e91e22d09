use bevy_ecs::prelude::*;

use crate::components::camerafollow::CameraFollow;
use crate::components::entityid::EntityId;
use crate::components::position::Position;
use crate::resources::camera::Camera;
use crate::resources::worldtime::WorldTime;

/// Move the camera a fraction `speed * dt` of the way toward each follower.
///
/// Followers are applied in creation order, so with several followers the
/// last one created pulls hardest.
pub fn camera_follow_system(
    query: Query<(&EntityId, &Position, &CameraFollow)>,
    mut camera: ResMut<Camera>,
    time: Res<WorldTime>,
) {
    let mut followers: Vec<(EntityId, Position, CameraFollow)> = query
        .iter()
        .filter(|(_, _, follow)| follow.active)
        .map(|(id, position, follow)| (*id, *position, *follow))
        .collect();
    if followers.is_empty() {
        return;
    }
    followers.sort_unstable_by_key(|(id, _, _)| *id);

    for (_, position, follow) in followers {
        let k = (follow.speed * time.delta).clamp(0.0, 1.0);
        let target = camera.target().lerp(position.pos, k);
        camera.position.x = target.x;
        camera.position.y = target.y;
    }
}
