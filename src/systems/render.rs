//! Static sprite draw requests and the visibility cull shared with the
//! animation system.
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::entityid::EntityId;
use crate::components::position::Position;
use crate::components::sprite::StaticSprite;
use crate::resources::camera::{Camera, Rect};
use crate::resources::renderqueue::{QuadRequest, RenderQueue, WHITE};

/// A `width` x `height` quad centered on `position` is drawn only when it
/// overlaps the camera's visible rectangle and sits in front of the far
/// plane.
pub fn is_visible(camera: &Camera, position: &Position, width: f32, height: f32) -> bool {
    if !camera.in_front(position.z) {
        return false;
    }
    Rect::from_center(position.pos, Vec2::new(width, height)).intersects(&camera.visible_rect())
}

/// Queue one opaque, untinted quad per visible [`StaticSprite`], in creation
/// order.
pub fn static_rendering_system(
    query: Query<(&EntityId, &Position, &StaticSprite)>,
    camera: Res<Camera>,
    mut queue: ResMut<RenderQueue>,
) {
    let mut requests: Vec<QuadRequest> = query
        .iter()
        .filter(|(_, position, sprite)| {
            sprite.active && is_visible(&camera, position, sprite.width, sprite.height)
        })
        .map(|(id, position, sprite)| QuadRequest {
            entity: *id,
            position: position.pos,
            z: position.z,
            rotation: position.rotation,
            width: sprite.width,
            height: sprite.height,
            tint: WHITE,
            asset_id: sprite.asset_id,
            region: None,
        })
        .collect();
    requests.sort_unstable_by_key(|request| request.entity);
    queue.requests.extend(requests);
}
