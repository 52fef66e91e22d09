//! Animation system.
//!
//! [`animation_system`] advances every active [`Animation`] by the frame
//! delta and queues a textured quad for the current cell of each visible
//! one.
//!
//! # Animation Flow
//!
//! 1. Sheet data is defined in [`AnimationStore`](crate::resources::animationstore::AnimationStore)
//! 2. Entities own an [`Animation`] holding copies of the sheets they can play
//! 3. This system moves the cell cursor once the frame duration is exceeded
//! 4. The host flushes the [`RenderQueue`] after the frame
//!
//! # Related
//!
//! - [`crate::components::animation::Animation`] – per-entity playback state
//! - [`crate::systems::render::is_visible`] – the cull shared with static sprites
use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::entityid::EntityId;
use crate::components::position::Position;
use crate::resources::camera::Camera;
use crate::resources::renderqueue::{QuadRequest, RenderQueue, SheetRegion, WHITE};
use crate::resources::worldtime::WorldTime;
use crate::systems::render::is_visible;

/// Advance animation playback and queue the visible frames.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Mutates [`Animation`] cursor and timer.
/// - Pushes one [`QuadRequest`] per visible animation, in creation order.
pub fn animation_system(
    mut query: Query<(&EntityId, &Position, &mut Animation)>,
    camera: Res<Camera>,
    time: Res<WorldTime>,
    mut queue: ResMut<RenderQueue>,
) {
    let mut requests: Vec<QuadRequest> = Vec::new();
    for (id, position, mut animation) in query.iter_mut() {
        if !animation.active {
            continue;
        }
        animation.advance(time.delta);

        let Some(sheet) = animation.current_sheet() else {
            continue;
        };
        if !is_visible(&camera, position, sheet.width, sheet.height) {
            continue;
        }
        requests.push(QuadRequest {
            entity: *id,
            position: position.pos,
            z: position.z,
            rotation: position.rotation,
            width: sheet.width,
            height: sheet.height,
            tint: WHITE,
            asset_id: sheet.asset_id,
            region: Some(SheetRegion {
                cell: animation.cell,
                columns: sheet.columns,
                rows: sheet.rows,
            }),
        });
    }
    requests.sort_unstable_by_key(|request| request.entity);
    queue.requests.extend(requests);
}
