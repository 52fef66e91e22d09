use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Non-animated sprite drawn centered on the entity position.
///
/// `asset_id` is the opaque texture handle given by the host's asset loader;
/// `width` and `height` are world units.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaticSprite {
    pub width: f32,
    pub height: f32,
    pub asset_id: u32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl StaticSprite {
    pub fn new(width: f32, height: f32, asset_id: u32) -> Self {
        Self {
            width,
            height,
            asset_id,
            active: true,
        }
    }
}
