use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Makes the shared [`Camera`](crate::resources::camera::Camera) chase this entity.
///
/// `speed` is the interpolation rate per second: each frame the camera covers
/// `speed * dt` of the remaining distance on each axis.
#[derive(Component, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraFollow {
    pub speed: f32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CameraFollow {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            active: true,
        }
    }
}
