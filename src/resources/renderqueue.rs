//! Draw requests produced by the rendering systems.
//!
//! The simulation does not own a GPU. The animation and static rendering
//! systems push one [`QuadRequest`] per visible sprite into the
//! [`RenderQueue`]; the host drains the queue once per frame and hands each
//! request to its [`QuadRenderer`].

use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::entityid::EntityId;
use crate::resources::animationstore::SheetCell;

/// Opaque, untinted.
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Sub-rectangle of a sprite sheet to sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetRegion {
    pub cell: SheetCell,
    pub columns: u32,
    pub rows: u32,
}

/// One textured quad to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadRequest {
    pub entity: EntityId,
    /// Quad center in world space.
    pub position: Vec2,
    pub z: f32,
    pub rotation: f32,
    pub width: f32,
    pub height: f32,
    pub tint: [f32; 4],
    pub asset_id: u32,
    /// `None` samples the whole texture.
    pub region: Option<SheetRegion>,
}

/// Host-side consumer of quad requests.
pub trait QuadRenderer {
    fn prepare_quad(&mut self, request: &QuadRequest);
}

#[derive(Resource, Debug, Default, Clone)]
pub struct RenderQueue {
    pub requests: Vec<QuadRequest>,
}

impl RenderQueue {
    pub fn push(&mut self, request: QuadRequest) {
        self.requests.push(request);
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn clear(&mut self) {
        self.requests.clear();
    }

    /// Hand every pending request to `renderer` in emission order and empty
    /// the queue. Returns the number of quads flushed.
    pub fn flush(&mut self, renderer: &mut dyn QuadRenderer) -> usize {
        let count = self.requests.len();
        for request in self.requests.drain(..) {
            renderer.prepare_quad(&request);
        }
        count
    }
}
