//! Input update.
//!
//! [`update_input_state`] folds the snapshot handed over by the host into
//! [`InputState`] before the frame's systems run, so every system in the
//! frame sees the same directions.
use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::input::{InputSnapshot, InputSource, InputState};

pub fn update_input_state(world: &mut World, snapshot: InputSnapshot) {
    let mut input = world.resource_mut::<InputState>();
    input.apply(snapshot);
    trace!("input {:?}", snapshot);
}

/// Poll `source` and fold the result into [`InputState`].
pub fn poll_input_source(world: &mut World, source: &dyn InputSource) {
    update_input_state(world, source.snapshot());
}
