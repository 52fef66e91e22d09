//! Simulation systems.
//!
//! The registry runs the per-entity systems in a fixed chain every frame:
//! movement, physics, collider, camera follow, animation, static rendering.
//! Time and input are folded into their resources just before the chain.
//!
//! Submodules overview
//! - [`animation`] – advance sprite-sheet cursors and queue animated quads
//! - [`camerafollow`] – ease the shared camera toward followed entities
//! - [`collider`] – oriented-rectangle overlap detection and response
//! - [`input`] – fold the host's input snapshot into [`crate::resources::input::InputState`]
//! - [`movement`] – translate held directions into velocity
//! - [`physics`] – gravity, drag and velocity integration
//! - [`render`] – queue static sprites and the shared visibility cull
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod camerafollow;
pub mod collider;
pub mod input;
pub mod movement;
pub mod physics;
pub mod render;
pub mod time;
