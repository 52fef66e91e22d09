//! Moonblade simulation core.
//!
//! A deterministic 2D entity simulation built on `bevy_ecs`: kinematic
//! bodies, oriented-rectangle collisions with mass-weighted response,
//! input-driven steering, a following camera and sprite-sheet animation.
//! Rendering, input devices and asset decoding stay with the host, which
//! talks to the core through [`registry::Registry`],
//! [`resources::input::InputSource`] and [`resources::renderqueue::QuadRenderer`].

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod geometry;
pub mod registry;
pub mod resources;
pub mod scene;
pub mod systems;
