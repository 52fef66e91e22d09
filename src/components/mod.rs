//! ECS components for entities.
//!
//! Every entity owns at most one component of each kind in the closed set
//! described by [`kind::ComponentKind`]. Components are plain data; the
//! systems in [`crate::systems`] give them behavior.
//!
//! Submodules overview:
//! - [`animation`] – sprite-sheet playback state and animation switching
//! - [`boxcollider`] – oriented rectangular collider with mass and bounce
//! - [`camerafollow`] – makes the shared camera chase an entity
//! - [`entityid`] – registry-assigned, monotonically increasing identity
//! - [`inputcontrolled`] – acceleration-based steering from logical input
//! - [`kind`] – component kinds, attachment rules and tagged values
//! - [`position`] – world position, depth, rotation and the static flag
//! - [`rigidbody`] – velocity, gravity and drag of a body
//! - [`sprite`] – non-animated sprite

pub mod animation;
pub mod boxcollider;
pub mod camerafollow;
pub mod entityid;
pub mod inputcontrolled;
pub mod kind;
pub mod position;
pub mod rigidbody;
pub mod sprite;
