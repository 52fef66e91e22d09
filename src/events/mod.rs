//! Event types and observers used by the simulation.
//!
//! Events provide a decoupled way for systems to communicate without direct
//! dependencies.
//!
//! Submodules:
//! - [`collision`] – notifications emitted by the collider system
pub mod collision;
