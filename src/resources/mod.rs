//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution. They replace any global game object:
//! every system that needs the camera, the clock or the input asks for the
//! resource explicitly.
//!
//! Overview
//! - `animationstore` – sprite-sheet definitions reused across entities
//! - `camera` – shared 2D camera and the visible world rectangle
//! - `contacts` – collider contacts resolved during the current frame
//! - `gameconfig` – INI-backed tuning of collisions, camera and stepping
//! - `input` – per-frame state of the four logical directions
//! - `renderqueue` – quad draw requests waiting for the host renderer
//! - `worldtime` – simulation time and delta
pub mod animationstore;
pub mod camera;
pub mod contacts;
pub mod gameconfig;
pub mod input;
pub mod renderqueue;
pub mod worldtime;
