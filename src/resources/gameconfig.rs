//! Simulation configuration resource.
//!
//! Manages tuning values loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [physics]
//! platform_leeway = 1.0
//! determinant_epsilon = 0.000001
//! friction = false
//!
//! [camera]
//! zoom = 0.01
//! z = 1.0
//! viewport_width = 1280
//! viewport_height = 960
//!
//! [simulation]
//! fixed_dt = 0.0166667
//! time_scale = 1.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::error::{SimError, SimResult};
use crate::resources::camera::Camera;

/// Default safe values for startup
const DEFAULT_PLATFORM_LEEWAY: f32 = 1.0;
const DEFAULT_DETERMINANT_EPSILON: f32 = 1e-6;
const DEFAULT_FRICTION: bool = false;
const DEFAULT_ZOOM: f32 = 0.01;
const DEFAULT_CAMERA_Z: f32 = 1.0;
const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
const DEFAULT_VIEWPORT_HEIGHT: u32 = 960;
const DEFAULT_FIXED_DT: f32 = 1.0 / 60.0;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Simulation configuration resource.
///
/// Stores collision tuning, the initial camera and the stepping parameters.
/// The registry copies the collision values into the collider system's
/// settings when it is built.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// How far below a platform's top a body's bottom may be and still land.
    pub platform_leeway: f32,
    /// Segment determinants closer to zero than this count as parallel.
    pub determinant_epsilon: f32,
    /// Enable the tangential friction response on contacts.
    pub friction: bool,
    /// Initial camera zoom.
    pub zoom: f32,
    /// Camera far plane.
    pub camera_z: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Step used by the headless runner when no `--dt` is given.
    pub fixed_dt: f32,
    pub time_scale: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            platform_leeway: DEFAULT_PLATFORM_LEEWAY,
            determinant_epsilon: DEFAULT_DETERMINANT_EPSILON,
            friction: DEFAULT_FRICTION,
            zoom: DEFAULT_ZOOM,
            camera_z: DEFAULT_CAMERA_Z,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            fixed_dt: DEFAULT_FIXED_DT,
            time_scale: DEFAULT_TIME_SCALE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load from `path`, falling back to defaults (with a warning) when the
    /// file is missing or unreadable.
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let mut config = Self::with_path(path);
        if let Err(e) = config.load_from_file() {
            warn!("{}; using default configuration", e);
        }
        config
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values. Values that do
    /// not parse are skipped with a warning.
    pub fn load_from_file(&mut self) -> SimResult<()> {
        let mut config = Ini::new();
        config.load(&self.config_path).map_err(|e| {
            SimError::Config(format!(
                "failed to load {}: {}",
                self.config_path.display(),
                e
            ))
        })?;

        let float = |section: &str, key: &str| match config.getfloat(section, key) {
            Ok(value) => value.map(|v| v as f32),
            Err(e) => {
                warn!("Skipping [{}] {}: {}", section, key, e);
                None
            }
        };

        // [physics] section
        if let Some(leeway) = float("physics", "platform_leeway") {
            self.platform_leeway = leeway;
        }
        if let Some(epsilon) = float("physics", "determinant_epsilon") {
            self.determinant_epsilon = epsilon.abs();
        }
        if let Some(friction) = config.getbool("physics", "friction").ok().flatten() {
            self.friction = friction;
        }

        // [camera] section
        if let Some(zoom) = float("camera", "zoom") {
            self.zoom = zoom;
        }
        if let Some(z) = float("camera", "z") {
            self.camera_z = z;
        }
        if let Some(width) = config.getuint("camera", "viewport_width").ok().flatten() {
            self.viewport_width = width as u32;
        }
        if let Some(height) = config.getuint("camera", "viewport_height").ok().flatten() {
            self.viewport_height = height as u32;
        }

        // [simulation] section
        if let Some(dt) = float("simulation", "fixed_dt") {
            if dt > 0.0 {
                self.fixed_dt = dt;
            } else {
                warn!("Ignoring non-positive fixed_dt {}", dt);
            }
        }
        if let Some(scale) = float("simulation", "time_scale") {
            self.time_scale = scale;
        }

        info!(
            "Loaded config: leeway={}, epsilon={}, friction={}, camera {}x{} zoom={} z={}, dt={}, time_scale={}",
            self.platform_leeway,
            self.determinant_epsilon,
            self.friction,
            self.viewport_width,
            self.viewport_height,
            self.zoom,
            self.camera_z,
            self.fixed_dt,
            self.time_scale
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> SimResult<()> {
        let mut config = Ini::new();

        // [physics] section
        config.set("physics", "platform_leeway", Some(self.platform_leeway.to_string()));
        config.set(
            "physics",
            "determinant_epsilon",
            Some(self.determinant_epsilon.to_string()),
        );
        config.set("physics", "friction", Some(self.friction.to_string()));

        // [camera] section
        config.set("camera", "zoom", Some(self.zoom.to_string()));
        config.set("camera", "z", Some(self.camera_z.to_string()));
        config.set("camera", "viewport_width", Some(self.viewport_width.to_string()));
        config.set("camera", "viewport_height", Some(self.viewport_height.to_string()));

        // [simulation] section
        config.set("simulation", "fixed_dt", Some(self.fixed_dt.to_string()));
        config.set("simulation", "time_scale", Some(self.time_scale.to_string()));

        config.write(&self.config_path)?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Camera described by the `[camera]` section.
    pub fn camera(&self) -> Camera {
        let mut camera = Camera::new(
            self.viewport_width as f32,
            self.viewport_height as f32,
            self.zoom,
        );
        camera.position.z = self.camera_z;
        camera
    }
}
