//! Moonblade headless runner.
//!
//! Builds a world from a JSON scene (or the built-in demo level), steps it a
//! fixed number of frames with a constant input and logs what a renderer
//! would have drawn.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --frames 300 --hold right --crates 20
//! RUST_LOG=debug cargo run -- --scene assets/scene.json --animations assets/animations.json
//! ```

use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, info};

use moonblade::components::animation::Animation;
use moonblade::components::position::Position;
use moonblade::components::rigidbody::RigidBody;
use moonblade::error::SimResult;
use moonblade::game;
use moonblade::registry::Registry;
use moonblade::resources::animationstore::AnimationStore;
use moonblade::resources::gameconfig::GameConfig;
use moonblade::resources::input::{Direction, InputSnapshot};
use moonblade::resources::renderqueue::{QuadRenderer, QuadRequest};
use moonblade::scene::SceneData;

/// Moonblade 2D simulation
#[derive(Parser)]
#[command(version, about = "Headless runner for the Moonblade 2D simulation core")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// JSON scene to load instead of the demo level.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// JSON sprite-sheet definitions to load into the animation store.
    #[arg(long, value_name = "PATH")]
    animations: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Frame step in seconds. Defaults to `fixed_dt` from the config.
    #[arg(long)]
    dt: Option<f32>,

    /// Direction held for the whole run (up, down, left, right). Repeatable.
    #[arg(long = "hold", value_name = "DIRECTION", value_parser = parse_direction)]
    hold: Vec<Direction>,

    /// Random crates dropped into the demo level.
    #[arg(long, default_value_t = 0)]
    crates: usize,

    /// Seed for crate placement.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Zoom change applied every frame. Steps landing outside (0.1, 2.5) are ignored.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    zoom_step: f32,
}

fn parse_direction(value: &str) -> Result<Direction, String> {
    Direction::parse(value).ok_or_else(|| format!("unknown direction '{}'", value))
}

/// Counts draw requests instead of drawing them.
#[derive(Default)]
struct CountingRenderer {
    quads: usize,
    last_frame: usize,
}

impl QuadRenderer for CountingRenderer {
    fn prepare_quad(&mut self, request: &QuadRequest) {
        self.quads += 1;
        self.last_frame += 1;
        log::trace!(
            "quad {} asset={} at {:?} {}x{}",
            request.entity,
            request.asset_id,
            request.position,
            request.width,
            request.height
        );
    }
}

fn run(cli: Cli) -> SimResult<()> {
    let config = GameConfig::load_or_default(&cli.config);
    let dt = cli.dt.unwrap_or(config.fixed_dt);
    let mut registry = Registry::with_config(config);

    if let Some(path) = &cli.animations {
        let store = AnimationStore::load_from_file(path)?;
        *registry.animation_store_mut() = store;
    }

    let player = match &cli.scene {
        Some(path) => {
            let spawned = SceneData::load_from_file(path)?.spawn(&mut registry)?;
            spawned.get("player")
        }
        None => Some(game::setup(&mut registry, cli.crates, cli.seed)?.player),
    };

    let snapshot = InputSnapshot::pressed(&cli.hold);
    let mut renderer = CountingRenderer::default();
    let mut contacts = 0usize;

    info!("Running {} frames at dt={}", cli.frames, dt);
    for frame in 0..cli.frames {
        registry.poll_input(&snapshot);
        if cli.zoom_step != 0.0 && !registry.camera_mut().zoom_by(cli.zoom_step) {
            debug!("zoom step {} ignored at zoom {}", cli.zoom_step, registry.camera().zoom);
        }
        registry.update(dt);
        contacts += registry.contacts().contacts.len();

        if let Some(player) = player {
            let velocity = registry.get::<RigidBody>(player).map(|rb| rb.velocity);
            let animated = registry.get::<Animation>(player).is_some();
            if let (Some(velocity), true) = (velocity, animated) {
                let wanted = game::animation_for_velocity(velocity);
                if let Err(e) = registry.set_animation(player, wanted) {
                    debug!("{}", e);
                }
            }
        }

        renderer.last_frame = 0;
        registry.flush_render_queue(&mut renderer);
        if frame % 60 == 0 {
            let camera = registry.camera();
            info!(
                "frame {}: camera=({:.2}, {:.2}) quads={} contacts so far={}",
                frame, camera.position.x, camera.position.y, renderer.last_frame, contacts
            );
        }
    }

    if let Some(player) = player {
        if let Some(position) = registry.get::<Position>(player) {
            info!("Player ended at ({:.3}, {:.3})", position.pos.x, position.pos.y);
        }
    }
    info!(
        "Simulated {} frames: {} quads, {} contacts",
        cli.frames, renderer.quads, contacts
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}
