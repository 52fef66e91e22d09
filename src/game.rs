//! Demo scene used by the headless runner.
//!
//! Builds a small platforming level: a player steered by input and followed
//! by the camera, a static ground, a few one-way platforms, some decorations
//! and optionally a pile of randomly placed crates.

use fastrand::Rng;
use glam::Vec2;
use log::info;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::camerafollow::CameraFollow;
use crate::components::entityid::EntityId;
use crate::components::inputcontrolled::InputControlled;
use crate::components::position::Position;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::StaticSprite;
use crate::error::SimResult;
use crate::registry::Registry;
use crate::resources::animationstore::{AnimationStore, SpriteSheet};

// Texture handles the host is expected to map to real images.
pub const ASSET_BLANK: u32 = 0;
pub const ASSET_SKULL: u32 = 1;
pub const ASSET_PLAYER_IDLE: u32 = 10;
pub const ASSET_PLAYER_RUN: u32 = 11;
pub const ASSET_PLAYER_JUMP_UP: u32 = 12;
pub const ASSET_PLAYER_JUMP_DOWN: u32 = 13;
pub const ASSET_PLAYER_DEATH: u32 = 14;

const GRAVITY: f32 = 30.0;
const PLAYER_SIZE: Vec2 = Vec2::new(1.0, 2.0);

/// Sprite sheets of the player character.
pub fn demo_animation_store() -> AnimationStore {
    let mut store = AnimationStore::new();
    store.insert(
        "idle",
        SpriteSheet::new(ASSET_PLAYER_IDLE, 2, 2, 0.5)
            .with_frame_counts(vec![2, 2])
            .with_size(PLAYER_SIZE.x, PLAYER_SIZE.y),
    );
    store.insert(
        "run",
        SpriteSheet::new(ASSET_PLAYER_RUN, 3, 4, 0.05)
            .with_frame_counts(vec![1, 3, 3, 3])
            .with_size(PLAYER_SIZE.x, PLAYER_SIZE.y),
    );
    store.insert(
        "jump_up",
        SpriteSheet::new(ASSET_PLAYER_JUMP_UP, 1, 1, 5.0).with_size(PLAYER_SIZE.x, PLAYER_SIZE.y),
    );
    store.insert(
        "jump_down",
        SpriteSheet::new(ASSET_PLAYER_JUMP_DOWN, 2, 2, 1.0)
            .with_frame_counts(vec![2, 2])
            .with_size(PLAYER_SIZE.x, PLAYER_SIZE.y),
    );
    store.insert(
        "death",
        SpriteSheet::new(ASSET_PLAYER_DEATH, 4, 4, 1.0)
            .with_frame_counts(vec![2, 4, 4, 4])
            .with_size(PLAYER_SIZE.x, PLAYER_SIZE.y)
            .once(),
    );
    store
}

/// Handles of the interesting demo entities.
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub player: EntityId,
    pub ground: EntityId,
    pub platforms: Vec<EntityId>,
    pub crates: Vec<EntityId>,
}

fn spawn_block(
    registry: &mut Registry,
    position: Position,
    collider: BoxCollider,
    asset_id: u32,
) -> SimResult<EntityId> {
    let id = registry.create_entity();
    registry.attach(id, position)?;
    registry.attach(id, RigidBody::new())?;
    registry.attach(id, collider)?;
    registry.attach(id, StaticSprite::new(collider.size.x, collider.size.y, asset_id))?;
    Ok(id)
}

/// Populate `registry` with the demo level. Sheets missing from the
/// registry's store are filled in from [`demo_animation_store`].
pub fn setup(registry: &mut Registry, crates: usize, seed: u64) -> SimResult<DemoScene> {
    {
        let mut store = registry.animation_store_mut();
        for (name, sheet) in demo_animation_store().animations {
            store.animations.entry(name).or_insert(sheet);
        }
    }

    let ground = spawn_block(
        registry,
        Position::fixed(0.0, -4.0),
        BoxCollider::new(40.0, 1.0).with_friction(0.5),
        ASSET_BLANK,
    )?;

    let mut platforms = Vec::new();
    for (x, y, width) in [(-6.0, -1.0, 4.0), (0.0, 1.5, 5.0), (7.0, 3.5, 3.0)] {
        platforms.push(spawn_block(
            registry,
            Position::fixed(x, y),
            BoxCollider::new(width, 0.5).as_platform(),
            ASSET_BLANK,
        )?);
    }

    // Background decorations: drawn, never collide.
    for x in [-12.0, 12.0] {
        let skull = registry.create_entity();
        registry.attach(skull, Position::new(x, -2.5).with_z(-1.0))?;
        registry.attach(skull, StaticSprite::new(1.0, 1.0, ASSET_SKULL))?;
    }

    let mut rng = Rng::with_seed(seed);
    let mut crate_ids = Vec::with_capacity(crates);
    for _ in 0..crates {
        let x = -15.0 + rng.f32() * 30.0;
        let y = 2.0 + rng.f32() * 8.0;
        let size = 0.5 + rng.f32() * 0.75;
        let id = registry.create_entity();
        registry.attach(id, Position::new(x, y).with_rotation((rng.f32() - 0.5) * 0.5))?;
        registry.attach(id, RigidBody::with_physics(GRAVITY, 0.5))?;
        registry.attach(
            id,
            BoxCollider::new(size, size)
                .with_mass(size * size)
                .with_bounce(0.3),
        )?;
        registry.attach(id, StaticSprite::new(size, size, ASSET_BLANK))?;
        crate_ids.push(id);
    }

    let player = registry.create_entity();
    registry.attach(player, Position::new(0.0, 0.0))?;
    registry.attach(player, RigidBody::with_physics(GRAVITY, 2.0))?;
    registry.attach(
        player,
        BoxCollider::new(PLAYER_SIZE.x * 0.8, PLAYER_SIZE.y)
            .with_mass(2.0)
            .with_friction(0.2),
    )?;
    registry.attach(player, InputControlled::new(40.0, 8.0))?;
    registry.attach(player, CameraFollow::new(5.0))?;
    let animation = Animation::from_store(
        registry.animation_store(),
        &["idle", "run", "jump_up", "jump_down", "death"],
    )?;
    registry.attach(player, animation)?;

    info!(
        "Demo scene ready: player {}, {} platforms, {} crates",
        player,
        platforms.len(),
        crate_ids.len()
    );

    Ok(DemoScene {
        player,
        ground,
        platforms,
        crates: crate_ids,
    })
}

/// Pick the player animation matching its velocity.
pub fn animation_for_velocity(velocity: Vec2) -> &'static str {
    if velocity.y > 0.5 {
        "jump_up"
    } else if velocity.y < -0.5 {
        "jump_down"
    } else if velocity.x.abs() > 0.1 {
        "run"
    } else {
        "idle"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::kind::ComponentKind;

    #[test]
    fn test_setup_spawns_everything() {
        let mut registry = Registry::new();
        let scene = setup(&mut registry, 5, 7).unwrap();
        assert_eq!(scene.platforms.len(), 3);
        assert_eq!(scene.crates.len(), 5);
        // ground + 3 platforms + 2 decorations + 5 crates + player
        assert_eq!(registry.entity_count(), 12);
        assert!(registry.has(scene.player, ComponentKind::Movement));
        assert!(registry.get::<Position>(scene.ground).unwrap().is_static);
    }

    #[test]
    fn test_same_seed_same_crates() {
        let mut a = Registry::new();
        let mut b = Registry::new();
        let sa = setup(&mut a, 3, 99).unwrap();
        let sb = setup(&mut b, 3, 99).unwrap();
        for (x, y) in sa.crates.iter().zip(sb.crates.iter()) {
            assert_eq!(a.get::<Position>(*x), b.get::<Position>(*y));
        }
    }

    #[test]
    fn test_animation_for_velocity() {
        assert_eq!(animation_for_velocity(Vec2::ZERO), "idle");
        assert_eq!(animation_for_velocity(Vec2::new(3.0, 0.0)), "run");
        assert_eq!(animation_for_velocity(Vec2::new(0.0, 4.0)), "jump_up");
        assert_eq!(animation_for_velocity(Vec2::new(0.0, -4.0)), "jump_down");
    }
}
