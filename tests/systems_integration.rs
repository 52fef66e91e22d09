//! System-level integration tests.
//!
//! Each test builds a bare `World` with only the resources a system needs and
//! runs that system through a one-off `Schedule`, the same way the registry
//! runs it inside its chain.

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

use moonblade::components::animation::Animation;
use moonblade::components::boxcollider::BoxCollider;
use moonblade::components::camerafollow::CameraFollow;
use moonblade::components::entityid::EntityId;
use moonblade::components::inputcontrolled::InputControlled;
use moonblade::components::position::Position;
use moonblade::components::rigidbody::RigidBody;
use moonblade::components::sprite::StaticSprite;
use moonblade::events::collision::observe_record_contact;
use moonblade::resources::animationstore::{SheetCell, SpriteSheet};
use moonblade::resources::camera::Camera;
use moonblade::resources::contacts::FrameContacts;
use moonblade::resources::input::{Direction, InputSnapshot, InputState};
use moonblade::resources::renderqueue::RenderQueue;
use moonblade::resources::worldtime::WorldTime;
use moonblade::systems::animation::animation_system;
use moonblade::systems::camerafollow::camera_follow_system;
use moonblade::systems::collider::{CollisionSettings, collider_system};
use moonblade::systems::movement::movement_system;
use moonblade::systems::physics::physics_system;
use moonblade::systems::render::static_rendering_system;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    let mut camera = Camera::new(100.0, 100.0, 0.1);
    camera.position = Vec3::new(0.0, 0.0, 1.0);
    world.insert_resource(camera);
    world.insert_resource(InputState::default());
    world.insert_resource(RenderQueue::default());
    world.insert_resource(FrameContacts::default());
    world.insert_resource(CollisionSettings::default());
    world
}

fn tick_physics(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(physics_system);
    schedule.run(world);
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(movement_system);
    schedule.run(world);
}

fn tick_collider(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(collider_system);
    schedule.run(world);
}

fn tick_camera_follow(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(camera_follow_system);
    schedule.run(world);
}

fn tick_animation(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(animation_system);
    schedule.run(world);
}

fn tick_static_rendering(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(static_rendering_system);
    schedule.run(world);
}

// =============================================================================
// Physics
// =============================================================================

#[test]
fn physics_drag_shrinks_without_sign_flip() {
    let mut world = make_world(0.1);
    let mut rb = RigidBody::with_physics(0.0, 1.0).with_velocity(Vec2::new(3.0, -2.0));
    rb.rot_velocity = 1.0;
    let e = world.spawn((Position::new(0.0, 0.0), rb)).id();

    tick_physics(&mut world);

    let rb = world.get::<RigidBody>(e).unwrap();
    assert!(approx_eq(rb.velocity.x, 2.9));
    assert!(approx_eq(rb.velocity.y, -1.9));
    assert!(approx_eq(rb.rot_velocity, 0.9));
    let pos = world.get::<Position>(e).unwrap();
    assert!(approx_eq(pos.pos.x, 0.29));
    assert!(approx_eq(pos.pos.y, -0.19));
    assert!(approx_eq(pos.rotation, 0.09));
}

#[test]
fn physics_drag_stops_at_zero() {
    let mut world = make_world(0.1);
    let e = world
        .spawn((
            Position::new(0.0, 0.0),
            RigidBody::with_physics(0.0, 5.0).with_velocity(Vec2::new(0.2, -0.3)),
        ))
        .id();

    tick_physics(&mut world);

    assert_eq!(world.get::<RigidBody>(e).unwrap().velocity, Vec2::ZERO);
}

#[test]
fn physics_gravity_lowers_vertical_velocity() {
    let mut world = make_world(0.5);
    let e = world
        .spawn((Position::new(0.0, 10.0), RigidBody::with_physics(2.0, 0.0)))
        .id();

    tick_physics(&mut world);

    let rb = world.get::<RigidBody>(e).unwrap();
    assert!(approx_eq(rb.velocity.y, -1.0));
    assert!(approx_eq(world.get::<Position>(e).unwrap().pos.y, 9.5));
}

#[test]
fn physics_static_bodies_are_zeroed() {
    let mut world = make_world(0.1);
    let mut rb = RigidBody::with_physics(9.8, 0.0).with_velocity(Vec2::new(5.0, 5.0));
    rb.rot_velocity = 2.0;
    let e = world.spawn((Position::fixed(1.0, 1.0), rb)).id();

    tick_physics(&mut world);

    let rb = world.get::<RigidBody>(e).unwrap();
    assert_eq!(rb.velocity, Vec2::ZERO);
    assert_eq!(rb.rot_velocity, 0.0);
    assert_eq!(world.get::<Position>(e).unwrap().pos, Vec2::new(1.0, 1.0));
}

#[test]
fn physics_inactive_body_untouched() {
    let mut world = make_world(0.1);
    let mut rb = RigidBody::with_physics(9.8, 0.0).with_velocity(Vec2::new(1.0, 0.0));
    rb.active = false;
    let e = world.spawn((Position::new(0.0, 0.0), rb)).id();

    tick_physics(&mut world);

    assert_eq!(world.get::<RigidBody>(e).unwrap().velocity, Vec2::new(1.0, 0.0));
    assert_eq!(world.get::<Position>(e).unwrap().pos, Vec2::ZERO);
}

// =============================================================================
// Movement
// =============================================================================

fn hold(world: &mut World, directions: &[Direction]) {
    world
        .resource_mut::<InputState>()
        .apply(InputSnapshot::pressed(directions));
}

#[test]
fn movement_accelerates_held_axis() {
    let mut world = make_world(0.1);
    let e = world
        .spawn((
            Position::new(0.0, 0.0),
            RigidBody::new(),
            InputControlled::new(10.0, 5.0),
        ))
        .id();
    hold(&mut world, &[Direction::Right]);

    tick_movement(&mut world);

    let rb = world.get::<RigidBody>(e).unwrap();
    assert!(approx_eq(rb.velocity.x, 1.0));
    assert_eq!(rb.velocity.y, 0.0);
}

#[test]
fn movement_clamps_to_max_speed() {
    let mut world = make_world(0.1);
    let e = world
        .spawn((
            Position::new(0.0, 0.0),
            RigidBody::new().with_velocity(Vec2::new(-4.5, 0.0)),
            InputControlled::new(10.0, 5.0),
        ))
        .id();
    hold(&mut world, &[Direction::Left]);

    tick_movement(&mut world);
    assert!(approx_eq(world.get::<RigidBody>(e).unwrap().velocity.x, -5.0));
    tick_movement(&mut world);
    assert!(approx_eq(world.get::<RigidBody>(e).unwrap().velocity.x, -5.0));
}

#[test]
fn movement_up_wins_over_down() {
    let mut world = make_world(0.1);
    let e = world
        .spawn((
            Position::new(0.0, 0.0),
            RigidBody::new(),
            InputControlled::new(10.0, 5.0),
        ))
        .id();
    hold(&mut world, &[Direction::Up, Direction::Down, Direction::Left, Direction::Right]);

    tick_movement(&mut world);

    let rb = world.get::<RigidBody>(e).unwrap();
    assert!(approx_eq(rb.velocity.y, 1.0));
    assert!(approx_eq(rb.velocity.x, 1.0));
}

#[test]
fn movement_without_input_keeps_velocity() {
    let mut world = make_world(0.1);
    let e = world
        .spawn((
            Position::new(0.0, 0.0),
            RigidBody::new().with_velocity(Vec2::new(7.0, -3.0)),
            InputControlled::new(10.0, 5.0),
        ))
        .id();

    tick_movement(&mut world);

    assert_eq!(world.get::<RigidBody>(e).unwrap().velocity, Vec2::new(7.0, -3.0));
}

// =============================================================================
// Collider
// =============================================================================

fn spawn_body(
    world: &mut World,
    id: u64,
    position: Position,
    velocity: Vec2,
    collider: BoxCollider,
) -> Entity {
    world
        .spawn((
            EntityId(id),
            position,
            RigidBody::new().with_velocity(velocity),
            collider,
        ))
        .id()
}

#[test]
fn collider_writes_back_and_records_contacts() {
    let mut world = make_world(0.0);
    world.spawn(Observer::new(observe_record_contact));
    world.flush();

    let falling = spawn_body(
        &mut world,
        0,
        Position::new(0.0, 0.0),
        Vec2::new(0.0, -5.0),
        BoxCollider::new(2.0, 2.0).with_bounce(1.0),
    );
    let ground = spawn_body(
        &mut world,
        1,
        Position::fixed(0.0, -1.4),
        Vec2::ZERO,
        BoxCollider::new(4.0, 1.0),
    );

    tick_collider(&mut world);

    assert!(approx_eq(world.get::<RigidBody>(falling).unwrap().velocity.y, 5.0));
    assert!(approx_eq(world.get::<Position>(falling).unwrap().pos.y, 0.2));
    assert_eq!(world.get::<Position>(ground).unwrap().pos, Vec2::new(0.0, -1.4));

    let contacts = world.resource::<FrameContacts>();
    assert!(contacts.between(EntityId(0), EntityId(1)));
    assert_eq!(contacts.contacts[0].a, EntityId(0));
}

#[test]
fn collider_ignores_inactive() {
    let mut world = make_world(0.0);
    let mut inactive = BoxCollider::new(2.0, 2.0);
    inactive.active = false;
    let a = spawn_body(&mut world, 0, Position::new(0.0, 0.0), Vec2::ZERO, inactive);
    spawn_body(
        &mut world,
        1,
        Position::new(1.5, 0.0),
        Vec2::ZERO,
        BoxCollider::new(2.0, 2.0),
    );

    tick_collider(&mut world);

    assert_eq!(world.get::<Position>(a).unwrap().pos, Vec2::ZERO);
}

#[test]
fn collider_far_apart_untouched() {
    let mut world = make_world(0.0);
    let a = spawn_body(
        &mut world,
        0,
        Position::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        BoxCollider::new(1.0, 1.0),
    );
    let b = spawn_body(
        &mut world,
        1,
        Position::new(3.0, 0.5),
        Vec2::new(-1.0, 0.0),
        BoxCollider::new(1.0, 1.0),
    );

    tick_collider(&mut world);

    assert_eq!(world.get::<Position>(a).unwrap().pos, Vec2::ZERO);
    assert_eq!(world.get::<Position>(b).unwrap().pos, Vec2::new(3.0, 0.5));
    assert_eq!(world.get::<RigidBody>(a).unwrap().velocity, Vec2::new(1.0, 0.0));
}

// =============================================================================
// Camera follow
// =============================================================================

#[test]
fn camera_moves_fraction_toward_target() {
    let mut world = make_world(0.1);
    world.spawn((EntityId(0), Position::new(10.0, -5.0), CameraFollow::new(2.0)));

    tick_camera_follow(&mut world);

    let camera = world.resource::<Camera>();
    assert!(approx_eq(camera.position.x, 2.0));
    assert!(approx_eq(camera.position.y, -1.0));
    assert_eq!(camera.position.z, 1.0);
}

#[test]
fn camera_snaps_when_step_exceeds_one() {
    let mut world = make_world(1.0);
    world.spawn((EntityId(0), Position::new(4.0, 4.0), CameraFollow::new(5.0)));

    tick_camera_follow(&mut world);

    let camera = world.resource::<Camera>();
    assert!(approx_eq(camera.position.x, 4.0));
    assert!(approx_eq(camera.position.y, 4.0));
}

// =============================================================================
// Animation
// =============================================================================

#[test]
fn animation_three_by_three_wraps_after_nine_frames() {
    let frame = 0.1;
    let mut world = make_world(frame + 1e-3);
    let e = world
        .spawn((
            EntityId(0),
            Position::new(0.0, 0.0),
            Animation::new("spin", SpriteSheet::new(3, 3, 3, frame)),
        ))
        .id();

    for step in 1..=9 {
        tick_animation(&mut world);
        if step == 4 {
            assert_eq!(world.get::<Animation>(e).unwrap().cell, SheetCell::new(1, 1));
        }
    }

    assert_eq!(world.get::<Animation>(e).unwrap().cell, SheetCell::ORIGIN);
}

#[test]
fn animation_queues_visible_quad_with_cell() {
    let mut world = make_world(0.2);
    world.spawn((
        EntityId(0),
        Position::new(1.0, 1.0),
        Animation::new("walk", SpriteSheet::new(9, 4, 2, 0.1).with_size(2.0, 3.0)),
    ));

    tick_animation(&mut world);

    let queue = world.resource::<RenderQueue>();
    assert_eq!(queue.len(), 1);
    let quad = queue.requests[0];
    assert_eq!(quad.asset_id, 9);
    assert_eq!(quad.width, 2.0);
    assert_eq!(quad.height, 3.0);
    assert_eq!(quad.tint, [1.0, 1.0, 1.0, 1.0]);
    let region = quad.region.unwrap();
    assert_eq!(region.cell, SheetCell::new(1, 0));
    assert_eq!((region.columns, region.rows), (4, 2));
}

#[test]
fn animation_off_screen_still_advances() {
    let mut world = make_world(0.2);
    let e = world
        .spawn((
            EntityId(0),
            Position::new(500.0, 0.0),
            Animation::new("walk", SpriteSheet::new(9, 4, 2, 0.1)),
        ))
        .id();

    tick_animation(&mut world);

    assert!(world.resource::<RenderQueue>().is_empty());
    assert_eq!(world.get::<Animation>(e).unwrap().cell, SheetCell::new(1, 0));
}

// =============================================================================
// Static rendering
// =============================================================================

#[test]
fn static_sprites_culled_and_ordered() {
    let mut world = make_world(0.0);
    // Spawned out of id order on purpose.
    world.spawn((EntityId(2), Position::new(0.0, 0.0), StaticSprite::new(1.0, 1.0, 20)));
    world.spawn((EntityId(1), Position::new(2.0, 2.0), StaticSprite::new(1.0, 1.0, 10)));
    world.spawn((EntityId(3), Position::new(90.0, 0.0), StaticSprite::new(1.0, 1.0, 30)));
    world.spawn((
        EntityId(4),
        Position::new(0.0, 0.0).with_z(2.0),
        StaticSprite::new(1.0, 1.0, 40),
    ));

    tick_static_rendering(&mut world);

    let queue = world.resource::<RenderQueue>();
    let assets: Vec<u32> = queue.requests.iter().map(|q| q.asset_id).collect();
    assert_eq!(assets, vec![10, 20]);
    assert!(queue.requests.iter().all(|q| q.region.is_none()));
}
