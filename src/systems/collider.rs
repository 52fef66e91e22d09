//! Oriented-rectangle collision detection and response.
//!
//! Every ordered pair of distinct active colliders is visited in creation
//! order. The broad phase rejects pairs whose entity positions are at least
//! the sum of the two diagonals apart. A pair that survives it and the
//! platform filter runs
//! two passes: the first casts rays from the center of A to each of its
//! corners against the four edges of B, the second does the same from B onto
//! A. Both passes use the corners taken before the pair was resolved, so a
//! push applied by the first pass does not hide the overlap from the second.
//! Each ray that crosses an edge contributes the part of the ray lying
//! past the edge to the pass displacement. A pass with hits then
//!
//! - pushes the two bodies apart along the displacement, weighted by the
//!   other body's share of the total mass (a static body never moves and its
//!   partner takes the whole displacement),
//! - reflects the velocity of each dynamic body with a non-zero `bounce`
//!   about the normal of the first edge that was crossed,
//! - optionally bleeds tangential speed through the friction hook,
//! - reports a [`CollisionEvent`].
//!
//! A rectangle fully inside another produces no crossing and is not
//! detected.
use arrayvec::ArrayVec;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, warn};

use crate::components::boxcollider::BoxCollider;
use crate::components::entityid::EntityId;
use crate::components::position::Position;
use crate::components::rigidbody::RigidBody;
use crate::events::collision::CollisionEvent;
use crate::geometry::{approach_zero, edge_normal, reflect, segments_cross};
use crate::resources::gameconfig::GameConfig;

/// Tuning of the collider system, copied from [`GameConfig`].
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CollisionSettings {
    pub platform_leeway: f32,
    pub determinant_epsilon: f32,
    pub friction: bool,
}

impl Default for CollisionSettings {
    fn default() -> Self {
        Self::from(&GameConfig::new())
    }
}

impl From<&GameConfig> for CollisionSettings {
    fn from(config: &GameConfig) -> Self {
        Self {
            platform_leeway: config.platform_leeway,
            determinant_epsilon: config.determinant_epsilon,
            friction: config.friction,
        }
    }
}

/// Snapshot of one collidable entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub id: EntityId,
    pub position: Position,
    pub rigidbody: RigidBody,
    pub collider: BoxCollider,
}

impl Body {
    pub fn new(id: EntityId, position: Position, rigidbody: RigidBody, collider: BoxCollider) -> Self {
        Self {
            id,
            position,
            rigidbody,
            collider,
        }
    }

    fn is_static(&self) -> bool {
        self.position.is_static
    }
}

/// A single diagonal crossing an edge.
#[derive(Debug, Clone, Copy)]
struct Hit {
    edge: Vec2,
    penetration: Vec2,
}

/// Result of one pass with at least one crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassHit {
    /// Sum of the ray parts past the crossed edges.
    pub displacement: Vec2,
    /// Unit normal of the first crossed edge, pointing away from the target.
    pub normal: Vec2,
}

/// Cheap rejections run before the narrow phase.
pub fn should_test(a: &Body, b: &Body, settings: &CollisionSettings) -> bool {
    if !a.collider.active || !b.collider.active {
        return false;
    }
    if a.is_static() && b.is_static() {
        return false;
    }
    let distance = a.position.pos.distance(b.position.pos);
    if distance >= a.collider.diagonal() + b.collider.diagonal() {
        return false;
    }
    match (a.collider.platform, b.collider.platform) {
        (true, true) => false,
        (true, false) => {
            b.collider.bottom(&b.position) > a.collider.top(&a.position) - settings.platform_leeway
        }
        (false, true) => {
            a.collider.bottom(&a.position) > b.collider.top(&b.position) - settings.platform_leeway
        }
        (false, false) => true,
    }
}

/// World-space center and corners of a body's rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outline {
    pub center: Vec2,
    pub corners: [Vec2; 4],
}

impl Outline {
    pub fn of(body: &Body) -> Self {
        Self {
            center: body.collider.center(&body.position),
            corners: body.collider.corners(&body.position),
        }
    }
}

/// Cast the diagonals of `caster` onto the edges of `target`.
pub fn cast_diagonals(caster: &Body, target: &Body, epsilon: f32) -> Option<PassHit> {
    cast_outline(caster, &Outline::of(caster), target, &Outline::of(target), epsilon)
}

/// Same as [`cast_diagonals`] on precomputed outlines.
fn cast_outline(
    caster: &Body,
    from: &Outline,
    target: &Body,
    onto: &Outline,
    epsilon: f32,
) -> Option<PassHit> {
    let edges = &onto.corners;
    let mut hits: ArrayVec<Hit, 16> = ArrayVec::new();
    for corner in from.corners {
        for i in 0..edges.len() {
            let (e0, e1) = (edges[i], edges[(i + 1) % edges.len()]);
            if let Some(t1) = segments_cross(from.center, corner, e0, e1, epsilon) {
                hits.push(Hit {
                    edge: e1 - e0,
                    penetration: (1.0 - t1) * (corner - from.center),
                });
            }
        }
    }

    let first = hits.first()?;
    let displacement: Vec2 = hits.iter().map(|hit| hit.penetration).sum();
    if displacement == Vec2::ZERO {
        return None;
    }
    let Some(normal) = edge_normal(first.edge) else {
        warn!(
            "Degenerate contact edge between {} and {}, skipping",
            caster.id, target.id
        );
        return None;
    };
    Some(PassHit {
        displacement,
        normal,
    })
}

/// Fraction of a push or velocity that `body` takes against `other`.
fn response_share(body: &Body, other: &Body) -> f32 {
    if other.is_static() {
        return 1.0;
    }
    let total = body.collider.mass + other.collider.mass;
    if total > 0.0 {
        1.0 - body.collider.mass / total
    } else {
        0.5
    }
}

/// Velocity response of `body` about `normal`.
fn respond(body: &mut Body, other: &Body, normal: Vec2, settings: &CollisionSettings) {
    if body.is_static() {
        return;
    }
    let share = response_share(body, other);
    let rb = &mut body.rigidbody;
    if body.collider.bounce != 0.0 {
        rb.velocity = reflect(rb.velocity, normal, body.collider.bounce) * share;
    }
    if settings.friction {
        let friction = other.collider.friction * share;
        rb.velocity.x = approach_zero(rb.velocity.x, friction * normal.y.abs());
        rb.velocity.y = approach_zero(rb.velocity.y, friction * normal.x.abs());
    }
}

/// Apply a pass result: the caster is pushed back against the displacement,
/// the target along it.
pub fn resolve_pass(caster: &mut Body, target: &mut Body, hit: &PassHit, settings: &CollisionSettings) {
    respond(caster, target, hit.normal, settings);
    respond(target, caster, -hit.normal, settings);

    if !caster.is_static() {
        caster.position.pos -= hit.displacement * response_share(caster, target);
    }
    if !target.is_static() {
        target.position.pos += hit.displacement * response_share(target, caster);
    }
}

fn run_pass(
    caster: &mut Body,
    from: &Outline,
    target: &mut Body,
    onto: &Outline,
    settings: &CollisionSettings,
    events: &mut Vec<CollisionEvent>,
) {
    let Some(hit) = cast_outline(caster, from, target, onto, settings.determinant_epsilon) else {
        return;
    };
    resolve_pass(caster, target, &hit, settings);
    debug!(
        "{} hit {}: displacement={:?} normal={:?}",
        caster.id, target.id, hit.displacement, hit.normal
    );
    events.push(CollisionEvent {
        a: caster.id,
        b: target.id,
        normal: hit.normal,
        displacement: hit.displacement,
    });
}

/// Test and resolve one ordered pair. Returns the number of passes that hit.
///
/// Both passes cast against the outlines taken before the first pass moved
/// anything.
pub fn test_and_resolve(
    a: &mut Body,
    b: &mut Body,
    settings: &CollisionSettings,
    events: &mut Vec<CollisionEvent>,
) -> usize {
    if !should_test(a, b, settings) {
        return 0;
    }
    let (outline_a, outline_b) = (Outline::of(a), Outline::of(b));
    let before = events.len();
    run_pass(a, &outline_a, b, &outline_b, settings, events);
    run_pass(b, &outline_b, a, &outline_a, settings, events);
    events.len() - before
}

fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = items.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}

/// Resolve every ordered pair of `bodies` in slice order.
pub fn resolve_all(bodies: &mut [Body], settings: &CollisionSettings) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    for i in 0..bodies.len() {
        for j in 0..bodies.len() {
            if i == j {
                continue;
            }
            let (a, b) = pair_mut(bodies, i, j);
            test_and_resolve(a, b, settings, &mut events);
        }
    }
    events
}

/// Collect colliding bodies in creation order, resolve them and write the
/// results back.
pub fn collider_system(
    mut query: Query<(Entity, &EntityId, &mut Position, &mut RigidBody, &BoxCollider)>,
    settings: Res<CollisionSettings>,
    mut commands: Commands,
) {
    let mut handles: Vec<(EntityId, Entity)> = Vec::new();
    let mut bodies: Vec<Body> = Vec::new();
    for (entity, id, position, rigidbody, collider) in query.iter() {
        if !collider.active {
            continue;
        }
        handles.push((*id, entity));
        bodies.push(Body::new(*id, *position, *rigidbody, *collider));
    }
    handles.sort_unstable_by_key(|(id, _)| *id);
    bodies.sort_unstable_by_key(|body| body.id);

    let events = resolve_all(&mut bodies, &settings);
    if events.is_empty() {
        return;
    }

    for ((_, entity), body) in handles.iter().zip(bodies.iter()) {
        if let Ok((_, _, mut position, mut rigidbody, _)) = query.get_mut(*entity) {
            if *position != body.position {
                *position = body.position;
            }
            if *rigidbody != body.rigidbody {
                *rigidbody = body.rigidbody;
            }
        }
    }

    for event in events {
        commands.trigger(event);
    }
}
