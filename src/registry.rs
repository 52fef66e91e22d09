//! Entity registry and frame driver.
//!
//! [`Registry`] owns the ECS [`World`], the fixed system chain and the map
//! from [`EntityId`]s to world entities. Components are attached through
//! [`Registry::attach`], which enforces the rules of
//! [`ComponentKind::requires`]: at most one component of each kind, and
//! every required sibling already present. [`Registry::update`] advances the
//! simulation by one frame.
//!
//! # Frame order
//!
//! 1. Clear the previous frame's contacts and draw requests
//! 2. Advance [`WorldTime`] by the scaled delta
//! 3. Run movement, physics, collider, camera follow, animation and static
//!    rendering, strictly in that order
//!
//! # Example
//!
//! ```ignore
//! let mut registry = Registry::new();
//! let player = registry.create_entity();
//! registry.attach(player, Position::new(0.0, 2.0))?;
//! registry.attach(player, RigidBody::with_physics(9.8, 0.5))?;
//! registry.attach(player, BoxCollider::new(1.0, 2.0))?;
//! registry.update(1.0 / 60.0);
//! ```

use bevy_ecs::component::Mutable;
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::camerafollow::CameraFollow;
use crate::components::entityid::EntityId;
use crate::components::inputcontrolled::InputControlled;
use crate::components::kind::{ComponentData, ComponentKind};
use crate::components::position::Position;
use crate::components::rigidbody::RigidBody;
use crate::components::sprite::StaticSprite;
use crate::error::{SimError, SimResult};
use crate::events::collision::observe_record_contact;
use crate::resources::animationstore::AnimationStore;
use crate::resources::camera::Camera;
use crate::resources::contacts::FrameContacts;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputSnapshot, InputSource, InputState};
use crate::resources::renderqueue::{QuadRenderer, QuadRequest, RenderQueue};
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation_system;
use crate::systems::camerafollow::camera_follow_system;
use crate::systems::collider::{CollisionSettings, collider_system};
use crate::systems::input::{poll_input_source, update_input_state};
use crate::systems::movement::movement_system;
use crate::systems::physics::physics_system;
use crate::systems::render::static_rendering_system;
use crate::systems::time::update_world_time;

pub struct Registry {
    world: World,
    update: Schedule,
    entities: FxHashMap<EntityId, Entity>,
    next_id: u64,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GameConfig::new())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
        world.insert_resource(config.camera());
        world.insert_resource(CollisionSettings::from(&config));
        world.insert_resource(InputState::default());
        world.insert_resource(RenderQueue::default());
        world.insert_resource(FrameContacts::default());
        world.insert_resource(AnimationStore::new());
        world.insert_resource(config);

        world.spawn(Observer::new(observe_record_contact));
        // Observers must exist before the first collider run triggers events.
        world.flush();

        let mut update = Schedule::default();
        update.set_executor_kind(ExecutorKind::SingleThreaded);
        update.add_systems(
            (
                movement_system,
                physics_system,
                collider_system,
                camera_follow_system,
                animation_system,
                static_rendering_system,
            )
                .chain(),
        );

        Self {
            world,
            update,
            entities: FxHashMap::default(),
            next_id: 0,
        }
    }

    // --------------- Entities ---------------

    /// Create an entity with no components. Ids are never reused.
    pub fn create_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let entity = self.world.spawn(id).id();
        self.entities.insert(id, entity);
        debug!("Created entity {}", id);
        id
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Live entity ids in creation order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn entity(&self, id: EntityId) -> SimResult<Entity> {
        self.entities
            .get(&id)
            .copied()
            .ok_or(SimError::UnknownEntity(id))
    }

    /// Remove the entity and every component it owns.
    pub fn destroy_entity(&mut self, id: EntityId) -> SimResult<()> {
        let entity = self.entity(id)?;
        self.entities.remove(&id);
        self.world.despawn(entity);
        info!("Destroyed entity {}", id);
        Ok(())
    }

    // --------------- Components ---------------

    /// Attach a component, checking for duplicates and missing siblings.
    pub fn attach(&mut self, id: EntityId, component: impl Into<ComponentData>) -> SimResult<()> {
        let component = component.into();
        let kind = component.kind();
        let entity = self.entity(id)?;
        if self.has(id, kind) {
            return Err(SimError::DuplicateComponent { entity: id, kind });
        }
        if let Some(&missing) = kind.requires().iter().find(|required| !self.has(id, **required)) {
            return Err(SimError::MissingDependency {
                entity: id,
                kind,
                missing,
            });
        }

        let mut entity_mut = self.world.entity_mut(entity);
        match component {
            ComponentData::Position(c) => entity_mut.insert(c),
            ComponentData::Physics(c) => entity_mut.insert(c),
            ComponentData::Collider(c) => entity_mut.insert(c),
            ComponentData::Movement(c) => entity_mut.insert(c),
            ComponentData::CameraFollow(c) => entity_mut.insert(c),
            ComponentData::Animation(c) => entity_mut.insert(c),
            ComponentData::StaticSprite(c) => entity_mut.insert(c),
        };
        debug!("Attached {} to entity {}", kind, id);
        Ok(())
    }

    /// Whether the entity exists and owns a component of `kind`.
    pub fn has(&self, id: EntityId, kind: ComponentKind) -> bool {
        let Some(entity) = self.entities.get(&id) else {
            return false;
        };
        let Ok(entity_ref) = self.world.get_entity(*entity) else {
            return false;
        };
        match kind {
            ComponentKind::Position => entity_ref.contains::<Position>(),
            ComponentKind::Physics => entity_ref.contains::<RigidBody>(),
            ComponentKind::Collider => entity_ref.contains::<BoxCollider>(),
            ComponentKind::Movement => entity_ref.contains::<InputControlled>(),
            ComponentKind::CameraFollow => entity_ref.contains::<CameraFollow>(),
            ComponentKind::Animation => entity_ref.contains::<Animation>(),
            ComponentKind::StaticSprite => entity_ref.contains::<StaticSprite>(),
        }
    }

    /// Kinds attached to the entity, in [`ComponentKind::ALL`] order.
    pub fn kinds(&self, id: EntityId) -> SimResult<Vec<ComponentKind>> {
        self.entity(id)?;
        Ok(ComponentKind::ALL
            .into_iter()
            .filter(|kind| self.has(id, *kind))
            .collect())
    }

    /// Detach one component. Refused while an attached kind requires it.
    pub fn remove_component(&mut self, id: EntityId, kind: ComponentKind) -> SimResult<()> {
        let entity = self.entity(id)?;
        if !self.has(id, kind) {
            return Err(SimError::MissingComponent { entity: id, kind });
        }
        if let Some(dependent) = kind.dependents().find(|dependent| self.has(id, *dependent)) {
            return Err(SimError::ComponentInUse {
                entity: id,
                kind,
                dependent,
            });
        }

        let mut entity_mut = self.world.entity_mut(entity);
        match kind {
            ComponentKind::Position => {
                entity_mut.remove::<Position>();
            }
            ComponentKind::Physics => {
                entity_mut.remove::<RigidBody>();
            }
            ComponentKind::Collider => {
                entity_mut.remove::<BoxCollider>();
            }
            ComponentKind::Movement => {
                entity_mut.remove::<InputControlled>();
            }
            ComponentKind::CameraFollow => {
                entity_mut.remove::<CameraFollow>();
            }
            ComponentKind::Animation => {
                entity_mut.remove::<Animation>();
            }
            ComponentKind::StaticSprite => {
                entity_mut.remove::<StaticSprite>();
            }
        }
        debug!("Removed {} from entity {}", kind, id);
        Ok(())
    }

    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        let entity = *self.entities.get(&id)?;
        self.world.get::<T>(entity)
    }

    pub fn get_mut<T: Component<Mutability = Mutable>>(&mut self, id: EntityId) -> Option<Mut<'_, T>> {
        let entity = *self.entities.get(&id)?;
        self.world.get_mut::<T>(entity)
    }

    /// Switch the animation an entity is playing.
    ///
    /// An unknown name is logged and returned as
    /// [`SimError::UnknownAnimation`]; the animation keeps playing unchanged.
    pub fn set_animation(&mut self, id: EntityId, key: &str) -> SimResult<()> {
        self.entity(id)?;
        let mut animation = self
            .get_mut::<Animation>(id)
            .ok_or(SimError::MissingComponent {
                entity: id,
                kind: ComponentKind::Animation,
            })?;
        if animation.is_playing(key) {
            return Ok(());
        }
        animation.play(key)
    }

    // --------------- Shared context ---------------

    /// Replace the logical input seen by the next update.
    pub fn set_input(&mut self, snapshot: InputSnapshot) {
        update_input_state(&mut self.world, snapshot);
    }

    pub fn poll_input(&mut self, source: &dyn InputSource) {
        poll_input_source(&mut self.world, source);
    }

    pub fn input(&self) -> &InputState {
        self.world.resource::<InputState>()
    }

    pub fn camera(&self) -> &Camera {
        self.world.resource::<Camera>()
    }

    pub fn camera_mut(&mut self) -> Mut<'_, Camera> {
        self.world.resource_mut::<Camera>()
    }

    pub fn world_time(&self) -> &WorldTime {
        self.world.resource::<WorldTime>()
    }

    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.world.resource_mut::<WorldTime>().time_scale = time_scale.max(0.0);
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn animation_store(&self) -> &AnimationStore {
        self.world.resource::<AnimationStore>()
    }

    pub fn animation_store_mut(&mut self) -> Mut<'_, AnimationStore> {
        self.world.resource_mut::<AnimationStore>()
    }

    /// Contacts resolved during the last update.
    pub fn contacts(&self) -> &FrameContacts {
        self.world.resource::<FrameContacts>()
    }

    /// Draw requests of the last update.
    pub fn render_queue(&self) -> &RenderQueue {
        self.world.resource::<RenderQueue>()
    }

    pub fn drain_render_queue(&mut self) -> Vec<QuadRequest> {
        std::mem::take(&mut self.world.resource_mut::<RenderQueue>().requests)
    }

    /// Hand the last update's draw requests to `renderer`.
    pub fn flush_render_queue(&mut self, renderer: &mut dyn QuadRenderer) -> usize {
        self.world.resource_mut::<RenderQueue>().flush(renderer)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    // --------------- Frame ---------------

    /// Advance the simulation by one frame of `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.world.resource_mut::<FrameContacts>().contacts.clear();
        self.world.resource_mut::<RenderQueue>().clear();
        update_world_time(&mut self.world, dt);

        self.update.run(&mut self.world);

        self.world.clear_trackers(); // Clear changed components for next frame
    }
}
