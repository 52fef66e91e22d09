//! JSON scene descriptions.
//!
//! A scene is a list of entities, each with optional components. Spawning
//! goes through [`Registry::attach`] in dependency order, so a scene that
//! asks for a collider without physics fails the same way code would.
//!
//! ```json
//! {
//!   "entities": [
//!     {
//!       "name": "ground",
//!       "position": { "pos": [0.0, -3.0], "static": true },
//!       "physics": {},
//!       "collider": { "size": [20.0, 1.0] },
//!       "static_sprite": { "width": 20.0, "height": 1.0, "asset_id": 2 }
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

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

/// One entity of a scene file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityData {
    /// Optional handle used to look the entity up after spawning.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub physics: Option<RigidBody>,
    #[serde(default)]
    pub collider: Option<BoxCollider>,
    #[serde(default)]
    pub movement: Option<InputControlled>,
    #[serde(default)]
    pub camera_follow: Option<CameraFollow>,
    /// Names of sheets in the registry's animation store; the first plays.
    #[serde(default)]
    pub animations: Vec<String>,
    #[serde(default)]
    pub static_sprite: Option<StaticSprite>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneData {
    pub entities: Vec<EntityData>,
}

/// Ids of a spawned scene.
#[derive(Debug, Clone, Default)]
pub struct SpawnedScene {
    /// Every spawned entity, in file order.
    pub entities: Vec<EntityId>,
    pub named: FxHashMap<String, EntityId>,
}

impl SpawnedScene {
    pub fn get(&self, name: &str) -> Option<EntityId> {
        self.named.get(name).copied()
    }
}

impl SceneData {
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let scene = Self::from_json(&content)?;
        info!(
            "Loaded scene with {} entities from {}",
            scene.entities.len(),
            path.as_ref().display()
        );
        Ok(scene)
    }

    /// Create every entity in `registry`. Stops at the first invalid entity;
    /// entities spawned before it stay in the registry.
    pub fn spawn(&self, registry: &mut Registry) -> SimResult<SpawnedScene> {
        let mut spawned = SpawnedScene::default();
        for data in &self.entities {
            let id = data.spawn(registry)?;
            spawned.entities.push(id);
            if let Some(name) = &data.name {
                spawned.named.insert(name.clone(), id);
            }
        }
        info!("Spawned {} entities", spawned.entities.len());
        Ok(spawned)
    }
}

impl EntityData {
    pub fn spawn(&self, registry: &mut Registry) -> SimResult<EntityId> {
        let animation = if self.animations.is_empty() {
            None
        } else {
            Some(Animation::from_store(registry.animation_store(), &self.animations)?)
        };

        let id = registry.create_entity();
        if let Err(e) = self.attach_all(registry, id, animation) {
            registry.destroy_entity(id)?;
            return Err(e);
        }
        Ok(id)
    }

    fn attach_all(
        &self,
        registry: &mut Registry,
        id: EntityId,
        animation: Option<Animation>,
    ) -> SimResult<()> {
        if let Some(position) = self.position {
            registry.attach(id, position)?;
        }
        if let Some(physics) = self.physics {
            registry.attach(id, physics)?;
        }
        if let Some(collider) = self.collider {
            registry.attach(id, collider)?;
        }
        if let Some(movement) = self.movement {
            registry.attach(id, movement)?;
        }
        if let Some(follow) = self.camera_follow {
            registry.attach(id, follow)?;
        }
        if let Some(animation) = animation {
            registry.attach(id, animation)?;
        }
        if let Some(sprite) = self.static_sprite {
            registry.attach(id, sprite)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::kind::ComponentKind;
    use crate::error::SimError;
    use crate::resources::animationstore::SpriteSheet;

    const SCENE: &str = r#"{
        "entities": [
            {
                "name": "ground",
                "position": { "pos": [0.0, -3.0], "static": true },
                "physics": {},
                "collider": { "size": [20.0, 1.0] }
            },
            {
                "name": "hero",
                "position": { "pos": [0.0, 0.0] },
                "physics": { "gravity_mod": 9.8 },
                "collider": { "size": [1.0, 2.0], "bounce": 0.2 },
                "movement": { "acceleration": 20.0, "max_speed": 5.0 },
                "camera_follow": { "speed": 4.0 },
                "animations": ["idle"]
            }
        ]
    }"#;

    #[test]
    fn test_spawn_scene() {
        let mut registry = Registry::new();
        registry
            .animation_store_mut()
            .insert("idle", SpriteSheet::new(1, 2, 2, 0.5));
        let scene = SceneData::from_json(SCENE).unwrap();
        let spawned = scene.spawn(&mut registry).unwrap();

        let ground = spawned.get("ground").unwrap();
        let hero = spawned.get("hero").unwrap();
        assert!(ground < hero);
        assert!(registry.get::<Position>(ground).unwrap().is_static);
        assert_eq!(registry.get::<BoxCollider>(ground).unwrap().mass, 1.0);
        assert_eq!(registry.kinds(hero).unwrap().len(), 6);
        assert!(registry.has(hero, ComponentKind::Animation));
    }

    #[test]
    fn test_invalid_entity_is_rolled_back() {
        let mut registry = Registry::new();
        let scene = SceneData::from_json(
            r#"{ "entities": [ { "position": { "pos": [0.0, 0.0] }, "collider": { "size": [1.0, 1.0] } } ] }"#,
        )
        .unwrap();
        let err = scene.spawn(&mut registry).unwrap_err();
        assert!(matches!(
            err,
            SimError::MissingDependency {
                missing: ComponentKind::Physics,
                ..
            }
        ));
        assert_eq!(registry.entity_count(), 0);
    }

    #[test]
    fn test_unknown_animation_asset() {
        let mut registry = Registry::new();
        let scene = SceneData::from_json(
            r#"{ "entities": [ { "position": { "pos": [0.0, 0.0] }, "animations": ["missing"] } ] }"#,
        )
        .unwrap();
        assert!(matches!(
            scene.spawn(&mut registry),
            Err(SimError::UnknownAnimationAsset(_))
        ));
    }
}
