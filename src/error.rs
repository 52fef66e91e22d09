//! Error type shared by the registry, configuration and data loaders.
//!
//! Nothing in here is fatal to the frame loop: configuration mistakes are
//! reported when a component is attached, and an unknown animation name is a
//! warning the caller may ignore.

use thiserror::Error;

use crate::components::entityid::EntityId;
use crate::components::kind::ComponentKind;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("entity {0} does not exist")]
    UnknownEntity(EntityId),

    #[error("entity {entity} already has a {kind} component")]
    DuplicateComponent {
        entity: EntityId,
        kind: ComponentKind,
    },

    #[error("{kind} on entity {entity} requires a {missing} component")]
    MissingDependency {
        entity: EntityId,
        kind: ComponentKind,
        missing: ComponentKind,
    },

    #[error("cannot remove {kind} from entity {entity}: {dependent} depends on it")]
    ComponentInUse {
        entity: EntityId,
        kind: ComponentKind,
        dependent: ComponentKind,
    },

    #[error("entity {entity} has no {kind} component")]
    MissingComponent {
        entity: EntityId,
        kind: ComponentKind,
    },

    /// Requested animation name is not registered on the component.
    #[error("animation '{0}' is not registered")]
    UnknownAnimation(String),

    /// Requested sprite sheet is not present in the animation store.
    #[error("animation asset '{0}' is not in the store")]
    UnknownAnimationAsset(String),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type SimResult<T> = Result<T, SimError>;
