//! The closed set of component kinds and their attachment rules.
//!
//! [`ComponentKind`] names every kind an entity can own, at most one of each.
//! [`ComponentKind::requires`] lists the siblings a kind needs; the
//! [`Registry`](crate::registry::Registry) checks them when a component is
//! attached and refuses to detach a kind another one still depends on.
//! [`ComponentData`] carries a value of one kind through the registry API.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::boxcollider::BoxCollider;
use super::camerafollow::CameraFollow;
use super::inputcontrolled::InputControlled;
use super::position::Position;
use super::rigidbody::RigidBody;
use super::sprite::StaticSprite;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    Position,
    Physics,
    Collider,
    Movement,
    CameraFollow,
    Animation,
    StaticSprite,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::Position,
        ComponentKind::Physics,
        ComponentKind::Collider,
        ComponentKind::Movement,
        ComponentKind::CameraFollow,
        ComponentKind::Animation,
        ComponentKind::StaticSprite,
    ];

    /// Sibling kinds that must already be attached.
    pub fn requires(self) -> &'static [ComponentKind] {
        match self {
            ComponentKind::Position => &[],
            ComponentKind::Physics => &[ComponentKind::Position],
            ComponentKind::Collider | ComponentKind::Movement => {
                &[ComponentKind::Position, ComponentKind::Physics]
            }
            ComponentKind::CameraFollow
            | ComponentKind::Animation
            | ComponentKind::StaticSprite => &[ComponentKind::Position],
        }
    }

    /// Kinds that list `self` in their requirements.
    pub fn dependents(self) -> impl Iterator<Item = ComponentKind> {
        Self::ALL
            .into_iter()
            .filter(move |kind| kind.requires().contains(&self))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComponentKind::Position => "Position",
            ComponentKind::Physics => "Physics",
            ComponentKind::Collider => "Collider",
            ComponentKind::Movement => "Movement",
            ComponentKind::CameraFollow => "CameraFollow",
            ComponentKind::Animation => "Animation",
            ComponentKind::StaticSprite => "StaticSprite",
        };
        f.write_str(name)
    }
}

/// A component value tagged with its kind.
#[derive(Debug, Clone)]
pub enum ComponentData {
    Position(Position),
    Physics(RigidBody),
    Collider(BoxCollider),
    Movement(InputControlled),
    CameraFollow(CameraFollow),
    Animation(Animation),
    StaticSprite(StaticSprite),
}

impl ComponentData {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentData::Position(_) => ComponentKind::Position,
            ComponentData::Physics(_) => ComponentKind::Physics,
            ComponentData::Collider(_) => ComponentKind::Collider,
            ComponentData::Movement(_) => ComponentKind::Movement,
            ComponentData::CameraFollow(_) => ComponentKind::CameraFollow,
            ComponentData::Animation(_) => ComponentKind::Animation,
            ComponentData::StaticSprite(_) => ComponentKind::StaticSprite,
        }
    }
}

impl From<Position> for ComponentData {
    fn from(value: Position) -> Self {
        ComponentData::Position(value)
    }
}

impl From<RigidBody> for ComponentData {
    fn from(value: RigidBody) -> Self {
        ComponentData::Physics(value)
    }
}

impl From<BoxCollider> for ComponentData {
    fn from(value: BoxCollider) -> Self {
        ComponentData::Collider(value)
    }
}

impl From<InputControlled> for ComponentData {
    fn from(value: InputControlled) -> Self {
        ComponentData::Movement(value)
    }
}

impl From<CameraFollow> for ComponentData {
    fn from(value: CameraFollow) -> Self {
        ComponentData::CameraFollow(value)
    }
}

impl From<Animation> for ComponentData {
    fn from(value: Animation) -> Self {
        ComponentData::Animation(value)
    }
}

impl From<StaticSprite> for ComponentData {
    fn from(value: StaticSprite) -> Self {
        ComponentData::StaticSprite(value)
    }
}
