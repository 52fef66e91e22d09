use bevy_ecs::prelude::Resource;
use glam::Vec2;

use crate::components::entityid::EntityId;

/// One resolved collider pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Body whose diagonals hit.
    pub a: EntityId,
    /// Body whose edges were hit.
    pub b: EntityId,
    /// Unit normal of the contact edge, as applied to `a`.
    pub normal: Vec2,
    pub displacement: Vec2,
}

/// Contacts resolved during the current frame. Cleared at the start of every
/// update.
#[derive(Resource, Debug, Default, Clone)]
pub struct FrameContacts {
    pub contacts: Vec<Contact>,
}

impl FrameContacts {
    pub fn involves(&self, entity: EntityId) -> bool {
        self.contacts.iter().any(|c| c.a == entity || c.b == entity)
    }

    pub fn between(&self, x: EntityId, y: EntityId) -> bool {
        self.contacts
            .iter()
            .any(|c| (c.a == x && c.b == y) || (c.a == y && c.b == x))
    }
}
