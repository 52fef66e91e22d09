//! Collision event type and the observer that records contacts.
//!
//! The collider system triggers a [`CollisionEvent`] for every pass that
//! resolved an overlap. [`observe_record_contact`] is registered by the
//! [`Registry`](crate::registry::Registry) and appends each event to the
//! [`FrameContacts`] resource; hosts may add their own observers for sounds,
//! damage and the like.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::entityid::EntityId;
use crate::resources::contacts::{Contact, FrameContacts};

/// Event fired when the diagonals of `a` crossed the edges of `b` and the
/// overlap was resolved.
///
/// `normal` is the unit normal applied to `a`; `b` received its opposite.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: EntityId,
    pub b: EntityId,
    pub normal: Vec2,
    pub displacement: Vec2,
}

/// Global observer that stores every resolved collision in [`FrameContacts`].
pub fn observe_record_contact(trigger: On<CollisionEvent>, mut contacts: ResMut<FrameContacts>) {
    let event = trigger.event();
    trace!(
        "contact {} -> {} normal={:?} displacement={:?}",
        event.a, event.b, event.normal, event.displacement
    );
    contacts.contacts.push(Contact {
        a: event.a,
        b: event.b,
        normal: event.normal,
        displacement: event.displacement,
    });
}
