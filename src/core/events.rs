//! Events crossing plugin boundaries.
//!
//! The simulation reports what happened during a frame as `SimEvent`s; the
//! simulation plugin re-sends them as these Bevy events so UI, audio and the
//! world plugin stay independent of each other.

use bevy::prelude::*;

use crate::sim::SoundCue;

/// Floating damage number to display.
#[derive(Event, Debug, Clone)]
pub struct DamageNumberEvent {
    /// Simulation-space position, y down
    pub position: Vec2,
    pub value: u32,
    pub color: [u8; 3],
    /// Seconds on screen
    pub duration: f32,
}

/// Fire-and-forget sound trigger.
#[derive(Event, Debug, Clone, Copy)]
pub struct SoundCueEvent(pub SoundCue);

/// Sent when the player picks up loot.
#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub name: String,
    pub level: u32,
}

/// Sent when the player levels up.
#[derive(Event, Debug, Clone, Copy)]
pub struct LevelUpEvent {
    pub new_level: u32,
}

/// Sent once when the player's hp reaches zero.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlayerDiedEvent;

/// The player walked through an open door.
#[derive(Event, Debug, Clone)]
pub struct LevelTransitionEvent {
    pub next: String,
}
