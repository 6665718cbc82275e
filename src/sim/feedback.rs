//! Outbound notifications for presentation and audio.

use bevy::prelude::*;

use super::ids::EntityId;

pub const ENEMY_DAMAGE_COLOR: [u8; 3] = [255, 80, 80];
pub const PLAYER_DAMAGE_COLOR: [u8; 3] = [255, 255, 255];

/// Fire-and-forget sound triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Cast,
    Explosion,
    MeleeHit,
    Death,
    PlayerHurt,
    DoorOpen,
    LevelUp,
}

/// A floating damage number request.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageNumber {
    pub position: Vec2,
    pub value: u32,
    pub color: [u8; 3],
    pub duration: f32,
}

/// Health bar shown above a struck enemy or target.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthBar {
    pub hp: i32,
    pub max_hp: i32,
    pub position: Vec2,
    pub timer: f32,
}

impl HealthBar {
    pub fn ratio(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

/// Everything the simulation reports to the outside during a step.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Damage(DamageNumber),
    Sound(SoundCue),
    EnemyKilled { id: EntityId, xp: u32 },
    EnemiesMerged { into: EntityId, count: usize },
    ItemLooted { name: String, level: u32 },
    LevelUp { level: u32 },
    DoorOpened { id: EntityId },
    LevelTransition { next: String },
    PlayerDied,
}
