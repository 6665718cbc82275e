//! Fireball projectiles.

use bevy::prelude::*;

use crate::sim::config::{vec2, CombatTuning};
use crate::sim::EntityId;
use crate::world::Aabb;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectilePhase {
    Flying,
    Exploding { frame: u32, timer: f32 },
}

/// A fireball. Damage is fixed when cast.
#[derive(Debug, Clone)]
pub struct Fireball {
    pub id: EntityId,
    pub position: Vec2,
    pub direction: Vec2,
    pub speed: f32,
    pub size: Vec2,
    pub damage: u32,
    pub phase: ProjectilePhase,
}

impl Fireball {
    pub fn new(id: EntityId, position: Vec2, direction: Vec2, damage: u32, tuning: &CombatTuning) -> Self {
        Self {
            id,
            position,
            direction: direction.try_normalize().unwrap_or(Vec2::X),
            speed: tuning.fireball_speed,
            size: vec2(tuning.fireball_size),
            damage,
            phase: ProjectilePhase::Flying,
        }
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }

    pub fn is_flying(&self) -> bool {
        self.phase == ProjectilePhase::Flying
    }

    pub fn advance(&mut self, dt: f32) {
        self.position += self.direction * self.speed * dt;
    }

    /// Switch to the explosion animation. No effect if already exploding.
    pub fn explode(&mut self) {
        if self.is_flying() {
            self.phase = ProjectilePhase::Exploding { frame: 0, timer: 0.0 };
        }
    }

    /// Step the explosion animation. Returns true once every frame has played.
    pub fn update_explosion(&mut self, dt: f32, tuning: &CombatTuning) -> bool {
        let ProjectilePhase::Exploding { frame, timer } = &mut self.phase else {
            return false;
        };
        *timer += dt;
        while *timer >= tuning.explosion_frame_time {
            *timer -= tuning.explosion_frame_time;
            *frame += 1;
        }
        *frame >= tuning.explosion_frames
    }

    pub fn tag(&self) -> String {
        match self.phase {
            ProjectilePhase::Flying => "flying".to_string(),
            ProjectilePhase::Exploding { frame, .. } => format!("exploding#{}", frame),
        }
    }
}
