//! Sword swing state and hitbox.

use bevy::prelude::*;
use std::collections::HashSet;

use crate::sim::config::CombatTuning;
use crate::sim::EntityId;
use crate::world::Aabb;

/// An in-progress sword swing.
///
/// Each target is struck at most once per swing; the hit set is cleared when
/// the swing animation ends.
#[derive(Debug, Clone, Default)]
pub struct Swing {
    pub active: bool,
    pub frame: u32,
    timer: f32,
    hit: HashSet<EntityId>,
}

impl Swing {
    /// Begin a swing. Returns false if one is already running.
    pub fn start(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.frame = 0;
        self.timer = 0.0;
        self.hit.clear();
        true
    }

    /// Advance the animation by `dt`.
    pub fn update(&mut self, dt: f32, tuning: &CombatTuning) {
        if !self.active {
            return;
        }
        self.timer += dt;
        while self.timer >= tuning.swing_frame_time {
            self.timer -= tuning.swing_frame_time;
            self.frame += 1;
            if self.frame >= tuning.swing_frames {
                self.active = false;
                self.frame = 0;
                self.timer = 0.0;
                self.hit.clear();
                return;
            }
        }
    }

    /// Record a hit on `id`. Returns false if it was already struck.
    pub fn register_hit(&mut self, id: EntityId) -> bool {
        self.hit.insert(id)
    }
}

/// Square sword hitbox in front of `origin` along `aim`.
pub fn sword_hitbox(origin: Vec2, aim: Vec2, tuning: &CombatTuning) -> Aabb {
    let center = origin + aim * tuning.sword_offset;
    Aabb::from_center(center, Vec2::splat(tuning.sword_size))
}
