//! The torch: the player's light, a lure for enemies when set down.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::sim::config::{vec2, TorchTuning};
use crate::sim::EntityId;
use crate::world::{direction_towards, Aabb, Body, Level};

/// Mutually exclusive torch modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorchMode {
    /// Held by the player; sits on the player.
    Carried,
    /// Trails the player without overlapping them.
    Following,
    /// Set down; drifts about on its own.
    OnGround,
}

impl TorchMode {
    pub fn tag(&self) -> &'static str {
        match self {
            TorchMode::Carried => "carried",
            TorchMode::Following => "following",
            TorchMode::OnGround => "on-ground",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Torch {
    pub id: EntityId,
    pub body: Body,
    pub mode: TorchMode,
    wander_dir: Vec2,
    wander_timer: f32,
}

impl Torch {
    pub fn new(id: EntityId, position: Vec2, tuning: &TorchTuning) -> Self {
        Self {
            id,
            body: Body::new(position, vec2(tuning.size)),
            mode: TorchMode::Carried,
            wander_dir: Vec2::ZERO,
            wander_timer: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// Put the torch down at `at`.
    pub fn drop_at(&mut self, at: Vec2) {
        self.mode = TorchMode::OnGround;
        self.body.position = at;
        self.wander_timer = 0.0;
        debug!("Torch dropped at {:?}", at);
    }

    /// Pick the torch up if it lies within `radius` of `player`.
    pub fn try_pick_up(&mut self, player: Vec2, radius: f32) -> bool {
        if self.mode != TorchMode::OnGround || self.position().distance(player) > radius {
            return false;
        }
        self.mode = TorchMode::Carried;
        self.body.position = player;
        true
    }

    /// Carried and Following swap; a grounded torch is left alone.
    pub fn toggle_follow(&mut self) -> bool {
        self.mode = match self.mode {
            TorchMode::Carried => TorchMode::Following,
            TorchMode::Following => TorchMode::Carried,
            TorchMode::OnGround => return false,
        };
        true
    }

    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        player: &Body,
        level: &Level,
        tuning: &TorchTuning,
        rng: &mut R,
    ) {
        match self.mode {
            TorchMode::Carried => self.body.position = player.position,
            TorchMode::Following => self.follow(dt, player, tuning),
            TorchMode::OnGround => self.wander(dt, player, level, tuning, rng),
        }
    }

    /// Close in on the player with a capped step, stopping at
    /// `follow_distance` and never overlapping them.
    fn follow(&mut self, dt: f32, player: &Body, tuning: &TorchTuning) {
        let Some((direction, distance)) = direction_towards(self.position(), player.position, 1.0) else {
            return;
        };
        let gap = distance - tuning.follow_distance;
        if gap <= 0.0 {
            return;
        }
        let step = (tuning.follow_speed * dt).min(tuning.follow_max_step).min(gap);
        let player_rect = player.rect();
        let start = self.body.rect();
        self.body.face_towards(direction.x);
        self.body.move_and_collide(direction * step, |r| {
            r.overlaps(&player_rect) && !start.overlaps(&player_rect)
        });
    }

    /// Random walk, bouncing off walls and the player.
    fn wander<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        player: &Body,
        level: &Level,
        tuning: &TorchTuning,
        rng: &mut R,
    ) {
        self.wander_timer -= dt;
        if self.wander_timer <= 0.0 {
            let (lo, hi) = tuning.wander_interval;
            self.wander_dir = Vec2::from_angle(rng.gen_range(0.0..TAU));
            self.wander_timer = rng.gen_range(lo.min(hi)..=hi.max(lo));
        }

        let player_rect = player.rect();
        let start = self.body.rect();
        let blocked = |r: &Aabb| {
            level.blocks_new(r, &start) || (r.overlaps(&player_rect) && !start.overlaps(&player_rect))
        };
        let outcome = self.body.move_and_collide(self.wander_dir * tuning.wander_speed * dt, blocked);
        if outcome.blocked_x {
            self.wander_dir.x = -self.wander_dir.x;
        }
        if outcome.blocked_y {
            self.wander_dir.y = -self.wander_dir.y;
        }
    }
}
