//! Enemy state shared by every enemy kind.

use bevy::prelude::*;
use serde::Deserialize;

use super::data::EnemyDefinition;
use crate::combat::DropTable;
use crate::sim::config::vec2;
use crate::sim::EntityId;
use crate::world::Body;

/// Enemy kind identifier (matches RON file contents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum EnemyKind {
    Slime,
    Skeleton,
}

impl EnemyKind {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Slime => "slime",
            EnemyKind::Skeleton => "skeleton",
        }
    }
}

/// AI state machine for enemy behavior.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum AiState {
    /// Nothing in sight, wandering.
    #[default]
    Idle,
    ChasingPlayer,
    /// Approaching the point `attack_range` short of the torch.
    ChasingTorch,
    /// Within attack range of the player; does not move.
    Attacking,
    /// Struck or freshly merged; frozen until `cooldown` runs out.
    Staggered,
}

impl AiState {
    pub fn tag(&self) -> &'static str {
        match self {
            AiState::Idle => "idle",
            AiState::ChasingPlayer => "chasing-player",
            AiState::ChasingTorch => "chasing-torch",
            AiState::Attacking => "attacking",
            AiState::Staggered => "staggered",
        }
    }
}

/// Base attributes of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EnemyStats {
    pub strength: u32,
    pub dexterity: u32,
    pub vitality: u32,
    pub intelligence: u32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            strength: 1,
            dexterity: 1,
            vitality: 1,
            intelligence: 1,
        }
    }
}

/// Per-kind behaviour knobs for the shared pursuit routine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BehaviorParams {
    /// Seconds an enemy stays put after the player leaves attack range.
    pub contact_pause: f32,
    /// Frames of attack animation before the blow lands. Zero strikes
    /// immediately.
    pub windup_frames: u32,
    pub windup_frame_time: f32,
}

impl BehaviorParams {
    pub fn windup_duration(&self) -> f32 {
        self.windup_frames as f32 * self.windup_frame_time
    }
}

/// A live enemy.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub kind: EnemyKind,
    pub body: Body,
    pub stats: EnemyStats,
    pub level: u32,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub speed: f32,
    pub attack_damage: (u32, u32),
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Counts down to the next allowed attack.
    pub attack_timer: f32,
    pub visibility_range: f32,
    /// Post-hit stagger; no movement or targeting while positive.
    pub cooldown: f32,
    pub drops: DropTable,
    pub xp_reward: u32,
    pub behavior: BehaviorParams,
    pub state: AiState,
    pub wander_dir: Vec2,
    pub wander_timer: f32,
    pub torch_debounce: f32,
    pub torch_chase_point: Option<Vec2>,
    /// Remaining windup before a pending strike lands.
    pub windup: Option<f32>,
    pub contact_pause_timer: f32,
    pub player_was_close: bool,
    pub merged: bool,
}

impl Enemy {
    /// Derive an enemy of `level` from its definition. `scale` multiplies the
    /// definition size.
    pub fn from_definition(
        id: EntityId,
        definition: &EnemyDefinition,
        level: u32,
        position: Vec2,
        scale: f32,
    ) -> Self {
        let level = level.max(1);
        let stats = definition.stats;
        let hit_points = (stats.vitality * 100 * level) as i32;
        let damage_floor = stats.strength * 10 * level;

        Self {
            id,
            kind: definition.kind,
            body: Body::new(position, vec2(definition.size) * scale),
            stats,
            level,
            hit_points,
            max_hit_points: hit_points,
            speed: 180.0 + (stats.dexterity * 20 * level) as f32,
            attack_damage: (damage_floor, damage_floor + 9),
            attack_range: definition.attack_range,
            attack_cooldown: definition.attack_cooldown,
            attack_timer: 0.0,
            visibility_range: definition.visibility_range,
            cooldown: 0.0,
            drops: definition.drops,
            xp_reward: definition.xp_per_level * level,
            behavior: definition.behavior,
            state: AiState::Idle,
            wander_dir: Vec2::ZERO,
            wander_timer: 0.0,
            torch_debounce: 0.0,
            torch_chase_point: None,
            windup: None,
            contact_pause_timer: 0.0,
            player_was_close: false,
            merged: false,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn is_dead(&self) -> bool {
        self.hit_points <= 0
    }

    /// Apply damage and stagger. Returns true if this blow killed it.
    pub fn take_hit(&mut self, amount: u32, stagger: f32) -> bool {
        let was_alive = !self.is_dead();
        self.hit_points -= amount as i32;
        self.cooldown = self.cooldown.max(stagger);
        was_alive && self.is_dead()
    }

    /// Presentation tag, with the windup taking precedence.
    pub fn tag(&self) -> &'static str {
        if self.windup.is_some() {
            "winding-up"
        } else {
            self.state.tag()
        }
    }
}
