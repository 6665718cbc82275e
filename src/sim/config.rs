//! Simulation tuning loaded from assets/data/sim_config.ron.
//!
//! Every section is `#[serde(default)]`, so a file only needs to list the
//! values it overrides.

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::world::read_ron_file;

/// Player movement, resources and inventory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub size: (f32, f32),
    pub base_speed: f32,
    pub speed_per_dexterity: f32,
    pub sprint_multiplier: f32,
    pub sprint_stamina_per_sec: f32,
    pub stamina_regen_per_sec: f32,
    pub mana_regen_per_sec: f32,
    pub inventory_size: usize,
    pub points_per_level: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: (28.0, 36.0),
            base_speed: 180.0,
            speed_per_dexterity: 20.0,
            sprint_multiplier: 1.6,
            sprint_stamina_per_sec: 20.0,
            stamina_regen_per_sec: 10.0,
            mana_regen_per_sec: 2.0,
            inventory_size: 24,
            points_per_level: 4,
        }
    }
}

/// Sword, fireball and hit feedback parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub sword_size: f32,
    pub sword_offset: f32,
    pub swing_frames: u32,
    pub swing_frame_time: f32,
    pub fireball_speed: f32,
    pub fireball_size: (f32, f32),
    pub fireball_mana_cost: f32,
    pub explosion_frames: u32,
    pub explosion_frame_time: f32,
    /// Movement freeze applied to an enemy when struck.
    pub hit_stagger: f32,
    pub damage_number_duration: f32,
    pub health_bar_duration: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            sword_size: 48.0,
            sword_offset: 32.0,
            swing_frames: 6,
            swing_frame_time: 0.03,
            fireball_speed: 300.0,
            fireball_size: (40.0, 20.0),
            fireball_mana_cost: 10.0,
            explosion_frames: 8,
            explosion_frame_time: 0.05,
            hit_stagger: 0.25,
            damage_number_duration: 1.0,
            health_bar_duration: 2.0,
        }
    }
}

/// Enemy targeting, wandering and merging.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Distances at or below this are treated as coincident.
    pub epsilon: f32,
    pub torch_debounce: f32,
    pub wander_speed_factor: f32,
    pub wander_interval: (f32, f32),
    pub merge_threshold: usize,
    pub merge_scale: f32,
    pub merge_cooldown: f32,
    /// Hitboxes closer than this count as touching for merge clusters.
    pub merge_contact_margin: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            torch_debounce: 0.5,
            wander_speed_factor: 0.3,
            wander_interval: (1.0, 3.0),
            merge_threshold: 3,
            merge_scale: 1.5,
            merge_cooldown: 2.0,
            merge_contact_margin: 4.0,
        }
    }
}

/// Torch movement and interaction radii.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TorchTuning {
    pub size: (f32, f32),
    pub follow_distance: f32,
    pub follow_speed: f32,
    pub follow_max_step: f32,
    pub wander_speed: f32,
    pub wander_interval: (f32, f32),
    pub pickup_radius: f32,
    pub glow_radius: f32,
}

impl Default for TorchTuning {
    fn default() -> Self {
        Self {
            size: (16.0, 32.0),
            follow_distance: 40.0,
            follow_speed: 260.0,
            follow_max_step: 6.0,
            wander_speed: 40.0,
            wander_interval: (0.5, 1.5),
            pickup_radius: 48.0,
            glow_radius: 200.0,
        }
    }
}

/// Targets and doors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PropTuning {
    pub target_size: (f32, f32),
    pub target_hit_points: i32,
    pub target_respawn: f32,
    pub door_size: (f32, f32),
    pub door_proximity: f32,
}

impl Default for PropTuning {
    fn default() -> Self {
        Self {
            target_size: (40.0, 60.0),
            target_hit_points: 300,
            target_respawn: 5.0,
            door_size: (48.0, 72.0),
            door_proximity: 72.0,
        }
    }
}

/// All simulation tuning.
#[derive(Resource, Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub player: PlayerTuning,
    pub combat: CombatTuning,
    pub ai: AiTuning,
    pub torch: TorchTuning,
    pub props: PropTuning,
}

impl SimConfig {
    /// Load from RON, falling back to defaults.
    pub fn load() -> Self {
        let path = Path::new("assets/data/sim_config.ron");
        match read_ron_file(path) {
            Ok(config) => {
                info!("Loaded simulation config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("{}. Using default simulation config.", e);
                Self::default()
            }
        }
    }
}

/// Tuple to vector helper for RON sizes.
pub fn vec2(pair: (f32, f32)) -> Vec2 {
    Vec2::new(pair.0, pair.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: SimConfig = ron::from_str("(combat: (fireball_speed: 450.0))").expect("valid RON");
        assert_eq!(config.combat.fireball_speed, 450.0);
        assert_eq!(config.combat.fireball_mana_cost, 10.0);
        assert_eq!(config.props.target_hit_points, 300);
        assert_eq!(config.ai.merge_threshold, 3);
    }

    #[test]
    fn shipped_config_parses() {
        let config: SimConfig =
            read_ron_file(Path::new("assets/data/sim_config.ron")).expect("shipped config parses");
        assert_eq!(config.player.sprint_multiplier, 1.6);
        assert_eq!(config.props.door_proximity, 72.0);
    }
}
