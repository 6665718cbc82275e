//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::{BehaviorParams, EnemyKind, EnemyStats};
use crate::combat::DropTable;
use crate::world::read_ron_file;

fn default_size() -> (f32, f32) {
    (28.0, 36.0)
}

fn default_attack_range() -> f32 {
    80.0
}

fn default_attack_cooldown() -> f32 {
    1.0
}

fn default_visibility_range() -> f32 {
    240.0
}

fn default_xp_per_level() -> u32 {
    5
}

/// Enemy definition loaded from RON file. Level-dependent values are
/// derived at spawn.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub kind: EnemyKind,
    pub name: String,
    #[serde(default = "default_size")]
    pub size: (f32, f32),
    #[serde(default)]
    pub stats: EnemyStats,
    #[serde(default = "default_attack_range")]
    pub attack_range: f32,
    #[serde(default = "default_attack_cooldown")]
    pub attack_cooldown: f32,
    #[serde(default = "default_visibility_range")]
    pub visibility_range: f32,
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u32,
    #[serde(default)]
    pub drops: DropTable,
    #[serde(default)]
    pub behavior: BehaviorParams,
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Clone, Debug, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<EnemyKind, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Get an enemy definition by kind.
    pub fn get(&self, kind: EnemyKind) -> Option<&EnemyDefinition> {
        self.definitions.get(&kind)
    }

    pub fn insert(&mut self, definition: EnemyDefinition) {
        self.definitions.insert(definition.kind, definition);
    }

    /// Compiled-in slime and skeleton.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.insert(EnemyDefinition {
            kind: EnemyKind::Slime,
            name: "Slime".to_string(),
            size: default_size(),
            stats: EnemyStats::default(),
            attack_range: default_attack_range(),
            attack_cooldown: default_attack_cooldown(),
            visibility_range: default_visibility_range(),
            xp_per_level: 5,
            drops: DropTable::default(),
            behavior: BehaviorParams::default(),
        });
        registry.insert(EnemyDefinition {
            kind: EnemyKind::Skeleton,
            name: "Skeleton".to_string(),
            size: (28.0 * 1.4, 36.0 * 1.4),
            stats: EnemyStats {
                strength: 2,
                dexterity: 2,
                vitality: 1,
                intelligence: 1,
            },
            attack_range: default_attack_range(),
            attack_cooldown: default_attack_cooldown(),
            visibility_range: default_visibility_range(),
            xp_per_level: 7,
            drops: DropTable {
                weapon_rate: 0.99,
                armor_rate: 0.2,
                accessory_rate: 0.01,
                lowest_drop_level: 2,
            },
            behavior: BehaviorParams {
                contact_pause: 1.0,
                windup_frames: 4,
                windup_frame_time: 0.1,
            },
        });
        registry
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
/// Kinds missing from disk keep their built-in definition.
pub fn load_enemy_definitions(mut commands: Commands) {
    let mut registry = EnemyRegistry::builtin();
    let enemies_dir = Path::new("assets/data/enemies");

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Enemy definitions directory not found: {:?}. Using built-ins.", enemies_dir);
        commands.insert_resource(registry);
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }
        match read_ron_file::<EnemyDefinition>(&path) {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({:?})", definition.name, definition.kind);
                registry.insert(definition);
            }
            Err(e) => error!("Failed to load enemy definition {:?}: {}", path, e),
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
    commands.insert_resource(registry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_definition() {
        let source = r#"(
            kind: Slime,
            name: "Bog Slime",
            stats: (strength: 3, dexterity: 1, vitality: 2, intelligence: 1),
        )"#;
        let definition: EnemyDefinition = ron::from_str(source).expect("valid RON");
        assert_eq!(definition.attack_range, 80.0);
        assert_eq!(definition.visibility_range, 240.0);
        assert_eq!(definition.stats.vitality, 2);
        assert_eq!(definition.behavior.windup_frames, 0);
        assert_eq!(definition.drops.lowest_drop_level, 1);
    }

    #[test]
    fn builtin_skeleton_has_windup() {
        let registry = EnemyRegistry::builtin();
        let skeleton = registry.get(EnemyKind::Skeleton).expect("skeleton");
        assert!((skeleton.behavior.windup_duration() - 0.4).abs() < 1e-6);
        assert_eq!(skeleton.behavior.contact_pause, 1.0);
    }

    #[test]
    fn shipped_definitions_parse() {
        for (file, kind) in [("slime", EnemyKind::Slime), ("skeleton", EnemyKind::Skeleton)] {
            let path = format!("assets/data/enemies/{}.ron", file);
            let definition: EnemyDefinition =
                read_ron_file(Path::new(&path)).expect("shipped definition parses");
            assert_eq!(definition.kind, kind);
        }
    }
}
