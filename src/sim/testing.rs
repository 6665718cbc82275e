//! Builders shared by unit tests across the crate.

use bevy::prelude::*;

use super::config::SimConfig;
use super::ids::EntityId;
use super::state::SimulationState;
use crate::enemies::{Enemy, EnemyKind, EnemyRegistry};
use crate::items::ItemDatabase;
use crate::world::data::LevelDefinitionRaw;
use crate::world::{Level, LevelDefinition};

pub(crate) fn definition_from_rows(lines: &[&str]) -> LevelDefinition {
    let raw = LevelDefinitionRaw {
        name: "test".to_string(),
        tile_size: 48.0,
        player_start: (1, 1),
        monster_level: (1, 1),
        next_level: Some("next".to_string()),
        rows: lines.iter().map(|l| l.to_string()).collect(),
    };
    LevelDefinition::from_raw(raw).expect("valid test level")
}

pub(crate) fn level_from_rows(lines: &[&str]) -> Level {
    Level::new(definition_from_rows(lines))
}

/// Seeded state on the given grid with default tuning. The player starts at
/// tile (1, 1), which is (72, 72).
pub(crate) fn state_from_rows(lines: &[&str]) -> SimulationState {
    SimulationState::with_seed(
        &definition_from_rows(lines),
        SimConfig::default(),
        EnemyRegistry::builtin(),
        ItemDatabase::builtin(),
        7,
    )
}

/// Twelve by eight open room with a wall border.
pub(crate) fn open_room() -> SimulationState {
    state_from_rows(&[
        "############",
        "#..........#",
        "#..........#",
        "#..........#",
        "#..........#",
        "#..........#",
        "#..........#",
        "############",
    ])
}

/// Add a level-1 enemy of `kind` at `position` that will not attack.
pub(crate) fn spawn_enemy(state: &mut SimulationState, kind: EnemyKind, position: Vec2) -> EntityId {
    let definition = state.enemy_registry.get(kind).expect("builtin definition").clone();
    let id = state.ids.allocate();
    let mut enemy = Enemy::from_definition(id, &definition, 1, position, 1.0);
    enemy.attack_timer = 1.0e6;
    state.enemies.push(enemy);
    id
}
