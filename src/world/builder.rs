//! Spawn-time instantiation of a level's entities from its tile codes.

use bevy::prelude::*;
use rand::Rng;

use super::data::{LevelDefinition, TileKind};
use super::level::Level;
use super::props::{Door, Target};
use crate::enemies::{Enemy, EnemyKind, EnemyRegistry};
use crate::sim::config::PropTuning;
use crate::sim::IdAllocator;

/// Size multiplier for enemies spawned from a merged-spawn tile.
const MERGED_SPAWN_SCALE: f32 = 1.5;

/// Everything a level starts with.
#[derive(Debug)]
pub struct BuiltLevel {
    pub level: Level,
    pub enemies: Vec<Enemy>,
    pub targets: Vec<Target>,
    pub doors: Vec<Door>,
    pub player_start: Vec2,
}

/// Decode the tile grid into a runtime level plus its spawned entities.
///
/// Enemy levels are rolled uniformly in the level's monster range. A spawn
/// code whose enemy definition is missing is skipped with a warning, so a
/// broken definition degrades to an emptier encounter.
pub fn build_level<R: Rng + ?Sized>(
    definition: &LevelDefinition,
    registry: &EnemyRegistry,
    props: &PropTuning,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> BuiltLevel {
    let mut level = Level::new(definition.clone());
    let mut enemies = Vec::new();
    let mut targets = Vec::new();
    let mut doors = Vec::new();

    let spawns: Vec<(IVec2, TileKind)> = level.tiles().collect();
    for (cell, kind) in spawns {
        let position = definition.grid_to_world(cell.x, cell.y);
        let enemy_spawn = match kind {
            TileKind::EnemySpawn => Some((EnemyKind::Slime, 1.0)),
            TileKind::MergedEnemySpawn => Some((EnemyKind::Slime, MERGED_SPAWN_SCALE)),
            TileKind::SkeletonSpawn => Some((EnemyKind::Skeleton, 1.0)),
            TileKind::TargetSpawn => {
                targets.push(Target::spawn(ids.allocate(), position, props, &mut level));
                None
            }
            TileKind::DoorSpawn => {
                doors.push(Door::spawn(ids.allocate(), position, props, &mut level));
                None
            }
            TileKind::Floor | TileKind::Wall => None,
        };

        let Some((enemy_kind, scale)) = enemy_spawn else {
            continue;
        };
        let Some(enemy_definition) = registry.get(enemy_kind) else {
            warn!("No definition for {:?}, skipping spawn at {:?}", enemy_kind, cell);
            continue;
        };
        let enemy_level = rng.gen_range(definition.monster_level_min..=definition.monster_level_max);
        enemies.push(Enemy::from_definition(
            ids.allocate(),
            enemy_definition,
            enemy_level,
            position,
            scale,
        ));
    }

    let (sx, sy) = definition.player_start;
    let player_start = definition.grid_to_world(sx, sy);

    info!(
        "Built level '{}': {} enemies, {} targets, {} doors",
        definition.name,
        enemies.len(),
        targets.len(),
        doors.len()
    );

    BuiltLevel {
        level,
        enemies,
        targets,
        doors,
        player_start,
    }
}
