//! Tile sprites for the current level.

use bevy::prelude::*;

use super::level::Level;
use crate::rendering::{sim_to_render, VisualConfig};

/// Marker for all level visuals that are cleaned up with the level.
#[derive(Component)]
pub struct LevelGeometry;

/// Spawn one sprite per tile. Walls and floors differ only in colour.
pub fn spawn_level_tiles(commands: &mut Commands, level: &Level, visual_config: &VisualConfig) {
    let size = Vec2::splat(level.tile_size());
    let mut count = 0;

    for (cell, kind) in level.tiles() {
        let rect = level.tile_rect(cell.x, cell.y);
        let color = if kind.is_wall() {
            visual_config.wall_color()
        } else {
            visual_config.floor_color()
        };
        commands.spawn((
            Sprite::from_color(color, size),
            Transform::from_translation(sim_to_render(rect.center()).extend(visual_config.tile_z)),
            LevelGeometry,
        ));
        count += 1;
    }

    debug!("Spawned {} tiles for '{}'", count, level.name());
}

/// Despawn every level visual.
pub fn despawn_level_tiles(commands: &mut Commands, tiles: &Query<Entity, With<LevelGeometry>>) {
    for entity in tiles.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
