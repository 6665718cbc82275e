//! Runtime level: tile grid plus the mutable set of blocking footprints.

use bevy::prelude::*;

use super::data::{LevelDefinition, TileKind};
use super::geometry::Aabb;
use crate::sim::EntityId;

/// A prop footprint currently blocking movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropSolid {
    pub owner: EntityId,
    pub rect: Aabb,
}

/// The loaded level.
///
/// Walls never change after load and are looked up through the grid. Target
/// and door footprints are the only mutable solids and are keyed by the
/// owning prop, so removing one never disturbs its neighbours.
#[derive(Debug, Clone)]
pub struct Level {
    pub definition: LevelDefinition,
    props: Vec<PropSolid>,
}

impl Level {
    pub fn new(definition: LevelDefinition) -> Self {
        Self {
            definition,
            props: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn tile_size(&self) -> f32 {
        self.definition.tile_size
    }

    /// Bounds-checked tile lookup; `None` outside the grid.
    pub fn tile(&self, x: i32, y: i32) -> Option<TileKind> {
        self.definition.tile(x, y)
    }

    pub fn tile_rect(&self, x: i32, y: i32) -> Aabb {
        let size = self.tile_size();
        Aabb::new(x as f32 * size, y as f32 * size, size, size)
    }

    /// Whole level in pixels.
    pub fn pixel_bounds(&self) -> Aabb {
        let size = self.tile_size();
        Aabb::new(
            0.0,
            0.0,
            self.definition.width as f32 * size,
            self.definition.height as f32 * size,
        )
    }

    /// Rectangles of wall tiles overlapping `rect`. Cells outside the grid
    /// are skipped.
    pub fn walls_overlapping(&self, rect: &Aabb) -> Vec<Aabb> {
        let size = self.tile_size();
        if size <= 0.0 {
            return Vec::new();
        }
        let x0 = (rect.x / size).floor() as i32;
        let x1 = (rect.right() / size).floor() as i32;
        let y0 = (rect.y / size).floor() as i32;
        let y1 = (rect.bottom() / size).floor() as i32;

        let mut walls = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                if self.tile(x, y).is_some_and(|t| t.is_wall()) {
                    let tile = self.tile_rect(x, y);
                    if tile.overlaps(rect) {
                        walls.push(tile);
                    }
                }
            }
        }
        walls
    }

    /// True if `rect` overlaps a wall tile or any prop footprint.
    pub fn blocks(&self, rect: &Aabb) -> bool {
        !self.walls_overlapping(rect).is_empty() || self.props.iter().any(|p| p.rect.overlaps(rect))
    }

    /// True if `rect` overlaps a solid that `start` does not already overlap.
    ///
    /// Movers use this so that something spawned or restored on top of them
    /// never pins them in place; they can always step out of it.
    pub fn blocks_new(&self, rect: &Aabb, start: &Aabb) -> bool {
        self.walls_overlapping(rect).iter().any(|wall| !wall.overlaps(start))
            || self
                .props
                .iter()
                .any(|p| p.rect.overlaps(rect) && !p.rect.overlaps(start))
    }

    pub fn add_prop_solid(&mut self, owner: EntityId, rect: Aabb) {
        if !self.has_prop_solid(owner) {
            self.props.push(PropSolid { owner, rect });
        }
    }

    /// Returns whether a footprint was removed.
    pub fn remove_prop_solid(&mut self, owner: EntityId) -> bool {
        let before = self.props.len();
        self.props.retain(|p| p.owner != owner);
        self.props.len() != before
    }

    pub fn has_prop_solid(&self, owner: EntityId) -> bool {
        self.props.iter().any(|p| p.owner == owner)
    }

    /// Every blocking rectangle: walls followed by prop footprints.
    pub fn solids(&self) -> Vec<Aabb> {
        let mut solids = Vec::new();
        for y in 0..self.definition.height as i32 {
            for x in 0..self.definition.width as i32 {
                if self.tile(x, y).is_some_and(|t| t.is_wall()) {
                    solids.push(self.tile_rect(x, y));
                }
            }
        }
        solids.extend(self.props.iter().map(|p| p.rect));
        solids
    }

    /// Tiles with their grid coordinates, for spawning and drawing.
    pub fn tiles(&self) -> impl Iterator<Item = (IVec2, TileKind)> + '_ {
        self.definition.tiles.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, kind)| (IVec2::new(x as i32, y as i32), *kind))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::data::LevelDefinitionRaw;

    fn level_from_rows(lines: &[&str]) -> Level {
        let raw = LevelDefinitionRaw {
            name: "test".to_string(),
            tile_size: 48.0,
            player_start: (1, 1),
            monster_level: (1, 1),
            next_level: None,
            rows: lines.iter().map(|l| l.to_string()).collect(),
        };
        Level::new(LevelDefinition::from_raw(raw).expect("valid level"))
    }

    #[test]
    fn walls_block_and_floor_does_not() {
        let level = level_from_rows(&["###", "#.#", "###"]);
        assert!(level.blocks(&Aabb::new(40.0, 60.0, 10.0, 10.0)));
        assert!(!level.blocks(&Aabb::new(60.0, 60.0, 20.0, 20.0)));
        assert_eq!(level.solids().len(), 8);
    }

    #[test]
    fn out_of_grid_is_not_a_wall() {
        let level = level_from_rows(&["#"]);
        assert!(level.walls_overlapping(&Aabb::new(-500.0, -500.0, 10.0, 10.0)).is_empty());
        assert!(level.walls_overlapping(&Aabb::new(500.0, 500.0, 10.0, 10.0)).is_empty());
    }

    #[test]
    fn already_overlapped_solids_do_not_pin_a_mover() {
        let mut level = level_from_rows(&["....", "...."]);
        level.add_prop_solid(EntityId(1), Aabb::new(40.0, 40.0, 40.0, 40.0));
        level.add_prop_solid(EntityId(2), Aabb::new(120.0, 40.0, 40.0, 40.0));

        let start = Aabb::new(50.0, 50.0, 20.0, 20.0);
        assert!(!level.blocks_new(&Aabb::new(60.0, 50.0, 20.0, 20.0), &start));
        assert!(level.blocks_new(&Aabb::new(110.0, 50.0, 20.0, 20.0), &start));
    }

    #[test]
    fn prop_footprints_are_keyed_by_owner() {
        let mut level = level_from_rows(&["....", "...."]);
        let rect = Aabb::new(10.0, 10.0, 40.0, 60.0);
        level.add_prop_solid(EntityId(7), rect);
        level.add_prop_solid(EntityId(7), rect);
        level.add_prop_solid(EntityId(8), Aabb::new(100.0, 10.0, 40.0, 60.0));

        assert_eq!(level.solids().len(), 2);
        assert!(level.blocks(&Aabb::new(20.0, 20.0, 5.0, 5.0)));
        assert!(level.remove_prop_solid(EntityId(7)));
        assert!(!level.blocks(&Aabb::new(20.0, 20.0, 5.0, 5.0)));
        assert!(level.has_prop_solid(EntityId(8)));
        assert!(!level.remove_prop_solid(EntityId(7)));
    }
}
