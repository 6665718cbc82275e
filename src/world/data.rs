//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::{read_ron_file, DataLoadError};

// === Tile Types ===

/// Semantic tile kind decoded from a level character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Floor,
    Wall,
    EnemySpawn,
    MergedEnemySpawn,
    TargetSpawn,
    DoorSpawn,
    SkeletonSpawn,
}

impl TileKind {
    /// Decode a level character. Unknown characters are floor.
    pub fn from_char(c: char) -> Self {
        match c {
            '#' => TileKind::Wall,
            '0' => TileKind::EnemySpawn,
            '8' => TileKind::MergedEnemySpawn,
            '5' => TileKind::TargetSpawn,
            '7' => TileKind::DoorSpawn,
            'S' => TileKind::SkeletonSpawn,
            _ => TileKind::Floor,
        }
    }

    /// Whether this tile blocks movement and projectiles.
    pub fn is_wall(&self) -> bool {
        matches!(self, TileKind::Wall)
    }
}

// === Level Definition ===

fn default_tile_size() -> f32 {
    48.0
}

fn default_player_start() -> (i32, i32) {
    (1, 1)
}

fn default_monster_level() -> (u32, u32) {
    (1, 1)
}

/// Raw level definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinitionRaw {
    pub name: String,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
    #[serde(default = "default_player_start")]
    pub player_start: (i32, i32),
    /// Inclusive range for spawned monster levels.
    #[serde(default = "default_monster_level")]
    pub monster_level: (u32, u32),
    /// Level entered through this level's doors.
    #[serde(default)]
    pub next_level: Option<String>,
    pub rows: Vec<String>,
}

/// Processed level definition with decoded tiles.
#[derive(Debug, Clone)]
pub struct LevelDefinition {
    pub name: String,
    pub tile_size: f32,
    pub player_start: (i32, i32),
    pub monster_level_min: u32,
    pub monster_level_max: u32,
    pub next_level: Option<String>,
    pub width: usize,
    pub height: usize,
    /// Row-major tiles, every row padded to `width` with floor.
    pub tiles: Vec<Vec<TileKind>>,
}

impl LevelDefinition {
    /// Create from raw definition by decoding every character.
    pub fn from_raw(raw: LevelDefinitionRaw) -> Result<Self, DataLoadError> {
        let height = raw.rows.len();
        let width = raw.rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(DataLoadError::EmptyGrid(raw.name));
        }

        let tiles = raw
            .rows
            .iter()
            .map(|row| {
                let mut tile_row: Vec<TileKind> = row.chars().map(TileKind::from_char).collect();
                tile_row.resize(width, TileKind::Floor);
                tile_row
            })
            .collect();

        let (min, max) = raw.monster_level;
        let min = min.max(1);

        Ok(Self {
            name: raw.name,
            tile_size: raw.tile_size,
            player_start: raw.player_start,
            monster_level_min: min,
            monster_level_max: max.max(min),
            next_level: raw.next_level,
            width,
            height,
            tiles,
        })
    }

    /// Tile at grid position, or `None` outside the grid.
    pub fn tile(&self, x: i32, y: i32) -> Option<TileKind> {
        if x < 0 || y < 0 {
            return None;
        }
        self.tiles.get(y as usize)?.get(x as usize).copied()
    }

    /// Convert grid coordinates to world position (center of tile).
    pub fn grid_to_world(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(
            x as f32 * self.tile_size + self.tile_size / 2.0,
            y as f32 * self.tile_size + self.tile_size / 2.0,
        )
    }
}

/// Resource storing all loaded level definitions.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: HashMap<String, LevelDefinition>,
}

impl LevelRegistry {
    /// Get a level by name.
    pub fn get(&self, name: &str) -> Option<&LevelDefinition> {
        self.levels.get(name)
    }

    /// Like [`get`](Self::get), but a missing level is an error.
    pub fn require(&self, name: &str) -> Result<&LevelDefinition, DataLoadError> {
        self.get(name)
            .ok_or_else(|| DataLoadError::UnknownLevel(name.to_string()))
    }

    pub fn insert(&mut self, level: LevelDefinition) {
        self.levels.insert(level.name.clone(), level);
    }

    /// Registry holding only the compiled-in levels.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for raw in builtin_levels() {
            match LevelDefinition::from_raw(raw) {
                Ok(level) => registry.insert(level),
                Err(e) => error!("Built-in level rejected: {}", e),
            }
        }
        registry
    }
}

/// Resource indicating which level to load.
#[derive(Resource)]
pub struct CurrentLevel {
    pub name: String,
}

impl Default for CurrentLevel {
    fn default() -> Self {
        Self {
            name: "crypt".to_string(),
        }
    }
}

fn rows(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

/// Levels used when no level files are present.
pub fn builtin_levels() -> Vec<LevelDefinitionRaw> {
    vec![
        LevelDefinitionRaw {
            name: "crypt".to_string(),
            tile_size: default_tile_size(),
            player_start: (3, 6),
            monster_level: (1, 1),
            next_level: Some("halls".to_string()),
            rows: rows(&[
                "############################",
                "#..........................#",
                "#............#.............#",
                "#..........5.#.......0.....#",
                "#..........5.#.......0.....#",
                "#............#.............#",
                "#..........................#",
                "#.....S..............8.....#",
                "#..........................#",
                "#..........................#",
                "#.........................7#",
                "############################",
            ]),
        },
        LevelDefinitionRaw {
            name: "halls".to_string(),
            tile_size: default_tile_size(),
            player_start: (1, 11),
            monster_level: (1, 3),
            next_level: Some("crypt".to_string()),
            rows: rows(&[
                "##############################",
                "#..#.........#...............#",
                "#..######....#..######.......#",
                "#..#....#...........0#.......#",
                "#..#.0..#..######..#.#...S...#",
                "#..#....#..#....#..#.#.......#",
                "#..##.###..#.5..#..#.........#",
                "#..........#....#..#####.....#",
                "#..........##.###............#",
                "#.....0..............0.......#",
                "#############.....############",
                "#............................#",
                "#......8.................S...#",
                "############################7#",
            ]),
        },
    ]
}

/// Load all level definitions from assets/data/levels/.
pub fn load_level_definitions(mut commands: Commands) {
    let mut registry = LevelRegistry::default();
    let levels_path = Path::new("assets/data/levels");

    if levels_path.exists() {
        if let Ok(entries) = fs::read_dir(levels_path) {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.extension().is_some_and(|ext| ext == "ron") {
                    continue;
                }
                match read_ron_file::<LevelDefinitionRaw>(&path)
                    .and_then(LevelDefinition::from_raw)
                {
                    Ok(level) => {
                        info!("Loaded level: {} ({}x{})", level.name, level.width, level.height);
                        registry.insert(level);
                    }
                    Err(e) => error!("Failed to load level {:?}: {}", path, e),
                }
            }
        }
    } else {
        warn!("Levels directory not found: {:?}", levels_path);
    }

    if registry.levels.is_empty() {
        info!("No level files loaded, using built-in levels");
        registry = LevelRegistry::builtin();
    }

    info!("Loaded {} level(s)", registry.levels.len());
    commands.insert_resource(registry);
    commands.insert_resource(CurrentLevel::default());
}
