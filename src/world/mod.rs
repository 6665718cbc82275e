//! World module - geometry, levels, props and level construction.

mod builder;
pub mod data;
mod error;
mod geometry;
mod level;
mod plugin;
mod props;
mod spawning;

pub use builder::{build_level, BuiltLevel};
pub use data::{CurrentLevel, LevelDefinition, LevelRegistry, TileKind};
pub use error::{read_ron_file, DataLoadError};
pub use geometry::{direction_towards, overlaps_any, Aabb, Body, MoveOutcome};
pub use level::Level;
pub use plugin::WorldPlugin;
pub use props::{Door, Target};
pub use spawning::LevelGeometry;
