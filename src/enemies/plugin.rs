//! Enemy plugin - enemy definition loading.
//!
//! Enemies themselves live in the simulation; this plugin only provides the
//! registry they are built from.

use bevy::prelude::*;

use super::data::load_enemy_definitions;

/// Enemy plugin - loads enemy definitions at startup.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_enemy_definitions);
    }
}
