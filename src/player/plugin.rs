//! Player plugin - input sampling.

use bevy::prelude::*;

use super::movement;

/// Player plugin - turns keyboard and mouse into simulation input.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_input_systems(app);
    }
}
