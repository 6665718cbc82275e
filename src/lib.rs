//! Torchbound - a 2D top-down action RPG in Bevy.
//!
//! A lone adventurer fights through tile-grid dungeons with a sword and
//! fireballs while a torch decides what the monsters can see.
//!
//! # Architecture
//!
//! Game rules live in a pure simulation ([`sim::SimulationState`]) owned as
//! a Bevy resource and advanced once per frame. The plugins around it feed
//! it input and present its results:
//!
//! - **Core**: Game states, cross-plugin events, camera smoothing
//! - **Sim**: Frame pipeline, entity ids, events out of the simulation
//! - **Player**: Player stats, leveling, gear and input sampling
//! - **Enemies**: Enemy definitions, AI and merging
//! - **Combat**: Damage rolls, sword swings, fireballs, loot
//! - **Items**: Item templates, inventory and equipment
//! - **Torch**: The light source enemies chase
//! - **World**: Levels, collision, props, level transitions
//! - **Rendering**: 2D camera and sprites
//! - **Audio**: Sound cues
//! - **UI**: Menus, HUD, damage numbers, inventory panel

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod items;
pub mod player;
pub mod rendering;
pub mod sim;
pub mod torch;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct TorchboundPlugin;

impl Plugin for TorchboundPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Simulation driver
            .add_plugins(sim::SimulationPlugin)

            // Input
            .add_plugins(player::PlayerPlugin)

            // Enemy definitions
            .add_plugins(enemies::EnemyPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Rendering systems
            .add_plugins(rendering::RenderingPlugin)

            // Sound cues
            .add_plugins(audio::SoundPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
