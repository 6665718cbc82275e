//! World plugin - level data loading, simulation setup and level transitions.

use bevy::prelude::*;

use crate::core::{GameState, LevelTransitionEvent};
use crate::enemies::EnemyRegistry;
use crate::items::ItemDatabase;
use crate::rendering::VisualConfig;
use crate::sim::{SimConfig, SimSet, SimulationState};

use super::data::{load_level_definitions, CurrentLevel, LevelRegistry};
use super::spawning::{despawn_level_tiles, spawn_level_tiles, LevelGeometry};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_level_definitions)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(
                Update,
                apply_level_transition
                    .after(SimSet::Step)
                    .before(SimSet::Present)
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnExit(GameState::InGame), cleanup_level);
    }
}

/// Build a fresh simulation on the current level and draw its tiles.
fn setup_level(
    mut commands: Commands,
    level_registry: Res<LevelRegistry>,
    current_level: Res<CurrentLevel>,
    config: Res<SimConfig>,
    enemy_registry: Res<EnemyRegistry>,
    items: Res<ItemDatabase>,
    visual_config: Res<VisualConfig>,
) {
    let definition = match level_registry.require(&current_level.name) {
        Ok(definition) => definition,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    info!("Building level: {}", definition.name);
    let state = SimulationState::new(
        definition,
        config.clone(),
        enemy_registry.clone(),
        items.clone(),
    );
    spawn_level_tiles(&mut commands, &state.level, &visual_config);
    commands.insert_resource(state);
}

/// Swap the simulation onto the level behind an opened door.
fn apply_level_transition(
    mut commands: Commands,
    mut transitions: EventReader<LevelTransitionEvent>,
    level_registry: Res<LevelRegistry>,
    mut current_level: ResMut<CurrentLevel>,
    state: Option<ResMut<SimulationState>>,
    visual_config: Res<VisualConfig>,
    tiles: Query<Entity, With<LevelGeometry>>,
) {
    let Some(mut state) = state else {
        return;
    };
    let Some(transition) = transitions.read().last() else {
        return;
    };

    let definition = match level_registry.require(&transition.next) {
        Ok(definition) => definition,
        Err(e) => {
            warn!("Level transition ignored: {}", e);
            state.pending_transition = None;
            return;
        }
    };

    state.load_level(definition);
    current_level.name = definition.name.clone();
    despawn_level_tiles(&mut commands, &tiles);
    spawn_level_tiles(&mut commands, &state.level, &visual_config);
}

/// Drop the simulation and its visuals when leaving InGame state.
fn cleanup_level(
    mut commands: Commands,
    tiles: Query<Entity, With<LevelGeometry>>,
    mut current_level: ResMut<CurrentLevel>,
) {
    despawn_level_tiles(&mut commands, &tiles);
    commands.remove_resource::<SimulationState>();
    *current_level = CurrentLevel::default();
}
