//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::prelude::*;

use super::events::*;
use super::states::*;
use super::tween::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, MainMenu, InGame, GameOver) and play sub-states
/// - Events re-sent from the simulation
/// - Pause and inventory toggles, game over on death
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<DamageNumberEvent>()
            .add_event::<SoundCueEvent>()
            .add_event::<ItemPickupEvent>()
            .add_event::<LevelUpEvent>()
            .add_event::<PlayerDiedEvent>()
            .add_event::<LevelTransitionEvent>()

            // Data files are read at startup, so loading is already done
            .add_systems(OnEnter(GameState::Loading), transition_to_main_menu)

            .add_systems(
                Update,
                (handle_pause_input, handle_inventory_input, enter_game_over)
                    .run_if(in_state(GameState::InGame)),
            )

            .add_systems(Update, update_smooth_follow);
    }
}

fn transition_to_main_menu(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::MainMenu);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Exploring => next_state.set(PlayState::Paused),
            PlayState::Paused | PlayState::Inventory => next_state.set(PlayState::Exploring),
        }
    }
}

/// Handle I / Tab to open and close the inventory.
fn handle_inventory_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.any_just_pressed([KeyCode::KeyI, KeyCode::Tab]) {
        match current_state.get() {
            PlayState::Exploring => next_state.set(PlayState::Inventory),
            PlayState::Inventory => next_state.set(PlayState::Exploring),
            PlayState::Paused => {}
        }
    }
}

fn enter_game_over(
    mut deaths: EventReader<PlayerDiedEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if deaths.read().next().is_some() {
        info!("Game over");
        next_state.set(GameState::GameOver);
    }
}
