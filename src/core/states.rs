//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. The simulation only
//! advances in `PlayState::Exploring`; the world stays visible while the
//! inventory or pause overlay is open.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - Move to `MainMenu` when loading completes
/// - Enter `InGame` when the player starts or retries
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Title screen
    MainMenu,
    /// Active gameplay
    InGame,
    /// Player has died
    GameOver,
}

/// Sub-states for gameplay - only active when GameState::InGame.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Normal gameplay - movement, combat, exploration
    #[default]
    Exploring,
    /// Inventory screen is open, simulation frozen
    Inventory,
    /// Pause overlay, simulation frozen
    Paused,
}
