//! Torchbound - Entry Point
//!
//! Controls:
//! - WASD: Move
//! - Shift: Sprint
//! - Left mouse: Sword swing towards the cursor
//! - Right mouse: Fireball towards the cursor
//! - E: Open doors / walk through open ones
//! - F: Drop or pick up the torch
//! - T: Torch follows / is carried
//! - I or Tab: Inventory
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;

fn main() {
    App::new()
        // Bevy default plugins, with kira taking over audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Torchbound".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .add_plugins(torchbound::TorchboundPlugin)

        .run();
}
