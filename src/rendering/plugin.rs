//! Rendering plugin - 2D camera and sprite presentation.
//!
//! The world is drawn with flat-coloured sprites straight from the
//! simulation snapshot; simulation space is y-down, render space y-up.

use bevy::prelude::*;

use super::sprites::{
    clear_entity_sprites, follow_player, sync_entity_sprites, update_torch_glow, SpriteIndex,
};
use super::visual_config::VisualConfig;
use crate::core::{GameState, SmoothFollow};
use crate::sim::SimSet;

/// Rendering plugin - camera, clear colour and entity sprites.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpriteIndex>()
            .add_systems(Startup, setup_rendering)
            .add_systems(
                Update,
                (sync_entity_sprites, update_torch_glow, follow_player).in_set(SimSet::Present),
            )
            .add_systems(OnExit(GameState::InGame), clear_entity_sprites);
    }
}

/// The one camera, shared by menus and gameplay.
#[derive(Component)]
pub struct GameCamera;

/// Load visuals and spawn the camera.
fn setup_rendering(mut commands: Commands) {
    let config = VisualConfig::load();
    commands.insert_resource(ClearColor(config.clear_color()));
    commands.spawn((
        Camera2d,
        GameCamera,
        SmoothFollow::new(config.camera_follow_speed),
    ));
    commands.insert_resource(config);
}
