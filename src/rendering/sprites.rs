//! Sprites mirroring the simulation's entity snapshot.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::visual_config::VisualConfig;
use super::{sim_to_render, GameCamera};
use crate::core::SmoothFollow;
use crate::sim::{EntityId, SimulationState};

/// Sprite standing in for one simulation entity.
#[derive(Component)]
pub struct SimSprite(pub EntityId);

/// Light pool drawn under the torch.
#[derive(Component)]
pub struct TorchGlow;

/// Sprite entity for every live simulation id.
#[derive(Resource, Default)]
pub struct SpriteIndex {
    entities: HashMap<EntityId, Entity>,
}

/// Create, move and retire sprites so they match this frame's snapshot.
pub fn sync_entity_sprites(
    mut commands: Commands,
    state: Option<Res<SimulationState>>,
    config: Res<VisualConfig>,
    mut index: ResMut<SpriteIndex>,
    mut sprites: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<SimSprite>>,
) {
    let Some(state) = state else {
        return;
    };

    let views = state.views();
    let mut seen = HashSet::with_capacity(views.len());
    for view in &views {
        seen.insert(view.id);
        let color = config.color_for(view);
        let translation = sim_to_render(view.position).extend(config.entity_z);
        let visibility = if view.tag == "respawning" {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };

        let existing = index.entities.get(&view.id).copied();
        match existing.and_then(|entity| sprites.get_mut(entity).ok()) {
            Some((mut sprite, mut transform, mut visible)) => {
                sprite.color = color;
                sprite.custom_size = Some(view.size);
                sprite.flip_x = view.facing_left;
                transform.translation = translation;
                *visible = visibility;
            }
            None => {
                let entity = commands
                    .spawn((
                        SimSprite(view.id),
                        Sprite {
                            color,
                            custom_size: Some(view.size),
                            flip_x: view.facing_left,
                            ..default()
                        },
                        Transform::from_translation(translation),
                        visibility,
                    ))
                    .id();
                index.entities.insert(view.id, entity);
            }
        }
    }

    index.entities.retain(|id, entity| {
        let keep = seen.contains(id);
        if !keep {
            commands.entity(*entity).despawn_recursive();
        }
        keep
    });
}

/// Keep the light pool on the torch, sized to its glow radius.
pub fn update_torch_glow(
    mut commands: Commands,
    state: Option<Res<SimulationState>>,
    config: Res<VisualConfig>,
    mut glow: Query<(&mut Transform, &mut Sprite), With<TorchGlow>>,
) {
    let Some(state) = state else {
        return;
    };
    let Some(torch) = state.torch_position() else {
        return;
    };
    let translation = sim_to_render(torch).extend(config.glow_z);
    let size = Vec2::splat(state.config.torch.glow_radius * 2.0);

    match glow.get_single_mut() {
        Ok((mut transform, mut sprite)) => {
            transform.translation = translation;
            sprite.custom_size = Some(size);
        }
        Err(_) => {
            commands.spawn((
                TorchGlow,
                Sprite::from_color(config.torch_glow_color(), size),
                Transform::from_translation(translation),
            ));
        }
    }
}

/// Point the camera's smoothing target at the player.
pub fn follow_player(
    state: Option<Res<SimulationState>>,
    mut camera: Query<&mut SmoothFollow, With<GameCamera>>,
) {
    let Some(state) = state else {
        return;
    };
    let Ok(mut follow) = camera.get_single_mut() else {
        return;
    };
    follow.target = Some(sim_to_render(state.player.position()));
}

/// Despawn every mirrored sprite when leaving the game.
pub fn clear_entity_sprites(
    mut commands: Commands,
    mut index: ResMut<SpriteIndex>,
    glow: Query<Entity, With<TorchGlow>>,
) {
    for (_, entity) in index.entities.drain() {
        commands.entity(entity).despawn_recursive();
    }
    for entity in glow.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
