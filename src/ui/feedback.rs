//! Floating damage numbers and world-space health bars.

use bevy::prelude::*;
use bevy::sprite::Anchor;

use super::plugin::despawn_all;
use crate::core::{DamageNumberEvent, GameState};
use crate::rendering::{sim_to_render, VisualConfig};
use crate::sim::{EntityId, HealthBar, SimSet, SimulationState};

/// Render-space pixels per second a damage number rises.
const RISE_SPEED: f32 = 40.0;
const HEALTH_BAR_SIZE: Vec2 = Vec2::new(40.0, 5.0);

/// A damage number drifting upward while it fades out.
#[derive(Component, Debug)]
struct FloatingNumber {
    age: f32,
    duration: f32,
}

impl FloatingNumber {
    /// Opacity at the current age, linear from 1 to 0.
    fn alpha(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.duration).clamp(0.0, 1.0)
    }

    fn expired(&self) -> bool {
        self.age >= self.duration
    }
}

/// Background sprite of a health bar drawn over a struck entity.
#[derive(Component)]
struct WorldHealthBar(EntityId);

#[derive(Component)]
struct WorldHealthBarFill;

pub fn setup_feedback_systems(app: &mut App) {
    app.add_systems(
        Update,
        (spawn_damage_numbers, animate_damage_numbers, sync_health_bars).in_set(SimSet::Present),
    )
    .add_systems(
        OnExit(GameState::InGame),
        (despawn_all::<FloatingNumber>, despawn_all::<WorldHealthBar>),
    );
}

fn spawn_damage_numbers(
    mut commands: Commands,
    mut events: EventReader<DamageNumberEvent>,
    visual_config: Res<VisualConfig>,
) {
    for event in events.read() {
        let [r, g, b] = event.color;
        let position = sim_to_render(event.position);
        commands.spawn((
            Text2d::new(event.value.to_string()),
            TextFont {
                font_size: 20.0,
                ..default()
            },
            TextColor(Color::srgb_u8(r, g, b)),
            Transform::from_xyz(position.x, position.y, visual_config.overlay_z),
            FloatingNumber {
                age: 0.0,
                duration: event.duration,
            },
        ));
    }
}

fn animate_damage_numbers(
    mut commands: Commands,
    time: Res<Time>,
    mut numbers: Query<(Entity, &mut FloatingNumber, &mut Transform, &mut TextColor)>,
) {
    let dt = time.delta_secs();
    for (entity, mut number, mut transform, mut color) in numbers.iter_mut() {
        number.age += dt;
        if number.expired() {
            commands.entity(entity).despawn_recursive();
            continue;
        }
        transform.translation.y += RISE_SPEED * dt;
        color.0 = color.0.with_alpha(number.alpha());
    }
}

fn fill_width(bar: &HealthBar) -> f32 {
    HEALTH_BAR_SIZE.x * bar.ratio()
}

/// Mirror `SimulationState::health_bars`: spawn new bars, move and resize
/// live ones, and drop bars whose entry expired.
fn sync_health_bars(
    mut commands: Commands,
    state: Option<Res<SimulationState>>,
    visual_config: Res<VisualConfig>,
    mut bars: Query<(Entity, &WorldHealthBar, &mut Transform, &Children)>,
    mut fills: Query<&mut Sprite, With<WorldHealthBarFill>>,
) {
    let Some(state) = state else {
        return;
    };

    let mut shown = Vec::new();
    for (entity, bar, mut transform, children) in bars.iter_mut() {
        let Some(health) = state.health_bars.get(&bar.0) else {
            commands.entity(entity).despawn_recursive();
            continue;
        };
        let position = sim_to_render(health.position);
        transform.translation = position.extend(visual_config.overlay_z);
        for &child in children.iter() {
            if let Ok(mut sprite) = fills.get_mut(child) {
                sprite.custom_size = Some(Vec2::new(fill_width(health), HEALTH_BAR_SIZE.y));
            }
        }
        shown.push(bar.0);
    }

    for (id, health) in state.health_bars.iter() {
        if shown.contains(id) {
            continue;
        }
        let position = sim_to_render(health.position);
        commands
            .spawn((
                Sprite::from_color(Color::srgb(0.1, 0.1, 0.1), HEALTH_BAR_SIZE),
                Transform::from_translation(position.extend(visual_config.overlay_z)),
                WorldHealthBar(*id),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Sprite {
                        color: Color::srgb(0.8, 0.15, 0.15),
                        custom_size: Some(Vec2::new(fill_width(health), HEALTH_BAR_SIZE.y)),
                        anchor: Anchor::CenterLeft,
                        ..default()
                    },
                    Transform::from_xyz(-HEALTH_BAR_SIZE.x / 2.0, 0.0, 0.1),
                    WorldHealthBarFill,
                ));
            });
    }
}
