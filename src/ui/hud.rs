//! In-game HUD - resource bars, level and a short notice line.

use bevy::prelude::*;

use super::plugin::despawn_all;
use crate::core::{GameState, ItemPickupEvent, LevelUpEvent};
use crate::player::Player;
use crate::sim::{SimSet, SimulationState};

/// Seconds a notice stays on screen.
const NOTICE_SECONDS: f32 = 3.0;

#[derive(Component)]
struct HudRoot;

/// Which player resource a bar fill tracks.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
enum HudBar {
    Health,
    Stamina,
    Mana,
    Experience,
}

impl HudBar {
    fn fraction(self, player: &Player) -> f32 {
        let (current, maximum) = match self {
            HudBar::Health => (player.hp, player.max_hp),
            HudBar::Stamina => (player.stamina, player.max_stamina),
            HudBar::Mana => (player.mana, player.max_mana),
            HudBar::Experience => (player.xp as f32, player.max_xp as f32),
        };
        if maximum <= 0.0 {
            0.0
        } else {
            (current / maximum).clamp(0.0, 1.0)
        }
    }
}

#[derive(Component)]
struct LevelText;

/// Latest pickup or level-up message.
#[derive(Component, Default)]
struct NoticeText {
    remaining: f32,
}

pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), despawn_all::<HudRoot>)
        .add_systems(
            Update,
            (update_bars, update_level_text, post_notices, fade_notices).in_set(SimSet::Present),
        );
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.5)),
                Node {
                    margin: UiRect::bottom(Val::Px(10.0)),
                    ..default()
                },
                NoticeText::default(),
            ));
            parent.spawn((
                Text::new("Level 1"),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
                Node {
                    margin: UiRect::bottom(Val::Px(6.0)),
                    ..default()
                },
                LevelText,
            ));
            spawn_bar(parent, "XP", Color::srgb(0.7, 0.6, 0.2), HudBar::Experience);
            spawn_bar(parent, "Mana", Color::srgb(0.25, 0.35, 0.9), HudBar::Mana);
            spawn_bar(parent, "Stamina", Color::srgb(0.2, 0.8, 0.3), HudBar::Stamina);
            spawn_bar(parent, "Health", Color::srgb(0.8, 0.2, 0.2), HudBar::Health);
        });
}

fn spawn_bar(parent: &mut ChildBuilder, label: &str, color: Color, bar: HudBar) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            margin: UiRect::bottom(Val::Px(5.0)),
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Text::new(label),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    width: Val::Px(64.0),
                    ..default()
                },
            ));
            row.spawn((
                Node {
                    width: Val::Px(160.0),
                    height: Val::Px(12.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
            ))
            .with_children(|background| {
                background.spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(color),
                    bar,
                ));
            });
        });
}

fn update_bars(state: Option<Res<SimulationState>>, mut bars: Query<(&HudBar, &mut Node)>) {
    let Some(state) = state else {
        return;
    };
    for (bar, mut node) in bars.iter_mut() {
        node.width = Val::Percent(bar.fraction(&state.player) * 100.0);
    }
}

fn update_level_text(
    state: Option<Res<SimulationState>>,
    mut texts: Query<&mut Text, With<LevelText>>,
) {
    let Some(state) = state else {
        return;
    };
    let player = &state.player;
    let label = if player.unassigned_points > 0 {
        format!("Level {} ({} points to spend)", player.level, player.unassigned_points)
    } else {
        format!("Level {}", player.level)
    };
    for mut text in texts.iter_mut() {
        if text.0 != label {
            text.0 = label.clone();
        }
    }
}

fn post_notices(
    mut pickups: EventReader<ItemPickupEvent>,
    mut level_ups: EventReader<LevelUpEvent>,
    mut notices: Query<(&mut Text, &mut NoticeText)>,
) {
    let mut latest = None;
    for pickup in pickups.read() {
        latest = Some(format!("Picked up {} (level {})", pickup.name, pickup.level));
    }
    for level_up in level_ups.read() {
        latest = Some(format!("Reached level {}!", level_up.new_level));
    }
    let Some(message) = latest else {
        return;
    };
    for (mut text, mut notice) in notices.iter_mut() {
        text.0 = message.clone();
        notice.remaining = NOTICE_SECONDS;
    }
}

fn fade_notices(time: Res<Time>, mut notices: Query<(&mut Text, &mut NoticeText)>) {
    for (mut text, mut notice) in notices.iter_mut() {
        if notice.remaining <= 0.0 {
            continue;
        }
        notice.remaining -= time.delta_secs();
        if notice.remaining <= 0.0 {
            text.0.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::config::PlayerTuning;
    use crate::sim::IdAllocator;

    #[test]
    fn bar_fractions_follow_player_resources() {
        let mut ids = IdAllocator::default();
        let mut player = Player::new(ids.allocate(), Vec2::ZERO, &PlayerTuning::default());
        assert_eq!(HudBar::Health.fraction(&player), 1.0);
        assert_eq!(HudBar::Experience.fraction(&player), 0.0);

        player.hp = player.max_hp / 4.0;
        assert!((HudBar::Health.fraction(&player) - 0.25).abs() < 1e-5);

        player.hp = -5.0;
        assert_eq!(HudBar::Health.fraction(&player), 0.0);
    }
}
