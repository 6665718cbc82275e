//! UI plugin - menus, HUD, and interface elements.

use bevy::prelude::*;

use super::{feedback, hud, inventory};
use crate::core::{GameState, PlayState};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);
        feedback::setup_feedback_systems(app);
        inventory::setup_inventory_systems(app);

        app.add_systems(OnEnter(GameState::MainMenu), setup_main_menu)
            .add_systems(OnExit(GameState::MainMenu), despawn_all::<MainMenuUi>)
            .add_systems(OnEnter(PlayState::Paused), setup_pause_menu)
            .add_systems(OnExit(PlayState::Paused), despawn_all::<PauseMenuUi>)
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(OnExit(GameState::GameOver), despawn_all::<GameOverUi>)
            .add_systems(Update, handle_menu_buttons);
    }
}

#[derive(Component)]
struct MainMenuUi;

#[derive(Component)]
struct PauseMenuUi;

#[derive(Component)]
struct GameOverUi;

/// What a menu button does when pressed.
#[derive(Component, Debug, Clone, Copy)]
enum MenuButton {
    NewGame,
    Resume,
    Retry,
    MainMenu,
    Quit,
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.14, 0.12);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.22, 0.18);
const BUTTON_PRESSED: Color = Color::srgb(0.35, 0.30, 0.22);

fn menu_root(background: Color) -> (Node, BackgroundColor) {
    (
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(background),
    )
}

fn spawn_title(parent: &mut ChildBuilder, text: &str, font_size: f32, color: Color, gap: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(gap)),
            ..default()
        },
    ));
}

fn spawn_menu_button(parent: &mut ChildBuilder, text: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(220.0),
                height: Val::Px(48.0),
                margin: UiRect::all(Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(BUTTON_IDLE),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.82, 0.75)),
            ));
        });
}

fn setup_main_menu(mut commands: Commands) {
    commands
        .spawn((menu_root(Color::srgb(0.03, 0.03, 0.04)), MainMenuUi))
        .with_children(|parent| {
            spawn_title(parent, "TORCHBOUND", 72.0, Color::srgb(1.0, 0.75, 0.35), 24.0);
            spawn_title(
                parent,
                "WASD move, Shift sprint, LMB sword, RMB fireball\nE interact, F torch drop/pick up, T torch follow, I inventory",
                16.0,
                Color::srgb(0.5, 0.5, 0.55),
                48.0,
            );
            spawn_menu_button(parent, "New Game", MenuButton::NewGame);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

fn setup_pause_menu(mut commands: Commands) {
    commands
        .spawn((menu_root(Color::srgba(0.0, 0.0, 0.0, 0.7)), PauseMenuUi))
        .with_children(|parent| {
            spawn_title(parent, "PAUSED", 48.0, Color::srgb(0.8, 0.8, 0.85), 40.0);
            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

fn setup_game_over(mut commands: Commands) {
    commands
        .spawn((menu_root(Color::srgba(0.1, 0.0, 0.0, 0.9)), GameOverUi))
        .with_children(|parent| {
            spawn_title(parent, "YOU DIED", 72.0, Color::srgb(0.8, 0.2, 0.2), 60.0);
            spawn_menu_button(parent, "Retry", MenuButton::Retry);
            spawn_menu_button(parent, "Main Menu", MenuButton::MainMenu);
        });
}

/// Every menu shares one button handler; only the buttons on screen can fire.
fn handle_menu_buttons(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_game_state: ResMut<NextState<GameState>>,
    mut next_play_state: ResMut<NextState<PlayState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                match button {
                    MenuButton::NewGame | MenuButton::Retry => next_game_state.set(GameState::InGame),
                    MenuButton::Resume => next_play_state.set(PlayState::Exploring),
                    MenuButton::MainMenu => next_game_state.set(GameState::MainMenu),
                    MenuButton::Quit => {
                        exit.send(AppExit::Success);
                    }
                }
            }
            Interaction::Hovered => *bg_color = BUTTON_HOVERED.into(),
            Interaction::None => *bg_color = BUTTON_IDLE.into(),
        }
    }
}

pub(super) fn despawn_all<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
