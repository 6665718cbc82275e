//! Keyboard and mouse sampling into the simulation's frame input.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::rendering::{render_to_sim, GameCamera};
use crate::sim::{normalized_movement, FrameInput, SimSet};

/// Key and button bindings for gameplay.
#[derive(Resource, Debug, Clone)]
pub struct InputBindings {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub sprint: KeyCode,
    pub interact: KeyCode,
    pub torch_drop_pickup: KeyCode,
    pub torch_follow: KeyCode,
    pub melee: MouseButton,
    pub cast: MouseButton,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            up: KeyCode::KeyW,
            down: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            sprint: KeyCode::ShiftLeft,
            interact: KeyCode::KeyE,
            torch_drop_pickup: KeyCode::KeyF,
            torch_follow: KeyCode::KeyT,
            melee: MouseButton::Left,
            cast: MouseButton::Right,
        }
    }
}

/// Set up input sampling.
pub fn setup_input_systems(app: &mut App) {
    app.init_resource::<InputBindings>()
        .add_systems(Update, sample_player_input.in_set(SimSet::Input));
}

/// Raw WASD direction in simulation space (y down).
fn movement_direction(keyboard: &ButtonInput<KeyCode>, bindings: &InputBindings) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if keyboard.pressed(bindings.up) {
        direction.y -= 1.0;
    }
    if keyboard.pressed(bindings.down) {
        direction.y += 1.0;
    }
    if keyboard.pressed(bindings.left) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(bindings.right) {
        direction.x += 1.0;
    }
    direction
}

/// Fill `FrameInput` for this frame. Action flags accumulate until the
/// simulation consumes them.
pub fn sample_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<InputBindings>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<GameCamera>>,
    mut input: ResMut<FrameInput>,
) {
    input.movement = normalized_movement(movement_direction(&keyboard, &bindings));
    input.sprint = keyboard.pressed(bindings.sprint);

    input.melee |= mouse.just_pressed(bindings.melee);
    input.cast |= mouse.just_pressed(bindings.cast);
    input.interact |= keyboard.just_pressed(bindings.interact);
    input.torch_drop_pickup |= keyboard.just_pressed(bindings.torch_drop_pickup);
    input.torch_follow_toggle |= keyboard.just_pressed(bindings.torch_follow);

    let cursor = window_query.get_single().ok().and_then(|w| w.cursor_position());
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    input.aim_point = cursor
        .and_then(|c| camera.viewport_to_world_2d(camera_transform, c).ok())
        .map(render_to_sim);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_is_negative_y_in_simulation_space() {
        let bindings = InputBindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyD);

        let direction = movement_direction(&keyboard, &bindings);
        assert_eq!(direction, Vec2::new(1.0, -1.0));
        assert!((normalized_movement(direction).length() - 1.0).abs() < 1e-6);
    }
}
