//! Per-frame player intent fed into the simulation.

use bevy::prelude::*;

/// Input sampled once per frame. Action flags are edge-triggered.
#[derive(Resource, Debug, Clone, Default)]
pub struct FrameInput {
    /// Unit-length or zero movement intent, y down.
    pub movement: Vec2,
    pub sprint: bool,
    /// Cursor position in simulation space, if known.
    pub aim_point: Option<Vec2>,
    pub melee: bool,
    pub cast: bool,
    /// Open a door or walk through an open one.
    pub interact: bool,
    /// Drop a held torch, or pick up one lying nearby.
    pub torch_drop_pickup: bool,
    /// Switch between carrying the torch and having it follow.
    pub torch_follow_toggle: bool,
}

impl FrameInput {
    /// Clear edge-triggered flags once the frame has consumed them.
    pub fn clear_actions(&mut self) {
        self.melee = false;
        self.cast = false;
        self.interact = false;
        self.torch_drop_pickup = false;
        self.torch_follow_toggle = false;
    }
}

/// Normalise a raw direction so diagonals are not faster.
pub fn normalized_movement(raw: Vec2) -> Vec2 {
    raw.try_normalize().unwrap_or(Vec2::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_movement_is_unit_length() {
        let movement = normalized_movement(Vec2::new(1.0, -1.0));
        assert!((movement.length() - 1.0).abs() < 1e-6);
        assert_eq!(normalized_movement(Vec2::ZERO), Vec2::ZERO);
    }
}
