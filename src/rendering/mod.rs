//! Rendering module - camera, visual config and sprite sync.

mod plugin;
mod sprites;
pub mod visual_config;

use bevy::prelude::*;

pub use plugin::{GameCamera, RenderingPlugin};
pub use visual_config::VisualConfig;

/// Simulation space (y down) to render space (y up).
pub fn sim_to_render(position: Vec2) -> Vec2 {
    Vec2::new(position.x, -position.y)
}

/// Render space back to simulation space.
pub fn render_to_sim(position: Vec2) -> Vec2 {
    Vec2::new(position.x, -position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_flip_round_trips() {
        let p = Vec2::new(120.0, 72.0);
        assert_eq!(sim_to_render(p), Vec2::new(120.0, -72.0));
        assert_eq!(render_to_sim(sim_to_render(p)), p);
    }
}
