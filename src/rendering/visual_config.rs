//! Visual configuration loaded from external RON file.
//!
//! Allows tweaking colours, layers and camera feel without recompilation.

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::sim::{EntityKind, EntityView};
use crate::world::read_ron_file;

/// Visual configuration loaded from assets/data/rendering/visual_config.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    // Level
    pub clear_color: (f32, f32, f32),
    pub floor_color: (f32, f32, f32),
    pub wall_color: (f32, f32, f32),
    // Entities
    pub player_color: (f32, f32, f32),
    pub slime_color: (f32, f32, f32),
    pub skeleton_color: (f32, f32, f32),
    pub staggered_color: (f32, f32, f32),
    pub fireball_color: (f32, f32, f32),
    pub explosion_color: (f32, f32, f32),
    pub target_color: (f32, f32, f32),
    pub door_closed_color: (f32, f32, f32),
    pub door_open_color: (f32, f32, f32),
    pub torch_color: (f32, f32, f32),
    /// RGBA of the light pool around the torch
    pub torch_glow_color: (f32, f32, f32, f32),
    // Layers
    pub tile_z: f32,
    pub glow_z: f32,
    pub entity_z: f32,
    pub overlay_z: f32,
    // Camera
    pub camera_follow_speed: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            clear_color: (0.03, 0.03, 0.04),
            floor_color: (0.16, 0.15, 0.14),
            wall_color: (0.32, 0.30, 0.34),
            player_color: (0.85, 0.80, 0.65),
            slime_color: (0.35, 0.75, 0.35),
            skeleton_color: (0.85, 0.85, 0.80),
            staggered_color: (0.95, 0.35, 0.35),
            fireball_color: (1.0, 0.55, 0.15),
            explosion_color: (1.0, 0.85, 0.35),
            target_color: (0.65, 0.45, 0.25),
            door_closed_color: (0.45, 0.28, 0.12),
            door_open_color: (0.20, 0.12, 0.05),
            torch_color: (1.0, 0.75, 0.30),
            torch_glow_color: (1.0, 0.75, 0.35, 0.12),
            tile_z: 0.0,
            glow_z: 1.0,
            entity_z: 2.0,
            overlay_z: 5.0,
            camera_follow_speed: 8.0,
        }
    }
}

fn rgb(c: (f32, f32, f32)) -> Color {
    Color::srgb(c.0, c.1, c.2)
}

impl VisualConfig {
    /// Load visual config from RON file.
    pub fn load() -> Self {
        let path = Path::new("assets/data/rendering/visual_config.ron");
        match read_ron_file(path) {
            Ok(config) => {
                info!("Loaded visual config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("{}. Using default visuals.", e);
                Self::default()
            }
        }
    }

    pub fn clear_color(&self) -> Color {
        rgb(self.clear_color)
    }

    pub fn floor_color(&self) -> Color {
        rgb(self.floor_color)
    }

    pub fn wall_color(&self) -> Color {
        rgb(self.wall_color)
    }

    pub fn torch_glow_color(&self) -> Color {
        let (r, g, b, a) = self.torch_glow_color;
        Color::srgba(r, g, b, a)
    }

    /// Colour for an entity in its current state.
    pub fn color_for(&self, view: &EntityView) -> Color {
        let c = match view.kind {
            EntityKind::Player => self.player_color,
            EntityKind::Slime | EntityKind::Skeleton if view.tag == "staggered" => self.staggered_color,
            EntityKind::Slime => self.slime_color,
            EntityKind::Skeleton => self.skeleton_color,
            EntityKind::Projectile if view.tag.starts_with("exploding") => self.explosion_color,
            EntityKind::Projectile => self.fireball_color,
            EntityKind::Target => self.target_color,
            EntityKind::Door if view.tag == "open" => self.door_open_color,
            EntityKind::Door => self.door_closed_color,
            EntityKind::Torch => self.torch_color,
        };
        rgb(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityId;

    fn view(kind: EntityKind, tag: &str) -> EntityView {
        EntityView {
            id: EntityId(1),
            kind,
            position: Vec2::ZERO,
            size: Vec2::ONE,
            facing_left: false,
            tag: tag.to_string(),
        }
    }

    #[test]
    fn state_tags_change_colours() {
        let config = VisualConfig::default();
        assert_ne!(
            config.color_for(&view(EntityKind::Projectile, "flying")),
            config.color_for(&view(EntityKind::Projectile, "exploding#3"))
        );
        assert_eq!(
            config.color_for(&view(EntityKind::Slime, "staggered")),
            config.color_for(&view(EntityKind::Skeleton, "staggered"))
        );
    }

    #[test]
    fn partial_visual_config_keeps_defaults() {
        let config: VisualConfig = ron::from_str("(wall_color: (1.0, 0.0, 0.0))").expect("valid RON");
        assert_eq!(config.wall_color, (1.0, 0.0, 0.0));
        assert_eq!(config.camera_follow_speed, 8.0);
    }
}
