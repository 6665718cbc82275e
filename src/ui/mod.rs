//! UI module - menus, HUD, floating feedback and the inventory panel.

mod feedback;
mod hud;
mod inventory;
mod plugin;

pub use plugin::UiPlugin;
