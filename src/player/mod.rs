//! Player module - player state, progression and input.

mod components;
mod movement;
mod plugin;

pub use components::*;
pub use movement::InputBindings;
pub use plugin::PlayerPlugin;
