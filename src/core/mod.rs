//! Core game module - state machine, cross-plugin events and camera smoothing.

mod events;
mod plugin;
mod states;
mod tween;

pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
pub use tween::*;
