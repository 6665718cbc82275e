//! Simulation core - all game rules, advanced once per frame.
//!
//! The core is plain Rust owned by a single [`SimulationState`] resource.
//! Bevy systems feed it a [`FrameInput`], call [`SimulationState::step`], and
//! forward the events it produces; rendering only reads [`EntityView`]
//! snapshots.

pub mod config;
mod feedback;
mod ids;
mod input;
mod plugin;
mod state;
mod step;
mod traits;
mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use config::SimConfig;
pub use feedback::{DamageNumber, HealthBar, SimEvent, SoundCue, ENEMY_DAMAGE_COLOR, PLAYER_DAMAGE_COLOR};
pub use ids::{EntityId, IdAllocator};
pub use input::{normalized_movement, FrameInput};
pub use plugin::{SimSet, SimulationPlugin};
pub use state::SimulationState;
pub use traits::{Attacker, Lootable, Movable, Vision};
pub use view::{EntityKind, EntityView};
