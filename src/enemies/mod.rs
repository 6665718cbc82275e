//! Enemies module - enemy state, definitions, AI and merging.

mod ai;
mod components;
pub mod data;
mod merge;
mod plugin;

pub use ai::{pursue_and_attack, select_target, AiContext, AttackOutcome, ChaseTarget};
pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use merge::{find_clusters, merge_members};
pub use plugin::EnemyPlugin;
