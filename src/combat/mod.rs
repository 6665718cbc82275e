//! Combat module - damage rolls, sword swings, fireballs and loot.

mod damage;
mod loot;
mod projectile;
mod swing;

pub use damage::{
    attack_lands, base_melee_range, base_spell_range, dodge_chance, roll_enemy_attack, roll_melee,
    roll_spell,
};
pub use loot::{roll_drops, DropTable};
pub use projectile::{Fireball, ProjectilePhase};
pub use swing::{sword_hitbox, Swing};
