//! Capabilities shared across entity kinds.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::{roll_enemy_attack, roll_melee, DropTable};
use crate::enemies::Enemy;
use crate::player::Player;
use crate::torch::Torch;
use crate::world::{Aabb, Body};

/// Anything with a collision body.
pub trait Movable {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn position(&self) -> Vec2 {
        self.body().position
    }

    fn rect(&self) -> Aabb {
        self.body().rect()
    }
}

/// Anything that notices points within a radius.
pub trait Vision: Movable {
    fn visibility_range(&self) -> f32;

    fn sees(&self, point: Vec2) -> bool {
        self.body().distance_to(point) <= self.visibility_range()
    }
}

/// Anything that deals damage.
pub trait Attacker {
    fn roll_attack<R: Rng + ?Sized>(&self, rng: &mut R) -> u32;
}

/// Anything that pays out xp and loot when killed.
pub trait Lootable {
    fn drop_table(&self) -> &DropTable;
    fn loot_level(&self) -> u32;
    fn xp_reward(&self) -> u32;
}

impl Movable for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Movable for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Movable for Torch {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Vision for Enemy {
    fn visibility_range(&self) -> f32 {
        self.visibility_range
    }
}

impl Attacker for Player {
    /// A melee swing with the main-hand weapon.
    fn roll_attack<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        roll_melee(rng, self.attributes.strength, self.weapon())
    }
}

impl Attacker for Enemy {
    fn roll_attack<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        roll_enemy_attack(rng, self.attack_damage)
    }
}

impl Lootable for Enemy {
    fn drop_table(&self) -> &DropTable {
        &self.drops
    }

    fn loot_level(&self) -> u32 {
        self.level
    }

    fn xp_reward(&self) -> u32 {
        self.xp_reward
    }
}
