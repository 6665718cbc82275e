//! Damage rolls for melee, spells and enemy attacks.

use rand::Rng;

use crate::items::Item;

/// Unarmed base melee roll: [1+(str-1)*5, 5+(str-1)*5].
pub fn base_melee_range(strength: u32) -> (u32, u32) {
    let bonus = strength.saturating_sub(1) * 5;
    (1 + bonus, 5 + bonus)
}

/// Base spell roll: [int*10, int*10+9].
pub fn base_spell_range(intelligence: u32) -> (u32, u32) {
    let base = intelligence * 10;
    (base, base + 9)
}

fn roll_range<R: Rng + ?Sized>(rng: &mut R, (min, max): (u32, u32)) -> u32 {
    if max <= min {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

/// Melee damage. A weapon with an attack range multiplies the base roll.
pub fn roll_melee<R: Rng + ?Sized>(rng: &mut R, strength: u32, weapon: Option<&Item>) -> u32 {
    let base = roll_range(rng, base_melee_range(strength));
    match weapon.and_then(Item::attack_range) {
        Some(range) => roll_range(rng, range) * base,
        None => base,
    }
}

/// Fireball damage. The weapon's magic roll defaults to 1.
pub fn roll_spell<R: Rng + ?Sized>(rng: &mut R, intelligence: u32, weapon: Option<&Item>) -> u32 {
    let base = roll_range(rng, base_spell_range(intelligence));
    let weapon_roll = weapon
        .and_then(Item::magic_range)
        .map(|range| roll_range(rng, range))
        .unwrap_or(1);
    weapon_roll * base
}

/// Enemy attack roll within its derived damage range.
pub fn roll_enemy_attack<R: Rng + ?Sized>(rng: &mut R, range: (u32, u32)) -> u32 {
    roll_range(rng, range)
}

/// Chance that a defender with `dexterity` avoids an attack, capped at 50%.
pub fn dodge_chance(dexterity: u32) -> f32 {
    (dexterity as f32 * 0.03).min(0.5)
}

/// Roll whether an attack lands against a defender.
pub fn attack_lands<R: Rng + ?Sized>(rng: &mut R, defender_dexterity: u32) -> bool {
    rng.gen::<f32>() > dodge_chance(defender_dexterity)
}
