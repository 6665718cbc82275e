//! Loot rolls on enemy death.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::items::{Item, ItemCategory, ItemDatabase};

/// Per-category drop chances carried by every enemy.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct DropTable {
    pub weapon_rate: f32,
    pub armor_rate: f32,
    pub accessory_rate: f32,
    pub lowest_drop_level: u32,
}

impl Default for DropTable {
    fn default() -> Self {
        Self {
            weapon_rate: 0.1,
            armor_rate: 0.1,
            accessory_rate: 0.05,
            lowest_drop_level: 1,
        }
    }
}

impl DropTable {
    pub fn rate(&self, category: ItemCategory) -> f32 {
        match category {
            ItemCategory::Weapon => self.weapon_rate,
            ItemCategory::Armor => self.armor_rate,
            ItemCategory::Accessory => self.accessory_rate,
        }
    }
}

/// Roll each category independently. Every dropped item is a random
/// template of its category scaled to a level in
/// `[lowest_drop_level, enemy_level]`.
pub fn roll_drops<R: Rng + ?Sized>(
    rng: &mut R,
    table: &DropTable,
    enemy_level: u32,
    items: &ItemDatabase,
) -> Vec<Item> {
    let max_level = enemy_level.max(1);
    let min_level = table.lowest_drop_level.clamp(1, max_level);

    let mut drops = Vec::new();
    for category in ItemCategory::ALL {
        if rng.gen::<f32>() >= table.rate(category) {
            continue;
        }
        let Some(template) = items.templates(category).choose(rng) else {
            continue;
        };
        let level = rng.gen_range(min_level..=max_level);
        drops.push(template.scaled(level));
    }
    drops
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn drops_respect_count_and_level_bounds() {
        let items = ItemDatabase::builtin();
        let table = DropTable {
            weapon_rate: 0.7,
            armor_rate: 0.5,
            accessory_rate: 0.3,
            lowest_drop_level: 2,
        };
        let mut rng = StdRng::seed_from_u64(42);
        let mut saw_drop = false;

        for _ in 0..500 {
            let drops = roll_drops(&mut rng, &table, 5, &items);
            assert!(drops.len() <= 3);
            for item in &drops {
                assert!((2..=5).contains(&item.level), "level {}", item.level);
            }
            saw_drop |= !drops.is_empty();
        }
        assert!(saw_drop);
    }

    #[test]
    fn zero_rates_never_drop() {
        let items = ItemDatabase::builtin();
        let table = DropTable {
            weapon_rate: 0.0,
            armor_rate: 0.0,
            accessory_rate: 0.0,
            lowest_drop_level: 1,
        };
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            assert!(roll_drops(&mut rng, &table, 3, &items).is_empty());
        }
    }

    #[test]
    fn certain_drops_yield_one_item_per_category() {
        let items = ItemDatabase::builtin();
        let table = DropTable {
            weapon_rate: 1.0,
            armor_rate: 1.0,
            accessory_rate: 1.0,
            lowest_drop_level: 1,
        };
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(roll_drops(&mut rng, &table, 1, &items).len(), 3);
    }
}
