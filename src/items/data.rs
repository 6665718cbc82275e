//! Item templates and the item database.

use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

use crate::world::read_ron_file;

/// Which equipment slot an item is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum SlotClass {
    Helmet,
    Armor,
    MainHand,
    OffHand,
    Boots,
    /// Fits any of the four accessory slots.
    Accessory,
}

/// Loot category rolled independently on every kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Accessory,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 3] = [ItemCategory::Weapon, ItemCategory::Armor, ItemCategory::Accessory];
}

/// A concrete item. Templates are level 1; dropped items are scaled copies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Item {
    pub name: String,
    pub slot: SlotClass,
    #[serde(default)]
    pub attack: Option<(u32, u32)>,
    #[serde(default)]
    pub magic: Option<(u32, u32)>,
    #[serde(default)]
    pub armor: u32,
    #[serde(default)]
    pub speed: u32,
    #[serde(default = "default_item_level")]
    pub level: u32,
}

fn default_item_level() -> u32 {
    1
}

fn scale_stat(value: u32, multiplier: f64) -> u32 {
    (value as f64 * multiplier) as u32
}

impl Item {
    /// Copy of this template at `level`, every numeric stat multiplied by
    /// 1.2^(level-1) and truncated.
    pub fn scaled(&self, level: u32) -> Item {
        let level = level.max(1);
        let multiplier = 1.2f64.powi(level as i32 - 1);
        let scale_range = |range: Option<(u32, u32)>| {
            range.map(|(min, max)| (scale_stat(min, multiplier), scale_stat(max, multiplier)))
        };

        Item {
            name: self.name.clone(),
            slot: self.slot,
            attack: scale_range(self.attack),
            magic: scale_range(self.magic),
            armor: scale_stat(self.armor, multiplier),
            speed: scale_stat(self.speed, multiplier),
            level,
        }
    }

    /// Attack range if the item has a usable one.
    pub fn attack_range(&self) -> Option<(u32, u32)> {
        self.attack.filter(|&(_, max)| max > 0)
    }

    /// Magic range if the item has a non-zero one.
    pub fn magic_range(&self) -> Option<(u32, u32)> {
        self.magic.filter(|&(_, max)| max > 0)
    }
}

/// Level-1 templates grouped by loot category.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct ItemDatabase {
    pub weapons: Vec<Item>,
    pub armor: Vec<Item>,
    pub accessories: Vec<Item>,
}

impl Default for ItemDatabase {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ItemDatabase {
    pub fn templates(&self, category: ItemCategory) -> &[Item] {
        match category {
            ItemCategory::Weapon => &self.weapons,
            ItemCategory::Armor => &self.armor,
            ItemCategory::Accessory => &self.accessories,
        }
    }

    /// Find a template by name in any category.
    pub fn find(&self, name: &str) -> Option<&Item> {
        ItemCategory::ALL
            .iter()
            .flat_map(|category| self.templates(*category))
            .find(|item| item.name == name)
    }

    /// Compiled-in item set.
    pub fn builtin() -> Self {
        let item = |name: &str, slot| Item {
            name: name.to_string(),
            slot,
            attack: None,
            magic: None,
            armor: 0,
            speed: 0,
            level: 1,
        };

        Self {
            weapons: vec![
                Item {
                    attack: Some((1, 5)),
                    ..item("Sword", SlotClass::MainHand)
                },
                Item {
                    attack: Some((2, 7)),
                    magic: Some((3, 8)),
                    ..item("Staff", SlotClass::MainHand)
                },
                Item {
                    attack: Some((1, 4)),
                    ..item("Bow", SlotClass::MainHand)
                },
            ],
            armor: vec![
                Item {
                    armor: 2,
                    ..item("Helmet", SlotClass::Helmet)
                },
                Item {
                    armor: 5,
                    ..item("Armor", SlotClass::Armor)
                },
                Item {
                    speed: 10,
                    ..item("Boots", SlotClass::Boots)
                },
            ],
            accessories: vec![Item {
                magic: Some((1, 2)),
                ..item("Ring", SlotClass::Accessory)
            }],
        }
    }

    /// Load from assets/data/items/items.ron, falling back to built-ins.
    pub fn load() -> Self {
        let path = Path::new("assets/data/items/items.ron");
        match read_ron_file::<ItemDatabase>(path) {
            Ok(db) => {
                info!(
                    "Loaded item database: {} weapons, {} armor, {} accessories",
                    db.weapons.len(),
                    db.armor.len(),
                    db.accessories.len()
                );
                db
            }
            Err(e) => {
                warn!("{}. Using built-in items.", e);
                Self::builtin()
            }
        }
    }
}

/// Startup system inserting the item database.
pub fn load_item_database(mut commands: Commands) {
    commands.insert_resource(ItemDatabase::load());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_truncates_each_stat() {
        let db = ItemDatabase::builtin();
        let staff = db.find("Staff").expect("staff template");

        let same = staff.scaled(1);
        assert_eq!(same.attack, Some((2, 7)));
        assert_eq!(same.level, 1);

        // 1.2^2 = 1.44
        let scaled = staff.scaled(3);
        assert_eq!(scaled.attack, Some((2, 10)));
        assert_eq!(scaled.magic, Some((4, 11)));
        assert_eq!(scaled.level, 3);

        let boots = db.find("Boots").expect("boots template").scaled(2);
        assert_eq!(boots.speed, 12);
    }

    #[test]
    fn zero_ranges_are_not_usable() {
        let sword = Item {
            magic: Some((0, 0)),
            ..ItemDatabase::builtin().weapons[0].clone()
        };
        assert!(sword.attack_range().is_some());
        assert!(sword.magic_range().is_none());
    }

    #[test]
    fn parses_item_ron() {
        let source = r#"(
            weapons: [(name: "Club", slot: MainHand, attack: Some((2, 3)))],
            armor: [(name: "Cap", slot: Helmet, armor: 1)],
            accessories: [],
        )"#;
        let db: ItemDatabase = ron::from_str(source).expect("valid RON");
        assert_eq!(db.weapons[0].level, 1);
        assert_eq!(db.armor[0].armor, 1);
        assert!(db.templates(ItemCategory::Accessory).is_empty());
    }

    #[test]
    fn shipped_items_match_builtins() {
        let shipped: ItemDatabase =
            read_ron_file(Path::new("assets/data/items/items.ron")).expect("shipped items parse");
        let builtin = ItemDatabase::builtin();
        assert_eq!(shipped.weapons, builtin.weapons);
        assert_eq!(shipped.armor, builtin.armor);
        assert_eq!(shipped.accessories, builtin.accessories);
    }
}
