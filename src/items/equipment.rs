//! Equipment slots, inventory grid and equip legality.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use super::data::{Item, SlotClass};

pub const ACCESSORY_SLOTS: u8 = 4;

/// A named equipment slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EquipSlot {
    Helmet,
    Armor,
    MainHand,
    OffHand,
    Boots,
    /// Accessory slot 1 to 4.
    Accessory(u8),
}

impl EquipSlot {
    /// Every slot in display order.
    pub fn all() -> impl Iterator<Item = EquipSlot> {
        [
            EquipSlot::Helmet,
            EquipSlot::Armor,
            EquipSlot::MainHand,
            EquipSlot::OffHand,
            EquipSlot::Boots,
        ]
        .into_iter()
        .chain((1..=ACCESSORY_SLOTS).map(EquipSlot::Accessory))
    }

    pub fn accepts(&self, class: SlotClass) -> bool {
        match (self, class) {
            (EquipSlot::Accessory(n), SlotClass::Accessory) => (1..=ACCESSORY_SLOTS).contains(n),
            (EquipSlot::Helmet, SlotClass::Helmet)
            | (EquipSlot::Armor, SlotClass::Armor)
            | (EquipSlot::MainHand, SlotClass::MainHand)
            | (EquipSlot::OffHand, SlotClass::OffHand)
            | (EquipSlot::Boots, SlotClass::Boots) => true,
            _ => false,
        }
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipSlot::Helmet => write!(f, "Helmet"),
            EquipSlot::Armor => write!(f, "Armor"),
            EquipSlot::MainHand => write!(f, "Main Hand"),
            EquipSlot::OffHand => write!(f, "Off Hand"),
            EquipSlot::Boots => write!(f, "Boots"),
            EquipSlot::Accessory(n) => write!(f, "Accessory {}", n),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum EquipError {
    #[error("Inventory slot {0} is empty")]
    EmptySlot(usize),

    #[error("Requires level {required}, player is level {level}")]
    LevelTooLow { required: u32, level: u32 },

    #[error("{item} cannot be equipped in {slot}")]
    SlotMismatch { item: String, slot: EquipSlot },

    #[error("Inventory is full")]
    InventoryFull,

    #[error("Nothing equipped in {0}")]
    NothingEquipped(EquipSlot),
}

/// Fixed-size grid of optional items.
#[derive(Debug, Clone)]
pub struct Inventory {
    slots: Vec<Option<Item>>,
}

impl Inventory {
    pub fn new(size: usize) -> Self {
        Self {
            slots: vec![None; size],
        }
    }

    pub fn slots(&self) -> &[Option<Item>] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Put `item` in the first free slot. Hands the item back when full.
    pub fn add(&mut self, item: Item) -> Result<usize, Item> {
        match self.first_free() {
            Some(index) => {
                self.slots[index] = Some(item);
                Ok(index)
            }
            None => Err(item),
        }
    }

    pub fn take(&mut self, index: usize) -> Option<Item> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn put(&mut self, index: usize, item: Item) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(item);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Items currently worn, at most one per slot.
#[derive(Debug, Clone, Default)]
pub struct Equipment {
    slots: HashMap<EquipSlot, Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    pub fn main_hand(&self) -> Option<&Item> {
        self.get(EquipSlot::MainHand)
    }

    /// Place an item, returning whatever the slot held before. Legality is
    /// checked by the caller.
    pub fn replace(&mut self, slot: EquipSlot, item: Item) -> Option<Item> {
        self.slots.insert(slot, item)
    }

    pub fn remove(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slots.remove(&slot)
    }

    /// Sum of movement bonuses over all worn items.
    pub fn speed_bonus(&self) -> f32 {
        self.slots.values().map(|item| item.speed as f32).sum()
    }

    pub fn armor(&self) -> u32 {
        self.slots.values().map(|item| item.armor).sum()
    }

    /// First accessory slot with nothing in it.
    pub fn free_accessory_slot(&self) -> Option<EquipSlot> {
        (1..=ACCESSORY_SLOTS)
            .map(EquipSlot::Accessory)
            .find(|slot| !self.slots.contains_key(slot))
    }

    /// Where an item of `class` goes when no slot is specified.
    pub fn default_slot(&self, class: SlotClass) -> EquipSlot {
        match class {
            SlotClass::Helmet => EquipSlot::Helmet,
            SlotClass::Armor => EquipSlot::Armor,
            SlotClass::MainHand => EquipSlot::MainHand,
            SlotClass::OffHand => EquipSlot::OffHand,
            SlotClass::Boots => EquipSlot::Boots,
            SlotClass::Accessory => self.free_accessory_slot().unwrap_or(EquipSlot::Accessory(1)),
        }
    }
}

/// Whether a player of `player_level` may wear `item` in `slot`.
pub fn check_equip(item: &Item, slot: EquipSlot, player_level: u32) -> Result<(), EquipError> {
    if player_level < item.level {
        return Err(EquipError::LevelTooLow {
            required: item.level,
            level: player_level,
        });
    }
    if !slot.accepts(item.slot) {
        return Err(EquipError::SlotMismatch {
            item: item.name.clone(),
            slot,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemDatabase;

    #[test]
    fn accessories_fit_any_accessory_slot() {
        assert!(EquipSlot::Accessory(1).accepts(SlotClass::Accessory));
        assert!(EquipSlot::Accessory(4).accepts(SlotClass::Accessory));
        assert!(!EquipSlot::Accessory(5).accepts(SlotClass::Accessory));
        assert!(!EquipSlot::Helmet.accepts(SlotClass::Accessory));
        assert!(!EquipSlot::OffHand.accepts(SlotClass::MainHand));
        assert_eq!(EquipSlot::all().count(), 9);
    }

    #[test]
    fn equip_requires_level_and_matching_slot() {
        let db = ItemDatabase::builtin();
        let sword = db.weapons[0].scaled(3);

        assert_eq!(
            check_equip(&sword, EquipSlot::MainHand, 2),
            Err(EquipError::LevelTooLow { required: 3, level: 2 })
        );
        assert!(matches!(
            check_equip(&sword, EquipSlot::Boots, 5),
            Err(EquipError::SlotMismatch { .. })
        ));
        assert_eq!(check_equip(&sword, EquipSlot::MainHand, 3), Ok(()));
    }

    #[test]
    fn inventory_fills_first_free_slot() {
        let db = ItemDatabase::builtin();
        let mut inventory = Inventory::new(2);
        assert_eq!(inventory.add(db.weapons[0].clone()), Ok(0));
        assert_eq!(inventory.add(db.weapons[1].clone()), Ok(1));
        assert!(inventory.add(db.weapons[2].clone()).is_err());

        inventory.take(0);
        assert_eq!(inventory.first_free(), Some(0));
        assert_eq!(inventory.len(), 1);
    }
}
