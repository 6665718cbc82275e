//! Items module - item templates, scaling, inventory and equipment.

mod data;
mod equipment;

pub use data::{load_item_database, Item, ItemCategory, ItemDatabase, SlotClass};
pub use equipment::{check_equip, EquipError, EquipSlot, Equipment, Inventory, ACCESSORY_SLOTS};
