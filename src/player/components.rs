//! The player avatar: attributes, derived stats, leveling and gear.

use bevy::prelude::*;

use crate::combat::Swing;
use crate::items::{check_equip, EquipError, EquipSlot, Equipment, Inventory, Item};
use crate::sim::config::{vec2, PlayerTuning};
use crate::sim::EntityId;
use crate::world::Body;

/// A spendable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Strength,
    Dexterity,
    Vitality,
    Intelligence,
}

/// Character attributes. All start at 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attributes {
    /// Melee damage
    pub strength: u32,
    /// Move speed and dodge chance
    pub dexterity: u32,
    /// Health and stamina pools
    pub vitality: u32,
    /// Spell damage and mana pool
    pub intelligence: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            strength: 1,
            dexterity: 1,
            vitality: 1,
            intelligence: 1,
        }
    }
}

impl Attributes {
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut u32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Vitality => &mut self.vitality,
            Attribute::Intelligence => &mut self.intelligence,
        }
    }
}

/// The player. Owned by the simulation state; not an ECS entity.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub attributes: Attributes,
    pub level: u32,
    pub xp: u32,
    pub max_xp: u32,
    pub unassigned_points: u32,
    pub hp: f32,
    pub max_hp: f32,
    pub mana: f32,
    pub max_mana: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub inventory: Inventory,
    pub equipment: Equipment,
    /// Last non-zero aim direction.
    pub aim: Vec2,
    pub swing: Swing,
    pub sprinting: bool,
    pub moving: bool,
}

impl Player {
    pub fn new(id: EntityId, position: Vec2, tuning: &PlayerTuning) -> Self {
        let mut player = Self {
            id,
            body: Body::new(position, vec2(tuning.size)),
            attributes: Attributes::default(),
            level: 1,
            xp: 0,
            max_xp: 10,
            unassigned_points: 0,
            hp: 0.0,
            max_hp: 0.0,
            mana: 0.0,
            max_mana: 0.0,
            stamina: 0.0,
            max_stamina: 0.0,
            inventory: Inventory::new(tuning.inventory_size),
            equipment: Equipment::default(),
            aim: Vec2::X,
            swing: Swing::default(),
            sprinting: false,
            moving: false,
        };
        player.recompute_derived();
        player.hp = player.max_hp;
        player.mana = player.max_mana;
        player.stamina = player.max_stamina;
        player
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    /// 1 + 0.2 per level past the first.
    pub fn level_multiplier(&self) -> f32 {
        1.0 + 0.2 * (self.level as f32 - 1.0)
    }

    /// Recompute pool maxima from attributes and level, keeping the current
    /// fraction of each pool.
    pub fn recompute_derived(&mut self) {
        let ratio = |current: f32, max: f32| if max > 0.0 { current / max } else { 1.0 };
        let hp_ratio = ratio(self.hp, self.max_hp);
        let mana_ratio = ratio(self.mana, self.max_mana);
        let stamina_ratio = ratio(self.stamina, self.max_stamina);

        let mult = self.level_multiplier();
        self.max_hp = self.attributes.vitality as f32 * 100.0 * mult;
        self.max_mana = self.attributes.intelligence as f32 * 100.0 * mult;
        self.max_stamina = self.attributes.vitality as f32 * 20.0 * mult;

        self.hp = (self.max_hp * hp_ratio).clamp(0.0, self.max_hp);
        self.mana = (self.max_mana * mana_ratio).clamp(0.0, self.max_mana);
        self.stamina = (self.max_stamina * stamina_ratio).clamp(0.0, self.max_stamina);
    }

    /// Base speed plus dexterity and equipment bonuses.
    pub fn move_speed(&self, tuning: &PlayerTuning) -> f32 {
        tuning.base_speed
            + self.attributes.dexterity as f32 * tuning.speed_per_dexterity
            + self.equipment.speed_bonus()
    }

    /// Add xp, levelling up as many times as it covers. Excess carries over.
    /// Returns the number of levels gained.
    pub fn gain_xp(&mut self, amount: u32, points_per_level: u32) -> u32 {
        self.xp += amount;
        let mut gained = 0;
        while self.xp >= self.max_xp {
            self.xp -= self.max_xp;
            self.level += 1;
            self.max_xp = 10 * self.level;
            self.unassigned_points += points_per_level;
            gained += 1;
        }
        if gained > 0 {
            self.recompute_derived();
            info!("Player reached level {}", self.level);
        }
        gained
    }

    /// Spend one unassigned point. Returns false when none are left.
    pub fn assign_point(&mut self, attribute: Attribute) -> bool {
        if self.unassigned_points == 0 {
            return false;
        }
        self.unassigned_points -= 1;
        *self.attributes.get_mut(attribute) += 1;
        self.recompute_derived();
        true
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = (self.hp - amount as f32).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Pay `cost` mana if available.
    pub fn spend_mana(&mut self, cost: f32) -> bool {
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    /// Stamina drain or regen and mana regen for one frame.
    pub fn regenerate(&mut self, dt: f32, tuning: &PlayerTuning) {
        if self.sprinting {
            self.stamina -= tuning.sprint_stamina_per_sec * dt;
        } else {
            self.stamina += tuning.stamina_regen_per_sec * dt;
        }
        self.stamina = self.stamina.clamp(0.0, self.max_stamina);
        self.mana = (self.mana + tuning.mana_regen_per_sec * dt).clamp(0.0, self.max_mana);
    }

    pub fn weapon(&self) -> Option<&Item> {
        self.equipment.main_hand()
    }

    /// Move the item at `index` from the inventory into `slot`. Whatever the
    /// slot held goes back into the freed inventory cell.
    pub fn equip(&mut self, index: usize, slot: EquipSlot) -> Result<(), EquipError> {
        let item = self.inventory.get(index).ok_or(EquipError::EmptySlot(index))?;
        check_equip(item, slot, self.level)?;

        let item = self.inventory.take(index).ok_or(EquipError::EmptySlot(index))?;
        if let Some(previous) = self.equipment.replace(slot, item) {
            self.inventory.put(index, previous);
        }
        self.recompute_derived();
        Ok(())
    }

    /// Equip into the item's natural slot.
    pub fn equip_default(&mut self, index: usize) -> Result<EquipSlot, EquipError> {
        let item = self.inventory.get(index).ok_or(EquipError::EmptySlot(index))?;
        let slot = self.equipment.default_slot(item.slot);
        self.equip(index, slot)?;
        Ok(slot)
    }

    /// Move the item in `slot` back to the inventory.
    pub fn unequip(&mut self, slot: EquipSlot) -> Result<(), EquipError> {
        if self.equipment.get(slot).is_none() {
            return Err(EquipError::NothingEquipped(slot));
        }
        if self.inventory.first_free().is_none() {
            return Err(EquipError::InventoryFull);
        }
        if let Some(item) = self.equipment.remove(slot) {
            // A free slot was checked above.
            let _ = self.inventory.add(item);
        }
        self.recompute_derived();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemDatabase;

    fn player() -> Player {
        Player::new(EntityId(0), Vec2::new(100.0, 100.0), &PlayerTuning::default())
    }

    #[test]
    fn derived_stats_follow_attributes() {
        let mut player = player();
        assert_eq!(player.max_hp, 100.0);
        assert_eq!(player.max_mana, 100.0);
        assert_eq!(player.max_stamina, 20.0);
        assert_eq!(player.move_speed(&PlayerTuning::default()), 200.0);

        player.level = 3;
        player.recompute_derived();
        assert!((player.max_hp - 140.0).abs() < 1e-3);
    }

    #[test]
    fn leveling_is_monotonic_and_carries_excess() {
        let mut player = player();
        player.hp = 50.0;

        let mut last_level = player.level;
        let mut last_max = (player.max_hp, player.max_mana, player.max_stamina);
        for _ in 0..40 {
            player.gain_xp(7, 4);
            assert!(player.level >= last_level);
            assert!(player.max_hp >= last_max.0);
            assert!(player.max_mana >= last_max.1);
            assert!(player.max_stamina >= last_max.2);
            last_level = player.level;
            last_max = (player.max_hp, player.max_mana, player.max_stamina);
        }
        assert!(player.level > 1);
        assert!((player.hp / player.max_hp - 0.5).abs() < 1e-4);
        assert!(player.xp < player.max_xp);
    }

    #[test]
    fn single_level_up_grants_points() {
        let mut player = player();
        assert_eq!(player.gain_xp(12, 4), 1);
        assert_eq!(player.level, 2);
        assert_eq!(player.xp, 2);
        assert_eq!(player.max_xp, 20);
        assert_eq!(player.unassigned_points, 4);

        assert!(player.assign_point(Attribute::Vitality));
        assert_eq!(player.attributes.vitality, 2);
        assert!((player.max_hp - 240.0).abs() < 1e-3);
        assert_eq!(player.unassigned_points, 3);
    }

    #[test]
    fn assign_point_needs_points() {
        let mut player = player();
        assert!(!player.assign_point(Attribute::Strength));
        assert_eq!(player.attributes.strength, 1);
    }

    #[test]
    fn equip_and_unequip_move_items() {
        let db = ItemDatabase::builtin();
        let mut player = player();
        player.inventory.add(db.find("Boots").cloned().expect("boots")).expect("room");

        assert_eq!(player.equip_default(0), Ok(EquipSlot::Boots));
        assert!(player.inventory.is_empty());
        assert_eq!(player.move_speed(&PlayerTuning::default()), 210.0);

        assert_eq!(player.unequip(EquipSlot::Boots), Ok(()));
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(
            player.unequip(EquipSlot::Boots),
            Err(EquipError::NothingEquipped(EquipSlot::Boots))
        );
        assert_eq!(player.equip(5, EquipSlot::Helmet), Err(EquipError::EmptySlot(5)));
    }

    #[test]
    fn regeneration_clamps_pools() {
        let tuning = PlayerTuning::default();
        let mut player = player();
        player.sprinting = true;
        player.regenerate(5.0, &tuning);
        assert_eq!(player.stamina, 0.0);

        player.sprinting = false;
        player.mana = 0.0;
        player.regenerate(1.0, &tuning);
        assert_eq!(player.stamina, 10.0);
        assert_eq!(player.mana, 2.0);
        assert!(!player.spend_mana(10.0));
    }
}
