//! Inventory panel - text listing of gear and bag, with keyboard equip and
//! stat point spending.
//!
//! Keys while the panel is open:
//! - 1-9: equip the item in that bag slot into its natural slot
//! - Shift + 1-9: unequip the nth equipment slot
//! - Z / X / C / V: spend a point on strength / dexterity / vitality / intelligence

use bevy::prelude::*;
use std::fmt::Write;

use super::plugin::despawn_all;
use crate::core::PlayState;
use crate::items::{EquipSlot, Item};
use crate::player::{Attribute, Player};
use crate::sim::SimulationState;

const SLOT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

const ATTRIBUTE_KEYS: [(KeyCode, Attribute); 4] = [
    (KeyCode::KeyZ, Attribute::Strength),
    (KeyCode::KeyX, Attribute::Dexterity),
    (KeyCode::KeyC, Attribute::Vitality),
    (KeyCode::KeyV, Attribute::Intelligence),
];

#[derive(Component)]
struct InventoryUi;

#[derive(Component)]
struct InventoryText;

pub fn setup_inventory_systems(app: &mut App) {
    app.add_systems(OnEnter(PlayState::Inventory), spawn_inventory_panel)
        .add_systems(OnExit(PlayState::Inventory), despawn_all::<InventoryUi>)
        .add_systems(
            Update,
            (handle_inventory_keys, refresh_inventory_text)
                .chain()
                .run_if(in_state(PlayState::Inventory)),
        );
}

fn spawn_inventory_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            InventoryUi,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        padding: UiRect::all(Val::Px(24.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.08, 0.07, 0.06)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.85, 0.82, 0.75)),
                        InventoryText,
                    ));
                });
        });
}

fn handle_inventory_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    state: Option<ResMut<SimulationState>>,
) {
    let Some(mut state) = state else {
        return;
    };
    let player = &mut state.player;
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    for (index, key) in SLOT_KEYS.iter().enumerate() {
        if !keyboard.just_pressed(*key) {
            continue;
        }
        if shift {
            let Some(slot) = EquipSlot::all().nth(index) else {
                continue;
            };
            match player.unequip(slot) {
                Ok(()) => info!("Unequipped {}", slot),
                Err(e) => warn!("Cannot unequip: {}", e),
            }
        } else {
            match player.equip_default(index) {
                Ok(slot) => info!("Equipped into {}", slot),
                Err(e) => warn!("Cannot equip: {}", e),
            }
        }
    }

    for (key, attribute) in ATTRIBUTE_KEYS {
        if keyboard.just_pressed(key) && !player.assign_point(attribute) {
            debug!("No stat points to spend on {:?}", attribute);
        }
    }
}

fn refresh_inventory_text(
    state: Option<Res<SimulationState>>,
    mut texts: Query<&mut Text, With<InventoryText>>,
) {
    let Some(state) = state else {
        return;
    };
    let listing = inventory_listing(&state.player);
    for mut text in texts.iter_mut() {
        if text.0 != listing {
            text.0 = listing.clone();
        }
    }
}

fn describe(item: &Item) -> String {
    let mut line = format!("{} (lvl {})", item.name, item.level);
    if let Some((low, high)) = item.attack {
        let _ = write!(line, " atk {}-{}", low, high);
    }
    if let Some((low, high)) = item.magic {
        let _ = write!(line, " mag {}-{}", low, high);
    }
    if item.armor > 0 {
        let _ = write!(line, " arm {}", item.armor);
    }
    if item.speed > 0 {
        let _ = write!(line, " spd {}", item.speed);
    }
    line
}

/// Full panel text for `player`.
fn inventory_listing(player: &Player) -> String {
    let mut out = String::new();
    let a = &player.attributes;
    let _ = writeln!(out, "INVENTORY    Level {}  XP {}/{}", player.level, player.xp, player.max_xp);
    let _ = writeln!(
        out,
        "STR {}  DEX {}  VIT {}  INT {}  (points: {}, Z/X/C/V to spend)",
        a.strength, a.dexterity, a.vitality, a.intelligence, player.unassigned_points
    );

    let _ = writeln!(out, "\nEquipment (Shift+1-9 to unequip)");
    for (n, slot) in EquipSlot::all().enumerate() {
        let item = player
            .equipment
            .get(slot)
            .map(describe)
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "  {}. {}: {}", n + 1, slot, item);
    }

    let _ = writeln!(out, "\nBag (1-9 to equip)");
    for (index, item) in player.inventory.slots().iter().enumerate() {
        if let Some(item) = item {
            let _ = writeln!(out, "  {}. {}", index + 1, describe(item));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemDatabase;
    use crate::sim::config::PlayerTuning;
    use crate::sim::IdAllocator;

    #[test]
    fn listing_shows_bag_and_equipped_gear() {
        let mut ids = IdAllocator::default();
        let mut player = Player::new(ids.allocate(), Vec2::ZERO, &PlayerTuning::default());
        let sword = ItemDatabase::builtin().find("Sword").cloned().expect("builtin sword");
        player.inventory.add(sword).expect("room in bag");

        let listing = inventory_listing(&player);
        assert!(listing.contains("1. Sword (lvl 1)"));
        assert!(listing.contains("Main Hand: -"));

        player.equip_default(0).expect("sword fits main hand");
        let listing = inventory_listing(&player);
        assert!(listing.contains("Main Hand: Sword (lvl 1)"));
    }
}
