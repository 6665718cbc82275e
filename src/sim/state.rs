//! The simulation state: single owner of every live entity.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

use super::config::SimConfig;
use super::feedback::{HealthBar, SimEvent};
use super::ids::{EntityId, IdAllocator};
use crate::combat::Fireball;
use crate::enemies::{Enemy, EnemyRegistry};
use crate::items::ItemDatabase;
use crate::player::Player;
use crate::torch::Torch;
use crate::world::{build_level, Door, Level, LevelDefinition, Target};

/// Items the player starts a run with.
const STARTING_ITEMS: [&str; 2] = ["Sword", "Staff"];

/// All simulation state, advanced once per frame by [`SimulationState::step`].
///
/// Entity collections are only mutated from the step; removals found while
/// iterating are collected and applied once the pass completes.
#[derive(Resource)]
pub struct SimulationState {
    pub config: SimConfig,
    pub level: Level,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub targets: Vec<Target>,
    pub doors: Vec<Door>,
    pub fireballs: Vec<Fireball>,
    pub torch: Option<Torch>,
    /// Visible health bars keyed by the struck entity.
    pub health_bars: HashMap<EntityId, HealthBar>,
    pub enemy_registry: EnemyRegistry,
    pub items: ItemDatabase,
    pub player_dead: bool,
    /// Level requested through an open door, consumed by the world plugin.
    pub pending_transition: Option<String>,
    pub(crate) rng: StdRng,
    pub(crate) ids: IdAllocator,
    pub(crate) events: Vec<SimEvent>,
}

impl SimulationState {
    pub fn new(
        definition: &LevelDefinition,
        config: SimConfig,
        enemy_registry: EnemyRegistry,
        items: ItemDatabase,
    ) -> Self {
        Self::with_rng(definition, config, enemy_registry, items, StdRng::from_entropy())
    }

    /// Deterministic state for tests and replays.
    pub fn with_seed(
        definition: &LevelDefinition,
        config: SimConfig,
        enemy_registry: EnemyRegistry,
        items: ItemDatabase,
        seed: u64,
    ) -> Self {
        Self::with_rng(
            definition,
            config,
            enemy_registry,
            items,
            StdRng::seed_from_u64(seed),
        )
    }

    fn with_rng(
        definition: &LevelDefinition,
        config: SimConfig,
        enemy_registry: EnemyRegistry,
        items: ItemDatabase,
        mut rng: StdRng,
    ) -> Self {
        let mut ids = IdAllocator::default();
        let built = build_level(definition, &enemy_registry, &config.props, &mut ids, &mut rng);

        let mut player = Player::new(ids.allocate(), built.player_start, &config.player);
        for name in STARTING_ITEMS {
            match items.find(name) {
                Some(item) => {
                    if player.inventory.add(item.clone()).is_err() {
                        warn!("Inventory full, starting item {} dropped", name);
                    }
                }
                None => warn!("Starting item {} not in item database", name),
            }
        }
        let torch = Torch::new(ids.allocate(), built.player_start, &config.torch);

        Self {
            config,
            level: built.level,
            player,
            enemies: built.enemies,
            targets: built.targets,
            doors: built.doors,
            fireballs: Vec::new(),
            torch: Some(torch),
            health_bars: HashMap::new(),
            enemy_registry,
            items,
            player_dead: false,
            pending_transition: None,
            rng,
            ids,
            events: Vec::new(),
        }
    }

    /// Replace the level and its entities, keeping the player's progression.
    /// The player and a carried torch are moved to the new start.
    pub fn load_level(&mut self, definition: &LevelDefinition) {
        let built = build_level(
            definition,
            &self.enemy_registry,
            &self.config.props,
            &mut self.ids,
            &mut self.rng,
        );
        self.level = built.level;
        self.enemies = built.enemies;
        self.targets = built.targets;
        self.doors = built.doors;
        self.fireballs.clear();
        self.health_bars.clear();
        self.pending_transition = None;

        self.player.body.position = built.player_start;
        self.player.swing = Default::default();
        // The torch always comes along, even when it was set down.
        self.torch = Some(Torch::new(self.ids.allocate(), built.player_start, &self.config.torch));
        info!("Entered level '{}'", definition.name);
    }

    /// Hand over the events produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn torch_position(&self) -> Option<Vec2> {
        self.torch.as_ref().map(|t| t.position())
    }

    pub(crate) fn emit(&mut self, event: SimEvent) {
        self.events.push(event);
    }
}
