//! Drives the simulation from Bevy's frame loop.

use bevy::prelude::*;

use super::config::SimConfig;
use super::feedback::SimEvent;
use super::input::FrameInput;
use super::state::SimulationState;
use crate::core::{
    DamageNumberEvent, GameState, ItemPickupEvent, LevelTransitionEvent, LevelUpEvent, PlayState,
    PlayerDiedEvent, SoundCueEvent,
};
use crate::items::load_item_database;

/// Frame ordering: sample input, advance the simulation, then present.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Step,
    Present,
}

/// Simulation plugin - loads tuning and item data, then steps the
/// simulation once per frame while exploring.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameInput>()
            .configure_sets(Update, (SimSet::Input, SimSet::Step, SimSet::Present).chain())
            .configure_sets(
                Update,
                (SimSet::Input, SimSet::Step).run_if(in_state(PlayState::Exploring)),
            )
            .configure_sets(Update, SimSet::Present.run_if(in_state(GameState::InGame)))
            .add_systems(Startup, (load_sim_config, load_item_database))
            .add_systems(Update, run_simulation.in_set(SimSet::Step));
    }
}

fn load_sim_config(mut commands: Commands) {
    commands.insert_resource(SimConfig::load());
}

/// Outgoing Bevy event writers, one per kind of simulation report.
#[derive(bevy::ecs::system::SystemParam)]
struct SimEventWriters<'w> {
    damage: EventWriter<'w, DamageNumberEvent>,
    sounds: EventWriter<'w, SoundCueEvent>,
    pickups: EventWriter<'w, ItemPickupEvent>,
    level_ups: EventWriter<'w, LevelUpEvent>,
    deaths: EventWriter<'w, PlayerDiedEvent>,
    transitions: EventWriter<'w, LevelTransitionEvent>,
}

fn run_simulation(
    time: Res<Time>,
    mut input: ResMut<FrameInput>,
    state: Option<ResMut<SimulationState>>,
    mut writers: SimEventWriters,
) {
    let Some(mut state) = state else {
        return;
    };
    state.step(&input, time.delta_secs());
    input.clear_actions();

    for event in state.drain_events() {
        match event {
            SimEvent::Damage(number) => {
                writers.damage.send(DamageNumberEvent {
                    position: number.position,
                    value: number.value,
                    color: number.color,
                    duration: number.duration,
                });
            }
            SimEvent::Sound(cue) => {
                writers.sounds.send(SoundCueEvent(cue));
            }
            SimEvent::ItemLooted { name, level } => {
                writers.pickups.send(ItemPickupEvent { name, level });
            }
            SimEvent::LevelUp { level } => {
                writers.level_ups.send(LevelUpEvent { new_level: level });
            }
            SimEvent::PlayerDied => {
                writers.deaths.send(PlayerDiedEvent);
            }
            SimEvent::LevelTransition { next } => {
                writers.transitions.send(LevelTransitionEvent { next });
            }
            SimEvent::EnemyKilled { id, xp } => debug!("{:?} killed for {} xp", id, xp),
            SimEvent::EnemiesMerged { into, count } => debug!("{} enemies merged into {:?}", count, into),
            SimEvent::DoorOpened { id } => debug!("Door {:?} opened", id),
        }
    }
}
