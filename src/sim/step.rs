//! The per-frame simulation pipeline.
//!
//! One call to [`SimulationState::step`] runs, in order: player movement and
//! resources, player actions, enemy AI, merging, projectiles, melee, kill
//! credit, deferred removals, prop respawns, the torch, and feedback timers.

use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use super::config::CombatTuning;
use super::feedback::{
    DamageNumber, HealthBar, SimEvent, SoundCue, ENEMY_DAMAGE_COLOR, PLAYER_DAMAGE_COLOR,
};
use super::ids::EntityId;
use super::input::FrameInput;
use super::state::SimulationState;
use super::traits::{Attacker, Lootable};
use crate::combat::{roll_drops, roll_spell, sword_hitbox, Fireball};
use crate::enemies::{find_clusters, merge_members, pursue_and_attack, AiContext, AttackOutcome};
use crate::items::Item;
use crate::player::Player;
use crate::torch::TorchMode;
use crate::world::{direction_towards, overlaps_any, Aabb};

const DAMAGE_NUMBER_OFFSET: f32 = 40.0;
const HEALTH_BAR_OFFSET: f32 = 60.0;

/// Enemies killed this frame. Applied once every pass is done.
type Kills = HashSet<EntityId>;

impl SimulationState {
    /// Advance everything by `dt` seconds. Does nothing once the player is dead.
    pub fn step(&mut self, input: &FrameInput, dt: f32) {
        if self.player_dead {
            return;
        }
        let mut kills = Kills::new();

        self.update_player(input, dt);
        self.handle_actions(input);
        self.update_enemies(dt);
        self.merge_enemies();
        self.update_fireballs(dt, &mut kills);
        self.resolve_melee(dt, &mut kills);
        self.credit_kills(&kills);
        self.apply_removals(&kills);
        self.update_targets(dt);
        self.update_torch(dt);
        self.tick_health_bars(dt);

        if self.player.is_dead() {
            self.player_dead = true;
            info!("Player died on level '{}'", self.level.name());
            self.emit(SimEvent::PlayerDied);
        }
    }

    fn update_player(&mut self, input: &FrameInput, dt: f32) {
        let tuning = &self.config.player;
        let player = &mut self.player;

        if let Some(point) = input.aim_point {
            if let Some((direction, _)) = direction_towards(player.position(), point, self.config.ai.epsilon) {
                player.aim = direction;
            }
        }

        player.moving = input.movement != Vec2::ZERO;
        player.sprinting = input.sprint && player.moving && player.stamina > 0.0;
        player.regenerate(dt, tuning);

        if !player.moving {
            return;
        }
        let mut speed = player.move_speed(tuning);
        if player.sprinting {
            speed *= tuning.sprint_multiplier;
        }
        player.body.face_towards(input.movement.x);

        let start = player.body.rect();
        let level = &self.level;
        player
            .body
            .move_and_collide(input.movement * speed * dt, |rect| level.blocks_new(rect, &start));
    }

    fn handle_actions(&mut self, input: &FrameInput) {
        if input.melee && self.player.swing.start() {
            let aim_x = self.player.aim.x;
            self.player.body.face_towards(aim_x);
        }

        if input.cast {
            self.cast_fireball();
        }

        if input.interact {
            self.interact_with_doors();
        }

        if let Some(torch) = self.torch.as_mut() {
            let player_pos = self.player.position();
            if input.torch_drop_pickup {
                match torch.mode {
                    TorchMode::OnGround => {
                        if !torch.try_pick_up(player_pos, self.config.torch.pickup_radius) {
                            debug!("Torch out of reach");
                        }
                    }
                    TorchMode::Carried | TorchMode::Following => torch.drop_at(player_pos),
                }
            }
            if input.torch_follow_toggle {
                torch.toggle_follow();
            }
        }
    }

    /// Insufficient mana silently blocks the cast.
    fn cast_fireball(&mut self) {
        let tuning = &self.config.combat;
        if !self.player.spend_mana(tuning.fireball_mana_cost) {
            return;
        }
        let damage = roll_spell(&mut self.rng, self.player.attributes.intelligence, self.player.weapon());
        let fireball = Fireball::new(
            self.ids.allocate(),
            self.player.position(),
            self.player.aim,
            damage,
            tuning,
        );
        debug!("Fireball {:?} cast for {} damage", fireball.id, damage);
        self.fireballs.push(fireball);
        self.emit(SimEvent::Sound(SoundCue::Cast));
    }

    /// Open the first closed door in reach, or walk through an open one.
    fn interact_with_doors(&mut self) {
        let player_pos = self.player.position();
        let proximity = self.config.props.door_proximity;
        let Some(door) = self.doors.iter_mut().find(|d| d.within_reach(player_pos, proximity)) else {
            return;
        };

        if door.open(&mut self.level) {
            let id = door.id;
            self.emit(SimEvent::DoorOpened { id });
            self.emit(SimEvent::Sound(SoundCue::DoorOpen));
            return;
        }

        match self.level.definition.next_level.clone() {
            Some(next) => {
                info!("Leaving '{}' for '{}'", self.level.name(), next);
                self.pending_transition = Some(next.clone());
                self.emit(SimEvent::LevelTransition { next });
            }
            None => debug!("Door on '{}' leads nowhere", self.level.name()),
        }
    }

    fn update_enemies(&mut self, dt: f32) {
        let player_rect = self.player.body.rect();
        let ctx = AiContext {
            player_pos: self.player.position(),
            player_dexterity: self.player.attributes.dexterity,
            torch_pos: self.torch.as_ref().map(|t| t.position()),
            tuning: &self.config.ai,
            dt,
        };
        let mut rects: Vec<Aabb> = self.enemies.iter().map(|e| e.body.rect()).collect();

        for index in 0..self.enemies.len() {
            let enemy = &mut self.enemies[index];
            let start = enemy.body.rect();
            let level = &self.level;
            let others = &rects;
            let outcome = pursue_and_attack(enemy, &ctx, &mut self.rng, |rect| {
                level.blocks_new(rect, &start)
                    || (rect.overlaps(&player_rect) && !start.overlaps(&player_rect))
                    || others
                        .iter()
                        .enumerate()
                        .any(|(j, other)| j != index && rect.overlaps(other) && !start.overlaps(other))
            });
            rects[index] = self.enemies[index].body.rect();

            match outcome {
                Some(AttackOutcome::Hit(damage)) => {
                    self.player.take_damage(damage);
                    self.events.push(SimEvent::Damage(DamageNumber {
                        position: self.player.position() - Vec2::Y * DAMAGE_NUMBER_OFFSET,
                        value: damage,
                        color: PLAYER_DAMAGE_COLOR,
                        duration: self.config.combat.damage_number_duration,
                    }));
                    self.events.push(SimEvent::Sound(SoundCue::PlayerHurt));
                }
                Some(AttackOutcome::Dodged) => debug!("Player dodged {:?}", self.enemies[index].id),
                None => {}
            }
        }
    }

    /// Collapse touching groups into one bigger enemy. Merged enemies sit out
    /// until their post-merge cooldown runs down.
    fn merge_enemies(&mut self) {
        let tuning = &self.config.ai;
        let candidates: Vec<(EntityId, Aabb)> = self
            .enemies
            .iter()
            .filter(|e| !(e.merged && e.cooldown > 0.0) && !e.is_dead())
            .map(|e| (e.id, e.body.rect()))
            .collect();

        for cluster in find_clusters(&candidates, tuning.merge_contact_margin, tuning.merge_threshold) {
            let members: Vec<_> = self.enemies.iter().filter(|e| cluster.contains(&e.id)).collect();
            let Some(merged) = merge_members(self.ids.allocate(), &members, &self.enemy_registry, tuning)
            else {
                continue;
            };

            info!(
                "Merged {} enemies into {:?} (level {})",
                cluster.len(),
                merged.id,
                merged.level
            );
            self.enemies.retain(|e| !cluster.contains(&e.id));
            for id in &cluster {
                self.health_bars.remove(id);
            }
            self.events.push(SimEvent::EnemiesMerged {
                into: merged.id,
                count: cluster.len(),
            });
            self.enemies.push(merged);
        }
    }

    /// Move flying fireballs and resolve their first collision: level bounds,
    /// then walls, then enemies, then targets. A wall tile overlapping an
    /// active target does not count as a wall.
    fn update_fireballs(&mut self, dt: f32, kills: &mut Kills) {
        let tuning = &self.config.combat;
        let bounds = self.level.pixel_bounds();
        let mut finished = Vec::new();

        for fireball in &mut self.fireballs {
            if !fireball.is_flying() {
                if fireball.update_explosion(dt, tuning) {
                    finished.push(fireball.id);
                }
                continue;
            }

            fireball.advance(dt);
            let rect = fireball.rect();

            if !bounds.contains(fireball.position) {
                fireball.explode();
                self.events.push(SimEvent::Sound(SoundCue::Explosion));
                continue;
            }

            let targets = &self.targets;
            let hits_wall = self.level.walls_overlapping(&rect).iter().any(|wall| {
                !targets.iter().any(|t| t.is_active() && t.rect().overlaps(wall))
            });
            if hits_wall {
                debug!("Fireball {:?} hit a wall", fireball.id);
                fireball.explode();
                self.events.push(SimEvent::Sound(SoundCue::Explosion));
                continue;
            }

            if let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|e| !kills.contains(&e.id) && e.body.rect().overlaps(&rect))
            {
                fireball.explode();
                self.events.push(SimEvent::Sound(SoundCue::Explosion));
                if enemy.take_hit(fireball.damage, tuning.hit_stagger) {
                    kills.insert(enemy.id);
                }
                report_hit(
                    &mut self.events,
                    &mut self.health_bars,
                    tuning,
                    HitReport {
                        id: enemy.id,
                        damage: fireball.damage,
                        hp: enemy.hit_points,
                        max_hp: enemy.max_hit_points,
                        position: enemy.position(),
                    },
                );
                continue;
            }

            if let Some(target) = self
                .targets
                .iter_mut()
                .find(|t| t.is_active() && t.rect().overlaps(&rect))
            {
                fireball.explode();
                self.events.push(SimEvent::Sound(SoundCue::Explosion));
                target.take_damage(fireball.damage, self.config.props.target_respawn, &mut self.level);
                report_hit(
                    &mut self.events,
                    &mut self.health_bars,
                    tuning,
                    HitReport {
                        id: target.id,
                        damage: fireball.damage,
                        hp: target.hit_points,
                        max_hp: target.max_hit_points,
                        position: target.position,
                    },
                );
            }
        }

        self.fireballs.retain(|f| !finished.contains(&f.id));
    }

    /// Strike everything under the sword hitbox once per swing, then advance
    /// the swing animation.
    fn resolve_melee(&mut self, dt: f32, kills: &mut Kills) {
        let tuning = &self.config.combat;
        if !self.player.swing.active {
            return;
        }
        let hitbox = sword_hitbox(self.player.position(), self.player.aim, tuning);

        for enemy in &mut self.enemies {
            if kills.contains(&enemy.id)
                || !enemy.body.rect().overlaps(&hitbox)
                || !self.player.swing.register_hit(enemy.id)
            {
                continue;
            }
            let damage = self.player.roll_attack(&mut self.rng);
            if enemy.take_hit(damage, tuning.hit_stagger) {
                kills.insert(enemy.id);
            }
            self.events.push(SimEvent::Sound(SoundCue::MeleeHit));
            report_hit(
                &mut self.events,
                &mut self.health_bars,
                tuning,
                HitReport {
                    id: enemy.id,
                    damage,
                    hp: enemy.hit_points,
                    max_hp: enemy.max_hit_points,
                    position: enemy.position(),
                },
            );
        }

        for target in &mut self.targets {
            if !target.is_active()
                || !target.rect().overlaps(&hitbox)
                || !self.player.swing.register_hit(target.id)
            {
                continue;
            }
            let damage = self.player.roll_attack(&mut self.rng);
            target.take_damage(damage, self.config.props.target_respawn, &mut self.level);
            self.events.push(SimEvent::Sound(SoundCue::MeleeHit));
            report_hit(
                &mut self.events,
                &mut self.health_bars,
                tuning,
                HitReport {
                    id: target.id,
                    damage,
                    hp: target.hit_points,
                    max_hp: target.max_hit_points,
                    position: target.position,
                },
            );
        }

        self.player.swing.update(dt, tuning);
    }

    /// Grant xp and loot for each kill. The player is the only killer.
    fn credit_kills(&mut self, kills: &Kills) {
        for enemy in self.enemies.iter().filter(|e| kills.contains(&e.id)) {
            let xp = enemy.xp_reward();
            let drops = roll_drops(&mut self.rng, enemy.drop_table(), enemy.loot_level(), &self.items);
            info!("{} {:?} killed, {} xp", enemy.kind.name(), enemy.id, xp);
            self.events.push(SimEvent::EnemyKilled { id: enemy.id, xp });
            self.events.push(SimEvent::Sound(SoundCue::Death));

            for item in deliver_loot(&mut self.player, drops, &mut self.events) {
                warn!("Inventory full, {} (level {}) lost", item.name, item.level);
            }

            let gained = self.player.gain_xp(xp, self.config.player.points_per_level);
            if gained > 0 {
                self.events.push(SimEvent::LevelUp {
                    level: self.player.level,
                });
                self.events.push(SimEvent::Sound(SoundCue::LevelUp));
            }
        }
    }

    fn apply_removals(&mut self, kills: &Kills) {
        if kills.is_empty() {
            return;
        }
        self.enemies.retain(|e| !kills.contains(&e.id));
        for id in kills {
            self.health_bars.remove(id);
        }
    }

    fn update_targets(&mut self, dt: f32) {
        let player_rect = self.player.body.rect();
        let enemy_rects: Vec<Aabb> = self.enemies.iter().map(|e| e.body.rect()).collect();
        let occupied = |rect: &Aabb| rect.overlaps(&player_rect) || overlaps_any(rect, &enemy_rects);

        for target in &mut self.targets {
            target.update(dt, &mut self.level, &occupied);
        }
    }

    fn update_torch(&mut self, dt: f32) {
        if let Some(torch) = self.torch.as_mut() {
            torch.update(dt, &self.player.body, &self.level, &self.config.torch, &mut self.rng);
        }
    }

    /// Count down health bars and keep live enemies' bars above them.
    fn tick_health_bars(&mut self, dt: f32) {
        for enemy in &self.enemies {
            if let Some(bar) = self.health_bars.get_mut(&enemy.id) {
                bar.position = enemy.position() - Vec2::Y * HEALTH_BAR_OFFSET;
            }
        }
        self.health_bars.retain(|_, bar| {
            bar.timer -= dt;
            bar.timer > 0.0
        });
    }
}

struct HitReport {
    id: EntityId,
    damage: u32,
    hp: i32,
    max_hp: i32,
    position: Vec2,
}

/// Queue the damage number and refresh the struck entity's health bar.
fn report_hit(
    events: &mut Vec<SimEvent>,
    health_bars: &mut HashMap<EntityId, HealthBar>,
    tuning: &CombatTuning,
    hit: HitReport,
) {
    events.push(SimEvent::Damage(DamageNumber {
        position: hit.position - Vec2::Y * DAMAGE_NUMBER_OFFSET,
        value: hit.damage,
        color: ENEMY_DAMAGE_COLOR,
        duration: tuning.damage_number_duration,
    }));
    health_bars.insert(
        hit.id,
        HealthBar {
            hp: hit.hp,
            max_hp: hit.max_hp,
            position: hit.position - Vec2::Y * HEALTH_BAR_OFFSET,
            timer: tuning.health_bar_duration,
        },
    );
}

/// Put each drop in the first free inventory slot. Returns what did not fit.
fn deliver_loot(player: &mut Player, drops: Vec<Item>, events: &mut Vec<SimEvent>) -> Vec<Item> {
    let mut overflow = Vec::new();
    for item in drops {
        let (name, level) = (item.name.clone(), item.level);
        match player.inventory.add(item) {
            Ok(_) => events.push(SimEvent::ItemLooted { name, level }),
            Err(item) => overflow.push(item),
        }
    }
    overflow
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::ProjectilePhase;
    use crate::enemies::EnemyKind;
    use crate::sim::config::PlayerTuning;
    use crate::sim::testing::{open_room, spawn_enemy, state_from_rows};

    const DT: f32 = 1.0 / 60.0;

    fn idle() -> FrameInput {
        FrameInput::default()
    }

    #[test]
    fn melee_swings_kill_enemy_and_credit_xp() {
        let mut state = open_room();
        state.player.body.position = Vec2::new(200.0, 200.0);
        let id = spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(236.0, 200.0));
        state.enemies[0].hit_points = 50;
        let xp_reward = state.enemies[0].xp_reward;

        let swing = FrameInput {
            melee: true,
            ..default()
        };
        let mut swings = 0;
        while state.enemy(id).is_some() {
            let before = state.enemy(id).map(|e| e.hit_points).unwrap_or(0);
            state.step(&swing, 0.2);
            swings += 1;
            if let Some(enemy) = state.enemy(id) {
                let dealt = before - enemy.hit_points;
                assert!((1..=5).contains(&dealt), "unarmed hit dealt {dealt}");
            }
            assert!(swings <= 50, "enemy never died");
        }

        assert!(swings >= 10);
        assert_eq!(state.player.xp, xp_reward);
        assert!(state.health_bars.get(&id).is_none());
        let events = state.drain_events();
        assert!(events.contains(&SimEvent::EnemyKilled { id, xp: xp_reward }));
    }

    #[test]
    fn one_swing_strikes_each_enemy_once() {
        let mut state = open_room();
        state.player.body.position = Vec2::new(200.0, 200.0);
        spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(236.0, 200.0));
        let full = state.enemies[0].hit_points;

        let swing = FrameInput {
            melee: true,
            ..default()
        };
        state.step(&swing, 0.03);
        let after_first = state.enemies[0].hit_points;
        assert!(after_first < full);

        // Still inside the same swing.
        state.step(&swing, 0.03);
        assert_eq!(state.enemies[0].hit_points, after_first);
    }

    #[test]
    fn fireball_damages_exactly_one_enemy() {
        let mut state = open_room();
        let first = spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(400.0, 250.0));
        let second = spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(400.0, 250.0));
        let tuning = state.config.combat.clone();
        let id = state.ids.allocate();
        state
            .fireballs
            .push(Fireball::new(id, Vec2::new(395.0, 250.0), Vec2::X, 30, &tuning));

        state.step(&idle(), 0.01);
        let damaged = state
            .enemies
            .iter()
            .filter(|e| e.hit_points < e.max_hit_points)
            .count();
        assert_eq!(damaged, 1);
        assert!(!state.fireballs[0].is_flying());

        let position = state.fireballs[0].position;
        state.step(&idle(), 0.01);
        assert_eq!(state.fireballs[0].position, position);
        let total_lost: i32 = [first, second]
            .iter()
            .filter_map(|id| state.enemy(*id))
            .map(|e| e.max_hit_points - e.hit_points)
            .sum();
        assert_eq!(total_lost, 30);
    }

    #[test]
    fn exploded_fireball_is_removed_after_its_animation() {
        let mut state = open_room();
        let tuning = state.config.combat.clone();
        let id = state.ids.allocate();
        state
            .fireballs
            .push(Fireball::new(id, Vec2::new(200.0, 200.0), Vec2::X, 10, &tuning));
        state.fireballs[0].explode();
        assert!(matches!(state.fireballs[0].phase, ProjectilePhase::Exploding { .. }));

        state.step(&idle(), 0.2);
        assert_eq!(state.fireballs.len(), 1);
        state.step(&idle(), 0.25);
        assert!(state.fireballs.is_empty());
    }

    #[test]
    fn fireball_reaches_target_flush_against_a_wall() {
        let mut state = state_from_rows(&[
            "##########",
            "#....5...#",
            "#........#",
            "##########",
        ]);
        let tuning = state.config.combat.clone();
        let id = state.ids.allocate();
        state
            .fireballs
            .push(Fireball::new(id, Vec2::new(264.0, 50.0), Vec2::X, 25, &tuning));

        state.step(&idle(), 0.01);
        assert_eq!(state.targets[0].hit_points, 275);
        assert!(!state.fireballs[0].is_flying());
    }

    #[test]
    fn fireball_explodes_on_bare_wall() {
        let mut state = open_room();
        let tuning = state.config.combat.clone();
        let id = state.ids.allocate();
        state
            .fireballs
            .push(Fireball::new(id, Vec2::new(100.0, 40.0), Vec2::X, 25, &tuning));

        state.step(&idle(), 0.01);
        assert!(!state.fireballs[0].is_flying());
    }

    #[test]
    fn casting_needs_mana() {
        let mut state = open_room();
        let cast = FrameInput {
            cast: true,
            ..default()
        };

        state.player.mana = 5.0;
        state.step(&cast, 0.0);
        assert!(state.fireballs.is_empty());
        assert_eq!(state.player.mana, 5.0);

        state.player.mana = 50.0;
        state.step(&cast, 0.0);
        assert_eq!(state.fireballs.len(), 1);
        assert_eq!(state.player.mana, 40.0);
        assert!(state.drain_events().contains(&SimEvent::Sound(SoundCue::Cast)));
    }

    #[test]
    fn three_touching_enemies_merge_but_two_do_not() {
        let mut state = open_room();
        for _ in 0..2 {
            spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(400.0, 250.0));
        }
        state.step(&idle(), DT);
        assert_eq!(state.enemies.len(), 2);

        spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(400.0, 250.0));
        state.step(&idle(), DT);
        assert_eq!(state.enemies.len(), 1);
        let merged = &state.enemies[0];
        assert!(merged.merged);
        assert_eq!(merged.body.size, Vec2::new(28.0, 36.0) * 1.5);
        assert!(merged.cooldown > 0.0);
    }

    #[test]
    fn enemies_in_a_line_do_not_merge() {
        let mut state = open_room();
        for x in [300.0, 330.0, 360.0] {
            spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(x, 250.0));
        }
        state.step(&idle(), 0.0);
        assert_eq!(state.enemies.len(), 3);
        assert!(state.enemies.iter().all(|e| !e.merged));
    }

    #[test]
    fn staggered_enemy_still_merges() {
        let mut state = open_room();
        let struck = spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(400.0, 250.0));
        for _ in 0..2 {
            spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(400.0, 250.0));
        }
        if let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == struck) {
            enemy.cooldown = 0.25;
        }
        state.step(&idle(), DT);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.enemies[0].merged);

        // A fresh merge does not fold into the next group.
        for _ in 0..2 {
            spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(400.0, 250.0));
        }
        state.step(&idle(), DT);
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn adjacent_enemy_eventually_hurts_player() {
        let mut state = open_room();
        let id = spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(120.0, 72.0));
        if let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == id) {
            enemy.attack_timer = 0.0;
        }

        let full = state.player.hp;
        for _ in 0..60 {
            state.step(&idle(), 0.1);
        }
        assert!(state.player.hp < full);
        let events = state.drain_events();
        assert!(events.contains(&SimEvent::Sound(SoundCue::PlayerHurt)));
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::Damage(DamageNumber { color, .. }) if *color == PLAYER_DAMAGE_COLOR
        )));
    }

    #[test]
    fn player_death_stops_the_simulation() {
        let mut state = open_room();
        let id = spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(120.0, 72.0));
        if let Some(enemy) = state.enemies.iter_mut().find(|e| e.id == id) {
            enemy.attack_timer = 0.0;
        }
        state.player.hp = 1.0;

        for _ in 0..60 {
            state.step(&idle(), 0.1);
        }
        assert!(state.player_dead);
        assert!(state.drain_events().contains(&SimEvent::PlayerDied));

        let position = state.enemies[0].position();
        state.step(&idle(), 0.1);
        assert_eq!(state.enemies[0].position(), position);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn player_slides_along_walls() {
        let mut state = open_room();
        let walk = FrameInput {
            movement: Vec2::new(-1.0, 1.0).normalize(),
            ..default()
        };
        let start = state.player.position();
        state.step(&walk, 0.1);

        let moved = state.player.position() - start;
        assert_eq!(moved.x, 0.0);
        assert!(moved.y > 0.0);
        assert!(state.player.body.facing_left);
        assert!(!state.level.blocks(&state.player.body.rect()));
    }

    #[test]
    fn sprinting_is_faster_and_drains_stamina() {
        let tuning = PlayerTuning::default();
        let mut walker = open_room();
        let mut sprinter = open_room();
        let walk = FrameInput {
            movement: Vec2::Y,
            ..default()
        };
        let sprint = FrameInput {
            sprint: true,
            ..walk.clone()
        };

        walker.step(&walk, 0.1);
        sprinter.step(&sprint, 0.1);

        let walked = walker.player.position().y - 72.0;
        let sprinted = sprinter.player.position().y - 72.0;
        assert!((sprinted - walked * tuning.sprint_multiplier).abs() < 1e-3);
        assert!(sprinter.player.stamina < sprinter.player.max_stamina);
    }

    #[test]
    fn doors_open_then_lead_onwards() {
        let mut state = state_from_rows(&["#####", "#.7.#", "#####"]);
        let interact = FrameInput {
            interact: true,
            ..default()
        };
        let door_id = state.doors[0].id;

        state.step(&interact, DT);
        assert!(state.doors[0].open);
        assert!(!state.level.has_prop_solid(door_id));
        assert!(state.pending_transition.is_none());

        state.step(&interact, DT);
        assert_eq!(state.pending_transition.as_deref(), Some("next"));
    }

    #[test]
    fn torch_can_be_dropped_and_picked_up() {
        let mut state = open_room();
        let toggle = FrameInput {
            torch_drop_pickup: true,
            ..default()
        };

        state.step(&toggle, DT);
        assert_eq!(state.torch.as_ref().map(|t| t.mode), Some(TorchMode::OnGround));
        state.step(&toggle, DT);
        assert_eq!(state.torch.as_ref().map(|t| t.mode), Some(TorchMode::Carried));

        let follow = FrameInput {
            torch_follow_toggle: true,
            ..default()
        };
        state.step(&follow, DT);
        assert_eq!(state.torch.as_ref().map(|t| t.mode), Some(TorchMode::Following));
    }

    #[test]
    fn loot_that_does_not_fit_is_returned() {
        let mut state = open_room();
        let sword = state.items.find("Sword").cloned().expect("builtin sword");
        while state.player.inventory.first_free().is_some() {
            let _ = state.player.inventory.add(sword.clone());
        }
        let mut events = Vec::new();
        let lost = deliver_loot(&mut state.player, vec![sword], &mut events);
        assert_eq!(lost.len(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn health_bars_expire() {
        let mut state = open_room();
        state.player.body.position = Vec2::new(200.0, 200.0);
        let id = spawn_enemy(&mut state, EnemyKind::Slime, Vec2::new(236.0, 200.0));
        let swing = FrameInput {
            melee: true,
            ..default()
        };
        state.step(&swing, DT);
        assert!(state.health_bars.contains_key(&id));

        state.step(&idle(), 2.5);
        assert!(!state.health_bars.contains_key(&id));
    }
}
