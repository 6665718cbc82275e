//! Enemy AI: vision-gated targeting, pursuit and attacks.
//!
//! Every enemy kind runs the same [`pursue_and_attack`] routine; kinds differ
//! only in their [`BehaviorParams`](super::BehaviorParams).

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::components::{AiState, Enemy};
use crate::combat::attack_lands;
use crate::sim::config::AiTuning;
use crate::sim::{Attacker, Vision};
use crate::world::{direction_towards, Aabb};

/// Per-frame view of the world an enemy reacts to.
#[derive(Debug, Clone, Copy)]
pub struct AiContext<'a> {
    pub player_pos: Vec2,
    pub player_dexterity: u32,
    pub torch_pos: Option<Vec2>,
    pub tuning: &'a AiTuning,
    pub dt: f32,
}

/// Where an enemy wants to go this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChaseTarget {
    Player(Vec2),
    /// Point `attack_range` short of the torch, or the enemy's own position
    /// when it is already closer than that.
    Torch(Vec2),
    Idle,
}

/// Result of an attack attempt against the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackOutcome {
    Hit(u32),
    Dodged,
}

/// Pick this frame's chase target. The player wins over the torch; the torch
/// point is only recomputed once the debounce timer has run out.
pub fn select_target(enemy: &mut Enemy, ctx: &AiContext) -> ChaseTarget {
    if enemy.sees(ctx.player_pos) {
        return ChaseTarget::Player(ctx.player_pos);
    }

    let Some(torch) = ctx.torch_pos.filter(|torch| enemy.sees(*torch)) else {
        return ChaseTarget::Idle;
    };

    let position = enemy.position();
    let Some((direction, distance)) = direction_towards(position, torch, ctx.tuning.epsilon) else {
        return ChaseTarget::Torch(position);
    };
    if distance < enemy.attack_range {
        // Hold; never back away from the light.
        return ChaseTarget::Torch(position);
    }

    if enemy.torch_debounce <= 0.0 || enemy.torch_chase_point.is_none() {
        let point = torch - direction * enemy.attack_range;
        enemy.torch_chase_point = Some(point);
        enemy.torch_debounce = ctx.tuning.torch_debounce;
    }
    ChaseTarget::Torch(enemy.torch_chase_point.unwrap_or(position))
}

/// Advance one enemy by one frame. `blocked` answers whether a candidate
/// hitbox collides with the world, the player or another enemy.
pub fn pursue_and_attack<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    ctx: &AiContext,
    rng: &mut R,
    blocked: impl FnMut(&Aabb) -> bool,
) -> Option<AttackOutcome> {
    let dt = ctx.dt;
    enemy.attack_timer = (enemy.attack_timer - dt).max(0.0);
    enemy.torch_debounce = (enemy.torch_debounce - dt).max(0.0);

    // A started windup always completes.
    if let Some(remaining) = enemy.windup {
        let remaining = remaining - dt;
        if remaining > 0.0 {
            enemy.windup = Some(remaining);
            return None;
        }
        enemy.windup = None;
        return strike(enemy, ctx, rng);
    }

    if enemy.cooldown > 0.0 {
        enemy.cooldown = (enemy.cooldown - dt).max(0.0);
        enemy.state = AiState::Staggered;
        return None;
    }

    let player_distance = enemy.body.distance_to(ctx.player_pos);
    if player_distance < enemy.attack_range {
        enemy.state = AiState::Attacking;
        enemy.player_was_close = true;
        enemy.contact_pause_timer = 0.0;
        enemy.body.face_towards(ctx.player_pos.x - enemy.position().x);

        if enemy.attack_timer > 0.0 {
            return None;
        }
        if enemy.behavior.windup_frames > 0 {
            enemy.windup = Some(enemy.behavior.windup_duration());
            return None;
        }
        return strike(enemy, ctx, rng);
    }

    if enemy.player_was_close && enemy.behavior.contact_pause > 0.0 {
        enemy.contact_pause_timer += dt;
        if enemy.contact_pause_timer < enemy.behavior.contact_pause {
            return None;
        }
        enemy.player_was_close = false;
        enemy.contact_pause_timer = 0.0;
    }

    let previous = enemy.state;
    let speed = enemy.speed;
    match select_target(enemy, ctx) {
        ChaseTarget::Player(target) => {
            enemy.state = AiState::ChasingPlayer;
            step_towards(enemy, target, speed, None, ctx, blocked);
        }
        ChaseTarget::Torch(point) => {
            enemy.state = AiState::ChasingTorch;
            let keep_clear = ctx.torch_pos.map(|torch| (torch, enemy.attack_range));
            step_towards(enemy, point, speed, keep_clear, ctx, blocked);
        }
        ChaseTarget::Idle => {
            enemy.state = AiState::Idle;
            wander(enemy, ctx, rng, blocked);
        }
    }
    if enemy.state != previous {
        debug!("Enemy {:?} {} -> {}", enemy.id, previous.tag(), enemy.state.tag());
    }
    None
}

/// Resolve an attack attempt. The attack timer resets whether or not the
/// blow lands; nothing lands from `attack_range` or further.
fn strike<R: Rng + ?Sized>(enemy: &mut Enemy, ctx: &AiContext, rng: &mut R) -> Option<AttackOutcome> {
    enemy.attack_timer = enemy.attack_cooldown;
    if enemy.body.distance_to(ctx.player_pos) >= enemy.attack_range {
        return None;
    }
    if attack_lands(rng, ctx.player_dexterity) {
        Some(AttackOutcome::Hit(enemy.roll_attack(rng)))
    } else {
        Some(AttackOutcome::Dodged)
    }
}

/// Move straight at `target`, never overshooting it. With `keep_clear` set
/// to `(center, radius)` the step also stops on that circle's edge.
fn step_towards(
    enemy: &mut Enemy,
    target: Vec2,
    speed: f32,
    keep_clear: Option<(Vec2, f32)>,
    ctx: &AiContext,
    blocked: impl FnMut(&Aabb) -> bool,
) {
    let position = enemy.position();
    let Some((direction, distance)) = direction_towards(position, target, ctx.tuning.epsilon) else {
        return;
    };
    enemy.body.face_towards(direction.x);
    let mut step = (speed * ctx.dt).min(distance);
    if let Some((center, radius)) = keep_clear {
        step = step.min(distance_to_circle(position, direction, center, radius));
    }
    enemy.body.move_and_collide(direction * step, blocked);
}

/// How far a ray from `origin` along unit `direction` travels before
/// entering the circle. Infinite when it never does; zero from inside.
fn distance_to_circle(origin: Vec2, direction: Vec2, center: Vec2, radius: f32) -> f32 {
    let offset = origin - center;
    let along = offset.dot(direction);
    let outside = offset.length_squared() - radius * radius;
    if outside <= 0.0 {
        return 0.0;
    }
    let discriminant = along * along - outside;
    if along >= 0.0 || discriminant < 0.0 {
        return f32::INFINITY;
    }
    (-along - discriminant.sqrt()).max(0.0)
}

/// Slow random walk, picking a new heading every few seconds and bouncing
/// off whatever blocks it.
fn wander<R: Rng + ?Sized>(
    enemy: &mut Enemy,
    ctx: &AiContext,
    rng: &mut R,
    blocked: impl FnMut(&Aabb) -> bool,
) {
    enemy.wander_timer -= ctx.dt;
    if enemy.wander_timer <= 0.0 {
        let (lo, hi) = ctx.tuning.wander_interval;
        enemy.wander_dir = Vec2::from_angle(rng.gen_range(0.0..TAU));
        enemy.wander_timer = rng.gen_range(lo.min(hi)..=hi.max(lo));
    }

    let speed = enemy.speed * ctx.tuning.wander_speed_factor;
    enemy.body.face_towards(enemy.wander_dir.x);
    let outcome = enemy.body.move_and_collide(enemy.wander_dir * speed * ctx.dt, blocked);
    if outcome.blocked_x {
        enemy.wander_dir.x = -enemy.wander_dir.x;
    }
    if outcome.blocked_y {
        enemy.wander_dir.y = -enemy.wander_dir.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enemies::{EnemyKind, EnemyRegistry};
    use crate::sim::EntityId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn enemy(kind: EnemyKind, position: Vec2) -> Enemy {
        let registry = EnemyRegistry::builtin();
        let definition = registry.get(kind).expect("built-in definition");
        Enemy::from_definition(EntityId(1), definition, 1, position, 1.0)
    }

    fn context(tuning: &AiTuning, player: Vec2, torch: Option<Vec2>) -> AiContext<'_> {
        AiContext {
            player_pos: player,
            player_dexterity: 0,
            torch_pos: torch,
            tuning,
            dt: 0.016,
        }
    }

    #[test]
    fn torch_lures_until_player_is_seen() {
        let tuning = AiTuning::default();
        let mut slime = enemy(EnemyKind::Slime, Vec2::new(0.0, 0.0));
        let mut rng = StdRng::seed_from_u64(1);

        let ctx = context(&tuning, Vec2::new(300.0, 0.0), Some(Vec2::new(0.0, 100.0)));
        pursue_and_attack(&mut slime, &ctx, &mut rng, |_| false);
        assert_eq!(slime.state, AiState::ChasingTorch);
        assert_eq!(slime.torch_chase_point, Some(Vec2::new(0.0, 20.0)));

        let ctx = context(&tuning, Vec2::new(200.0, 0.0), Some(Vec2::new(0.0, 100.0)));
        pursue_and_attack(&mut slime, &ctx, &mut rng, |_| false);
        assert_eq!(slime.state, AiState::ChasingPlayer);
    }

    #[test]
    fn torch_inside_attack_range_holds_position() {
        let tuning = AiTuning::default();
        let mut slime = enemy(EnemyKind::Slime, Vec2::new(0.0, 0.0));
        let ctx = context(&tuning, Vec2::new(1000.0, 0.0), Some(Vec2::new(50.0, 0.0)));

        assert_eq!(select_target(&mut slime, &ctx), ChaseTarget::Torch(Vec2::ZERO));
        let mut rng = StdRng::seed_from_u64(1);
        pursue_and_attack(&mut slime, &ctx, &mut rng, |_| false);
        assert_eq!(slime.position(), Vec2::ZERO);
    }

    #[test]
    fn torch_point_is_debounced() {
        let tuning = AiTuning::default();
        let mut slime = enemy(EnemyKind::Slime, Vec2::new(0.0, 0.0));
        let ctx = context(&tuning, Vec2::new(1000.0, 0.0), Some(Vec2::new(0.0, 200.0)));
        let first = select_target(&mut slime, &ctx);

        let moved = context(&tuning, Vec2::new(1000.0, 0.0), Some(Vec2::new(0.0, 230.0)));
        assert_eq!(select_target(&mut slime, &moved), first);

        slime.torch_debounce = 0.0;
        assert_eq!(
            select_target(&mut slime, &moved),
            ChaseTarget::Torch(Vec2::new(0.0, 150.0))
        );
    }

    #[test]
    fn debounced_torch_chase_stops_at_attack_range() {
        let tuning = AiTuning::default();
        let mut slime = enemy(EnemyKind::Slime, Vec2::ZERO);
        let mut rng = StdRng::seed_from_u64(1);

        let ctx = context(&tuning, Vec2::new(1000.0, 0.0), Some(Vec2::new(0.0, 200.0)));
        pursue_and_attack(&mut slime, &ctx, &mut rng, |_| false);
        assert_eq!(slime.torch_chase_point, Some(Vec2::new(0.0, 120.0)));

        // The torch closes in while the old chase point is still held.
        let torch = slime.position() + Vec2::new(0.0, 85.0);
        let mut moved = context(&tuning, Vec2::new(1000.0, 0.0), Some(torch));
        moved.dt = 0.1;
        pursue_and_attack(&mut slime, &moved, &mut rng, |_| false);
        assert_eq!(slime.torch_chase_point, Some(Vec2::new(0.0, 120.0)));
        assert_eq!(slime.state, AiState::ChasingTorch);
        assert!(slime.position().distance(torch) >= slime.attack_range - 1e-3);
        assert!(slime.position().y > 4.0);
    }

    #[test]
    fn nothing_in_sight_means_idle() {
        let tuning = AiTuning::default();
        let mut slime = enemy(EnemyKind::Slime, Vec2::ZERO);
        let ctx = context(&tuning, Vec2::new(500.0, 0.0), Some(Vec2::new(0.0, 400.0)));
        assert_eq!(select_target(&mut slime, &ctx), ChaseTarget::Idle);
    }

    #[test]
    fn attack_range_boundary_is_exclusive() {
        let tuning = AiTuning::default();
        let mut rng = StdRng::seed_from_u64(5);

        for distance in [80.0, 80.5, 120.0, 200.0] {
            let mut slime = enemy(EnemyKind::Slime, Vec2::ZERO);
            let ctx = context(&tuning, Vec2::new(distance, 0.0), None);
            // Player hitbox blocks the approach so the distance holds.
            let player_rect = Aabb::from_center(ctx.player_pos, Vec2::new(2.0 * distance - 28.0, 36.0));
            for _ in 0..50 {
                let outcome = pursue_and_attack(&mut slime, &ctx, &mut rng, |r| r.overlaps(&player_rect));
                assert_eq!(outcome, None, "attacked from {}", distance);
            }
        }

        let mut slime = enemy(EnemyKind::Slime, Vec2::ZERO);
        let ctx = context(&tuning, Vec2::new(79.9, 0.0), None);
        let outcome = pursue_and_attack(&mut slime, &ctx, &mut rng, |_| true);
        assert!(matches!(outcome, Some(AttackOutcome::Hit(10..=19))));
        assert_eq!(slime.attack_timer, slime.attack_cooldown);

        // Cooling down: no second attack next frame.
        assert_eq!(pursue_and_attack(&mut slime, &ctx, &mut rng, |_| true), None);
    }

    #[test]
    fn stagger_suspends_movement_but_not_attack_timer() {
        let tuning = AiTuning::default();
        let mut rng = StdRng::seed_from_u64(2);
        let mut slime = enemy(EnemyKind::Slime, Vec2::ZERO);
        slime.cooldown = 0.5;
        slime.attack_timer = 0.5;

        let ctx = context(&tuning, Vec2::new(150.0, 0.0), None);
        pursue_and_attack(&mut slime, &ctx, &mut rng, |_| false);

        assert_eq!(slime.position(), Vec2::ZERO);
        assert_eq!(slime.state, AiState::Staggered);
        assert!(slime.attack_timer < 0.5);
    }

    #[test]
    fn skeleton_winds_up_before_striking() {
        let tuning = AiTuning::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut skeleton = enemy(EnemyKind::Skeleton, Vec2::ZERO);
        let mut ctx = context(&tuning, Vec2::new(50.0, 0.0), None);
        ctx.dt = 0.1;

        assert_eq!(pursue_and_attack(&mut skeleton, &ctx, &mut rng, |_| true), None);
        assert!(skeleton.windup.is_some());
        for _ in 0..2 {
            assert_eq!(pursue_and_attack(&mut skeleton, &ctx, &mut rng, |_| true), None);
        }
        ctx.dt = 0.25;
        let outcome = pursue_and_attack(&mut skeleton, &ctx, &mut rng, |_| true);
        assert!(matches!(outcome, Some(AttackOutcome::Hit(20..=29))));
        assert!(skeleton.windup.is_none());
    }

    #[test]
    fn skeleton_pauses_after_contact() {
        let tuning = AiTuning::default();
        let mut rng = StdRng::seed_from_u64(8);
        let mut skeleton = enemy(EnemyKind::Skeleton, Vec2::ZERO);
        skeleton.player_was_close = true;

        let mut ctx = context(&tuning, Vec2::new(150.0, 0.0), None);
        ctx.dt = 0.5;
        pursue_and_attack(&mut skeleton, &ctx, &mut rng, |_| false);
        assert_eq!(skeleton.position(), Vec2::ZERO);

        pursue_and_attack(&mut skeleton, &ctx, &mut rng, |_| false);
        assert!(skeleton.position().x > 0.0);
        assert_eq!(skeleton.state, AiState::ChasingPlayer);
    }
}
