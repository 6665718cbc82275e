//! Merging of crowded enemies into a single larger one.

use bevy::prelude::*;

use super::components::Enemy;
use super::data::EnemyRegistry;
use crate::sim::config::AiTuning;
use crate::sim::EntityId;
use crate::world::Aabb;

/// Groups of at least `threshold` enemies whose hitboxes all touch one
/// another. Two hitboxes touch when they come within `margin` of each other;
/// a chain where only neighbours touch is not a group.
pub fn find_clusters(rects: &[(EntityId, Aabb)], margin: f32, threshold: usize) -> Vec<Vec<EntityId>> {
    let touches = |a: usize, b: usize| rects[a].1.inflate(margin).overlaps(&rects[b].1);
    let mut taken = vec![false; rects.len()];
    let mut clusters = Vec::new();

    for seed in 0..rects.len() {
        if taken[seed] {
            continue;
        }
        let mut group = vec![seed];
        for other in 0..rects.len() {
            if other != seed && !taken[other] && group.iter().all(|&member| touches(member, other)) {
                group.push(other);
            }
        }
        if group.len() >= threshold.max(2) {
            for &member in &group {
                taken[member] = true;
            }
            clusters.push(group.into_iter().map(|index| rects[index].0).collect());
        }
    }
    clusters
}

/// Build the enemy replacing `members`: centred on their centroid, the kind
/// of the largest member at the highest member level, `merge_scale` times the
/// largest member's size, worth the sum of their xp.
pub fn merge_members(
    id: EntityId,
    members: &[&Enemy],
    registry: &EnemyRegistry,
    tuning: &AiTuning,
) -> Option<Enemy> {
    let largest = members
        .iter()
        .max_by(|a, b| {
            let area = |e: &Enemy| e.body.size.x * e.body.size.y;
            area(a).total_cmp(&area(b))
        })?;
    let Some(definition) = registry.get(largest.kind) else {
        warn!("No definition for {:?}, skipping merge", largest.kind);
        return None;
    };

    let centroid = members.iter().map(|e| e.position()).sum::<Vec2>() / members.len() as f32;
    let level = members.iter().map(|e| e.level).max().unwrap_or(1);
    let xp_reward = members.iter().map(|e| e.xp_reward).sum();

    let mut merged = Enemy::from_definition(id, definition, level, centroid, 1.0);
    merged.body.size = largest.body.size * tuning.merge_scale;
    merged.xp_reward = xp_reward;
    merged.cooldown = tuning.merge_cooldown;
    merged.merged = true;
    Some(merged)
}
