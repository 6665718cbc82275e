//! Read-only snapshot of the simulation for rendering.

use bevy::prelude::*;

use super::ids::EntityId;
use super::state::SimulationState;
use crate::enemies::EnemyKind;

/// Closed set of things the renderer can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Slime,
    Skeleton,
    Projectile,
    Target,
    Door,
    Torch,
}

impl From<EnemyKind> for EntityKind {
    fn from(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Slime => EntityKind::Slime,
            EnemyKind::Skeleton => EntityKind::Skeleton,
        }
    }
}

/// One drawable entity. Positions are simulation space, y down.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
    pub facing_left: bool,
    pub tag: String,
}

impl SimulationState {
    /// Snapshot of every visible entity. Destroyed targets are reported with
    /// a `respawning` tag so the renderer can hide them.
    pub fn views(&self) -> Vec<EntityView> {
        let mut views = Vec::with_capacity(self.enemies.len() + self.fireballs.len() + 8);

        let player = &self.player;
        let player_tag = if player.swing.active {
            format!("attacking#{}", player.swing.frame)
        } else if player.moving {
            "walking".to_string()
        } else {
            "idle".to_string()
        };
        views.push(EntityView {
            id: player.id,
            kind: EntityKind::Player,
            position: player.body.position,
            size: player.body.size,
            facing_left: player.body.facing_left,
            tag: player_tag,
        });

        views.extend(self.enemies.iter().map(|enemy| EntityView {
            id: enemy.id,
            kind: enemy.kind.into(),
            position: enemy.body.position,
            size: enemy.body.size,
            facing_left: enemy.body.facing_left,
            tag: enemy.tag().to_string(),
        }));

        views.extend(self.fireballs.iter().map(|fireball| EntityView {
            id: fireball.id,
            kind: EntityKind::Projectile,
            position: fireball.position,
            size: fireball.size,
            facing_left: fireball.direction.x < 0.0,
            tag: fireball.tag(),
        }));

        views.extend(self.targets.iter().map(|target| EntityView {
            id: target.id,
            kind: EntityKind::Target,
            position: target.position,
            size: target.size,
            facing_left: false,
            tag: if target.is_active() { "idle" } else { "respawning" }.to_string(),
        }));

        views.extend(self.doors.iter().map(|door| EntityView {
            id: door.id,
            kind: EntityKind::Door,
            position: door.position,
            size: door.size,
            facing_left: false,
            tag: if door.open { "open" } else { "closed" }.to_string(),
        }));

        if let Some(torch) = &self.torch {
            views.push(EntityView {
                id: torch.id,
                kind: EntityKind::Torch,
                position: torch.body.position,
                size: torch.body.size,
                facing_left: torch.body.facing_left,
                tag: torch.mode.tag().to_string(),
            });
        }

        views
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testing::state_from_rows;

    #[test]
    fn snapshot_covers_every_entity_kind() {
        let state = state_from_rows(&["######", "#.0.5#", "#..7.#", "######"]);
        let views = state.views();

        let count = |kind| views.iter().filter(|v| v.kind == kind).count();
        assert_eq!(count(EntityKind::Player), 1);
        assert_eq!(count(EntityKind::Slime), 1);
        assert_eq!(count(EntityKind::Target), 1);
        assert_eq!(count(EntityKind::Door), 1);
        assert_eq!(count(EntityKind::Torch), 1);

        let door = views.iter().find(|v| v.kind == EntityKind::Door).map(|v| v.tag.as_str());
        assert_eq!(door, Some("closed"));
        let player = views.iter().find(|v| v.kind == EntityKind::Player).map(|v| v.tag.as_str());
        assert_eq!(player, Some("idle"));
    }
}
