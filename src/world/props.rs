//! Practice targets and doors.
//!
//! Both own a footprint in the level's solids while they block: a live
//! target, a closed door.

use bevy::prelude::*;

use super::geometry::Aabb;
use super::level::Level;
use crate::sim::config::{vec2, PropTuning};
use crate::sim::EntityId;

/// Practice dummy. Respawns after being destroyed.
#[derive(Debug, Clone)]
pub struct Target {
    pub id: EntityId,
    pub position: Vec2,
    pub size: Vec2,
    pub hit_points: i32,
    pub max_hit_points: i32,
    pub respawn_timer: f32,
}

impl Target {
    /// Create a live target and register its footprint.
    pub fn spawn(id: EntityId, position: Vec2, tuning: &PropTuning, level: &mut Level) -> Self {
        let target = Self {
            id,
            position,
            size: vec2(tuning.target_size),
            hit_points: tuning.target_hit_points,
            max_hit_points: tuning.target_hit_points,
            respawn_timer: 0.0,
        };
        level.add_prop_solid(id, target.rect());
        target
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }

    /// Drawn, collidable and hittable.
    pub fn is_active(&self) -> bool {
        self.hit_points > 0
    }

    /// Apply damage. Returns true when this hit destroyed the target.
    pub fn take_damage(&mut self, amount: u32, respawn: f32, level: &mut Level) -> bool {
        if !self.is_active() {
            return false;
        }
        self.hit_points -= amount as i32;
        if self.hit_points <= 0 {
            self.respawn_timer = respawn;
            level.remove_prop_solid(self.id);
            debug!("Target {:?} destroyed, respawning in {}s", self.id, respawn);
            return true;
        }
        false
    }

    /// Count down the respawn timer. A due respawn waits while `occupied`
    /// reports something standing in the footprint.
    pub fn update(&mut self, dt: f32, level: &mut Level, occupied: impl Fn(&Aabb) -> bool) {
        if self.is_active() {
            return;
        }
        self.respawn_timer = (self.respawn_timer - dt).max(0.0);
        if self.respawn_timer <= 0.0 && !occupied(&self.rect()) {
            self.hit_points = self.max_hit_points;
            level.add_prop_solid(self.id, self.rect());
        }
    }
}

/// Door leading to the next level.
#[derive(Debug, Clone)]
pub struct Door {
    pub id: EntityId,
    pub position: Vec2,
    pub size: Vec2,
    pub open: bool,
}

impl Door {
    /// Create a closed door and register its footprint.
    pub fn spawn(id: EntityId, position: Vec2, tuning: &PropTuning, level: &mut Level) -> Self {
        let door = Self {
            id,
            position,
            size: vec2(tuning.door_size),
            open: false,
        };
        level.add_prop_solid(id, door.rect());
        door
    }

    pub fn rect(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }

    pub fn within_reach(&self, point: Vec2, proximity: f32) -> bool {
        self.position.distance(point) <= proximity
    }

    /// Open the door. Returns false if it was already open.
    pub fn open(&mut self, level: &mut Level) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        level.remove_prop_solid(self.id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::testing::level_from_rows;

    #[test]
    fn destroyed_target_respawns_after_timer() {
        let mut level = level_from_rows(&[".....", "....."]);
        let tuning = PropTuning::default();
        let mut target = Target::spawn(EntityId(1), Vec2::new(72.0, 48.0), &tuning, &mut level);
        assert!(level.has_prop_solid(target.id));

        assert!(!target.take_damage(299, tuning.target_respawn, &mut level));
        assert!(target.take_damage(1, tuning.target_respawn, &mut level));
        assert!(!target.is_active());
        assert!(!level.has_prop_solid(target.id));

        target.update(4.0, &mut level, |_| false);
        assert!(!target.is_active());

        target.update(1.0, &mut level, |_| false);
        assert!(target.is_active());
        assert_eq!(target.hit_points, 300);
        assert!(level.has_prop_solid(target.id));
    }

    #[test]
    fn respawn_waits_for_clear_footprint() {
        let mut level = level_from_rows(&["....."]);
        let tuning = PropTuning::default();
        let mut target = Target::spawn(EntityId(1), Vec2::new(72.0, 24.0), &tuning, &mut level);
        target.take_damage(500, tuning.target_respawn, &mut level);

        target.update(6.0, &mut level, |_| true);
        assert!(!target.is_active());
        target.update(0.016, &mut level, |_| false);
        assert!(target.is_active());
    }

    #[test]
    fn opening_door_removes_footprint_once() {
        let mut level = level_from_rows(&["....."]);
        let mut door = Door::spawn(EntityId(3), Vec2::new(24.0, 24.0), &PropTuning::default(), &mut level);
        assert!(level.blocks(&door.rect()));
        assert!(door.open(&mut level));
        assert!(!door.open(&mut level));
        assert!(!level.blocks(&Aabb::new(10.0, 10.0, 4.0, 4.0)));
    }
}
