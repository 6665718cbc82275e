//! 2D collision primitives and axis-separated movement.
//!
//! World space is measured in pixels with the y axis pointing down, matching
//! the tile grid rows. Conversion to Bevy's y-up space happens only in the
//! rendering layer.

use bevy::prelude::*;

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// Rectangle of the given size centred on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test. Rectangles sharing only an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Inclusive point test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Same rectangle grown by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Self {
        Self::new(
            self.x - margin,
            self.y - margin,
            self.w + margin * 2.0,
            self.h + margin * 2.0,
        )
    }
}

/// True if `rect` overlaps any rectangle in `solids`.
pub fn overlaps_any<'a>(rect: &Aabb, solids: impl IntoIterator<Item = &'a Aabb>) -> bool {
    solids.into_iter().any(|solid| rect.overlaps(solid))
}

/// Which axes were rejected during a move.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoveOutcome {
    pub blocked_x: bool,
    pub blocked_y: bool,
    /// Displacement actually applied.
    pub moved: Vec2,
}

/// Centre-anchored collision body shared by everything that walks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub size: Vec2,
    pub facing_left: bool,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            facing_left: false,
        }
    }

    /// Hitbox, which doubles as the hurtbox.
    pub fn rect(&self) -> Aabb {
        Aabb::from_center(self.position, self.size)
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }

    /// Update facing from a horizontal intent. Zero keeps the current facing.
    pub fn face_towards(&mut self, dx: f32) {
        if dx < 0.0 {
            self.facing_left = true;
        } else if dx > 0.0 {
            self.facing_left = false;
        }
    }

    /// Apply `delta` one axis at a time, reverting an axis entirely when the
    /// resulting hitbox is blocked.
    ///
    /// There is no push-out: a blocked axis simply does not move this frame,
    /// while the other axis is still free to slide along the obstacle.
    pub fn move_and_collide(
        &mut self,
        delta: Vec2,
        mut blocked: impl FnMut(&Aabb) -> bool,
    ) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();

        if delta.x != 0.0 {
            let previous = self.position.x;
            self.position.x += delta.x;
            if blocked(&self.rect()) {
                self.position.x = previous;
                outcome.blocked_x = true;
            } else {
                outcome.moved.x = delta.x;
            }
        }

        if delta.y != 0.0 {
            let previous = self.position.y;
            self.position.y += delta.y;
            if blocked(&self.rect()) {
                self.position.y = previous;
                outcome.blocked_y = true;
            } else {
                outcome.moved.y = delta.y;
            }
        }

        outcome
    }
}

/// Unit vector from `from` towards `to`, or `None` when the points are closer
/// than `epsilon`.
pub fn direction_towards(from: Vec2, to: Vec2, epsilon: f32) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let distance = delta.length();
    if distance > epsilon {
        Some((delta / distance, distance))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall(x: f32, y: f32) -> Aabb {
        Aabb::new(x, y, 48.0, 48.0)
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Aabb::new(9.5, 9.5, 2.0, 2.0)));
    }

    #[test]
    fn blocked_move_reverts_without_penetration() {
        let solids = [wall(48.0, 0.0)];
        let mut body = Body::new(Vec2::new(24.0, 24.0), Vec2::new(28.0, 36.0));

        for _ in 0..20 {
            body.move_and_collide(Vec2::new(7.0, 0.0), |r| overlaps_any(r, &solids));
            assert!(!overlaps_any(&body.rect(), &solids));
        }
        // Right edge stops short of the wall without being pushed flush.
        assert!(body.rect().right() <= 48.0);
    }

    #[test]
    fn diagonal_into_wall_slides_along_free_axis() {
        // Wall directly to the right; moving down-right only moves down.
        let solids = [wall(48.0, 0.0), wall(48.0, 48.0), wall(48.0, 96.0)];
        let mut body = Body::new(Vec2::new(33.0, 60.0), Vec2::new(28.0, 36.0));
        let start = body.position;

        let outcome = body.move_and_collide(Vec2::new(5.0, 5.0), |r| overlaps_any(r, &solids));

        assert!(outcome.blocked_x);
        assert!(!outcome.blocked_y);
        assert_eq!(body.position.x, start.x);
        assert_eq!(body.position.y, start.y + 5.0);
    }

    #[test]
    fn corner_blocks_both_axes() {
        // Inside corner: wall right and wall below.
        let solids = [wall(48.0, 0.0), wall(0.0, 48.0), wall(48.0, 48.0)];
        let mut body = Body::new(Vec2::new(33.0, 29.0), Vec2::new(28.0, 36.0));
        let start = body.position;

        let outcome = body.move_and_collide(Vec2::new(4.0, 4.0), |r| overlaps_any(r, &solids));

        assert!(outcome.blocked_x && outcome.blocked_y);
        assert_eq!(body.position, start);
    }

    #[test]
    fn direction_towards_guards_coincident_points() {
        assert!(direction_towards(Vec2::ZERO, Vec2::new(0.5, 0.0), 1.0).is_none());
        let (dir, dist) = direction_towards(Vec2::ZERO, Vec2::new(3.0, 4.0), 1.0).unwrap();
        assert!((dist - 5.0).abs() < 1e-5);
        assert!((dir.length() - 1.0).abs() < 1e-5);
    }
}
