//! Smooth translation toward a moving target.

use bevy::prelude::*;

/// Component for smooth 2D translation interpolation. Z is left alone.
#[derive(Component)]
pub struct SmoothFollow {
    /// Target in render space (None = don't animate)
    pub target: Option<Vec2>,
    /// Interpolation speed multiplier (higher = faster)
    pub speed: f32,
}

impl Default for SmoothFollow {
    fn default() -> Self {
        Self {
            target: None,
            speed: 8.0,
        }
    }
}

impl SmoothFollow {
    pub fn new(speed: f32) -> Self {
        Self { speed, ..default() }
    }
}

/// Fraction of the remaining distance to cover this frame.
pub fn follow_factor(speed: f32, dt: f32) -> f32 {
    (speed * dt).clamp(0.0, 1.0)
}

/// System that interpolates transforms toward their targets.
pub fn update_smooth_follow(time: Res<Time>, mut query: Query<(&mut Transform, &SmoothFollow)>) {
    let dt = time.delta_secs();

    for (mut transform, follow) in query.iter_mut() {
        if let Some(target) = follow.target {
            let t = follow_factor(follow.speed, dt);
            let current = transform.translation.truncate();
            let next = current.lerp(target, t);
            transform.translation.x = next.x;
            transform.translation.y = next.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follow_factor_never_overshoots() {
        assert_eq!(follow_factor(8.0, 1.0), 1.0);
        assert_eq!(follow_factor(8.0, 0.0), 0.0);
        assert!((follow_factor(8.0, 0.05) - 0.4).abs() < 1e-6);
    }
}
