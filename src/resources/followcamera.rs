//! Follow-camera resource.
//!
//! [`FollowCamera`] holds the scene-wide "point of interest" slot. The
//! slingshot writes the launched projectile into it;
//! [`follow_camera`](crate::systems::followcamera::follow_camera) reads it to
//! steer [`Camera2DRes`](super::camera2d::Camera2DRes) and clears it once the
//! projectile is gone or has stayed slow for `rest_delay` seconds.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

pub const DEFAULT_EASING: f32 = 0.05;
pub const DEFAULT_REST_SPEED: f32 = 5.0;
pub const DEFAULT_REST_DELAY: f32 = 0.5;

#[derive(Resource, Debug, Clone)]
pub struct FollowCamera {
    /// Entity the camera tracks, if any.
    pub poi: Option<Entity>,
    /// Where the camera rests without a POI. Also the left/bottom limit of
    /// the camera target.
    pub home: Vector2,
    /// Fraction of the remaining distance covered per 1/60 s.
    pub easing: f32,
    /// Dynamic POIs slower than this are considered resting.
    pub rest_speed: f32,
    /// Seconds a POI must keep resting before it is released. Bridges the
    /// apex of a steep shot.
    pub rest_delay: f32,
    /// How long the current POI has been resting.
    pub rest_timer: f32,
}

impl FollowCamera {
    pub fn new(home: Vector2) -> Self {
        Self {
            poi: None,
            home,
            easing: DEFAULT_EASING,
            rest_speed: DEFAULT_REST_SPEED,
            rest_delay: DEFAULT_REST_DELAY,
            rest_timer: 0.0,
        }
    }

    /// Track `entity` from now on.
    pub fn follow(&mut self, entity: Entity) {
        self.poi = Some(entity);
        self.rest_timer = 0.0;
    }

    /// Stop tracking and head home.
    pub fn release(&mut self) {
        self.poi = None;
        self.rest_timer = 0.0;
    }

    /// Accumulate `dt` of resting (or reset on motion). Returns true once the
    /// POI has rested for `rest_delay`.
    pub fn tick_rest(&mut self, resting: bool, dt: f32) -> bool {
        if resting {
            self.rest_timer += dt;
        } else {
            self.rest_timer = 0.0;
        }
        resting && self.rest_timer >= self.rest_delay
    }

    pub fn with_easing(mut self, easing: f32) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_rest_speed(mut self, rest_speed: f32) -> Self {
        self.rest_speed = rest_speed;
        self
    }

    pub fn with_rest_delay(mut self, rest_delay: f32) -> Self {
        self.rest_delay = rest_delay;
        self
    }

    /// Keep `destination` right of and above `home` (y grows downward).
    pub fn limit(&self, destination: Vector2) -> Vector2 {
        Vector2 {
            x: destination.x.max(self.home.x),
            y: destination.y.min(self.home.y),
        }
    }

    /// Interpolation factor for a frame of `dt` seconds.
    pub fn blend(&self, dt: f32) -> f32 {
        let easing = self.easing.clamp(0.0, 1.0);
        1.0 - (1.0 - easing).powf(dt * 60.0)
    }
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(Vector2 { x: 0.0, y: 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_keeps_camera_right_of_and_above_home() {
        let cam = FollowCamera::new(Vector2 { x: 100.0, y: 200.0 });
        let d = cam.limit(Vector2 { x: 50.0, y: 300.0 });
        assert_eq!((d.x, d.y), (100.0, 200.0));
        let d = cam.limit(Vector2 { x: 400.0, y: 50.0 });
        assert_eq!((d.x, d.y), (400.0, 50.0));
    }

    #[test]
    fn test_blend_matches_easing_at_sixty_hz() {
        let cam = FollowCamera::default().with_easing(0.25);
        assert!((cam.blend(1.0 / 60.0) - 0.25).abs() < 1e-5);
        assert_eq!(cam.blend(0.0), 0.0);
    }

    #[test]
    fn test_tick_rest_needs_continuous_rest() {
        let mut cam = FollowCamera::default().with_rest_delay(0.3);
        assert!(!cam.tick_rest(true, 0.2));
        // Moving again resets the timer.
        assert!(!cam.tick_rest(false, 0.2));
        assert!(!cam.tick_rest(true, 0.2));
        assert!(cam.tick_rest(true, 0.2));
    }

    #[test]
    fn test_follow_resets_rest_timer() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        let mut cam = FollowCamera::default();
        cam.follow(a);
        cam.tick_rest(true, 0.4);
        cam.follow(b);
        assert_eq!(cam.poi, Some(b));
        assert_eq!(cam.rest_timer, 0.0);
        cam.release();
        assert!(cam.poi.is_none());
    }

    #[test]
    fn test_blend_full_easing_snaps() {
        let cam = FollowCamera::default().with_easing(1.0);
        assert_eq!(cam.blend(1.0 / 60.0), 1.0);
    }
}
