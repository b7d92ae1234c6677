//! Circular collider.
//!
//! Used for the slingshot's grab volume (its radius is the maximum draw
//! distance) and for projectile bodies.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct CircleCollider {
    pub radius: f32,
    /// Center offset from the entity position.
    pub offset: Vector2,
}

impl CircleCollider {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            offset: Vector2::zero(),
        }
    }

    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// World-space center for a given entity position.
    pub fn center(&self, position: Vector2) -> Vector2 {
        position + self.offset
    }

    /// Point containment in world space. Points on the rim count as inside.
    pub fn contains_point(&self, position: Vector2, point: Vector2) -> bool {
        let d = point - self.center(position);
        d.x * d.x + d.y * d.y <= self.radius * self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_respects_offset() {
        let c = CircleCollider::new(5.0).with_offset(Vector2::new(10.0, 0.0));
        let pos = Vector2::new(0.0, 0.0);
        assert!(c.contains_point(pos, Vector2::new(10.0, 0.0)));
        assert!(c.contains_point(pos, Vector2::new(15.0, 0.0)));
        assert!(!c.contains_point(pos, Vector2::new(0.0, 0.0)));
    }

    #[test]
    fn test_center() {
        let c = CircleCollider::new(1.0).with_offset(Vector2::new(2.0, 3.0));
        let center = c.center(Vector2::new(10.0, 10.0));
        assert_eq!((center.x, center.y), (12.0, 13.0));
    }
}
