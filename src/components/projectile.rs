//! Projectile marker and the template slingshots spawn from.

use bevy_ecs::prelude::Component;
use raylib::prelude::{Color, Vector2};

use super::rigidbody::RigidBody;

/// Marker for entities spawned by a slingshot.
///
/// Projectiles are never pickable, so a shot being aimed does not steal the
/// hover from the slingshot underneath it.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Projectile;

/// Everything needed to spawn a projectile.
#[derive(Clone, Copy, Debug)]
pub struct ProjectileTemplate {
    pub radius: f32,
    pub color: Color,
    /// Downward acceleration in world units per second squared.
    pub gravity: f32,
    /// Air damping, see [`RigidBody::friction`].
    pub friction: f32,
    pub restitution: f32,
    /// Seconds a launched projectile lives. Zero or less keeps it forever.
    pub lifetime: f32,
}

impl Default for ProjectileTemplate {
    fn default() -> Self {
        Self {
            radius: 12.0,
            color: Color::new(200, 60, 40, 255),
            gravity: 980.0,
            friction: 0.1,
            restitution: 0.4,
            lifetime: 10.0,
        }
    }
}

impl ProjectileTemplate {
    /// The body a freshly spawned projectile starts with: kinematic, gravity
    /// already attached so it takes effect as soon as the body goes dynamic.
    pub fn body(&self) -> RigidBody {
        let mut body = RigidBody::kinematic();
        body.friction = self.friction;
        body.restitution = self.restitution;
        body.add_force("gravity", Vector2 { x: 0.0, y: self.gravity });
        body
    }
}
