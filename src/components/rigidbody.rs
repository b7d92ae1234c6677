//! Physics body component with named acceleration forces.
//!
//! The [`RigidBody`] component stores velocity and multiple named acceleration
//! forces for an entity. Each force can be individually enabled/disabled, so a
//! projectile template can carry gravity while the body is still being aimed.
//!
//! A body is either [`BodyKind::Kinematic`] (moved only by direct position
//! assignment, the movement system skips it) or [`BodyKind::Dynamic`]
//! (integrated every frame). Dynamic bodies pick a [`CollisionDetection`] mode;
//! `Continuous` sub-steps the motion so fast bodies cannot skip over thin
//! colliders.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vector2,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vector2) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// How the movement system treats a body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BodyKind {
    /// Not driven by forces or collisions; position is assigned directly.
    Kinematic,
    /// Integrated from forces and velocity, resolved against static colliders.
    #[default]
    Dynamic,
}

/// Collision detection mode for dynamic bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CollisionDetection {
    /// One collision check per frame, at the end position.
    #[default]
    Discrete,
    /// Motion split into sub-steps no longer than half the collider radius.
    Continuous,
}

/// Physics body storing velocity and multiple named acceleration forces.
///
/// # Fields
/// - `velocity` - Current velocity in world units per second
/// - `forces` - Named acceleration forces that can be individually toggled
/// - `friction` - Air damping factor (0.0 = no friction, higher = more drag)
/// - `max_speed` - Optional maximum speed clamp
/// - `restitution` - Bounciness on contact (0.0 = no bounce, 1.0 = elastic)
/// - `kind` - Kinematic or dynamic
/// - `collision_detection` - Discrete or continuous
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::kinematic();
/// rb.add_force("gravity", Vector2 { x: 0.0, y: 980.0 });
///
/// // Release it
/// rb.set_dynamic(CollisionDetection::Continuous);
/// rb.set_velocity(Vector2 { x: 300.0, y: -200.0 });
/// ```
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vector2,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// Velocity damping factor. Applied as: velocity *= (1 - friction * delta).
    pub friction: f32,
    /// Optional maximum speed. If set, velocity magnitude is clamped to this value.
    pub max_speed: Option<f32>,
    /// Fraction of normal speed kept when bouncing off a collider.
    pub restitution: f32,
    pub kind: BodyKind,
    pub collision_detection: CollisionDetection,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new()
    }
}

impl RigidBody {
    /// Create a dynamic RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            forces: FxHashMap::default(),
            friction: 0.0,
            max_speed: None,
            restitution: 0.0,
            kind: BodyKind::Dynamic,
            collision_detection: CollisionDetection::Discrete,
        }
    }

    /// Create a kinematic RigidBody with zero velocity and no forces.
    pub fn kinematic() -> Self {
        Self {
            kind: BodyKind::Kinematic,
            ..Self::new()
        }
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vector2) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Check if a force exists and is enabled.
    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).map(|f| f.enabled).unwrap_or(false)
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vector2 {
        let mut total = Vector2 { x: 0.0, y: 0.0 };
        for force in self.forces.values() {
            if force.enabled {
                total += force.value;
            }
        }
        total
    }

    /// Set the velocity of the RigidBody.
    pub fn set_velocity(&mut self, velocity: Vector2) {
        self.velocity = velocity;
    }

    pub fn is_kinematic(&self) -> bool {
        self.kind == BodyKind::Kinematic
    }

    /// Hand the body to the movement system with the given collision mode.
    pub fn set_dynamic(&mut self, mode: CollisionDetection) {
        self.kind = BodyKind::Dynamic;
        self.collision_detection = mode;
    }

    /// Clamp the velocity magnitude to `max_speed`, if one is set.
    pub fn clamp_speed(&mut self) {
        if let Some(max) = self.max_speed {
            if self.velocity.length() > max {
                self.velocity = self.velocity.normalized() * max;
            }
        }
    }
}
