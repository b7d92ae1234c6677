//! Computed world-space position for entities in a hierarchy.
//!
//! When an entity has a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent, its
//! [`MapPosition`] is interpreted as local to the parent. The
//! [`propagate_transforms`](crate::systems::propagate_transforms::propagate_transforms)
//! system computes the resulting world-space position and stores it here.

use bevy_ecs::prelude::*;
use raylib::math::Vector2;

use super::mapposition::MapPosition;

/// Computed world-space transform for hierarchical entities.
///
/// Roots mirror their own `MapPosition`; children hold the sum of the
/// ancestor chain.
#[derive(Component, Clone, Copy, Debug)]
pub struct GlobalTransform2D {
    /// World-space position.
    pub position: Vector2,
}

impl Default for GlobalTransform2D {
    fn default() -> Self {
        Self {
            position: Vector2 { x: 0.0, y: 0.0 },
        }
    }
}

/// World position of an entity: the propagated transform when there is one,
/// the raw `MapPosition` otherwise.
pub fn world_position(pos: &MapPosition, global: Option<&GlobalTransform2D>) -> Vector2 {
    global.map(|g| g.position).unwrap_or(pos.pos)
}
