//! World-space position component.
//!
//! For root entities [`MapPosition`] is the world position. For entities with a
//! [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent it is an offset from the
//! parent; the world result lives in
//! [`GlobalTransform2D`](super::globaltransform2d::GlobalTransform2D).

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

#[derive(Component, Clone, Copy, Debug)]
pub struct MapPosition {
    pub pos: Vector2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vector2 { x, y },
        }
    }

    pub fn from_vec(pos: Vector2) -> Self {
        Self { pos }
    }
}
