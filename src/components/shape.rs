//! Primitive shape rendering component.
//!
//! Shapes are drawn centered on the entity's world position, filled with the
//! entity's [`Tint`](super::tint::Tint).

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// Outlined circle, used for markers.
    Ring { radius: f32, thickness: f32 },
    Rect { width: f32, height: f32 },
}

impl Shape {
    pub fn circle(radius: f32) -> Self {
        Shape::Circle { radius }
    }

    pub fn rect(width: f32, height: f32) -> Self {
        Shape::Rect { width, height }
    }

    /// Half extents of the shape's bounding box.
    pub fn half_extents(&self) -> (f32, f32) {
        match *self {
            Shape::Circle { radius } => (radius, radius),
            Shape::Ring { radius, thickness } => (radius + thickness, radius + thickness),
            Shape::Rect { width, height } => (width * 0.5, height * 0.5),
        }
    }
}
