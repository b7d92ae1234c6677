//! Shared 2D camera resource.
//!
//! Wraps raylib's [`raylib::prelude::Camera2D`] so that the input system (pointer
//! projection), the follow camera and the render pass agree on a single
//! world/screen transform.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera2D, Vector2};

/// ECS resource that holds the active 2D camera parameters.
#[derive(Resource, Clone, Copy)]
pub struct Camera2DRes(pub Camera2D);

impl Camera2DRes {
    /// Camera looking at `target`, which appears at the center of a
    /// `screen_w` x `screen_h` framebuffer.
    pub fn centered_on(target: Vector2, screen_w: i32, screen_h: i32, zoom: f32) -> Self {
        Self(Camera2D {
            target,
            offset: Vector2 {
                x: screen_w as f32 * 0.5,
                y: screen_h as f32 * 0.5,
            },
            rotation: 0.0,
            zoom,
        })
    }

    pub fn target(&self) -> Vector2 {
        self.0.target
    }
}
