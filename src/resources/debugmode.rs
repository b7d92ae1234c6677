//! Debug toggle resource.
//!
//! The mere presence of this resource indicates that the debug overlay
//! (collider outlines, draw radius, slingshot state) should be drawn.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the render pass draws debug overlays.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
