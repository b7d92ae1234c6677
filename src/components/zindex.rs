//! Z-index component for render and pick ordering.
//!
//! Entities with higher z-index values are drawn on top of those with lower
//! values, and win pointer picks when colliders overlap.

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing.
///
/// Higher values are drawn later (on top). Entities without a `ZIndex` are
/// treated as `ZIndex(0)`.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
