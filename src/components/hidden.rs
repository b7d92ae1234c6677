//! Visibility marker.
//!
//! The mere presence of [`Hidden`] keeps an entity out of the render pass.
//! Systems show an entity by removing the component.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Hidden;
