//! Engine systems.
//!
//! This module groups all ECS systems that advance simulation, input, and
//! rendering.
//!
//! Submodules overview
//! - [`followcamera`] – ease the shared camera toward the follow target
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`movement`] – integrate dynamic rigid bodies and resolve them against static boxes
//! - [`propagate_transforms`] – world positions for parent/child hierarchies
//! - [`render`] – draw world and debug overlays using raylib
//! - [`slingshot`] – slingshot initialization, hover and aim/launch
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – despawn entities whose time-to-live ran out

pub mod followcamera;
pub mod input;
pub mod movement;
pub mod propagate_transforms;
pub mod render;
pub mod slingshot;
pub mod time;
pub mod ttl;
