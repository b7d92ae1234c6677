//! Slingshot library.
//!
//! Exposes the ECS components, resources, systems, and events behind the
//! slingshot game for use in integration tests and by the binary.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
